use crate::egui_app::api_client::ApiClient;
use crate::egui_app::auth::AuthState;
use crate::egui_app::forms::{ProfileForm, SignInForm, SignUpForm};
use crate::egui_app::home::{default_export_dir, export_dataset, HomeState};
use crate::egui_app::router::{Resolution, Route, Router};
use crate::egui_app::session::{Session, SessionStore};
use crate::egui_app::tasks::{RequestSlot, TaskRunner};
use crate::egui_app::toast::Toasts;
use crate::egui_app::Config;
use crate::shared::api::{BearerToken, ProfileUpdate, UserProfile};
use crate::shared::dataset::{GenerateOutcome, ServiceHealth, TrainingResult};
use crate::shared::error::{ApiError, ErrorKind};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
pub const ALREADY_SIGNED_IN: &str = "You are already signed in. Log out to use another account.";

type AuthResult = Result<(BearerToken, UserProfile), ApiError>;

/// In-flight requests, one slot per triggering control.
#[derive(Default)]
struct Requests {
    sign_in: RequestSlot<AuthResult>,
    sign_up: RequestSlot<AuthResult>,
    profile: RequestSlot<Result<UserProfile, ApiError>>,
    profile_update: RequestSlot<Result<ProfileUpdate, ApiError>>,
    logout: RequestSlot<Result<(), ApiError>>,
    generate: RequestSlot<Result<GenerateOutcome, ApiError>>,
    train: RequestSlot<Result<TrainingResult, ApiError>>,
    health: RequestSlot<Result<ServiceHealth, ApiError>>,
}

impl Requests {
    fn any_busy(&self) -> bool {
        self.sign_in.is_busy()
            || self.sign_up.is_busy()
            || self.profile.is_busy()
            || self.profile_update.is_busy()
            || self.logout.is_busy()
            || self.generate.is_busy()
            || self.train.is_busy()
            || self.health.is_busy()
    }

    /// Forget everything tied to the old session. Logout keeps running.
    fn cancel_authenticated(&mut self) {
        self.profile.cancel();
        self.profile_update.cancel();
        self.generate.cancel();
        self.train.cancel();
    }
}

/// Which auth form produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    SignIn,
    SignUp,
}

/// Central application state handed to every view.
pub struct AppState {
    pub config: Config,
    api: ApiClient,
    runner: TaskRunner,
    sessions: SessionStore,
    requests: Requests,
    pub auth_state: AuthState,
    pub router: Router,
    pub sign_in_form: SignInForm,
    pub sign_up_form: SignUpForm,
    pub profile_form: ProfileForm,
    pub profile: Option<UserProfile>,
    pub home: HomeState,
    pub toasts: Toasts,
}

impl AppState {
    pub fn new() -> std::io::Result<Self> {
        let config = Config::new();
        let sessions = SessionStore::open(config.session_file());
        Self::with_parts(config, sessions)
    }

    pub fn with_parts(config: Config, mut sessions: SessionStore) -> std::io::Result<Self> {
        let runner = TaskRunner::new()?;
        let auth_state = match sessions.load() {
            Some(session) => {
                tracing::info!("Restored session for {}", session.user.username);
                AuthState::restored(session.user)
            }
            None => AuthState::new(),
        };

        Ok(Self {
            api: ApiClient::new(config.clone()),
            config,
            runner,
            sessions,
            requests: Requests::default(),
            auth_state,
            router: Router::default(),
            sign_in_form: SignInForm::default(),
            sign_up_form: SignUpForm::default(),
            profile_form: ProfileForm::default(),
            profile: None,
            home: HomeState::default(),
            toasts: Toasts::new(),
        })
    }

    /// Current session as persisted in the store
    pub fn session(&mut self) -> Option<Session> {
        self.sessions.load()
    }

    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    /// Whether any request is still in flight
    pub fn is_busy(&self) -> bool {
        self.requests.any_busy()
    }

    pub fn is_signing_in(&self) -> bool {
        self.requests.sign_in.is_busy()
    }

    pub fn is_signing_up(&self) -> bool {
        self.requests.sign_up.is_busy()
    }

    pub fn is_loading_profile(&self) -> bool {
        self.requests.profile.is_busy()
    }

    pub fn is_saving_profile(&self) -> bool {
        self.requests.profile_update.is_busy()
    }

    pub fn is_generating(&self) -> bool {
        self.requests.generate.is_busy()
    }

    pub fn is_training(&self) -> bool {
        self.requests.train.is_busy()
    }

    /// Once per frame, before anything is drawn.
    pub fn update(&mut self) {
        self.poll_requests();
        self.toasts.prune(std::time::Instant::now());
        let session = self.sessions.load();
        self.router.enforce(session.as_ref());
    }

    pub fn navigate(&mut self, route: Route) -> Resolution {
        let session = self.sessions.load();
        let resolution = self.router.navigate(route, session.as_ref());
        match resolution {
            Resolution::Render(Route::Profile) => self.load_profile(),
            Resolution::Render(Route::Home) if self.home.health.is_none() => self.check_health(),
            _ => {}
        }
        resolution
    }

    /// Opens a location given as a path, e.g. `/profile` passed on the
    /// command line. Unknown paths leave the current route alone.
    pub fn open_path(&mut self, path: &str) -> Option<Resolution> {
        let Some(route) = Route::from_path(path) else {
            tracing::warn!("Ignoring unknown path {path:?}");
            return None;
        };
        Some(self.navigate(route))
    }

    fn poll_requests(&mut self) {
        if let Some(result) = self.requests.sign_in.take_ready() {
            self.apply_auth_result(AuthForm::SignIn, result);
        }
        if let Some(result) = self.requests.sign_up.take_ready() {
            self.apply_auth_result(AuthForm::SignUp, result);
        }
        if let Some(result) = self.requests.profile.take_ready() {
            self.apply_profile_result(result);
        }
        if let Some(result) = self.requests.profile_update.take_ready() {
            self.apply_profile_update_result(result);
        }
        if let Some(result) = self.requests.logout.take_ready() {
            match result {
                Ok(()) => tracing::debug!("Server acknowledged logout"),
                Err(e) => tracing::warn!("Logout request failed: {}", e),
            }
        }
        if let Some(result) = self.requests.generate.take_ready() {
            self.apply_generate_result(result);
        }
        if let Some(result) = self.requests.train.take_ready() {
            self.apply_train_result(result);
        }
        if let Some(result) = self.requests.health.take_ready() {
            match result {
                Ok(health) => self.home.health = Some(health),
                Err(e) => tracing::warn!("Health check failed: {}", e),
            }
        }
    }

    pub fn handle_sign_in(&mut self) {
        if self.auth_state.is_authenticated() {
            self.sign_in_form.errors.set_form(ALREADY_SIGNED_IN);
            return;
        }
        if self.is_signing_in() || self.auth_state.is_loading() {
            return;
        }
        let Some(request) = self.sign_in_form.validate() else {
            tracing::debug!(
                "Sign-in form rejected: {:?}",
                self.sign_in_form.errors.to_validation_errors()
            );
            return;
        };

        self.auth_state.submit();
        let api = self.api.clone();
        let pending = self.runner.spawn(async move { api.sign_in(&request).await });
        self.requests.sign_in.start(pending);
    }

    pub fn handle_sign_up(&mut self) {
        if self.auth_state.is_authenticated() {
            self.sign_up_form.errors.set_form(ALREADY_SIGNED_IN);
            return;
        }
        if self.is_signing_up() || self.auth_state.is_loading() {
            return;
        }
        let Some(request) = self.sign_up_form.validate() else {
            tracing::debug!(
                "Sign-up form rejected: {:?}",
                self.sign_up_form.errors.to_validation_errors()
            );
            return;
        };

        self.auth_state.submit();
        let api = self.api.clone();
        let pending = self.runner.spawn(async move { api.sign_up(&request).await });
        self.requests.sign_up.start(pending);
    }

    pub fn apply_auth_result(&mut self, form: AuthForm, result: AuthResult) {
        match result {
            Ok((token, user)) => {
                tracing::info!("Authenticated as {}", user.username);
                self.sessions.save(&token, &user);
                self.auth_state.succeed(user);
                // The auth payload is partial; the Profile route fetches the full record.
                self.profile = None;
                match form {
                    AuthForm::SignIn => self.sign_in_form.reset(),
                    AuthForm::SignUp => {
                        self.sign_up_form.reset();
                        self.toasts.success("Account created successfully");
                    }
                }
                self.navigate(Route::Home);
            }
            Err(e) => {
                let message = match (&e, form) {
                    (ApiError::Auth { .. }, AuthForm::SignIn) => INVALID_CREDENTIALS.to_string(),
                    (ApiError::Auth { .. }, AuthForm::SignUp) => e.to_string(),
                    (ApiError::Network { .. }, _) => {
                        "Unable to reach the server. Please try again.".to_string()
                    }
                    (_, AuthForm::SignIn) => format!("Sign in failed: {}", e),
                    (_, AuthForm::SignUp) => format!("Sign up failed: {}", e),
                };
                tracing::warn!("Authentication failed ({:?}): {}", e.kind(), e);
                if e.kind() != ErrorKind::Auth {
                    self.toasts.error(message.clone());
                }
                self.auth_state.fail(message);
            }
        }
    }

    fn bearer(&mut self) -> Option<BearerToken> {
        self.sessions.load().map(|session| session.token)
    }

    pub fn load_profile(&mut self) {
        if self.is_loading_profile() {
            return;
        }
        let Some(token) = self.bearer() else {
            self.expire_session();
            return;
        };
        let api = self.api.clone();
        let pending = self.runner.spawn(async move { api.profile(&token).await });
        self.requests.profile.start(pending);
    }

    pub fn apply_profile_result(&mut self, result: Result<UserProfile, ApiError>) {
        match result {
            Ok(profile) => {
                if let Some(session) = self.sessions.load() {
                    self.sessions.save(&session.token, &profile);
                }
                self.auth_state.user = Some(profile.clone());
                self.profile = Some(profile);
            }
            Err(e) => self.handle_api_error(e, "Failed to load profile"),
        }
    }

    pub fn begin_profile_edit(&mut self) {
        if let Some(profile) = &self.profile {
            self.profile_form.begin(profile);
        }
    }

    pub fn save_profile(&mut self) {
        if self.is_saving_profile() {
            return;
        }
        let Some(profile) = self.profile.clone() else {
            return;
        };
        let Some(update) = self.profile_form.validate(&profile) else {
            return;
        };
        let Some(token) = self.bearer() else {
            self.expire_session();
            return;
        };

        let api = self.api.clone();
        let pending = self.runner.spawn(async move {
            let result = api.update_profile(&token, &update).await;
            result.map(|()| update)
        });
        self.requests.profile_update.start(pending);
    }

    pub fn apply_profile_update_result(&mut self, result: Result<ProfileUpdate, ApiError>) {
        match result {
            Ok(update) => {
                if let Some(profile) = self.profile.as_mut() {
                    update.apply_to(profile);
                }
                if let (Some(session), Some(profile)) = (self.sessions.load(), self.profile.as_ref()) {
                    self.sessions.save(&session.token, profile);
                }
                self.profile_form.cancel();
                self.toasts.success("Profile updated successfully");
            }
            Err(e) => self.handle_api_error(e, "Failed to update profile"),
        }
    }

    pub fn handle_generate(&mut self) {
        if self.is_generating() {
            return;
        }
        let token = self.bearer();
        let request = self.home.generate_request();
        self.home.error = None;
        self.home.generated = None;

        tracing::info!(
            "Generating {} records (diabetes {:.1}, hypertension {:.1})",
            request.num_samples,
            request.diabetes_ratio,
            request.hypertension_ratio
        );
        let api = self.api.clone();
        let pending = self
            .runner
            .spawn(async move { api.generate(token.as_ref(), &request).await });
        self.requests.generate.start(pending);
    }

    pub fn apply_generate_result(&mut self, result: Result<GenerateOutcome, ApiError>) {
        match result {
            Ok(outcome) => {
                self.toasts.success(format!(
                    "Generated {} records",
                    outcome.dataset.num_generated
                ));
                self.home.generated = Some(outcome);
            }
            Err(e) => {
                if !e.is_auth() {
                    self.home.error = Some(format!("Failed to generate data: {}", e));
                }
                self.handle_api_error(e, "Failed to generate data");
            }
        }
    }

    pub fn handle_train(&mut self) {
        if self.is_training() {
            return;
        }
        let token = self.bearer();
        let request = self.home.train_request(&self.config);
        self.home.error = None;
        self.home.training = None;

        tracing::info!("Training for {} epochs", request.epochs);
        let api = self.api.clone();
        let pending = self
            .runner
            .spawn(async move { api.train(token.as_ref(), &request).await });
        self.requests.train.start(pending);
    }

    pub fn apply_train_result(&mut self, result: Result<TrainingResult, ApiError>) {
        match result {
            Ok(training) => {
                self.toasts.success("Training finished");
                self.home.training = Some(training);
            }
            Err(e) => {
                if !e.is_auth() {
                    self.home.error = Some(format!("Failed to train model: {}", e));
                }
                self.handle_api_error(e, "Failed to train model");
            }
        }
    }

    pub fn check_health(&mut self) {
        if self.requests.health.is_busy() {
            return;
        }
        let api = self.api.clone();
        let pending = self.runner.spawn(async move { api.health().await });
        self.requests.health.start(pending);
    }

    pub fn export_generated(&mut self) {
        let Some(outcome) = self.home.generated.as_ref() else {
            return;
        };
        let today = chrono::Local::now().date_naive();
        match export_dataset(&outcome.raw, &default_export_dir(), today) {
            Ok(path) => self.toasts.success(format!("Saved {}", path.display())),
            Err(e) => self.toasts.error(format!("Export failed: {}", e)),
        }
    }

    /// 401 ends the session; every other failure becomes a toast.
    fn handle_api_error(&mut self, error: ApiError, context: &str) {
        if error.is_auth() {
            tracing::warn!("{}: server rejected the session", context);
            self.expire_session();
        } else {
            self.toasts.error(format!("{}: {}", context, error));
        }
    }

    /// Authenticated --401--> SessionExpired --clear+redirect--> Anonymous
    pub fn expire_session(&mut self) {
        self.sessions.clear();
        self.requests.cancel_authenticated();
        self.auth_state.expire();
        if !self.auth_state.acknowledge_expiry() {
            self.auth_state.sign_out();
        }
        self.profile = None;
        self.profile_form.cancel();
        self.home.clear_results();
        self.router.navigate(Route::SignIn, None);
        self.toasts.error(SESSION_EXPIRED_MESSAGE);
    }

    pub fn logout(&mut self) {
        if let Some(token) = self.bearer() {
            let api = self.api.clone();
            let pending = self.runner.spawn(async move { api.logout(&token).await });
            self.requests.logout.start(pending);
        }

        self.sessions.clear();
        self.requests.cancel_authenticated();
        self.auth_state.sign_out();
        self.sign_in_form.reset();
        self.sign_up_form.reset();
        self.profile_form.cancel();
        self.profile = None;
        self.home = HomeState::default();
        self.router.navigate(Route::Landing, None);
        self.toasts.info("Signed out");
    }
}
