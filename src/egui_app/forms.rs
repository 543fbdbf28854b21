//! Per-view form state
//!
//! Each form keeps the raw input strings plus the current validation
//! messages. Views call `on_changed` after every edit and `validate` on
//! submit; a successful submit ends with `reset`.

use std::collections::BTreeMap;

use crate::egui_app::validators::{
    passwords_match, validate_date_of_birth, validate_email, validate_password_present,
    validate_password_strength, validate_phone, validate_username,
};
use crate::shared::api::{ProfileUpdate, SignInRequest, SignUpRequest, UserProfile};
use crate::shared::error::ValidationError;

pub const FILL_ALL_FIELDS: &str = "Please fill in all required fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Phone,
    DateOfBirth,
}

impl Field {
    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
            Field::Phone => "phone",
            Field::DateOfBirth => "date_of_birth",
        }
    }
}

/// Validation messages keyed by field, plus one optional form-level message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<Field, String>,
    form: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn set_form(&mut self, message: impl Into<String>) {
        self.form = Some(message.into());
    }

    pub fn record(&mut self, field: Field, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.fields.remove(&field);
            }
            Err(message) => {
                self.fields.insert(field, message);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.form.is_some())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.form = None;
    }

    /// Current messages as typed errors; the form-level one uses field `form`.
    pub fn to_validation_errors(&self) -> Vec<ValidationError> {
        self.fields
            .iter()
            .map(|(field, message)| ValidationError::new(field.name(), message.as_str()))
            .chain(self.form.iter().map(|message| ValidationError::new("form", message.as_str())))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub errors: FieldErrors,
}

impl SignInForm {
    pub fn on_changed(&mut self, field: Field) {
        self.errors.form = None;
        match field {
            Field::Email => self.errors.record(Field::Email, validate_email(&self.email)),
            Field::Password => self
                .errors
                .record(Field::Password, validate_password_present(&self.password)),
            _ => {}
        }
    }

    /// Validate every field; the request is only built when all pass.
    pub fn validate(&mut self) -> Option<SignInRequest> {
        self.errors.clear();
        self.errors.record(Field::Email, validate_email(&self.email));
        self.errors
            .record(Field::Password, validate_password_present(&self.password));

        if !self.errors.is_empty() {
            return None;
        }
        Some(SignInRequest {
            login: self.email.trim().to_lowercase(),
            password: self.password.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub errors: FieldErrors,
}

impl SignUpForm {
    fn all_required_empty(&self) -> bool {
        [&self.username, &self.email, &self.password, &self.confirm_password]
            .iter()
            .all(|value| value.trim().is_empty())
    }

    pub fn on_changed(&mut self, field: Field) {
        self.errors.form = None;
        match field {
            Field::Username => self
                .errors
                .record(Field::Username, validate_username(&self.username)),
            Field::Email => self.errors.record(Field::Email, validate_email(&self.email)),
            Field::Password => {
                self.errors
                    .record(Field::Password, validate_password_strength(&self.password));
                if !self.confirm_password.is_empty() {
                    self.check_confirmation();
                }
            }
            Field::ConfirmPassword => self.check_confirmation(),
            _ => {}
        }
    }

    fn check_confirmation(&mut self) {
        let result = if self.confirm_password.is_empty() {
            Err("Please confirm your password".to_string())
        } else {
            passwords_match(&self.password, &self.confirm_password)
        };
        self.errors.record(Field::ConfirmPassword, result);
    }

    pub fn validate(&mut self) -> Option<SignUpRequest> {
        self.errors.clear();

        if self.all_required_empty() {
            self.errors.set_form(FILL_ALL_FIELDS);
            return None;
        }

        self.errors
            .record(Field::Username, validate_username(&self.username));
        self.errors.record(Field::Email, validate_email(&self.email));
        self.errors
            .record(Field::Password, validate_password_strength(&self.password));
        self.check_confirmation();

        if !self.errors.is_empty() {
            return None;
        }
        Some(SignUpRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Editable copy of the fields `PUT /api/auth/profile` accepts
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub editing: bool,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub profile_picture: String,
    pub errors: FieldErrors,
}

impl ProfileForm {
    /// Start editing from the cached profile
    pub fn begin(&mut self, profile: &UserProfile) {
        self.phone = profile.phone.clone().unwrap_or_default();
        self.date_of_birth = profile.date_of_birth.clone().unwrap_or_default();
        self.gender = profile.gender.clone().unwrap_or_default();
        self.profile_picture = profile.profile_picture.clone().unwrap_or_default();
        self.errors.clear();
        self.editing = true;
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn on_changed(&mut self, field: Field) {
        self.errors.form = None;
        match field {
            Field::Phone => self.errors.record(Field::Phone, validate_phone(&self.phone)),
            Field::DateOfBirth => self
                .errors
                .record(Field::DateOfBirth, validate_date_of_birth(&self.date_of_birth)),
            _ => {}
        }
    }

    /// Fields that differ from `profile`; `None` when invalid or unchanged.
    pub fn validate(&mut self, profile: &UserProfile) -> Option<ProfileUpdate> {
        self.errors.clear();
        self.errors.record(Field::Phone, validate_phone(&self.phone));
        self.errors
            .record(Field::DateOfBirth, validate_date_of_birth(&self.date_of_birth));
        if !self.errors.is_empty() {
            return None;
        }

        fn changed(new: &str, old: &Option<String>) -> Option<String> {
            let new = new.trim();
            (new != old.as_deref().unwrap_or("")).then(|| new.to_string())
        }

        let update = ProfileUpdate {
            phone: changed(&self.phone, &profile.phone),
            date_of_birth: changed(&self.date_of_birth, &profile.date_of_birth),
            gender: changed(&self.gender, &profile.gender),
            profile_picture: changed(&self.profile_picture, &profile.profile_picture),
        };

        if update.is_empty() {
            self.errors.set_form("No changes to save");
            return None;
        }
        Some(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_requires_valid_email() {
        let mut form = SignInForm {
            email: "not-an-email".into(),
            password: "whatever".into(),
            ..SignInForm::default()
        };
        assert!(form.validate().is_none());
        assert_eq!(form.errors.get(Field::Email), Some("Email is invalid"));
        assert_eq!(form.errors.get(Field::Password), None);
    }

    #[test]
    fn test_sign_in_builds_login_request() {
        let mut form = SignInForm {
            email: " Alice@Example.com ".into(),
            password: "pw".into(),
            ..SignInForm::default()
        };
        let request = form.validate().unwrap();
        assert_eq!(request.login, "alice@example.com");
        assert_eq!(request.password, "pw");
    }

    #[test]
    fn test_sign_in_on_changed_reruns_validator() {
        let mut form = SignInForm::default();
        form.email = "a@".into();
        form.on_changed(Field::Email);
        assert_eq!(form.errors.get(Field::Email), Some("Email is invalid"));

        form.email = "a@b.co".into();
        form.on_changed(Field::Email);
        assert_eq!(form.errors.get(Field::Email), None);
    }

    #[test]
    fn test_field_errors_as_validation_errors() {
        let mut form = SignUpForm {
            username: "ab".to_string(),
            ..SignUpForm::default()
        };
        assert!(form.validate().is_none());
        let errors = form.errors.to_validation_errors();
        assert_eq!(errors.len(), form.errors.len());
        assert!(errors
            .iter()
            .any(|e| e.field == "username" && e.message.contains("between 3 and 30")));
        assert!(errors.iter().all(|e| e.kind() == crate::shared::error::ErrorKind::Validation));
    }

    #[test]
    fn test_sign_up_all_empty_gives_single_message() {
        let mut form = SignUpForm::default();
        assert!(form.validate().is_none());
        assert_eq!(form.errors.form(), Some(FILL_ALL_FIELDS));
        assert_eq!(form.errors.len(), 1);
    }

    #[test]
    fn test_sign_up_reports_weak_password_and_mismatch() {
        let mut form = SignUpForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..SignUpForm::default()
        };
        assert!(form.validate().is_none());
        assert!(form
            .errors
            .get(Field::Password)
            .unwrap()
            .starts_with("Password must contain at least 8 characters"));
        assert_eq!(
            form.errors.get(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_sign_up_valid_request() {
        let mut form = SignUpForm {
            username: "alice".into(),
            email: "Alice@Example.com".into(),
            password: "Abcdef1!".into(),
            confirm_password: "Abcdef1!".into(),
            ..SignUpForm::default()
        };
        let request = form.validate().unwrap();
        assert_eq!(request.email, "alice@example.com");
        assert_eq!(request.username, "alice");
    }

    #[test]
    fn test_sign_up_reset_clears_everything() {
        let mut form = SignUpForm {
            username: "alice".into(),
            ..SignUpForm::default()
        };
        form.validate();
        form.reset();
        assert!(form.username.is_empty());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_profile_form_only_sends_changes() {
        let profile = UserProfile {
            phone: Some("5551234567".into()),
            gender: Some("female".into()),
            ..UserProfile::default()
        };
        let mut form = ProfileForm::default();
        form.begin(&profile);
        form.date_of_birth = "1990-02-28".into();

        let update = form.validate(&profile).unwrap();
        assert_eq!(update.date_of_birth.as_deref(), Some("1990-02-28"));
        assert!(update.phone.is_none());
        assert!(update.gender.is_none());
    }

    #[test]
    fn test_profile_form_unchanged_is_rejected() {
        let profile = UserProfile::default();
        let mut form = ProfileForm::default();
        form.begin(&profile);
        assert!(form.validate(&profile).is_none());
        assert_eq!(form.errors.form(), Some("No changes to save"));
    }
}
