//! Form validators
//!
//! Pure, synchronous checks run on every edit of the relevant field.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

pub const MIN_PASSWORD_LEN: usize = 8;

/// One password rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        Self::MinLength,
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::Special,
    ];

    pub fn phrase(self) -> &'static str {
        match self {
            Self::MinLength => "at least 8 characters",
            Self::Uppercase => "one uppercase letter",
            Self::Lowercase => "one lowercase letter",
            Self::Digit => "one number",
            Self::Special => "one special character",
        }
    }

    pub fn is_met_by(self, password: &str) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= MIN_PASSWORD_LEN,
            Self::Uppercase => password.chars().any(char::is_uppercase),
            Self::Lowercase => password.chars().any(char::is_lowercase),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Special => password.chars().any(|c| !c.is_alphanumeric()),
        }
    }
}

impl fmt::Display for PasswordRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err("Email is invalid".to_string());
    }
    Ok(())
}

/// Unmet rules, in the order of [`PasswordRequirement::ALL`].
pub fn password_requirements(password: &str) -> Vec<PasswordRequirement> {
    PasswordRequirement::ALL
        .into_iter()
        .filter(|req| !req.is_met_by(password))
        .collect()
}

pub fn validate_password_strength(password: &str) -> Result<(), String> {
    let missing = password_requirements(password);
    if missing.is_empty() {
        return Ok(());
    }
    let phrases: Vec<&str> = missing.iter().map(|req| req.phrase()).collect();
    Err(format!("Password must contain {}", phrases.join(", ")))
}

/// Sign-in only checks presence; strength is enforced at sign-up.
pub fn validate_password_present(password: &str) -> Result<(), String> {
    if password.is_empty() {
        Err("Password is required".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Err("Username must be between 3 and 30 characters".to_string());
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, numbers and underscores".to_string());
    }
    Ok(())
}

pub fn passwords_match(password: &str, confirm: &str) -> Result<(), String> {
    if password == confirm {
        Ok(())
    } else {
        Err("Passwords do not match".to_string())
    }
}

/// Optional field; when present it must hold exactly ten digits.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if phone.trim().is_empty() || digits == 10 {
        Ok(())
    } else {
        Err("Please provide a valid phone number".to_string())
    }
}

/// Optional field; when present it must be `YYYY-MM-DD`.
pub fn validate_date_of_birth(date: &str) -> Result<(), String> {
    let date = date.trim();
    if date.is_empty() || chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err("Date of birth must be YYYY-MM-DD".to_string())
    }
}
