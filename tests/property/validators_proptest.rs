//! Property-based tests for form validation

use proptest::prelude::*;
use synthesis::egui_app::forms::{SignUpForm, FILL_ALL_FIELDS};
use synthesis::egui_app::validators::{
    password_requirements, validate_email, validate_password_strength, validate_username,
    PasswordRequirement,
};

proptest! {
    #[test]
    fn test_missing_requirements_are_exactly_the_unmet_ones(password in "\\PC{0,16}") {
        let missing = password_requirements(&password);
        for requirement in PasswordRequirement::ALL {
            prop_assert_eq!(missing.contains(&requirement), !requirement.is_met_by(&password));
        }
        prop_assert_eq!(validate_password_strength(&password).is_ok(), missing.is_empty());
    }

    #[test]
    fn test_strength_message_names_each_missing_phrase(password in "[a-z]{0,12}") {
        let missing = password_requirements(&password);
        match validate_password_strength(&password) {
            Ok(()) => prop_assert!(missing.is_empty()),
            Err(message) => {
                prop_assert!(message.starts_with("Password must contain "));
                for requirement in missing {
                    prop_assert!(message.contains(requirement.phrase()));
                }
            }
        }
    }

    #[test]
    fn test_well_formed_emails_pass(
        local in "[a-z0-9._]{1,12}",
        domain in "[a-z0-9]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(validate_email(&email).is_ok());
    }

    #[test]
    fn test_emails_without_at_fail(text in "[a-z0-9.]{0,20}") {
        prop_assert!(validate_email(&text).is_err());
    }

    #[test]
    fn test_usernames_of_word_chars_in_range_pass(name in "[A-Za-z0-9_]{3,30}") {
        prop_assert!(validate_username(&name).is_ok());
    }

    #[test]
    fn test_blank_sign_up_never_builds_request(spaces in " {0,4}") {
        let mut form = SignUpForm {
            username: spaces.clone(),
            email: spaces.clone(),
            password: String::new(),
            confirm_password: String::new(),
            ..SignUpForm::default()
        };
        prop_assert!(form.validate().is_none());
        prop_assert_eq!(form.errors.form(), Some(FILL_ALL_FIELDS));
    }
}
