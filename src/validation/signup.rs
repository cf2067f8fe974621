use crate::core::error::ApiError;
use crate::models::auth::SignupRequest;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_USERNAME_LENGTH: usize = 7;
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Signup input that passed every rule
#[derive(Debug)]
pub struct ValidatedSignup {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Apply the signup rules in order; the first failing rule is reported
///
/// Format rules only fire for fields that were supplied, the "all fields"
/// rule runs last.
pub fn validate_signup(req: SignupRequest) -> Result<ValidatedSignup, ApiError> {
    if let Some(password) = req.password.as_deref() {
        if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(invalid("Password must be at least 8 characters long"));
        }
    }

    if let Some(username) = req.username.as_deref().filter(|u| !u.is_empty()) {
        validate_username(username)?;
    }

    match (req.username, req.email, req.password) {
        (Some(username), Some(email), Some(password))
            if !username.is_empty() && !email.trim().is_empty() && !password.is_empty() =>
        {
            Ok(ValidatedSignup {
                username,
                email: email.trim().to_string(),
                password,
            })
        }
        _ => Err(invalid("All fields are required")),
    }
}

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    let length = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
        return Err(invalid("Username must be between 7 and 20 characters long"));
    }

    if username.contains(' ') {
        return Err(invalid("Username cannot contain spaces"));
    }

    if username != username.to_lowercase() {
        return Err(invalid("Username must be lowercase."));
    }

    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("Username can only contain letters and numbers."));
    }

    Ok(())
}

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn message(result: Result<ValidatedSignup, ApiError>) -> String {
        match result {
            Err(ApiError::Validation(msg)) => msg,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_signup() {
        let ok = validate_signup(req("johndoe1", "j@x.com", "password123")).unwrap();
        assert_eq!(ok.username, "johndoe1");
        assert_eq!(ok.email, "j@x.com");
    }

    #[test]
    fn test_username_length_bounds() {
        for username in ["abc", "abcdef", "a".repeat(21).as_str(), "a".repeat(40).as_str()] {
            assert_eq!(
                message(validate_signup(req(username, "j@x.com", "password123"))),
                "Username must be between 7 and 20 characters long",
                "username {:?}",
                username
            );
        }
        assert!(validate_signup(req("abcdefg", "j@x.com", "password123")).is_ok());
        assert!(validate_signup(req(&"a".repeat(20), "j@x.com", "password123")).is_ok());
    }

    #[test]
    fn test_username_with_space() {
        assert_eq!(
            message(validate_signup(req("john doe1", "j@x.com", "password123"))),
            "Username cannot contain spaces"
        );
    }

    #[test]
    fn test_username_uppercase() {
        assert_eq!(
            message(validate_signup(req("JohnDoe1", "j@x.com", "password123"))),
            "Username must be lowercase."
        );
    }

    #[test]
    fn test_username_symbols() {
        for username in ["john_doe1", "john-doe", "johndoe!", "jöhndoe1"] {
            assert_eq!(
                message(validate_signup(req(username, "j@x.com", "password123"))),
                "Username can only contain letters and numbers.",
                "username {:?}",
                username
            );
        }
    }

    #[test]
    fn test_short_password() {
        for password in ["a", "1234567"] {
            assert_eq!(
                message(validate_signup(req("johndoe1", "j@x.com", password))),
                "Password must be at least 8 characters long"
            );
        }
    }

    #[test]
    fn test_password_rule_reported_before_username_rule() {
        assert_eq!(
            message(validate_signup(req("ab", "j@x.com", "short"))),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            message(validate_signup(SignupRequest::default())),
            "All fields are required"
        );
        assert_eq!(
            message(validate_signup(req("johndoe1", "", "password123"))),
            "All fields are required"
        );
        assert_eq!(
            message(validate_signup(req("johndoe1", "j@x.com", ""))),
            "All fields are required"
        );
        assert_eq!(
            message(validate_signup(req("", "j@x.com", "password123"))),
            "All fields are required"
        );
    }
}
