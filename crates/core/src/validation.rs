//! Field validators for API input.
//!
//! Each validator returns `Err(message)` for the handler to map onto a
//! 400 response.

/// Maximum length for scene and show titles.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length for a scene number (e.g. `"42A"`).
pub const MAX_SCENE_NUMBER_LEN: usize = 20;

/// A scene number must be non-empty and reasonably short.
pub fn validate_scene_number(scene_number: &str) -> Result<(), String> {
    if scene_number.trim().is_empty() {
        return Err("Scene number must not be empty".to_string());
    }
    if scene_number.len() > MAX_SCENE_NUMBER_LEN {
        return Err(format!(
            "Scene number must be at most {MAX_SCENE_NUMBER_LEN} characters"
        ));
    }
    Ok(())
}

/// A title must be non-empty and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }
    Ok(())
}

/// Maximum length for an email address.
pub const MAX_EMAIL_LEN: usize = 255;

/// Minimum length for a plaintext password at account creation.
pub const MIN_PASSWORD_LEN: usize = 8;

/// An email must be non-empty, contain an `@`, and be reasonably short.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email must not be empty".to_string());
    }
    if !email.contains('@') {
        return Err("Email must contain '@'".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("Email must be at most {MAX_EMAIL_LEN} characters"));
    }
    Ok(())
}

/// A password must be at least [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// A stored duration must be a positive number of minutes. Absent durations
/// are fine (the conflict engine substitutes a default).
pub fn validate_duration_minutes(duration_minutes: i32) -> Result<(), String> {
    if duration_minutes < 1 {
        return Err("Duration must be at least 1 minute".to_string());
    }
    Ok(())
}
