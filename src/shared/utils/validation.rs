use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;
pub const MAX_COMMENT_LENGTH: usize = 1000;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MAX_VOICE_LABEL_LENGTH: usize = 100;
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_re() -> &'static Regex {
    USERNAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]{3,30}$").expect("username pattern"))
}

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern")
    })
}

pub struct Validator;

impl Validator {
    pub fn validate_rating(rating: i32) -> Result<(), AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        Ok(())
    }

    pub fn validate_anime_id(anime_id: i64) -> Result<(), AppError> {
        if anime_id <= 0 {
            return Err(AppError::ValidationError(
                "Anime ID must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the trimmed comment body
    pub fn validate_comment(content: &str) -> Result<String, AppError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError(
                "Comment cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_COMMENT_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Comment too long (max {} characters)",
                MAX_COMMENT_LENGTH
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn validate_username(username: &str) -> Result<(), AppError> {
        if !username_re().is_match(username) {
            return Err(AppError::ValidationError(
                "Username must be 3-30 characters: letters, digits, '_' or '-'".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<(), AppError> {
        if email.len() > 254 || !email_re().is_match(email) {
            return Err(AppError::ValidationError(
                "Invalid email address".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_bio(bio: &str) -> Result<(), AppError> {
        if bio.chars().count() > MAX_BIO_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Bio too long (max {} characters)",
                MAX_BIO_LENGTH
            )));
        }
        Ok(())
    }

    /// Returns the trimmed voice label
    pub fn validate_voice_label(voice: &str) -> Result<String, AppError> {
        let trimmed = voice.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError(
                "Voice label cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_VOICE_LABEL_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Voice label too long (max {} characters)",
                MAX_VOICE_LABEL_LENGTH
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Returns the file extension used for the stored object
    pub fn validate_avatar(content_type: &str, size: usize) -> Result<&'static str, AppError> {
        let ext = match content_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unsupported avatar type '{}'",
                    other
                )))
            }
        };
        if size == 0 {
            return Err(AppError::ValidationError("Avatar file is empty".to_string()));
        }
        if size > MAX_AVATAR_BYTES {
            return Err(AppError::ValidationError(
                "Avatar too large (max 2 MB)".to_string(),
            ));
        }
        Ok(ext)
    }

    pub fn validate_pagination(page: u32, limit: u32) -> Result<(), AppError> {
        if page == 0 {
            return Err(AppError::ValidationError(
                "Page numbering starts at 1".to_string(),
            ));
        }
        if limit == 0 {
            return Err(AppError::ValidationError(
                "Limit must be positive".to_string(),
            ));
        }
        if limit > 50 {
            return Err(AppError::ValidationError(
                "Limit cannot exceed 50".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Validator::validate_rating(1).is_ok());
        assert!(Validator::validate_rating(10).is_ok());
        assert!(Validator::validate_rating(0).is_err());
        assert!(Validator::validate_rating(11).is_err());
        assert!(Validator::validate_rating(-3).is_err());
    }

    #[test]
    fn comment_is_trimmed_and_bounded() {
        assert_eq!(Validator::validate_comment("  hi  ").unwrap(), "hi");
        assert!(Validator::validate_comment("   ").is_err());
        assert!(Validator::validate_comment(&"a".repeat(1001)).is_err());
        // length counts characters, not bytes
        assert!(Validator::validate_comment(&"я".repeat(1000)).is_ok());
    }

    #[test]
    fn username_rules() {
        assert!(Validator::validate_username("otaku_42").is_ok());
        assert!(Validator::validate_username("ab").is_err());
        assert!(Validator::validate_username("bad name").is_err());
    }

    #[test]
    fn avatar_rules() {
        assert_eq!(Validator::validate_avatar("image/jpeg", 10).unwrap(), "jpg");
        assert!(Validator::validate_avatar("image/svg+xml", 10).is_err());
        assert!(Validator::validate_avatar("image/png", MAX_AVATAR_BYTES + 1).is_err());
    }
}
