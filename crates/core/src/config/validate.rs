use super::{types::Config, ConfigError};

/// Highest accepted `minimum_rating`.
pub const MAX_MINIMUM_RATING: u8 = 9;

/// Validate configuration
/// Currently validates:
/// - Minimum rating is within 0..=9
/// - Starting page is at least 1
/// - API base URL is set and the timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let scraper = &config.scraper;

    if scraper.minimum_rating > MAX_MINIMUM_RATING {
        return Err(ConfigError::ValidationError(format!(
            "scraper.minimum_rating must be between 0 and {}, got {}",
            MAX_MINIMUM_RATING, scraper.minimum_rating
        )));
    }

    if scraper.page == 0 {
        return Err(ConfigError::ValidationError(
            "scraper.page must be at least 1".to_string(),
        ));
    }

    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "api.base_url cannot be empty".to_string(),
        ));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
