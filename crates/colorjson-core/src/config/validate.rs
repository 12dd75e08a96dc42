//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate that every named setting resolves to a known value.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.handler.time_format.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "handler.time_format must not be empty".into(),
            ));
        }
        // Resolving the options checks level, source, renderer and colors.
        self.handler_options()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let mut config = Config::default();
        config.handler.level = "loud".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("handler.level"));
    }

    #[test]
    fn test_validate_rejects_unknown_source() {
        let mut config = Config::default();
        config.handler.source = "everywhere".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("handler.source"));
    }

    #[test]
    fn test_validate_rejects_unknown_renderer() {
        let mut config = Config::default();
        config.handler.renderer = "fancy".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("handler.renderer"));
    }

    #[test]
    fn test_validate_rejects_unknown_scheme() {
        let mut config = Config::default();
        config.colors.scheme = "neon".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("colors.scheme"));
    }

    #[test]
    fn test_validate_rejects_empty_time_format() {
        let mut config = Config::default();
        config.handler.time_format = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("time_format"));
    }

    #[test]
    fn test_validate_accepts_trace_level() {
        let mut config = Config::default();
        config.handler.level = "trace".into();
        assert!(config.validate().is_ok());
    }
}
