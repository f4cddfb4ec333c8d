//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error, if any, into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the whole configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_logging(config, &mut result);
        Self::validate_client(config, &mut result);

        result
    }

    /// Validate the settings `tracebus serve` uses: `server` and `logging`.
    pub fn validate_for_serve(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    /// Validate the settings client subcommands use: `client`.
    pub fn validate_for_client(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_client(config, &mut result);
        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }

        if config.server.host == "0.0.0.0" || config.server.host == "::" {
            result.add_warning(ValidationWarning::new(
                "server.host",
                "Endpoint is unauthenticated; binding to all interfaces exposes it off-node",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();

        // Directive strings like "tracebus=debug" are passed through to the filter.
        if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("Unknown log level: {}", config.logging.level),
            ));
        }

        if config.logging.dir.is_some() && config.logging.max_log_files == 0 {
            result.add_error(ValidationError::new(
                "logging.max_log_files",
                "max_log_files must be greater than 0",
            ));
        }
    }

    fn validate_client(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.client.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "client.endpoint",
                "Endpoint must start with http:// or https://",
            ));
        }

        if config.client.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "client.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
