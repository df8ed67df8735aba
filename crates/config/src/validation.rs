//! Configuration validation utilities
//!
//! Validation here never rejects a configuration. Anything
//! [`ConfigLoader`](crate::ConfigLoader) accepts is usable; the report
//! only lists settings an operator probably wants to revisit.

use crate::fields;
use crate::schema::Config;
use std::path::Path;

/// Passwords shorter than this draw a warning
pub const MIN_PASSWORD_LEN: usize = 8;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_port(config, &mut report);
        Self::validate_credentials(config, &mut report);
        Self::validate_db_file(config, &mut report);

        report
    }

    fn validate_port(config: &Config, report: &mut ValidationReport) {
        let port = config.port;
        if !(1..=i64::from(u16::MAX)).contains(&port) {
            report.add_warning(
                fields::PORT.key,
                &format!("Port {} is outside the TCP port range 1-65535", port),
            );
        } else if port < 1024 {
            report.add_warning(
                fields::PORT.key,
                &format!("Port {} is below 1024, may require elevated privileges", port),
            );
        }
    }

    fn validate_credentials(config: &Config, report: &mut ValidationReport) {
        if Some(config.admin_username.as_str()) == fields::ADMIN_USERNAME.default {
            report.add_warning(
                fields::ADMIN_USERNAME.key,
                "Admin username is the default, consider choosing another",
            );
        }

        if config.admin_password.chars().count() < MIN_PASSWORD_LEN {
            report.add_warning(
                fields::ADMIN_PASSWORD.key,
                &format!(
                    "Admin password is short, consider using at least {} characters",
                    MIN_PASSWORD_LEN
                ),
            );
        }
    }

    fn validate_db_file(config: &Config, report: &mut ValidationReport) {
        if config.db_file.as_os_str().is_empty() {
            report.add_warning(fields::DB_FILE.key, "Database file path is empty");
            return;
        }

        if let Some(parent) = config.db_file.parent() {
            if parent != Path::new("") && !parent.exists() {
                report.add_warning(
                    fields::DB_FILE.key,
                    &format!(
                        "Database file directory does not exist: {}",
                        parent.display()
                    ),
                );
            }
        }
    }
}

/// Validation report containing warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} warnings", self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            admin_username: "ursa".to_string(),
            admin_password: "correct horse battery".to_string(),
            port: 9000,
            db_file: dir.path().join("data.boltdb"),
        }
    }

    fn warned_fields(report: &ValidationReport) -> Vec<&str> {
        report.warnings.iter().map(|w| w.field.as_str()).collect()
    }

    #[test]
    fn test_clean_config_has_no_warnings() {
        let dir = TempDir::new().unwrap();
        let report = ConfigValidator::validate(&config_in(&dir));
        assert!(!report.has_warnings(), "{:?}", report);
        assert_eq!(report.summary(), "Validation: 0 warnings");
    }

    #[test]
    fn test_relative_db_file_in_cwd_is_fine() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            db_file: PathBuf::from("data.boltdb"),
            ..config_in(&dir)
        };
        assert!(!ConfigValidator::validate(&config).has_warnings());
    }

    #[test]
    fn test_port_warnings() {
        let dir = TempDir::new().unwrap();
        for port in [-1, 0, 65536] {
            let config = Config {
                port,
                ..config_in(&dir)
            };
            let report = ConfigValidator::validate(&config);
            assert_eq!(warned_fields(&report), vec!["port"]);
            assert!(report.warnings[0].message.contains("outside"));
        }

        let config = Config {
            port: 80,
            ..config_in(&dir)
        };
        let report = ConfigValidator::validate(&config);
        assert_eq!(warned_fields(&report), vec!["port"]);
        assert!(report.warnings[0].message.contains("below 1024"));
    }

    #[test]
    fn test_credential_warnings() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            admin_username: "admin".to_string(),
            admin_password: "x".to_string(),
            ..config_in(&dir)
        };
        let report = ConfigValidator::validate(&config);
        assert_eq!(
            warned_fields(&report),
            vec!["admin_username", "admin_password"]
        );
    }

    #[test]
    fn test_db_file_warnings() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            db_file: dir.path().join("missing").join("data.boltdb"),
            ..config_in(&dir)
        };
        let report = ConfigValidator::validate(&config);
        assert_eq!(warned_fields(&report), vec!["db_file"]);

        let config = Config {
            db_file: PathBuf::new(),
            ..config_in(&dir)
        };
        let report = ConfigValidator::validate(&config);
        assert_eq!(warned_fields(&report), vec!["db_file"]);
        assert!(report.warnings[0].message.contains("empty"));
    }
}
