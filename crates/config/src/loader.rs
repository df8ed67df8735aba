//! Configuration loader implementation

use crate::fields::{self, FieldKind, FieldSpec, FIELDS};
use crate::schema::Config;
use anyhow::Context;
use figment::providers::Env;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use types::{ConfigError, Result};

/// Raw value collected for one recognized key
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawValue {
    Set(String),
    /// Set in the process environment, but not valid UTF-8
    NotUnicode,
    /// Several spellings of the key were set to different values
    Conflict,
}

type RawValues = BTreeMap<&'static str, RawValue>;

/// Configuration loader that reads the process environment
///
/// Keys are matched without regard to ASCII case, so `port`, `PORT` and
/// `Port` all name the same field. A loader built with
/// [`ConfigLoader::with_prefix`] only considers variables starting with
/// the prefix and strips it before matching. Variables set to the empty
/// string are treated as unset.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    prefix: Option<String>,
}

impl ConfigLoader {
    /// Loader for unprefixed variables
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Loader for variables carrying `prefix`, e.g. `SPACEBEARS_`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Load configuration from the process environment
    pub fn load() -> Result<Config> {
        Self::new().extract()
    }

    /// Load configuration from prefixed environment variables
    pub fn load_prefixed(prefix: &str) -> Result<Config> {
        Self::with_prefix(prefix).extract()
    }

    /// Environment provider restricted to the recognized keys
    pub fn provider(&self) -> Env {
        let env = match self.prefix.as_deref() {
            Some(prefix) => Env::prefixed(prefix),
            None => Env::raw(),
        };
        env.only(&fields::keys())
    }

    /// Read the environment through this loader's provider and resolve it
    ///
    /// The provider picks the keys; values are re-read from the OS so a
    /// value that is not UTF-8 fails instead of being lossily converted.
    pub fn extract(&self) -> Result<Config> {
        let selected: BTreeSet<String> = self
            .provider()
            .iter()
            .map(|(key, _)| key.as_str().to_ascii_lowercase())
            .collect();

        let mut raw = RawValues::new();
        for (name, value) in env::vars_os() {
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(key) = self.strip_prefix(name) else {
                continue;
            };
            if !selected.contains(&key.to_ascii_lowercase()) {
                continue;
            }
            let Some(field) = fields::find(key) else {
                continue;
            };

            let value = value.into_string().map_or(RawValue::NotUnicode, RawValue::Set);
            Self::insert(&mut raw, field, value);
        }

        debug!(
            prefix = self.prefix.as_deref().unwrap_or(""),
            found = raw.len(),
            "Read configuration keys from environment"
        );

        Self::resolve(&raw)
    }

    /// `name` without this loader's prefix, matched without case
    fn strip_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        match self.prefix.as_deref() {
            None => Some(name),
            Some(prefix) => name
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &name[prefix.len()..]),
        }
    }

    /// Resolve configuration from explicit `(name, value)` pairs
    ///
    /// Names that are not recognized keys are ignored. The process
    /// environment is not consulted.
    pub fn load_from_vars<I, K, V>(vars: I) -> Result<Config>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawValues::new();
        for (name, value) in vars {
            if let Some(field) = fields::find(name.as_ref()) {
                Self::insert(&mut raw, field, RawValue::Set(value.into()));
            }
        }

        Self::resolve(&raw)
    }

    fn resolve(raw: &RawValues) -> Result<Config> {
        // The required field goes first so its absence is reported no
        // matter what else is wrong with the environment.
        let admin_password = Self::text(raw, &fields::ADMIN_PASSWORD)?;

        Ok(Config {
            admin_username: Self::text(raw, &fields::ADMIN_USERNAME)?,
            admin_password,
            port: Self::integer(raw, &fields::PORT)?,
            db_file: PathBuf::from(Self::text(raw, &fields::DB_FILE)?),
        })
    }

    /// Record one spelling of `field`; empty values count as unset
    fn insert(raw: &mut RawValues, field: &'static FieldSpec, value: RawValue) {
        if value == RawValue::Set(String::new()) {
            return;
        }

        match raw.entry(field.key) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => {
                if *entry.get() != value {
                    entry.insert(RawValue::Conflict);
                }
            }
        }
    }

    /// Raw string for `field`, falling back to its default
    fn lookup<'a>(raw: &'a RawValues, field: &FieldSpec) -> Result<&'a str> {
        match raw.get(field.key) {
            Some(RawValue::Conflict) => Err(ConfigError::ConflictingValues {
                key: field.key.to_string(),
            }),
            Some(RawValue::NotUnicode) => Err(ConfigError::NotUnicode {
                field: field.name.to_string(),
                key: field.key.to_string(),
            }),
            Some(RawValue::Set(value)) => {
                debug!(key = field.key, "Using value from environment");
                Ok(value.as_str())
            }
            None => match field.default {
                Some(default) => {
                    debug!(key = field.key, "Using default value");
                    Ok(default)
                }
                None => Err(ConfigError::MissingRequiredField {
                    field: field.name.to_string(),
                    key: field.key.to_string(),
                }),
            },
        }
    }

    fn text(raw: &RawValues, field: &FieldSpec) -> Result<String> {
        debug_assert_eq!(field.kind, FieldKind::Text);
        Self::lookup(raw, field).map(str::to_string)
    }

    fn integer(raw: &RawValues, field: &FieldSpec) -> Result<i64> {
        debug_assert_eq!(field.kind, FieldKind::Integer);
        let value = Self::lookup(raw, field)?;
        value.parse::<i64>().map_err(|_| ConfigError::TypeMismatch {
            field: field.name.to_string(),
            key: field.key.to_string(),
            value: value.to_string(),
            expected: field.kind.to_string(),
        })
    }

    /// Get default configuration
    ///
    /// The password is left empty, so this is never a loadable result.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Config {
        Config::default()
    }

    /// Example env file listing every recognized key
    pub fn example_env() -> String {
        let mut content = String::from("# Spacebears startup configuration\n");

        for field in FIELDS {
            let required = if field.is_required() { " (required)" } else { "" };
            content.push_str(&format!(
                "\n# {}{}, {}\n{}={}\n",
                field.description,
                required,
                field.kind,
                field.key,
                field.default.unwrap_or("")
            ));
        }

        content
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
        std::fs::write(path.as_ref(), Self::example_env()).with_context(|| {
            format!(
                "Failed to write example configuration file: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }
}
