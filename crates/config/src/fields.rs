//! Declarative table of recognized configuration keys

use std::fmt;

/// Semantic type a raw environment string is coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String passthrough
    Text,
    /// Decimal signed 64-bit integer
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
        }
    }
}

/// One recognized configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in error messages
    pub name: &'static str,
    /// Environment variable the value is read from, matched without case
    pub key: &'static str,
    /// Type the raw value is coerced into
    pub kind: FieldKind,
    /// Value used when the key is absent; `None` marks the field required
    pub default: Option<&'static str>,
    /// Human readable description, used for the example env file
    pub description: &'static str,
}

impl FieldSpec {
    /// A field is required exactly when it has no default
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

pub const ADMIN_USERNAME: FieldSpec = FieldSpec {
    name: "AdminUsername",
    key: "admin_username",
    kind: FieldKind::Text,
    default: Some("admin"),
    description: "Username of the admin account",
};

pub const ADMIN_PASSWORD: FieldSpec = FieldSpec {
    name: "AdminPassword",
    key: "admin_password",
    kind: FieldKind::Text,
    default: None,
    description: "Password of the admin account",
};

pub const PORT: FieldSpec = FieldSpec {
    name: "Port",
    key: "port",
    kind: FieldKind::Integer,
    default: Some("9000"),
    description: "Port the service listens on",
};

pub const DB_FILE: FieldSpec = FieldSpec {
    name: "DBFile",
    key: "db_file",
    kind: FieldKind::Text,
    default: Some("data.boltdb"),
    description: "Path of the database file",
};

/// Every recognized key, in declaration order
pub const FIELDS: &[FieldSpec] = &[ADMIN_USERNAME, ADMIN_PASSWORD, PORT, DB_FILE];

/// Source keys of every recognized field
pub fn keys() -> Vec<&'static str> {
    FIELDS.iter().map(|field| field.key).collect()
}

/// Look up a field by its source key, ignoring ASCII case
pub fn find(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|field| field.key.eq_ignore_ascii_case(key))
}
