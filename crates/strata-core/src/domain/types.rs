//! Field type resolution.
//!
//! Maps the abstract type token of a field spec (`string`, `int64`, `uuid`,
//! ...) to a [`FieldType`], and a `FieldType` to the names the generated
//! project needs: the Go type, the OpenAPI type/format, the SQL column type.

use std::fmt;

use serde::Serialize;

/// Resolved type of an entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Int64,
    Float64,
    Bool,
    Timestamp,
    Uuid,
}

impl FieldType {
    /// Resolve a type token.
    ///
    /// The token is lower-cased and a trailing `?` is ignored. Unknown tokens
    /// resolve to [`FieldType::String`]; this never fails.
    pub fn resolve(token: &str) -> Self {
        let normalized = token.trim().trim_end_matches('?').to_lowercase();
        match normalized.as_str() {
            "string" | "text" => Self::String,
            "int" | "integer" => Self::Int,
            "int64" | "bigint" => Self::Int64,
            "float" | "float64" | "decimal" => Self::Float64,
            "bool" | "boolean" => Self::Bool,
            "time" | "datetime" | "timestamp" => Self::Timestamp,
            "uuid" => Self::Uuid,
            _ => Self::String,
        }
    }

    /// Reverse lookup from a Go type name, used when reading back generated
    /// entity sources. Pointer types (`*T`) resolve to `T`.
    pub fn from_go_name(go_type: &str) -> Option<Self> {
        match go_type.trim().trim_start_matches('*') {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "int64" => Some(Self::Int64),
            "float64" => Some(Self::Float64),
            "bool" => Some(Self::Bool),
            "time.Time" => Some(Self::Timestamp),
            "uuid.UUID" => Some(Self::Uuid),
            _ => None,
        }
    }

    /// Type name in the generated Go code.
    pub const fn go_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Timestamp => "time.Time",
            Self::Uuid => "uuid.UUID",
        }
    }

    /// Canonical token, accepted again by [`FieldType::resolve`].
    pub const fn token(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
        }
    }

    pub const fn openapi_type(self) -> &'static str {
        match self {
            Self::String | Self::Timestamp | Self::Uuid => "string",
            Self::Int | Self::Int64 => "integer",
            Self::Float64 => "number",
            Self::Bool => "boolean",
        }
    }

    pub const fn openapi_format(self) -> Option<&'static str> {
        match self {
            Self::Int => Some("int32"),
            Self::Int64 => Some("int64"),
            Self::Float64 => Some("double"),
            Self::Timestamp => Some("date-time"),
            Self::Uuid => Some("uuid"),
            Self::String | Self::Bool => None,
        }
    }

    /// Portable SQL column type for migrations.
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::String => "TEXT",
            Self::Int => "INTEGER",
            Self::Int64 => "BIGINT",
            Self::Float64 => "DOUBLE PRECISION",
            Self::Bool => "BOOLEAN",
            Self::Timestamp => "TIMESTAMP",
            Self::Uuid => "UUID",
        }
    }

    /// Zero value literal for the Go type, used by generated tests.
    pub const fn go_sample(self) -> &'static str {
        match self {
            Self::String => "\"sample\"",
            Self::Int => "1",
            Self::Int64 => "1",
            Self::Float64 => "1.5",
            Self::Bool => "true",
            Self::Timestamp => "time.Now()",
            Self::Uuid => "uuid.New()",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.go_name())
    }
}

/// Resolve a type token straight to its Go type name.
pub fn resolve_go_type(token: &str) -> &'static str {
    FieldType::resolve(token).go_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_table() {
        let cases = [
            ("string", "string"),
            ("text", "string"),
            ("int", "int"),
            ("integer", "int"),
            ("int64", "int64"),
            ("bigint", "int64"),
            ("float", "float64"),
            ("float64", "float64"),
            ("decimal", "float64"),
            ("bool", "bool"),
            ("boolean", "bool"),
            ("time", "time.Time"),
            ("datetime", "time.Time"),
            ("timestamp", "time.Time"),
            ("uuid", "uuid.UUID"),
        ];

        for (token, go) in cases {
            assert_eq!(resolve_go_type(token), go, "token {token}");
        }
    }

    #[test]
    fn unknown_token_falls_back_to_string() {
        assert_eq!(FieldType::resolve("widget"), FieldType::String);
        assert_eq!(resolve_go_type(""), "string");
    }

    #[test]
    fn resolution_ignores_case_and_nullable_marker() {
        assert_eq!(FieldType::resolve("DECIMAL"), FieldType::Float64);
        assert_eq!(FieldType::resolve("uuid?"), FieldType::Uuid);
        assert_eq!(FieldType::resolve("Text?"), FieldType::String);
    }

    #[test]
    fn go_names_map_back() {
        for ty in [
            FieldType::String,
            FieldType::Int,
            FieldType::Int64,
            FieldType::Float64,
            FieldType::Bool,
            FieldType::Timestamp,
            FieldType::Uuid,
        ] {
            assert_eq!(FieldType::from_go_name(ty.go_name()), Some(ty));
            assert_eq!(FieldType::resolve(ty.token()), ty);
        }
        assert_eq!(FieldType::from_go_name("*time.Time"), Some(FieldType::Timestamp));
        assert_eq!(FieldType::from_go_name("[]byte"), None);
    }

    #[test]
    fn openapi_mapping() {
        assert_eq!(FieldType::Float64.openapi_type(), "number");
        assert_eq!(FieldType::Float64.openapi_format(), Some("double"));
        assert_eq!(FieldType::Bool.openapi_format(), None);
    }
}
