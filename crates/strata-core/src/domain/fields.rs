//! Field specification parsing.
//!
//! A field spec is a comma-separated list of `name:type` pairs, e.g.
//! `"name:string,email:string,bio:text?"`. A trailing `?` on the type marks
//! the field nullable.
//!
//! Parsing is best-effort: an entry that is not exactly two non-empty parts
//! is dropped without an error. [`parse_fields_with_report`] keeps a record
//! of what was dropped so callers can still observe it.

use serde::Serialize;

use crate::domain::{
    naming::{to_camel_case, to_pascal_case, to_snake_case},
    types::FieldType,
};

/// One entity attribute.
///
/// All derived values are computed in [`FieldSpec::new`] from `name` and
/// `raw_type`; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    name: String,
    raw_type: String,
    pascal_name: String,
    camel_name: String,
    snake_name: String,
    resolved_type: &'static str,
    declared_type: String,
    nullable: bool,
    kind: FieldType,
    openapi_type: &'static str,
    /// Empty when the OpenAPI type takes no format.
    openapi_format: &'static str,
    sql_type: &'static str,
    sample: &'static str,
}

impl FieldSpec {
    /// Build a field from its display name and raw type token.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        let name = name.into();
        let raw_type = raw_type.into();

        let nullable = raw_type.ends_with('?');
        let kind = FieldType::resolve(&raw_type);
        let resolved_type = kind.go_name();
        let declared_type = if nullable {
            format!("*{resolved_type}")
        } else {
            resolved_type.to_string()
        };

        Self {
            pascal_name: to_pascal_case(&name),
            camel_name: to_camel_case(&name),
            snake_name: to_snake_case(&name),
            resolved_type,
            declared_type,
            nullable,
            kind,
            openapi_type: kind.openapi_type(),
            openapi_format: kind.openapi_format().unwrap_or_default(),
            sql_type: kind.sql_type(),
            sample: kind.go_sample(),
            name,
            raw_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }

    pub fn pascal_name(&self) -> &str {
        &self.pascal_name
    }

    pub fn camel_name(&self) -> &str {
        &self.camel_name
    }

    pub fn snake_name(&self) -> &str {
        &self.snake_name
    }

    /// Go type name from the type resolver (without the pointer marker).
    pub fn resolved_type(&self) -> &'static str {
        self.resolved_type
    }

    /// Type as declared in a struct: `*T` for nullable fields.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn kind(&self) -> FieldType {
        self.kind
    }
}

/// An entry dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub entry: String,
    pub reason: &'static str,
}

/// Parser output with the dropped entries kept alongside the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldParseReport {
    pub fields: Vec<FieldSpec>,
    pub skipped: Vec<SkippedField>,
}

/// Parse a field spec into an ordered list of fields.
///
/// Insertion order is preserved and duplicate names are kept. An empty
/// input yields an empty list.
pub fn parse_fields(spec: &str) -> Vec<FieldSpec> {
    parse_fields_with_report(spec).fields
}

/// Parse a field spec, also returning every entry that was skipped.
pub fn parse_fields_with_report(spec: &str) -> FieldParseReport {
    let mut report = FieldParseReport::default();
    if spec.trim().is_empty() {
        return report;
    }

    for entry in spec.split(',') {
        let parts: Vec<&str> = entry.split(':').collect();
        let [name, raw_type] = parts.as_slice() else {
            report.skipped.push(SkippedField {
                entry: entry.to_string(),
                reason: "expected exactly one ':' separating name and type",
            });
            continue;
        };

        let (name, raw_type) = (name.trim(), raw_type.trim());
        if name.is_empty() || raw_type.is_empty() {
            report.skipped.push(SkippedField {
                entry: entry.to_string(),
                reason: "name and type must both be non-empty",
            });
            continue;
        }

        report.fields.push(FieldSpec::new(name, raw_type));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_in_order() {
        let fields = parse_fields("name:string,email:string,age:int");

        let names: Vec<_> = fields.iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["name", "email", "age"]);
        assert!(fields.iter().all(|f| !f.nullable()));
        assert_eq!(fields[2].resolved_type(), "int");
    }

    #[test]
    fn question_mark_marks_nullable() {
        let fields = parse_fields("bio:text?");

        assert_eq!(fields.len(), 1);
        assert!(fields[0].nullable());
        assert_eq!(fields[0].raw_type(), "text?");
        assert_eq!(fields[0].resolved_type(), "string");
        assert_eq!(fields[0].declared_type(), "*string");
    }

    #[test]
    fn empty_input_is_empty_list() {
        assert!(parse_fields("").is_empty());
        assert!(parse_fields_with_report("   ").skipped.is_empty());
    }

    #[test]
    fn malformed_entry_is_dropped() {
        let fields = parse_fields("bad,email:string");

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name(), "email");
    }

    #[test]
    fn report_records_dropped_entries() {
        let report = parse_fields_with_report("bad,a:b:c,:int,total:decimal,name:");

        assert_eq!(report.fields.len(), 1);
        let dropped: Vec<_> = report.skipped.iter().map(|s| s.entry.as_str()).collect();
        assert_eq!(dropped, vec!["bad", "a:b:c", ":int", "name:"]);
    }

    #[test]
    fn whitespace_is_trimmed_and_names_derived() {
        let fields = parse_fields(" user_name : String , created_at:datetime");

        assert_eq!(fields[0].name(), "user_name");
        assert_eq!(fields[0].pascal_name(), "UserName");
        assert_eq!(fields[0].camel_name(), "userName");
        assert_eq!(fields[0].snake_name(), "user_name");
        assert_eq!(fields[0].resolved_type(), "string");
        assert_eq!(fields[1].resolved_type(), "time.Time");
    }

    #[test]
    fn duplicates_are_kept() {
        let fields = parse_fields("tag:string,tag:int");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].resolved_type(), "int");
    }

    #[test]
    fn unknown_type_resolves_to_string() {
        let fields = parse_fields("gadget:widget");
        assert_eq!(fields[0].resolved_type(), "string");
        assert_eq!(fields[0].raw_type(), "widget");
    }

    #[test]
    fn serializes_template_facing_names() {
        let field = FieldSpec::new("total", "decimal");
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["pascal_name"], "Total");
        assert_eq!(json["resolved_type"], "float64");
        assert_eq!(json["openapi_format"], "double");
        assert_eq!(json["kind"], "float64");
    }
}
