//! Helper functions available to every template.

use handlebars::{Handlebars, JsonValue, handlebars_helper};
use strata_core::domain::naming::{
    pluralize as pluralize_word, split_words, to_camel_case, to_env_prefix, to_pascal_case,
    to_snake_case,
};

handlebars_helper!(pascal_case: |s: str| to_pascal_case(s));
handlebars_helper!(camel_case: |s: str| to_camel_case(s));
handlebars_helper!(snake_case: |s: str| to_snake_case(s));
handlebars_helper!(env_case: |s: str| to_env_prefix(s));
handlebars_helper!(pluralize: |s: str| pluralize_word(s));
handlebars_helper!(word_count: |s: str| split_words(s).len());

// Substring test on strings, membership test on arrays of strings.
handlebars_helper!(contains: |haystack: Json, needle: str| match haystack {
    JsonValue::String(s) => s.contains(needle),
    JsonValue::Array(items) => items.iter().any(|item| item.as_str() == Some(needle)),
    _ => false,
});

handlebars_helper!(replace: |s: str, from: str, to: str| s.replace(from, to));
handlebars_helper!(trim_prefix: |s: str, prefix: str| s.strip_prefix(prefix).unwrap_or(s).to_string());
handlebars_helper!(trim_suffix: |s: str, suffix: str| s.strip_suffix(suffix).unwrap_or(s).to_string());
// Saturating: overflow never panics.
handlebars_helper!(add: |a: i64, b: i64| a.saturating_add(b));

handlebars_helper!(is_last_field: |index: u64, fields: array| is_last(index, fields.len()));
handlebars_helper!(is_last_entity: |index: u64, entities: array| is_last(index, entities.len()));
handlebars_helper!(is_last_string: |index: u64, items: array| is_last(index, items.len()));

fn is_last(index: u64, len: usize) -> bool {
    usize::try_from(index).is_ok_and(|i| i + 1 == len)
}

/// Names of all registered helpers.
pub const HELPER_NAMES: &[&str] = &[
    "pascal_case",
    "camel_case",
    "snake_case",
    "env_case",
    "pluralize",
    "word_count",
    "contains",
    "replace",
    "trim_prefix",
    "trim_suffix",
    "add",
    "is_last_field",
    "is_last_entity",
    "is_last_string",
];

pub fn register_helpers(handlebars: &mut Handlebars<'_>) {
    handlebars.register_helper("pascal_case", Box::new(pascal_case));
    handlebars.register_helper("camel_case", Box::new(camel_case));
    handlebars.register_helper("snake_case", Box::new(snake_case));
    handlebars.register_helper("env_case", Box::new(env_case));
    handlebars.register_helper("pluralize", Box::new(pluralize));
    handlebars.register_helper("word_count", Box::new(word_count));
    handlebars.register_helper("contains", Box::new(contains));
    handlebars.register_helper("replace", Box::new(replace));
    handlebars.register_helper("trim_prefix", Box::new(trim_prefix));
    handlebars.register_helper("trim_suffix", Box::new(trim_suffix));
    handlebars.register_helper("add", Box::new(add));
    handlebars.register_helper("is_last_field", Box::new(is_last_field));
    handlebars.register_helper("is_last_entity", Box::new(is_last_entity));
    handlebars.register_helper("is_last_string", Box::new(is_last_string));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, data: serde_json::Value) -> String {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true);
        register_helpers(&mut hb);
        hb.render_template(template, &data).unwrap()
    }

    #[test]
    fn every_named_helper_is_registered() {
        let mut hb = Handlebars::new();
        register_helpers(&mut hb);
        for name in HELPER_NAMES {
            assert!(hb.get_helper(name).is_some(), "{name}");
        }
    }

    #[test]
    fn case_helpers() {
        let out = render(
            "{{pascal_case n}} {{camel_case n}} {{snake_case m}} {{env_case p}}",
            json!({"n": "user_name", "m": "UserName", "p": "my-shop"}),
        );
        assert_eq!(out, "UserName userName user_name MY_SHOP");
    }

    #[test]
    fn pluralize_and_word_count() {
        let out = render(
            "{{pluralize a}} {{pluralize b}} {{word_count c}}",
            json!({"a": "category", "b": "status", "c": "order line item"}),
        );
        assert_eq!(out, "categories statuses 3");
    }

    #[test]
    fn contains_on_strings_and_arrays() {
        let data = json!({"features": ["cors", "auth"], "s": "example.com/shop"});
        assert_eq!(render("{{#if (contains features \"auth\")}}yes{{/if}}", data.clone()), "yes");
        assert_eq!(render("{{#if (contains features \"swagger\")}}yes{{else}}no{{/if}}", data.clone()), "no");
        assert_eq!(render("{{contains s \".com\"}}", data), "true");
    }

    #[test]
    fn string_helpers() {
        let out = render(
            "{{replace s \"/\" \"_\"}} {{trim_prefix s \"example.com/\"}} {{trim_suffix f \".go\"}} {{add 2 3}}",
            json!({"s": "example.com/shop", "f": "main.go"}),
        );
        assert_eq!(out, "example.com_shop shop main 5");
    }

    #[test]
    fn add_saturates_instead_of_overflowing() {
        let out = render("{{add 9223372036854775807 1}}", json!({}));
        assert_eq!(out, "9223372036854775807");
    }

    #[test]
    fn last_item_helpers() {
        let out = render(
            "{{#each items}}{{this}}{{#unless (is_last_string @index ../items)}}, {{/unless}}{{/each}}",
            json!({"items": ["a", "b", "c"]}),
        );
        assert_eq!(out, "a, b, c");
    }
}
