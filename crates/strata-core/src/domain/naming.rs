//! Identifier case conversion and pluralization.
//!
//! These functions are the naming contract between the generator and every
//! template: the same input must always produce the same identifiers, so
//! none of them look at anything but their argument.
//!
//! ## Conversion table
//!
//! | Input         | Pascal       | camel        | snake          |
//! |---------------|--------------|--------------|----------------|
//! | `user_name`   | `UserName`   | `userName`   | `user_name`    |
//! | `UserName`    | `Username`   | `username`   | `user_name`    |
//! | `order-items` | `OrderItems` | `orderItems` | `order-items`  |
//! | `ID`          | `Id`         | `id`         | `i_d`          |
//!
//! Word splitting only happens on explicit separators. An identifier that
//! already carries internal capitals (`UserName`) is one word, so its
//! Pascal/camel forms collapse the inner capitals. Snake case works the
//! other way round: it only looks at capitals and never at separators.

/// Characters that end a word.
const SEPARATORS: [char; 3] = ['_', '-', ' '];

/// Split an identifier into words on `_`, `-` and space.
///
/// Empty tokens (from leading, trailing or repeated separators) are dropped.
pub fn split_words(input: &str) -> Vec<&str> {
    input
        .split(SEPARATORS)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Convert to PascalCase.
///
/// Every word is lower-cased, then its first character is upper-cased.
pub fn to_pascal_case(input: &str) -> String {
    split_words(input)
        .into_iter()
        .map(capitalize)
        .collect()
}

/// Convert to camelCase: PascalCase with the first character lower-cased.
pub fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert to snake_case.
///
/// An `_` goes in front of every upper-case character except the very first
/// one, then the whole string is lower-cased. Acronyms are not special:
/// `"ID"` becomes `"i_d"`.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, c) in input.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// Naive English pluralization.
///
/// | Ending | Rule            | Example                   |
/// |--------|-----------------|---------------------------|
/// | `s`    | append `es`     | `status` → `statuses`     |
/// | `y`    | `y` → `ies`     | `category` → `categories` |
/// | other  | append `s`      | `user` → `users`          |
///
/// Vowel + `y` endings (`key` → `kies`) and irregular nouns come out wrong.
/// That is the documented behaviour; templates rely on it being stable.
pub fn pluralize(word: &str) -> String {
    if word.ends_with('s') {
        format!("{word}es")
    } else if let Some(stem) = word.strip_suffix('y') {
        format!("{stem}ies")
    } else {
        format!("{word}s")
    }
}

/// Environment-variable prefix for a project name.
///
/// `my-shop` → `MY_SHOP`. Separators become `_`; nothing else is touched.
pub fn to_env_prefix(project_name: &str) -> String {
    split_words(project_name).join("_").to_uppercase()
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
