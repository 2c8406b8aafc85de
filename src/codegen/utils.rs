//! Naming helpers for generated code.

use convert_case::{Case, Casing};

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Accessor names the generated wrappers already use.
const RESERVED_METHODS: &[&str] = &["new", "from_wire", "from_record", "record", "into_record"];

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// Convert a string to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Escape a string for use in Rust string literals
pub fn escape_rust_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Method name for a property getter, avoiding keywords and the wrapper's own methods.
pub fn accessor_name(property: &str) -> String {
    let snake = to_snake_case(property);
    if RUST_KEYWORDS.contains(&snake.as_str()) || RESERVED_METHODS.contains(&snake.as_str()) {
        format!("{}_field", snake)
    } else {
        snake
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_snake_case("narrVersion"), "narr_version");
        assert_eq!(to_snake_case("ws_id"), "ws_id");
        assert_eq!(to_pascal_case("log_context"), "LogContext");
        assert_eq!(to_pascal_case("LogContext"), "LogContext");
    }

    #[test]
    fn test_escape_rust_string() {
        assert_eq!(escape_rust_string("a\nb"), "a\\nb");
        assert_eq!(escape_rust_string("one of \"r\""), "one of \\\"r\\\"");
    }

    #[test]
    fn test_accessor_name() {
        assert_eq!(accessor_name("share_level"), "share_level");
        assert_eq!(accessor_name("type"), "type_field");
        assert_eq!(accessor_name("record"), "record_field");
    }
}
