use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn camel_case(src: &str) -> String {
    src.to_lower_camel_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

/// Folds an identifier for case-insensitive comparison.
///
/// Only ASCII letters are folded, matching how SQL engines treat unquoted
/// identifiers.
pub fn fold_case(src: &str) -> String {
    src.to_ascii_lowercase()
}

/// Compares two identifiers, optionally ignoring ASCII case.
pub fn ident_eq(lhs: &str, rhs: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        lhs.eq_ignore_ascii_case(rhs)
    } else {
        lhs == rhs
    }
}
