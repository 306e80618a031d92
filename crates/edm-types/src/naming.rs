//! Field-naming convention between the wire format and the model.
//!
//! Wire documents use `PascalCase` keys (`CVRSnapshot`, `GpUnitIds`) plus a
//! handful of reserved `@` keys (`@id`, `@type`). Records store fields under
//! `snake_case` names (`cvr_snapshot`, `gp_unit_ids`), and reserved keys
//! under the [`AT_PREFIX`] marker (`model__id`).
//!
//! The conversion is lossy in the internal-to-wire direction: `CVRSnapshot`
//! becomes `cvr_snapshot`, which converts back to `CvrSnapshot`. Records keep
//! the wire name they were loaded with for that reason.

use crate::error::{ModelError, ModelResult};

/// Internal marker standing in for a literal `@` at the start of a wire key.
pub const AT_PREFIX: &str = "model__";

/// Split a `PascalCase` name into its words.
///
/// The text must start with a capital letter, optionally after a single
/// `_`. Anything that does not tokenize yields an empty vector.
///
/// ```
/// use edm_types::naming::split_camel_case;
///
/// assert_eq!(split_camel_case("CVRSnapshot"), vec!["CVR", "Snapshot"]);
/// assert_eq!(split_camel_case("A_Bc"), vec!["A", "_Bc"]);
/// assert!(split_camel_case("lowerFirst").is_empty());
/// ```
pub fn split_camel_case(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'_'));
    if !bytes.get(start).is_some_and(u8::is_ascii_uppercase) {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let begin = i;
        if bytes[i] == b'_' {
            i += 1;
        }
        let Some(&first) = bytes.get(i) else {
            return Vec::new();
        };

        if first.is_ascii_uppercase() {
            let run_start = i;
            while bytes.get(i).is_some_and(u8::is_ascii_uppercase) {
                i += 1;
            }
            let next_is_lower = bytes.get(i).is_some_and(u8::is_ascii_lowercase);
            if i - run_start > 1 && next_is_lower {
                // The last capital begins the next word.
                i -= 1;
            } else if next_is_lower {
                while bytes.get(i).is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
                    i += 1;
                }
            }
        } else if first.is_ascii_lowercase() {
            while bytes.get(i).is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
                i += 1;
            }
        } else if first.is_ascii_digit() {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
        } else {
            return Vec::new();
        }

        tokens.push(&text[begin..i]);
    }
    tokens
}

/// Split a `snake_case` name into its words.
///
/// A leading run of underscores is kept as its own token; every other
/// underscore is a separator and is dropped.
pub fn split_snake_case(text: &str) -> Vec<&str> {
    let lead = text.len() - text.trim_start_matches('_').len();
    let rest = &text[lead..];
    if !rest.is_empty() {
        let starts_lower = rest.starts_with(|c: char| c.is_ascii_lowercase());
        let well_formed = rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !starts_lower || !well_formed {
            return Vec::new();
        }
    }

    let mut tokens = Vec::new();
    if lead > 0 {
        tokens.push(&text[..lead]);
    }
    tokens.extend(rest.split('_').filter(|piece| !piece.is_empty()));
    tokens
}

/// Convert a `PascalCase` name to `snake_case`.
///
/// Returns an empty string when the input does not tokenize.
pub fn camel_to_snake(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for (i, token) in split_camel_case(text).into_iter().enumerate() {
        if i > 0 && !token.starts_with('_') {
            out.push('_');
        }
        out.push_str(&token.to_ascii_lowercase());
    }
    out
}

/// Convert a `snake_case` name to `PascalCase`.
///
/// Returns an empty string when the input does not tokenize.
pub fn snake_to_camel(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in split_snake_case(text) {
        if token.starts_with('_') {
            out.push_str(token);
            continue;
        }
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Map a wire key to the internal field name.
///
/// `@id` becomes `model__id`; `PascalCase` keys become `snake_case`.
pub fn to_internal(wire: &str) -> ModelResult<String> {
    if let Some(rest) = wire.strip_prefix('@') {
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ModelError::InvalidFieldName(wire.to_string()));
        }
        return Ok(format!("{AT_PREFIX}{rest}"));
    }
    let name = camel_to_snake(wire);
    if name.is_empty() {
        return Err(ModelError::InvalidFieldName(wire.to_string()));
    }
    Ok(name)
}

/// Map an internal field name to its wire key.
///
/// `model__type` becomes `@type`; `snake_case` names become `PascalCase`.
pub fn to_wire(internal: &str) -> ModelResult<String> {
    if let Some(rest) = internal.strip_prefix(AT_PREFIX) {
        if rest.is_empty() {
            return Err(ModelError::InvalidFieldName(internal.to_string()));
        }
        return Ok(format!("@{rest}"));
    }
    let name = snake_to_camel(internal);
    if name.is_empty() {
        return Err(ModelError::InvalidFieldName(internal.to_string()));
    }
    Ok(name)
}

/// Wire key for a new internal field name.
///
/// Stricter than [`to_wire`]: the wire key must convert back to `internal`,
/// so a written document loads with the same field names. `a_b` is
/// rejected because its wire key `AB` reads back as `ab`.
pub fn wire_name(internal: &str) -> ModelResult<String> {
    let wire = to_wire(internal)?;
    if to_internal(&wire)? != internal {
        return Err(ModelError::InvalidFieldName(internal.to_string()));
    }
    Ok(wire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_split_rejects_lower_start() {
        for text in ["", "_", "a", "ab", "aB", "_a", "_aB"] {
            assert!(split_camel_case(text).is_empty(), "{text:?}");
        }
    }

    #[test]
    fn camel_split_capital_runs() {
        assert_eq!(split_camel_case("A"), vec!["A"]);
        assert_eq!(split_camel_case("AB"), vec!["AB"]);
        assert_eq!(split_camel_case("Ab"), vec!["Ab"]);
        assert_eq!(split_camel_case("ABC"), vec!["ABC"]);
        assert_eq!(split_camel_case("ABc"), vec!["A", "Bc"]);
        assert_eq!(split_camel_case("AbC"), vec!["Ab", "C"]);
    }

    #[test]
    fn camel_split_underscores_prefix_next_word() {
        assert_eq!(split_camel_case("A_B"), vec!["A", "_B"]);
        assert_eq!(split_camel_case("A_BC"), vec!["A", "_BC"]);
        assert_eq!(split_camel_case("A_Bc"), vec!["A", "_Bc"]);
        assert_eq!(split_camel_case("A_b"), vec!["A", "_b"]);
        assert_eq!(split_camel_case("A_bc"), vec!["A", "_bc"]);
        assert_eq!(split_camel_case("_A"), vec!["_A"]);
        assert_eq!(split_camel_case("_Ab"), vec!["_Ab"]);
        assert_eq!(split_camel_case("_A_B"), vec!["_A", "_B"]);
        assert_eq!(split_camel_case("_A_Bc"), vec!["_A", "_Bc"]);
    }

    #[test]
    fn camel_split_rejects_punctuation() {
        assert!(split_camel_case("Gp-Unit").is_empty());
        assert!(split_camel_case("A__B").is_empty());
    }

    #[test]
    fn snake_split() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(split_snake_case(""), empty);
        assert_eq!(split_snake_case("_"), vec!["_"]);
        assert_eq!(split_snake_case("__"), vec!["__"]);
        assert_eq!(split_snake_case("_a"), vec!["_", "a"]);
        assert_eq!(split_snake_case("_ab"), vec!["_", "ab"]);
        assert_eq!(split_snake_case("_a_b"), vec!["_", "a", "b"]);
        assert_eq!(split_snake_case("_a__b"), vec!["_", "a", "b"]);
        assert_eq!(split_snake_case("__a"), vec!["__", "a"]);
        assert_eq!(split_snake_case("_a0"), vec!["_", "a0"]);
        assert_eq!(split_snake_case("a"), vec!["a"]);
        assert_eq!(split_snake_case("ab"), vec!["ab"]);
        assert_eq!(split_snake_case("a_b"), vec!["a", "b"]);
        assert_eq!(split_snake_case("a__b"), vec!["a", "b"]);
        assert_eq!(split_snake_case("0"), empty);
    }

    #[test]
    fn camel_to_snake_cases() {
        let cases = [
            ("A", "a"),
            ("Ab", "ab"),
            ("Abc", "abc"),
            ("AB", "ab"),
            ("ABc", "a_bc"),
            ("AbC", "ab_c"),
            ("ABC", "abc"),
            ("AbcDefGhi", "abc_def_ghi"),
            ("ABCDefGhi", "abc_def_ghi"),
            ("Abc123", "abc123"),
            ("ABC123", "abc_123"),
            ("AbC123", "ab_c_123"),
        ];
        for (text, expected) in cases {
            assert_eq!(camel_to_snake(text), expected, "{text:?}");
        }
    }

    #[test]
    fn snake_to_camel_cases() {
        let cases = [
            ("a", "A"),
            ("ab", "Ab"),
            ("abc", "Abc"),
            ("a_b", "AB"),
            ("a_bc", "ABc"),
            ("ab_c", "AbC"),
            ("abc_def_ghi", "AbcDefGhi"),
        ];
        for (text, expected) in cases {
            assert_eq!(snake_to_camel(text), expected, "{text:?}");
        }
    }

    #[test]
    fn reserved_keys_use_at_prefix() {
        assert_eq!(to_internal("@id").unwrap(), "model__id");
        assert_eq!(to_internal("@type").unwrap(), "model__type");
        assert_eq!(to_wire("model__id").unwrap(), "@id");
        assert_eq!(to_wire("model__type").unwrap(), "@type");
    }

    #[test]
    fn wire_names_convert_to_snake_case() {
        assert_eq!(to_internal("CVRSnapshot").unwrap(), "cvr_snapshot");
        assert_eq!(to_internal("GpUnitIds").unwrap(), "gp_unit_ids");
        assert_eq!(to_wire("gp_unit_ids").unwrap(), "GpUnitIds");
        // Acronyms do not survive the trip back.
        assert_eq!(to_wire("cvr_snapshot").unwrap(), "CvrSnapshot");
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(matches!(to_internal("@"), Err(ModelError::InvalidFieldName(_))));
        assert!(matches!(to_internal("@bad key"), Err(ModelError::InvalidFieldName(_))));
        assert!(matches!(to_internal("notPascal"), Err(ModelError::InvalidFieldName(_))));
        assert!(matches!(to_wire("NotSnake"), Err(ModelError::InvalidFieldName(_))));
        assert!(matches!(to_wire("model__"), Err(ModelError::InvalidFieldName(_))));
    }

    #[test]
    fn wire_name_requires_round_trip() {
        assert_eq!(wire_name("gp_unit_ids").unwrap(), "GpUnitIds");
        assert_eq!(wire_name("model__id").unwrap(), "@id");
        for bad in ["Party", "Bad Name", "a_b", "f0", ""] {
            assert_eq!(wire_name(bad), Err(ModelError::InvalidFieldName(bad.to_string())), "{bad:?}");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn conversion_never_panics(text in "\\PC{0,12}") {
                let _ = to_internal(&text);
                let _ = to_wire(&text);
            }

            #[test]
            fn multi_letter_words_round_trip(snake in "[a-z]{2,6}(_[a-z]{2,6}){0,3}") {
                let camel = snake_to_camel(&snake);
                prop_assert_eq!(camel_to_snake(&camel), snake.clone());
                prop_assert_eq!(to_internal(&to_wire(&snake).unwrap()).unwrap(), snake);
            }
        }
    }
}
