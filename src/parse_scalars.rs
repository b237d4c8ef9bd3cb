//! Textual scalar parsing shared by the scalar node deserializer and the type converter.
//!
//! Every parser returns `None` when the text is not a literal of the requested kind; the
//! callers decide whether that is an error and which location to attach.

/// Parse a YAML 1.1 boolean (handles the "Norway problem" only when asked to).
///
/// Accepted TRUE literals (case-insensitive): "y", "yes", "true", "on"
/// Accepted FALSE literals (case-insensitive): "n", "no", "false", "off"
pub(crate) fn parse_yaml11_bool(s: &str) -> Option<bool> {
    let t = s.trim();
    if t.eq_ignore_ascii_case("true")
        || t.eq_ignore_ascii_case("yes")
        || t.eq_ignore_ascii_case("y")
        || t.eq_ignore_ascii_case("on")
    {
        Some(true)
    } else if t.eq_ignore_ascii_case("false")
        || t.eq_ignore_ascii_case("no")
        || t.eq_ignore_ascii_case("n")
        || t.eq_ignore_ascii_case("off")
    {
        Some(false)
    } else {
        None
    }
}

/// Parse a YAML 1.2 core schema boolean: `true`/`false` in the three casings the schema allows.
pub(crate) fn parse_yaml12_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Whether a plain scalar spells null in the core schema.
pub(crate) fn is_null_literal(s: &str) -> bool {
    matches!(s, "" | "~" | "null" | "Null" | "NULL")
}

fn parse_digits_u64(digits: &str, radix: u32) -> Option<u64> {
    let mut val: u64 = 0;
    let mut saw = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(radix)?;
        val = val.checked_mul(radix as u64)?.checked_add(d as u64)?;
        saw = true;
    }
    saw.then_some(val)
}

/// Parse a YAML integer into `i64`.
///
/// Accepts an optional sign, `0x`/`0o`/`0b` prefixes, `_` digit separators and, when
/// `legacy_octal` is set, the YAML 1.1 `00`-prefixed octal form.
pub(crate) fn parse_int(s: &str, legacy_octal: bool) -> Option<i64> {
    let t = s.trim();
    let (neg, rest) = match t.strip_prefix('+') {
        Some(r) => (false, r),
        None => match t.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, t),
        },
    };

    let (radix, digits) = if let Some(r) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, r)
    } else if let Some(r) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        (8, r)
    } else if let Some(r) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        (2, r)
    } else if legacy_octal && rest.starts_with("00") {
        (8, &rest[2..])
    } else {
        (10, rest)
    };

    let mag = parse_digits_u64(digits, radix)?;
    if neg {
        // i64::MIN has no positive counterpart
        if mag == (i64::MAX as u64) + 1 {
            Some(i64::MIN)
        } else {
            i64::try_from(mag).ok().map(|v| -v)
        }
    } else {
        i64::try_from(mag).ok()
    }
}

/// Parse a YAML 1.2 float, including `.nan` and `±.inf`.
///
/// Plain integers are accepted too, so `parse_float("3")` is `Some(3.0)`.
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    let t = s.trim();
    match t.to_ascii_lowercase().as_str() {
        ".nan" | "+.nan" | "-.nan" => Some(f64::NAN),
        ".inf" | "+.inf" => Some(f64::INFINITY),
        "-.inf" => Some(f64::NEG_INFINITY),
        _ => {
            // Rust accepts "inf"/"nan" spellings that YAML does not.
            if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                return None;
            }
            t.replace('_', "").parse::<f64>().ok()
        }
    }
}

/// Whether the text looks like a float literal rather than an integer.
///
/// Used for untyped inference so that `1` stays an integer while `1.0` and `1e3` become floats.
pub(crate) fn looks_like_float(s: &str) -> bool {
    let t = s.trim();
    let lower = t.to_ascii_lowercase();
    if matches!(lower.as_str(), ".nan" | "+.nan" | "-.nan" | ".inf" | "+.inf" | "-.inf") {
        return true;
    }
    t.contains(['.', 'e', 'E']) && parse_float(t).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_in_all_bases() {
        assert_eq!(parse_int("42", false), Some(42));
        assert_eq!(parse_int("-0x1F", false), Some(-31));
        assert_eq!(parse_int("0o17", false), Some(15));
        assert_eq!(parse_int("0b1010", false), Some(10));
        assert_eq!(parse_int("1_000", false), Some(1000));
        assert_eq!(parse_int("-9223372036854775808", false), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775808", false), None);
        assert_eq!(parse_int("abc", false), None);
        assert_eq!(parse_int("", false), None);
    }

    #[test]
    fn legacy_octal_is_opt_in() {
        assert_eq!(parse_int("0017", true), Some(15));
        assert_eq!(parse_int("0017", false), Some(17));
    }

    #[test]
    fn floats_and_specials() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("-.inf"), Some(f64::NEG_INFINITY));
        assert!(parse_float(".NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("nope"), None);
        assert!(looks_like_float("1e3"));
        assert!(!looks_like_float("13"));
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_yaml11_bool("Yes"), Some(true));
        assert_eq!(parse_yaml11_bool("off"), Some(false));
        assert_eq!(parse_yaml12_bool("yes"), None);
        assert_eq!(parse_yaml12_bool("TRUE"), Some(true));
    }
}
