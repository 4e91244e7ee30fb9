//! Core-schema scalar conventions. The parser leaves scalar tags
//! unresolved (`"?"`), so these conversions are applied on demand by the
//! node accessors; they look only at the text, never at the tag.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Integers: optional sign, decimal, `0x`/`0X` hex, or leading-`0` octal.
pub(crate) fn parse_int(s: &str) -> Option<i64> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = parse_magnitude(rest)?;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return None;
        }
        Some((-(magnitude as i128)) as i64)
    } else {
        i64::try_from(magnitude).ok()
    }
}

pub(crate) fn parse_uint(s: &str) -> Option<u64> {
    if s.starts_with('-') {
        return None;
    }
    parse_magnitude(s.strip_prefix('+').unwrap_or(s))
}

fn parse_magnitude(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if s.len() > 1 && s.starts_with('0') {
        u64::from_str_radix(&s[1..], 8).ok()
    } else {
        s.parse().ok()
    }
}

/// Floats: decimal with optional exponent, plus the `.inf`/`.nan` spellings
/// of the core schema. The spellings Rust itself accepts (`inf`, `NaN`)
/// are not valid YAML and are rejected.
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    match s {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    if s.is_empty() || s.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }
    s.parse().ok()
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    if ["true", "yes", "on"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if ["false", "no", "off"].iter().any(|f| s.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn is_null(s: &str) -> bool {
    matches!(s, "" | "~" | "null" | "Null" | "NULL")
}

/// Base64 with interior whitespace permitted, as `!!binary` bodies are
/// usually wrapped across lines.
pub(crate) fn decode_base64(s: &str) -> Option<Vec<u8>> {
    let filtered: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(filtered).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bases() {
        assert_eq!(parse_int("15"), Some(15));
        assert_eq!(parse_int("0x10"), Some(0x10));
        assert_eq!(parse_int("030"), Some(0o30));
        assert_eq!(parse_int("0xffffffff"), Some(0xffff_ffff));
        assert_eq!(parse_int("-15"), Some(-15));
        assert_eq!(parse_int("+15"), Some(15));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn unsigned_integers() {
        assert_eq!(parse_uint("0xffffffff"), Some(0xffff_ffff));
        assert_eq!(parse_uint("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_uint("-1"), None);
    }

    #[test]
    fn infinities() {
        for s in [".inf", ".Inf", ".INF", "+.inf", "+.Inf", "+.INF"] {
            assert_eq!(parse_float(s), Some(f64::INFINITY), "{s}");
        }
        for s in ["-.inf", "-.Inf", "-.INF"] {
            assert_eq!(parse_float(s), Some(f64::NEG_INFINITY), "{s}");
        }
    }

    #[test]
    fn not_a_number() {
        for s in [".nan", ".NaN", ".NAN"] {
            let f = parse_float(s).unwrap();
            assert!(f.is_nan(), "{s}");
        }
        assert_eq!(parse_float("nan"), None);
        assert_eq!(parse_float("inf"), None);
    }

    #[test]
    fn plain_floats() {
        assert_eq!(parse_float("0.278"), Some(0.278));
        assert_eq!(parse_float("-1e3"), Some(-1000.0));
        assert_eq!(parse_float("0x10"), None);
    }

    #[test]
    fn bools() {
        for s in ["true", "True", "TRUE", "yes", "Yes", "on", "ON"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["false", "False", "no", "off", "OFF"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        assert_eq!(parse_bool("y"), None);
    }

    #[test]
    fn nulls() {
        for s in ["", "~", "null", "Null", "NULL"] {
            assert!(is_null(s), "{s:?}");
        }
        assert!(!is_null("NuLL"));
    }

    #[test]
    fn base64_round_trip() {
        assert_eq!(
            decode_base64("SGVsbG8sIFdvcmxkIQ==").as_deref(),
            Some(b"Hello, World!".as_slice())
        );
        assert_eq!(
            decode_base64("SGVs\n bG8s\n IFdvcmxkIQ==").as_deref(),
            Some(b"Hello, World!".as_slice())
        );
        assert_eq!(decode_base64("not base64!"), None);
    }
}
