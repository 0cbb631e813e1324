//! Parsers for `/proc` pseudo-files.
//!
//! Each submodule owns one grammar and exposes a pure `parse_*` function
//! taking the raw bytes of the file. The helpers here are the shared
//! tokenizer: a borrowed text view, colon splitting and number parsing that
//! tag every failure with the logical file name.

pub mod cpuinfo;
pub mod diskstats;
pub mod loadavg;
pub mod meminfo;
pub mod netdev;
pub mod stat;
pub mod uptime;
pub mod vmstat;

use tracing::warn;

use crate::error::{Result, SysinfoError};

/// Borrows `data` as text without copying.
pub fn as_text<'a>(file: &'static str, data: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(data).map_err(|e| malformed(file, format!("invalid UTF-8: {}", e)))
}

/// Splits `line` into a trimmed key and value around its single colon.
///
/// Lines with no colon or more than one colon are rejected.
pub fn split_key_value<'a>(file: &'static str, line: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = line.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key.trim(), value.trim())),
        _ => Err(malformed(
            file,
            format!(
                "expected one ':' separator, found {} in line {:?}",
                line.matches(':').count(),
                line
            ),
        )),
    }
}

/// Parses a base-10 integer token.
pub fn parse_int(file: &'static str, field: &str, token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|e| malformed(file, format!("invalid {} value {:?}: {}", field, token, e)))
}

/// Parses a floating-point token.
pub fn parse_float(file: &'static str, field: &str, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|e| malformed(file, format!("invalid {} value {:?}: {}", field, token, e)))
}

/// Parses the first `N` whitespace-separated tokens of `text` as floats.
///
/// Tokens past the first `N` are ignored.
pub(crate) fn leading_floats<const N: usize>(
    file: &'static str,
    names: [&str; N],
    text: &str,
) -> Result<[f64; N]> {
    let mut values = [0.0; N];
    let mut tokens = text.split_whitespace();
    for (slot, name) in values.iter_mut().zip(names) {
        let token = tokens.next().ok_or_else(|| {
            malformed(
                file,
                format!("expected at least {} fields, missing {}", N, name),
            )
        })?;
        *slot = parse_float(file, name, token)?;
    }
    Ok(values)
}

/// Builds a `MalformedInput` error and logs it.
pub(crate) fn malformed(file: &'static str, reason: impl Into<String>) -> SysinfoError {
    let reason = reason.into();
    warn!("Rejecting {} content: {}", file, reason);
    SysinfoError::malformed(file, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key_value_trims_both_sides() {
        let (key, value) = split_key_value("meminfo", "MemTotal:   16384 kB ").unwrap();
        assert_eq!(key, "MemTotal");
        assert_eq!(value, "16384 kB");
    }

    #[test]
    fn test_split_key_value_allows_empty_value() {
        let (key, value) = split_key_value("cpuinfo", "power management:").unwrap();
        assert_eq!(key, "power management");
        assert_eq!(value, "");
    }

    #[test]
    fn test_split_key_value_rejects_wrong_colon_count() {
        assert!(split_key_value("meminfo", "MemTotal 16384 kB").is_err());
        assert!(split_key_value("meminfo", "a:b:c").is_err());
    }

    #[test]
    fn test_parse_int_reports_field() {
        let err = parse_int("stat", "btime", "12x").unwrap_err();
        assert!(err.to_string().contains("btime"));
        assert_eq!(parse_int("stat", "btime", "-5").unwrap(), -5);
    }

    #[test]
    fn test_as_text_rejects_invalid_utf8() {
        assert!(as_text("uptime", &[0xff, 0xfe]).is_err());
        assert_eq!(as_text("uptime", b"1.0 2.0").unwrap(), "1.0 2.0");
    }

    #[test]
    fn test_leading_floats_ignores_extra_tokens() {
        let values = leading_floats("loadavg", ["a", "b"], "1.5 2.5 junk").unwrap();
        assert_eq!(values, [1.5, 2.5]);
        assert!(leading_floats("loadavg", ["a", "b"], "1.5").is_err());
    }
}
