//! Text record parsing
//!
//! Population lines are `name ID`; contact lines are
//! `ID1 ID2 distance duration`; fields are whitespace separated. Under
//! `ParsePolicy::Lenient` numbers are read like C `atoi`/`atof`: the longest
//! numeric prefix is used and anything unparsable becomes 0.

use crate::domain::config::ParsePolicy;
use thiserror::Error;

/// Malformed record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Required field is absent
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    /// Field is not a valid number
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Distance or duration is zero or negative
    #[error("line {line}: {field} must be positive, found {value}")]
    NonPositive {
        line: usize,
        field: &'static str,
        value: f64,
    },

    /// More fields than the record has
    #[error("line {line}: unexpected trailing field '{value}'")]
    TrailingField { line: usize, value: String },
}

/// Reading a record stream failed
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One population line
#[derive(Clone, Debug, PartialEq)]
pub struct PersonRecord {
    pub name: String,
    pub id: i64,
}

/// One contact line: `source_id` met `target_id`
#[derive(Clone, Debug, PartialEq)]
pub struct ContactRecord {
    pub source_id: i64,
    pub target_id: i64,
    pub distance: f64,
    pub duration: f64,
}

// =============================================================================
// Field parsing
// =============================================================================

/// Parse an integer field
pub fn parse_int(
    value: &str,
    line: usize,
    field: &'static str,
    policy: ParsePolicy,
) -> Result<i64, ParseError> {
    match policy {
        ParsePolicy::Strict => value.parse().map_err(|_| ParseError::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        }),
        ParsePolicy::Lenient => match value.parse() {
            Ok(v) => Ok(v),
            Err(_) => {
                let coerced = leading_int(value);
                tracing::warn!(line, field, value, coerced, "malformed number coerced");
                Ok(coerced)
            }
        },
    }
}

/// Parse a floating point field
pub fn parse_float(
    value: &str,
    line: usize,
    field: &'static str,
    policy: ParsePolicy,
) -> Result<f64, ParseError> {
    match policy {
        ParsePolicy::Strict => match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ParseError::InvalidNumber {
                line,
                field,
                value: value.to_string(),
            }),
        },
        ParsePolicy::Lenient => match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => {
                let coerced = leading_float(value);
                tracing::warn!(line, field, value, coerced, "malformed number coerced");
                Ok(coerced)
            }
        },
    }
}

/// Integer value of the longest `[+-]?[0-9]+` prefix, 0 if there is none
///
/// Saturates instead of overflowing.
pub fn leading_int(value: &str) -> i64 {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = (b - b'0') as i64;
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc
}

/// Float value of the longest decimal prefix, 0 if there is none
///
/// Unlike C `atof`, `inf` and `nan` prefixes are not recognized and a prefix
/// that overflows reads as 0, so lenient parsing only yields finite values.
pub fn leading_float(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // Optional exponent, only taken when it has digits
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .unwrap_or(0.0)
}

// =============================================================================
// Line parsing
// =============================================================================

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    field: &'static str,
    policy: ParsePolicy,
) -> Result<&'a str, ParseError> {
    match (fields.next(), policy) {
        (Some(value), _) => Ok(value),
        (None, ParsePolicy::Lenient) => Ok(""),
        (None, ParsePolicy::Strict) => Err(ParseError::MissingField { line, field }),
    }
}

fn ensure_no_trailing<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    policy: ParsePolicy,
) -> Result<(), ParseError> {
    match (fields.next(), policy) {
        (Some(value), ParsePolicy::Strict) => Err(ParseError::TrailingField {
            line,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Parse a population line; `Ok(None)` for a blank line
pub fn parse_person_line(
    text: &str,
    line: usize,
    policy: ParsePolicy,
) -> Result<Option<PersonRecord>, ParseError> {
    let mut fields = text.split_whitespace();
    let Some(name) = fields.next() else {
        return Ok(None);
    };
    let id = parse_int(next_field(&mut fields, line, "ID", policy)?, line, "ID", policy)?;
    ensure_no_trailing(&mut fields, line, policy)?;

    Ok(Some(PersonRecord {
        name: name.to_string(),
        id,
    }))
}

/// Parse the contacts header line holding the root ID
pub fn parse_root_line(text: &str, line: usize, policy: ParsePolicy) -> Result<i64, ParseError> {
    let mut fields = text.split_whitespace();
    let id = parse_int(
        next_field(&mut fields, line, "root ID", policy)?,
        line,
        "root ID",
        policy,
    )?;
    ensure_no_trailing(&mut fields, line, policy)?;
    Ok(id)
}

/// Parse a contact line; `Ok(None)` for a blank line
pub fn parse_contact_line(
    text: &str,
    line: usize,
    policy: ParsePolicy,
) -> Result<Option<ContactRecord>, ParseError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let mut fields = text.split_whitespace();

    let source_id = parse_int(next_field(&mut fields, line, "ID1", policy)?, line, "ID1", policy)?;
    let target_id = parse_int(next_field(&mut fields, line, "ID2", policy)?, line, "ID2", policy)?;
    let distance = parse_float(
        next_field(&mut fields, line, "distance", policy)?,
        line,
        "distance",
        policy,
    )?;
    let duration = parse_float(
        next_field(&mut fields, line, "duration", policy)?,
        line,
        "duration",
        policy,
    )?;
    ensure_no_trailing(&mut fields, line, policy)?;

    if policy == ParsePolicy::Strict {
        for (field, value) in [("distance", distance), ("duration", duration)] {
            if value <= 0.0 {
                return Err(ParseError::NonPositive { line, field, value });
            }
        }
    }

    Ok(Some(ContactRecord {
        source_id,
        target_id,
        distance,
        duration,
    }))
}
