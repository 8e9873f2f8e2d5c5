use crate::foundation::error::{TypeflowError, TypeflowResult};
use crate::foundation::span::Span;

/// A parsed numeric tag value and which representation produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberLiteral {
    /// Unsigned hexadecimal literal, written with a leading `#`.
    Uint(u32),
    /// Signed decimal literal with an optional fractional part.
    Float(f32),
}

impl NumberLiteral {
    /// Parse a trimmed numeric span.
    ///
    /// Grammar: `#` followed by case-insensitive hex digits, or an optional
    /// `-`, a digit run, and an optional `.` plus digit run. No exponent
    /// notation.
    pub fn parse(span: Span<'_>) -> TypeflowResult<NumberLiteral> {
        let s = span.trim().as_str();
        let invalid = || TypeflowError::markup(format!("invalid number literal '{s}'"));

        if let Some(hex) = s.strip_prefix('#') {
            if hex.is_empty() {
                return Err(invalid());
            }
            let v = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return Ok(NumberLiteral::Uint(v));
        }

        let digits = s.strip_prefix('-').unwrap_or(s);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
            return Err(invalid());
        }

        let v = s.parse::<f32>().map_err(|_| invalid())?;
        Ok(NumberLiteral::Float(v))
    }

    /// Numeric value regardless of representation.
    pub fn as_f32(self) -> f32 {
        match self {
            NumberLiteral::Uint(v) => v as f32,
            NumberLiteral::Float(v) => v,
        }
    }
}

/// Parse a span that must be a decimal float (tag values like `wait=0.5`).
pub(crate) fn parse_f32(span: Span<'_>) -> TypeflowResult<f32> {
    Ok(NumberLiteral::parse(span)?.as_f32())
}
