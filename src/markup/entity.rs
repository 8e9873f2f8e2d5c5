use crate::foundation::error::{TypeflowError, TypeflowResult};
use crate::foundation::span::Span;

/// Decode one `&...;` entity span to its character.
///
/// `&#65;` and `&#x41;` select code points directly; anything else is looked up
/// in the fixed named-entity table. Unknown names and invalid code points are
/// fatal markup errors.
pub fn decode(span: Span<'_>) -> TypeflowResult<char> {
    let s = span.as_str();
    let body = s.strip_prefix('&').unwrap_or(s);
    let body = body.strip_suffix(';').unwrap_or(body);

    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => num.parse::<u32>(),
        }
        .map_err(|_| TypeflowError::markup(format!("invalid entity '{s}'")))?;
        return char::from_u32(code)
            .ok_or_else(|| TypeflowError::markup(format!("invalid code point in '{s}'")));
    }

    match body {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "nbsp" => Ok('\u{00A0}'),
        "amp" => Ok('&'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        "copy" => Ok('\u{00A9}'),
        _ => Err(TypeflowError::markup(format!("unknown entity '&{body};'"))),
    }
}
