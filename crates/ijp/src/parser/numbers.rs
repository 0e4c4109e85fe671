use alloc::string::ToString;

use crate::error::SyntaxError;

/// A finalized numeric token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    /// No '.' and no exponent.
    Int(i64),
    /// Has '.' or an exponent.
    Float(f64),
}

/// Converts a lexeme already validated by the lexer's number states.
pub(crate) fn parse_number(lexeme: &str) -> Result<Number, SyntaxError> {
    if lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
        match lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Number::Float(value)),
            _ => Err(SyntaxError::InvalidNumber(lexeme.to_string())),
        }
    } else {
        lexeme
            .parse::<i64>()
            .map(Number::Int)
            .map_err(|_| SyntaxError::IntegerOverflow(lexeme.to_string()))
    }
}
