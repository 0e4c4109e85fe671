use super::{lexer::Token, numbers::Number};
use crate::{event::ParseEvent, path::Path};

/// Turns a value token into the event for the slot at `path`.
///
/// Punctuators carry no value; they are handed back to the caller.
pub(crate) fn build_event(path: Path, token: Token) -> Result<ParseEvent, Token> {
    Ok(match token {
        Token::Null => ParseEvent::Null { path },
        Token::Bool(value) => ParseEvent::Bool { path, value },
        Token::Number(Number::Int(value)) => ParseEvent::Int { path, value },
        Token::Number(Number::Float(value)) => ParseEvent::Float { path, value },
        Token::String(value) => ParseEvent::String { path, value },
        Token::StringPart(fragment) => ParseEvent::StringPart { path, fragment },
        Token::Punctuator(_) => return Err(token),
    })
}
