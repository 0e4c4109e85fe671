//! The incremental lexer.
//!
//! Input arrives through [`Lexer::push`] in arbitrary pieces. Every call to
//! [`Lexer::next_token`] consumes characters until it can return a complete
//! token, or returns `Ok(None)` once the pending input is exhausted. The
//! partially lexed token survives in [`LexState`] and the scratch buffer, so
//! the next `push` resumes exactly where the previous chunk stopped: inside a
//! string, an escape, a surrogate pair, a number or a literal.
//!
//! Numbers have no terminator of their own, so a number is only produced once
//! the character after it is seen, or when [`Lexer::finish`] signals the end of
//! input.
#![allow(clippy::enum_glob_use)]
#![expect(clippy::inline_always)]

use alloc::string::String;

use super::{
    buffer::Buffer,
    escape_buffer::{Escaped, UnicodeEscapeBuffer, combine_surrogates},
    literal_buffer::{ExpectedLiteralBuffer, Step},
    numbers::{Number, parse_number},
};
use crate::error::{ErrorSource, IncompleteInput, SyntaxError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// One of `{` `}` `[` `]` `:` `,`
    Punctuator(u8),
    /// A complete, decoded string.
    String(String),
    /// Decoded text of a string that is still open, produced when the input
    /// runs out mid-string.
    StringPart(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Token {
    /// Short human description used in structural error messages.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Token::Punctuator(b'{') => "'{'",
            Token::Punctuator(b'}') => "'}'",
            Token::Punctuator(b'[') => "'['",
            Token::Punctuator(b']') => "']'",
            Token::Punctuator(b':') => "':'",
            Token::Punctuator(b',') => "','",
            Token::Punctuator(_) => "punctuation",
            Token::String(_) | Token::StringPart(_) => "a string",
            Token::Number(_) => "a number",
            Token::Bool(true) => "'true'",
            Token::Bool(false) => "'false'",
            Token::Null => "'null'",
        }
    }
}

/// Where the lexer is in the concatenated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    /// Byte offset of the next unread character.
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Between tokens.
    Default,
    /// Inside `true`, `false` or `null`.
    Literal,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    String,
    StringEscape,
    StringEscapeUnicode,
    /// A high surrogate was decoded; expecting the `\` of its low half.
    SurrogateBackslash,
    /// Expecting the `u` of the low surrogate escape.
    SurrogateU,
}

#[derive(Debug)]
pub(crate) struct Lexer {
    source: Buffer,
    state: LexState,
    pos: Position,

    /// Scratch text of the token in flight: number lexemes and decoded
    /// strings.
    buffer: String,
    /// Start within `buffer` of the text not yet surfaced as a `StringPart`.
    fragment_start: usize,
    unicode_escape_buffer: UnicodeEscapeBuffer,
    high_surrogate: Option<u16>,
    expected_literal: ExpectedLiteralBuffer,

    /// Whether an exhausted string should surface a `StringPart`.
    fragmenting: bool,
    allow_unicode_whitespace: bool,
}

impl Lexer {
    pub(crate) fn new(allow_unicode_whitespace: bool) -> Self {
        Self {
            source: Buffer::new(),
            state: LexState::Default,
            pos: Position::default(),
            buffer: String::new(),
            fragment_start: 0,
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
            high_surrogate: None,
            expected_literal: ExpectedLiteralBuffer::none(),
            fragmenting: false,
            allow_unicode_whitespace,
        }
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.source.push(text);
    }

    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    /// Controls whether running out of input inside a string yields a
    /// `StringPart`. Object keys are lexed with this off.
    pub(crate) fn set_fragmenting(&mut self, fragmenting: bool) {
        self.fragmenting = fragmenting;
    }

    /// Skips whitespace and returns the next unread character, if any.
    pub(crate) fn skip_whitespace(&mut self) -> Option<char> {
        debug_assert_eq!(self.state, LexState::Default);
        while let Some(c) = self.source.peek() {
            if !self.is_whitespace(c) {
                return Some(c);
            }
            self.advance_char();
        }
        None
    }

    /// Lexes the next token from the pending input.
    ///
    /// Returns `Ok(None)` when more input is needed.
    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        loop {
            let Some(c) = self.source.peek() else {
                return Ok(self.produce_string_part());
            };
            if let Some(token) = self.step(c)? {
                return Ok(Some(token));
            }
        }
    }

    /// Signals the end of input and returns the final token, if the input
    /// ended right after a number.
    pub(crate) fn finish(&mut self) -> Result<Option<Token>, ErrorSource> {
        use LexState::*;
        debug_assert!(self.source.is_empty());
        match self.state {
            Default => Ok(None),
            Zero | DecimalInteger | DecimalFraction | DecimalExponentInteger => {
                Ok(Some(self.produce_number()?))
            }
            Literal | Sign | DecimalPoint | DecimalExponent | DecimalExponentSign => {
                Err(SyntaxError::UnexpectedEndOfInput.into())
            }
            String | StringEscape | StringEscapeUnicode | SurrogateBackslash | SurrogateU => {
                Err(IncompleteInput::UnterminatedString.into())
            }
        }
    }

    #[inline(always)]
    fn is_whitespace(&self, c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r') || (self.allow_unicode_whitespace && c.is_whitespace())
    }

    #[inline(always)]
    fn advance_char(&mut self) {
        if let Some(ch) = self.source.next() {
            self.pos.offset += ch.len_utf8();
            if ch == '\n' {
                self.pos.line += 1;
                self.pos.column = 1;
            } else {
                self.pos.column += 1;
            }
        }
    }

    #[inline(always)]
    fn accept(&mut self, c: char, next: LexState) {
        self.advance_char();
        self.buffer.push(c);
        self.state = next;
    }

    /// Moves a run of digits straight into the scratch buffer.
    #[inline(always)]
    fn copy_digits(&mut self) {
        let before = self.buffer.len();
        let copied = self
            .source
            .copy_while(&mut self.buffer, |d| d.is_ascii_digit());
        self.pos.column += copied;
        self.pos.offset += self.buffer.len() - before;
    }

    fn produce_number(&mut self) -> Result<Token, SyntaxError> {
        let number = parse_number(&self.buffer)?;
        self.buffer.clear();
        self.state = LexState::Default;
        Ok(Token::Number(number))
    }

    fn produce_string(&mut self) -> Token {
        self.state = LexState::Default;
        self.fragment_start = 0;
        Token::String(core::mem::take(&mut self.buffer))
    }

    fn produce_string_part(&mut self) -> Option<Token> {
        let in_string = matches!(
            self.state,
            LexState::String
                | LexState::StringEscape
                | LexState::StringEscapeUnicode
                | LexState::SurrogateBackslash
                | LexState::SurrogateU
        );
        if !in_string || !self.fragmenting || self.buffer.len() == self.fragment_start {
            return None;
        }
        let fragment = self.buffer[self.fragment_start..].into();
        self.fragment_start = self.buffer.len();
        Some(Token::StringPart(fragment))
    }

    fn push_escaped(&mut self, ch: char) {
        self.advance_char();
        self.buffer.push(ch);
        self.state = LexState::String;
    }

    fn pending_surrogate_error(&self) -> SyntaxError {
        SyntaxError::InvalidUnicodeEscapeSequence(self.high_surrogate.map_or(0, u32::from))
    }

    #[allow(clippy::too_many_lines)]
    #[inline(always)]
    fn step(&mut self, c: char) -> Result<Option<Token>, SyntaxError> {
        use LexState::*;
        match self.state {
            Default => match c {
                c if self.is_whitespace(c) => {
                    self.advance_char();
                    Ok(None)
                }
                '{' | '}' | '[' | ']' | ':' | ',' => {
                    self.advance_char();
                    #[expect(clippy::cast_possible_truncation)]
                    let punctuator = c as u8;
                    Ok(Some(Token::Punctuator(punctuator)))
                }
                '"' => {
                    self.advance_char();
                    self.buffer.clear();
                    self.fragment_start = 0;
                    self.state = String;
                    Ok(None)
                }
                '-' => {
                    self.buffer.clear();
                    self.accept(c, Sign);
                    Ok(None)
                }
                '0' => {
                    self.buffer.clear();
                    self.accept(c, Zero);
                    Ok(None)
                }
                '1'..='9' => {
                    self.buffer.clear();
                    self.accept(c, DecimalInteger);
                    Ok(None)
                }
                't' | 'f' | 'n' => {
                    debug_assert!(!self.expected_literal.is_pending());
                    self.advance_char();
                    self.expected_literal = ExpectedLiteralBuffer::new(c);
                    self.state = Literal;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            // -------------------------- LITERALS -----------------------------
            Literal => match self.expected_literal.step(c) {
                Step::NeedMore => {
                    self.advance_char();
                    Ok(None)
                }
                Step::Done(token) => {
                    self.advance_char();
                    self.state = Default;
                    Ok(Some(token))
                }
                Step::Reject => Err(SyntaxError::InvalidCharacter(c)),
            },

            // -------------------------- NUMBERS -----------------------------
            Sign => match c {
                '0' => {
                    self.accept(c, Zero);
                    Ok(None)
                }
                '1'..='9' => {
                    self.accept(c, DecimalInteger);
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            Zero => match c {
                '.' => {
                    self.accept(c, DecimalPoint);
                    Ok(None)
                }
                'e' | 'E' => {
                    self.accept(c, DecimalExponent);
                    Ok(None)
                }
                '0'..='9' => {
                    let mut lexeme = core::mem::take(&mut self.buffer);
                    lexeme.push(c);
                    Err(SyntaxError::InvalidNumber(lexeme))
                }
                _ => self.produce_number().map(Some),
            },

            DecimalInteger => match c {
                '.' => {
                    self.accept(c, DecimalPoint);
                    Ok(None)
                }
                'e' | 'E' => {
                    self.accept(c, DecimalExponent);
                    Ok(None)
                }
                '0'..='9' => {
                    self.copy_digits();
                    Ok(None)
                }
                _ => self.produce_number().map(Some),
            },

            DecimalPoint => match c {
                '0'..='9' => {
                    self.accept(c, DecimalFraction);
                    self.copy_digits();
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            DecimalFraction => match c {
                'e' | 'E' => {
                    self.accept(c, DecimalExponent);
                    Ok(None)
                }
                '0'..='9' => {
                    self.copy_digits();
                    Ok(None)
                }
                _ => self.produce_number().map(Some),
            },

            DecimalExponent => match c {
                '+' | '-' => {
                    self.accept(c, DecimalExponentSign);
                    Ok(None)
                }
                '0'..='9' => {
                    self.accept(c, DecimalExponentInteger);
                    self.copy_digits();
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            DecimalExponentSign => match c {
                '0'..='9' => {
                    self.accept(c, DecimalExponentInteger);
                    self.copy_digits();
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            DecimalExponentInteger => match c {
                '0'..='9' => {
                    self.copy_digits();
                    Ok(None)
                }
                _ => self.produce_number().map(Some),
            },

            // -------------------------- STRINGS -----------------------------
            String => match c {
                '\\' => {
                    self.advance_char();
                    self.state = StringEscape;
                    Ok(None)
                }
                '"' => {
                    self.advance_char();
                    Ok(Some(self.produce_string()))
                }
                // JSON allows 0x20 .. 0x10FFFF unescaped.
                '\0'..='\x1F' => Err(SyntaxError::ControlCharacterInString(u32::from(c))),
                _ => {
                    let before = self.buffer.len();
                    // The run cannot contain a newline, so only the column moves.
                    let copied = self.source.copy_while(&mut self.buffer, |ch| {
                        ch != '\\' && ch != '"' && ch >= '\u{20}'
                    });
                    self.pos.column += copied;
                    self.pos.offset += self.buffer.len() - before;
                    Ok(None)
                }
            },

            StringEscape => match c {
                '"' | '\\' | '/' => {
                    self.push_escaped(c);
                    Ok(None)
                }
                'b' => {
                    self.push_escaped('\u{0008}');
                    Ok(None)
                }
                'f' => {
                    self.push_escaped('\u{000C}');
                    Ok(None)
                }
                'n' => {
                    self.push_escaped('\n');
                    Ok(None)
                }
                'r' => {
                    self.push_escaped('\r');
                    Ok(None)
                }
                't' => {
                    self.push_escaped('\t');
                    Ok(None)
                }
                'u' => {
                    self.advance_char();
                    self.unicode_escape_buffer.reset();
                    self.state = StringEscapeUnicode;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidEscape(c)),
            },

            StringEscapeUnicode => {
                let unit = self.unicode_escape_buffer.feed(c)?;
                self.advance_char();
                match (unit, self.high_surrogate) {
                    (None, _) => {}
                    (Some(Escaped::Char(ch)), None) => {
                        self.buffer.push(ch);
                        self.state = String;
                    }
                    (Some(Escaped::HighSurrogate(high)), None) => {
                        self.high_surrogate = Some(high);
                        self.state = SurrogateBackslash;
                    }
                    (Some(Escaped::LowSurrogate(low)), Some(high)) => {
                        self.high_surrogate = None;
                        self.buffer.push(combine_surrogates(high, low)?);
                        self.state = String;
                    }
                    (Some(Escaped::LowSurrogate(low)), None) => {
                        return Err(SyntaxError::InvalidUnicodeEscapeSequence(u32::from(low)));
                    }
                    (Some(Escaped::Char(_) | Escaped::HighSurrogate(_)), Some(_)) => {
                        return Err(self.pending_surrogate_error());
                    }
                }
                Ok(None)
            }

            SurrogateBackslash => match c {
                '\\' => {
                    self.advance_char();
                    self.state = SurrogateU;
                    Ok(None)
                }
                _ => Err(self.pending_surrogate_error()),
            },

            SurrogateU => match c {
                'u' => {
                    self.advance_char();
                    self.unicode_escape_buffer.reset();
                    self.state = StringEscapeUnicode;
                    Ok(None)
                }
                _ => Err(self.pending_surrogate_error()),
            },
        }
    }
}
