//! Decoding of `\uXXXX` escapes whose digits may arrive across several chunks.
//!
//! [`UnicodeEscapeBuffer`] collects four hexadecimal digits and yields either a
//! finished `char`, or the high half of a UTF-16 surrogate pair that has to be
//! completed by a second escape. Combining the halves is the caller's job, via
//! [`combine_surrogates`].
use crate::error::SyntaxError;

/// What four hex digits decoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escaped {
    Char(char),
    /// U+D800..=U+DBFF, waiting for its low half.
    HighSurrogate(u16),
    /// U+DC00..=U+DFFF. Only valid straight after a high surrogate.
    LowSurrogate(u16),
}

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    code: u32,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self { code: 0, len: 0 }
    }

    pub(crate) fn reset(&mut self) {
        self.code = 0;
        self.len = 0;
    }

    /// Feeds one hex digit. Returns `Ok(None)` until the fourth digit arrives,
    /// then resets itself and returns the decoded unit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<Escaped>, SyntaxError> {
        let digit = c
            .to_digit(16)
            .ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;
        self.code = (self.code << 4) | digit;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }

        let code = self.code;
        self.reset();
        #[expect(clippy::cast_possible_truncation)]
        let unit = match code {
            0xD800..=0xDBFF => Escaped::HighSurrogate(code as u16),
            0xDC00..=0xDFFF => Escaped::LowSurrogate(code as u16),
            _ => Escaped::Char(
                char::from_u32(code).ok_or(SyntaxError::InvalidUnicodeEscapeSequence(code))?,
            ),
        };
        Ok(Some(unit))
    }
}

/// Joins a UTF-16 surrogate pair into one scalar value.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Result<char, SyntaxError> {
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).ok_or(SyntaxError::InvalidUnicodeEscapeSequence(code))
}
