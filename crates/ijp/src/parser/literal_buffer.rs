use super::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpectedLiteralValue {
    Null,
    True,
    False,
}

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* we consumed the last byte of the literal.
    Done(Token),
    /// Character did **not** match the expected byte.
    Reject,
}

/// `None` while no literal is in flight, otherwise the bytes still expected
/// and the literal they complete.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], ExpectedLiteralValue)>);

impl ExpectedLiteralBuffer {
    pub(crate) fn none() -> Self {
        ExpectedLiteralBuffer(None)
    }

    /// Start matching after the *first* character (`n`, `t`, or `f`)
    pub(crate) fn new(first: char) -> Self {
        match first {
            'n' => ExpectedLiteralBuffer(Some((b"ull", ExpectedLiteralValue::Null))),
            't' => ExpectedLiteralBuffer(Some((b"rue", ExpectedLiteralValue::True))),
            'f' => ExpectedLiteralBuffer(Some((b"alse", ExpectedLiteralValue::False))),
            _ => ExpectedLiteralBuffer::none(),
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    /// Give the matcher the next input character and learn what to do next.
    pub(crate) fn step(&mut self, c: char) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((&expected, rest)) if char::from(expected) == c => {
                if rest.is_empty() {
                    Step::Done(match kind {
                        ExpectedLiteralValue::Null => Token::Null,
                        ExpectedLiteralValue::True => Token::Bool(true),
                        ExpectedLiteralValue::False => Token::Bool(false),
                    })
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                // Mismatch – restore the state we took at the top
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}
