//! The streaming parser session.
//!
//! [`StreamingParser`] owns the incremental lexer, the stack of open
//! containers and the queue of events that have not been drained yet. Each
//! `feed` lexes as far as the input allows, queues every event that became
//! determinable and returns; the caller then drains the queue by iterating.

mod buffer;
mod escape_buffer;
mod event_builder;
mod frames;
mod lexer;
mod literal_buffer;
mod numbers;
mod queue;
mod utf8;


use alloc::string::String;
use core::iter::FusedIterator;

use self::{
    event_builder::build_event,
    frames::{Frame, FrameStack},
    lexer::{Lexer, Token},
    queue::EventQueue,
    utf8::{InvalidUtf8, Utf8Carry},
};
use crate::{
    error::{
        ErrorSource, IncompleteInput, ParserError, StructuralError, SyntaxError, UsageError,
    },
    event::ParseEvent,
    options::ParserOptions,
    path::{DisplayPath, Path},
};

/// Where a parser is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting input.
    Open,
    /// `close()` succeeded. Queued events can still be drained.
    Closed,
    /// A fatal error occurred. Every later `feed` or `close` returns it again.
    Poisoned,
}

#[derive(Debug, Clone)]
enum Session {
    Open,
    Closed,
    Poisoned(ParserError),
}

/// What the parser expects from the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Before the top-level value.
    Start,
    /// Right after `{`: a key or `}`.
    ObjectStart,
    /// After `,` in an object: a key.
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    /// Right after `[`: a value or `]`.
    ArrayStart,
    /// After `,` in an array: a value.
    BeforeArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    /// The top-level value is complete.
    End,
}

impl ParseState {
    fn expects_value(self) -> bool {
        matches!(
            self,
            ParseState::Start
                | ParseState::BeforePropertyValue
                | ParseState::ArrayStart
                | ParseState::BeforeArrayValue
        )
    }
}

/// The streaming JSON parser.
///
/// Feed it text with [`feed`](Self::feed) (or bytes with
/// [`feed_bytes`](Self::feed_bytes)), split at any point, and pull
/// [`ParseEvent`]s out of it as an [`Iterator`]. Iteration never blocks: it
/// stops when the queue is empty and resumes after more input is fed.
///
/// # Examples
///
/// ```
/// use ijp::{ParseEvent, ParserOptions, StreamingParser, path};
///
/// let mut parser = StreamingParser::new(ParserOptions::default());
/// parser.feed(r#"{"s": "h"#).unwrap();
/// assert_eq!(
///     parser.next(),
///     Some(ParseEvent::StringPart { path: path!["s"], fragment: "h".into() })
/// );
/// assert_eq!(parser.next(), None);
///
/// parser.feed(r#"i"}"#).unwrap();
/// parser.close().unwrap();
/// assert_eq!(
///     parser.next(),
///     Some(ParseEvent::String { path: path!["s"], value: "hi".into() })
/// );
/// ```
#[derive(Debug)]
pub struct StreamingParser {
    lexer: Lexer,
    utf8: Utf8Carry,
    parse_state: ParseState,
    frames: FrameStack,
    queue: EventQueue,
    session: Session,
    values_completed: usize,

    multiple_values: bool,
    emit_string_parts: bool,
    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_error: bool,
}

impl Default for StreamingParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl Iterator for StreamingParser {
    type Item = ParseEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

impl StreamingParser {
    /// Creates an open parser with no input.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(options.allow_unicode_whitespace),
            utf8: Utf8Carry::new(),
            parse_state: ParseState::Start,
            frames: FrameStack::new(options.max_depth),
            queue: EventQueue::new(options.max_queued_events),
            session: Session::Open,
            values_completed: 0,
            multiple_values: options.allow_multiple_json_values,
            emit_string_parts: options.emit_string_parts,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: options.panic_on_error,
        }
    }

    /// Builds a parser over a finite sequence of chunks.
    ///
    /// The returned stream feeds one chunk whenever it runs out of events and
    /// closes the parser after the last chunk. Events queued before an error
    /// are yielded first, then the error, then nothing.
    ///
    /// ```
    /// use ijp::{ParserOptions, StreamingParser, path};
    ///
    /// let chunks = ["[1, ", "2]"];
    /// let paths: Vec<_> = StreamingParser::from_chunks(chunks, ParserOptions::default())
    ///     .map(|ev| ev.unwrap().into_path())
    ///     .collect();
    /// assert_eq!(paths, vec![path![0], path![1]]);
    /// ```
    pub fn from_chunks<I>(chunks: I, options: ParserOptions) -> ChunkStream<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ChunkStream {
            parser: Self::new(options),
            chunks: chunks.into_iter(),
            pending_error: None,
            done: false,
        }
    }

    /// Appends `text` to the input and queues every event it completes.
    ///
    /// # Errors
    ///
    /// Returns the first syntax, structural or resource-limit error found in
    /// the input seen so far, which also poisons the parser. Feeding a closed
    /// parser is a [`UsageError`].
    pub fn feed(&mut self, text: &str) -> Result<(), ParserError> {
        self.ensure_open(UsageError::FeedAfterClose)?;
        log::debug!("feeding {} bytes", text.len());
        if self.utf8.is_empty() {
            self.lexer.push(text);
            let result = self.pump();
            self.settle(result)
        } else {
            // A code point is still waiting for its continuation bytes.
            self.feed_utf8(text.as_bytes())
        }
    }

    /// Like [`feed`](Self::feed), for raw UTF-8 bytes. A code point may be
    /// split across calls.
    ///
    /// # Errors
    ///
    /// As [`feed`](Self::feed), plus [`SyntaxError::InvalidUtf8`] for bytes
    /// that can never form valid UTF-8.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(), ParserError> {
        self.ensure_open(UsageError::FeedAfterClose)?;
        log::debug!("feeding {} raw bytes", bytes.len());
        self.feed_utf8(bytes)
    }

    /// Signals the end of input.
    ///
    /// A number at the very end of the input is only complete now, so `close`
    /// may queue a final event; drain it afterwards.
    ///
    /// # Errors
    ///
    /// [`IncompleteInput`] if the input does not hold exactly one complete
    /// value (at least one, with `allow_multiple_json_values`), or ends inside
    /// a token. Closing twice is a [`UsageError`].
    pub fn close(&mut self) -> Result<(), ParserError> {
        self.ensure_open(UsageError::AlreadyClosed)?;
        log::debug!("closing parser");
        let result = self.finish_input();
        self.settle(result)?;
        self.session = Session::Closed;
        Ok(())
    }

    /// Removes and returns the oldest queued event.
    pub fn next_event(&mut self) -> Option<ParseEvent> {
        self.queue.pop()
    }

    /// Removes every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = ParseEvent> + '_ {
        self.queue.drain()
    }

    /// Where the session is in its lifecycle.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Open => SessionState::Open,
            Session::Closed => SessionState::Closed,
            Session::Poisoned(_) => SessionState::Poisoned,
        }
    }

    /// Number of events waiting to be drained.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of currently open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// Path of the value currently being parsed.
    #[must_use]
    pub fn current_path(&self) -> Path {
        self.frames.path()
    }

    /// Number of top-level values completed so far.
    #[must_use]
    pub fn values_completed(&self) -> usize {
        self.values_completed
    }

    fn ensure_open(&self, misuse: UsageError) -> Result<(), ParserError> {
        match &self.session {
            Session::Open => Ok(()),
            Session::Closed => Err(self.error(misuse)),
            Session::Poisoned(err) => Err(err.clone()),
        }
    }

    fn feed_utf8(&mut self, bytes: &[u8]) -> Result<(), ParserError> {
        let mut text = String::new();
        let decoded = self.utf8.decode(bytes, &mut text);
        self.lexer.push(&text);
        let result = self.pump().and_then(|()| match decoded {
            Ok(()) => Ok(()),
            Err(InvalidUtf8 { index, byte }) => {
                log::debug!("invalid UTF-8 at byte {index} of chunk");
                Err(self.error(SyntaxError::InvalidUtf8(byte)))
            }
        });
        self.settle(result)
    }

    /// Poisons the session if `result` is an error.
    fn settle(&mut self, result: Result<(), ParserError>) -> Result<(), ParserError> {
        if let Err(err) = &result {
            log::debug!("parser poisoned at {}: {err}", DisplayPath(&err.path));
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(!self.panic_on_error, "{err}");
            self.session = Session::Poisoned(err.clone());
        }
        result
    }

    fn error(&self, source: impl Into<ErrorSource>) -> ParserError {
        let pos = self.lexer.position();
        ParserError {
            source: source.into(),
            offset: pos.offset,
            line: pos.line,
            column: pos.column,
            path: self.frames.path(),
        }
    }

    /// Lexes and dispatches tokens until the pending input is exhausted.
    fn pump(&mut self) -> Result<(), ParserError> {
        loop {
            if self.parse_state == ParseState::End {
                if self.lexer.skip_whitespace().is_none() {
                    return Ok(());
                }
                if !self.multiple_values {
                    return Err(self.error(IncompleteInput::TrailingContent));
                }
                self.parse_state = ParseState::Start;
            }

            self.lexer
                .set_fragmenting(self.emit_string_parts && self.parse_state.expects_value());
            let token = match self.lexer.next_token() {
                Ok(Some(token)) => token,
                Ok(None) => return Ok(()),
                Err(err) => return Err(self.error(err)),
            };
            self.dispatch(token).map_err(|err| self.error(err))?;
        }
    }

    fn finish_input(&mut self) -> Result<(), ParserError> {
        if !self.utf8.is_empty() {
            return Err(self.error(IncompleteInput::PartialCodePoint));
        }
        if let Some(token) = self.lexer.finish().map_err(|err| self.error(err))? {
            self.dispatch(token).map_err(|err| self.error(err))?;
        }
        if !self.frames.is_empty() {
            return Err(self.error(IncompleteInput::UnclosedContainers {
                depth: self.frames.depth(),
            }));
        }
        match self.parse_state {
            ParseState::End => Ok(()),
            _ => Err(self.error(IncompleteInput::NoValue)),
        }
    }

    fn dispatch(&mut self, token: Token) -> Result<(), ErrorSource> {
        use ParseState::*;

        log::trace!("{:?}: {}", self.parse_state, token.describe());

        match self.parse_state {
            Start | BeforePropertyValue | ArrayStart | BeforeArrayValue => match token {
                Token::Punctuator(b'{') => {
                    self.frames.push(Frame::new_object_frame())?;
                    self.parse_state = ObjectStart;
                }
                Token::Punctuator(b'[') => {
                    self.frames.push(Frame::new_array_frame())?;
                    self.parse_state = ArrayStart;
                }
                Token::Punctuator(b']') if self.parse_state == ArrayStart => self.pop(),
                Token::Punctuator(b']') if self.parse_state == BeforeArrayValue => {
                    return Err(StructuralError::TrailingComma(']').into());
                }
                Token::Punctuator(_) => {
                    return Err(StructuralError::UnexpectedToken {
                        expected: "a value",
                        found: token.describe(),
                    }
                    .into());
                }
                Token::StringPart(_) => self.emit(token)?,
                _ => {
                    self.emit(token)?;
                    self.value_complete();
                }
            },

            ObjectStart | BeforePropertyName => match token {
                Token::String(key) => {
                    if let Some(Frame::Object { pending_key }) = self.frames.last_mut() {
                        *pending_key = Some(key.into());
                    }
                    self.parse_state = AfterPropertyName;
                }
                Token::Punctuator(b'}') if self.parse_state == ObjectStart => self.pop(),
                Token::Punctuator(b'}') => {
                    return Err(StructuralError::TrailingComma('}').into());
                }
                // Keys are lexed without fragmenting.
                Token::StringPart(_) => {}
                _ => {
                    return Err(StructuralError::NonStringKey {
                        found: token.describe(),
                    }
                    .into());
                }
            },

            AfterPropertyName => match token {
                Token::Punctuator(b':') => self.parse_state = BeforePropertyValue,
                _ => {
                    return Err(StructuralError::MissingColon {
                        found: token.describe(),
                    }
                    .into());
                }
            },

            AfterPropertyValue | AfterArrayValue => match (token, self.frames.last_mut()) {
                (Token::Punctuator(b','), Some(Frame::Object { pending_key })) => {
                    *pending_key = None;
                    self.parse_state = BeforePropertyName;
                }
                (Token::Punctuator(b','), Some(Frame::Array { next_index })) => {
                    *next_index += 1;
                    self.parse_state = BeforeArrayValue;
                }
                (Token::Punctuator(close @ (b'}' | b']')), Some(frame)) => {
                    let expected = frame.close_char();
                    if char::from(close) != expected {
                        return Err(StructuralError::MismatchedBracket {
                            expected,
                            found: char::from(close),
                        }
                        .into());
                    }
                    self.pop();
                }
                (token, frame) => {
                    return Err(StructuralError::MissingComma {
                        close: frame.map_or('}', |f| f.close_char()),
                        found: token.describe(),
                    }
                    .into());
                }
            },

            End => return Err(IncompleteInput::TrailingContent.into()),
        }

        Ok(())
    }

    fn emit(&mut self, token: Token) -> Result<(), ErrorSource> {
        match build_event(self.frames.path(), token) {
            Ok(event) => Ok(self.queue.push(event)?),
            Err(token) => Err(StructuralError::UnexpectedToken {
                expected: "a value",
                found: token.describe(),
            }
            .into()),
        }
    }

    fn pop(&mut self) {
        self.frames.pop();
        self.value_complete();
    }

    /// Moves past a finished value: either a scalar or a closed container.
    fn value_complete(&mut self) {
        self.parse_state = match self.frames.last() {
            Some(Frame::Array { .. }) => ParseState::AfterArrayValue,
            Some(Frame::Object { .. }) => ParseState::AfterPropertyValue,
            None => {
                self.values_completed += 1;
                log::debug!("top-level value #{} complete", self.values_completed);
                ParseState::End
            }
        };
    }
}

/// Pull-style adapter returned by [`StreamingParser::from_chunks`].
#[derive(Debug)]
pub struct ChunkStream<I> {
    parser: StreamingParser,
    chunks: I,
    pending_error: Option<ParserError>,
    done: bool,
}

impl<I> ChunkStream<I> {
    /// The underlying parser.
    #[must_use]
    pub fn parser(&self) -> &StreamingParser {
        &self.parser
    }
}

impl<I> Iterator for ChunkStream<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<ParseEvent, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.parser.next_event() {
                return Some(Ok(event));
            }
            if let Some(err) = self.pending_error.take() {
                self.done = true;
                return Some(Err(err));
            }
            if self.done {
                return None;
            }

            let result = match self.chunks.next() {
                Some(chunk) => self.parser.feed(chunk.as_ref()),
                None => {
                    self.done = true;
                    self.parser.close()
                }
            };
            if let Err(err) = result {
                self.done = true;
                self.pending_error = Some(err);
            }
        }
    }
}

impl<I> FusedIterator for ChunkStream<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}
