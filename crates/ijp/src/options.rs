#![allow(clippy::struct_excessive_bools)]

/// Default bound on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration options for the streaming parser.
///
/// # Examples
///
/// ```rust
/// use ijp::{ParserOptions, StreamingParser};
///
/// let options = ParserOptions {
///     allow_multiple_json_values: true,
///     max_queued_events: Some(4096),
///     ..Default::default()
/// };
/// let parser = StreamingParser::new(options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOptions {
    /// Whether to allow any Unicode whitespace between JSON tokens.
    ///
    /// By default, the parser only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether to parse multiple JSON values in a single input stream.
    ///
    /// When `true`, any number of whitespace-delimited top-level values may
    /// follow each other, as in JSON Lines (JSONL) or newline-delimited JSON.
    /// Every value's paths are relative to its own root, and `close()` only
    /// requires that at least one value was completed.
    ///
    /// # Examples
    ///
    /// ```json
    /// {"a": 1}
    /// {"a": 2}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Whether to surface unterminated strings as `StringPart` events.
    ///
    /// When `true`, each time a chunk ends inside a string value, the text
    /// decoded since the previous fragment is emitted. The terminal `String`
    /// event always carries the complete value either way. Object keys are
    /// never fragmented.
    ///
    /// # Default
    ///
    /// `true`
    pub emit_string_parts: bool,

    /// Maximum nesting depth of objects and arrays. `None` disables the check.
    ///
    /// # Default
    ///
    /// `Some(1024)`
    pub max_depth: Option<usize>,

    /// Maximum number of events that may sit in the output queue without
    /// being drained. `None` disables the check.
    ///
    /// # Default
    ///
    /// `None`
    pub max_queued_events: Option<usize>,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(feature = "serde", serde(skip))]
    /// Panic on parse errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            allow_multiple_json_values: false,
            emit_string_parts: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_queued_events: None,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
