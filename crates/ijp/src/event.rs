//! Events emitted by the streaming JSON parser.
//!
//! Every event is a `(path, kind, value)` triple: the location of a scalar in
//! the document, its type tag, and its value. Containers produce no events of
//! their own; their structure is visible through the paths of their leaves.
//!
//! # Examples
//!
//! ```
//! use ijp::{ParseEvent, ParserOptions, StreamingParser, path};
//!
//! let mut parser = StreamingParser::new(ParserOptions::default());
//! parser.feed(r#"{"a": 1, "b": [2, 3]}"#).unwrap();
//! parser.close().unwrap();
//! let events: Vec<_> = parser.collect();
//! assert_eq!(
//!     events,
//!     vec![
//!         ParseEvent::Int { path: path!["a"], value: 1 },
//!         ParseEvent::Int { path: path!["b", 0], value: 2 },
//!         ParseEvent::Int { path: path!["b", 1], value: 3 },
//!     ]
//! );
//! ```
use alloc::string::String;
use core::fmt;

use crate::path::Path;

/// A scalar value, or a fragment of one, found at `path`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// `null`.
    Null { path: Path },
    /// `true` or `false`.
    Bool { path: Path, value: bool },
    /// A number without fraction or exponent.
    Int { path: Path, value: i64 },
    /// A number with a fraction or an exponent.
    Float { path: Path, value: f64 },
    /// A complete string. `value` is the whole decoded string, including any
    /// text previously surfaced through [`ParseEvent::StringPart`].
    String { path: Path, value: String },
    /// Decoded text of a string whose closing quote has not arrived yet.
    /// Fragments for one string, concatenated in order, are a prefix of the
    /// value of the `String` event that follows them.
    StringPart { path: Path, fragment: String },
}

/// The type tag of a [`ParseEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    String,
    Int,
    Float,
    Bool,
    Null,
    StringPart,
}

impl EventKind {
    /// The lowercase tag name: `string`, `int`, `float`, `bool`, `null` or
    /// `stringpart`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::String => "string",
            EventKind::Int => "int",
            EventKind::Float => "float",
            EventKind::Bool => "bool",
            EventKind::Null => "null",
            EventKind::StringPart => "stringpart",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of an event's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// The value of a `String` event or the fragment of a `StringPart`.
    Str(&'a str),
}

/// An owned event value, as returned by [`ParseEvent::into_parts`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParseEvent {
    /// Where in the document this value lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ParseEvent::Null { path }
            | ParseEvent::Bool { path, .. }
            | ParseEvent::Int { path, .. }
            | ParseEvent::Float { path, .. }
            | ParseEvent::String { path, .. }
            | ParseEvent::StringPart { path, .. } => path,
        }
    }

    /// Takes the path out of the event.
    #[must_use]
    pub fn into_path(self) -> Path {
        match self {
            ParseEvent::Null { path }
            | ParseEvent::Bool { path, .. }
            | ParseEvent::Int { path, .. }
            | ParseEvent::Float { path, .. }
            | ParseEvent::String { path, .. }
            | ParseEvent::StringPart { path, .. } => path,
        }
    }

    /// Splits the event into its `(path, kind, value)` triple.
    ///
    /// ```
    /// use ijp::{EventKind, ParseEvent, Scalar, path};
    ///
    /// let ev = ParseEvent::Bool { path: path!["ok"], value: true };
    /// let (path, kind, value) = ev.into_parts();
    /// assert_eq!(path, path!["ok"]);
    /// assert_eq!(kind, EventKind::Bool);
    /// assert_eq!(value, Scalar::Bool(true));
    /// ```
    #[must_use]
    pub fn into_parts(self) -> (Path, EventKind, Scalar) {
        let kind = self.kind();
        let (path, value) = match self {
            ParseEvent::Null { path } => (path, Scalar::Null),
            ParseEvent::Bool { path, value } => (path, Scalar::Bool(value)),
            ParseEvent::Int { path, value } => (path, Scalar::Int(value)),
            ParseEvent::Float { path, value } => (path, Scalar::Float(value)),
            ParseEvent::String { path, value } => (path, Scalar::Str(value)),
            ParseEvent::StringPart { path, fragment } => (path, Scalar::Str(fragment)),
        };
        (path, kind, value)
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            ParseEvent::Null { .. } => EventKind::Null,
            ParseEvent::Bool { .. } => EventKind::Bool,
            ParseEvent::Int { .. } => EventKind::Int,
            ParseEvent::Float { .. } => EventKind::Float,
            ParseEvent::String { .. } => EventKind::String,
            ParseEvent::StringPart { .. } => EventKind::StringPart,
        }
    }

    #[must_use]
    pub fn value(&self) -> ScalarRef<'_> {
        match self {
            ParseEvent::Null { .. } => ScalarRef::Null,
            ParseEvent::Bool { value, .. } => ScalarRef::Bool(*value),
            ParseEvent::Int { value, .. } => ScalarRef::Int(*value),
            ParseEvent::Float { value, .. } => ScalarRef::Float(*value),
            ParseEvent::String { value, .. } => ScalarRef::Str(value),
            ParseEvent::StringPart { fragment, .. } => ScalarRef::Str(fragment),
        }
    }

    /// Returns `true` for every kind except [`EventKind::StringPart`]: each
    /// scalar leaf produces exactly one terminal event.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ParseEvent::StringPart { .. })
    }
}

// Serialized as a `[path, kind, value]` triple, mirroring how consumers
// usually destructure events.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use serde::{Serialize, Serializer, ser::SerializeTuple};

    use super::{EventKind, ParseEvent, ScalarRef};

    impl Serialize for EventKind {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    impl Serialize for ScalarRef<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match *self {
                ScalarRef::Null => serializer.serialize_unit(),
                ScalarRef::Bool(b) => serializer.serialize_bool(b),
                ScalarRef::Int(i) => serializer.serialize_i64(i),
                ScalarRef::Float(f) => serializer.serialize_f64(f),
                ScalarRef::Str(s) => serializer.serialize_str(s),
            }
        }
    }

    impl Serialize for ParseEvent {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut triple = serializer.serialize_tuple(3)?;
            triple.serialize_element(self.path())?;
            triple.serialize_element(&self.kind())?;
            triple.serialize_element(&self.value())?;
            triple.end()
        }
    }
}
