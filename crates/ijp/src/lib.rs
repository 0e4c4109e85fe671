//! An incremental JSON parser.
//!
//! Feed a JSON document in chunks of any size, split anywhere, and receive a
//! `(path, kind, value)` event for every scalar as soon as it is known.
//! Strings that are still arriving are surfaced early as
//! [`ParseEvent::StringPart`] fragments.
//!
//! ```
//! use ijp::{ParseEvent, StreamingParser, path};
//!
//! let mut parser = StreamingParser::default();
//! for chunk in [r#"{"name": "Al"#, r#"ice", "tags": [tr"#, "ue]}"] {
//!     parser.feed(chunk).unwrap();
//!     for event in parser.by_ref() {
//!         println!("{:?} {} {:?}", event.path(), event.kind(), event.value());
//!     }
//! }
//! parser.close().unwrap();
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chunk_utils;
mod error;
mod event;
mod options;
mod parser;
mod path;

#[cfg(test)]
mod tests;

pub use error::{
    ErrorKind, ErrorSource, IncompleteInput, ParserError, ResourceLimit, StructuralError,
    SyntaxError, UsageError,
};
pub use event::{EventKind, ParseEvent, Scalar, ScalarRef};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use parser::{ChunkStream, SessionState, StreamingParser};
pub use path::{DisplayPath, Path, PathComponent, PathComponentFrom};

#[doc(hidden)]
pub use alloc::vec;

/// Macro to build a [`Path`] from a heterogeneous list of keys and indices.
///
/// ```rust
/// # use ijp::{path, PathComponent};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathComponent::Index(0),
///         PathComponent::Key("foo".into()),
///         PathComponent::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::PathComponentFrom;
        $crate::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}
