//! Dispatches on `(path, kind)` pairs as an order record streams in.
//!
//! Each event is split into its parts and matched against the handful of
//! shapes this consumer cares about. Anything else falls through to a
//! catch-all arm.
//!
//! Run with
//!
//! ```bash
//! cargo run -p ijp --example match_events
//! ```

#![allow(clippy::needless_raw_string_hashes)]

use ijp::{EventKind, ParserOptions, PathComponent, StreamingParser};

/// A borrowed path segment, so that string literals can appear in patterns.
#[derive(Debug)]
enum Seg<'a> {
    K(&'a str),
    I(usize),
}

fn segments(path: &[PathComponent]) -> Vec<Seg<'_>> {
    path.iter()
        .map(|c| match c {
            PathComponent::Key(k) => Seg::K(k),
            PathComponent::Index(i) => Seg::I(*i),
        })
        .collect()
}

fn main() -> Result<(), ijp::ParserError> {
    let chunks = [
        r#"{"price": 19.99, "itemNo": "3735272", "modulars": ["#,
        r#"{"zone": "A", "section": 29, "position": 10},"#,
        r#"{"zone": "A", "section": 29, "position": 15}]}"#,
    ];

    for event in StreamingParser::from_chunks(chunks, ParserOptions::default()) {
        let (path, kind, value) = event?.into_parts();
        match (segments(&path).as_slice(), kind) {
            ([Seg::K("price")], EventKind::Float) => println!("Price found: {value:?}"),
            ([Seg::K("itemNo")], EventKind::String) => println!("Item number found: {value:?}"),
            ([Seg::K("modulars"), Seg::I(i), Seg::K("zone")], EventKind::String) => {
                println!("Modular {i} zone: {value:?}");
            }
            ([Seg::K("modulars"), Seg::I(i), Seg::K("section")], EventKind::Int) => {
                println!("Modular {i} section: {value:?}");
            }
            ([Seg::K("modulars"), Seg::I(i), Seg::K("position")], EventKind::Int) => {
                println!("Modular {i} position: {value:?}");
            }
            (segs, EventKind::StringPart) => println!("String part found at {segs:?}: {value:?}"),
            (segs, kind) => println!("Unhandled data type {kind} at {segs:?} with value {value:?}"),
        }
    }
    Ok(())
}
