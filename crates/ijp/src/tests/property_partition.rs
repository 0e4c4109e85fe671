use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{QuickCheck, TestResult};

use super::{
    arbitrary::JsonValue,
    utils::{expected_events, feed_all, split_by, terminal_events},
};
use crate::{ParserOptions, StreamingParser};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: feeding a document in arbitrary chunks yields the same terminal
/// events as the document itself describes, and string fragments always
/// prefix the final string.
#[test]
fn partition_matches_oracle_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: JsonValue, splits: Vec<usize>) -> TestResult {
        let src = value.0.to_string();
        let chunks = split_by(&src, &splits);
        let events = match feed_all(chunks.iter().map(String::as_str), ParserOptions::default())
        {
            Ok(events) => events,
            Err(err) => return TestResult::error(err.to_string()),
        };
        match terminal_events(events) {
            Ok(terminal) => TestResult::from_bool(terminal == expected_events(&value.0)),
            Err(msg) => TestResult::error(msg),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(JsonValue, Vec<usize>) -> TestResult);
}

/// Property: byte feeding may split code points anywhere without changing the
/// result.
#[test]
fn byte_partition_matches_oracle_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: JsonValue, splits: Vec<usize>) -> TestResult {
        let src = value.0.to_string();
        let bytes = src.as_bytes();
        let mut parser = StreamingParser::default();
        let mut events = Vec::new();
        let mut idx = 0;
        for s in splits {
            let remaining = bytes.len() - idx;
            if remaining == 0 {
                break;
            }
            let size = 1 + (s % remaining);
            if let Err(err) = parser.feed_bytes(&bytes[idx..idx + size]) {
                return TestResult::error(err.to_string());
            }
            events.extend(parser.by_ref());
            idx += size;
        }
        let rest = parser.feed_bytes(&bytes[idx..]).and_then(|()| parser.close());
        if let Err(err) = rest {
            return TestResult::error(err.to_string());
        }
        events.extend(parser);

        match terminal_events(events) {
            Ok(terminal) => TestResult::from_bool(terminal == expected_events(&value.0)),
            Err(msg) => TestResult::error(msg),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(JsonValue, Vec<usize>) -> TestResult);
}

/// Property: the pretty-printed form produces the same events as the compact
/// form.
#[test]
fn whitespace_is_insignificant_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: JsonValue) -> bool {
        let compact = value.0.to_string();
        let Ok(pretty) = serde_json::to_string_pretty(&value.0) else {
            return false;
        };
        let options = ParserOptions {
            emit_string_parts: false,
            ..Default::default()
        };
        match (feed_all([compact.as_str()], options), feed_all([pretty.as_str()], options)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(JsonValue) -> bool);
}

#[test]
fn every_split_of_a_tricky_document() {
    let src = r#"{"eé\n": [-0.5e+3, 12, "a😀b", true, null, {"": []}]}"#;
    let whole = terminal_events(feed_all([src], ParserOptions::default()).unwrap()).unwrap();
    for cut in (1..src.len()).filter(|&cut| src.is_char_boundary(cut)) {
        let (a, b) = src.split_at(cut);
        let split = terminal_events(feed_all([a, b], ParserOptions::default()).unwrap()).unwrap();
        assert_eq!(split, whole, "split at {cut}");
    }
}
