use alloc::vec;

use super::utils::feed_all;
use crate::{
    ParserOptions, StreamingParser,
    chunk_utils::{produce_byte_chunks, produce_chunks},
};

#[test]
fn produce_helpers_example() {
    let payload = "[\"foo\",\"bar\"]";
    let chunks = produce_chunks(payload, 5);
    assert_eq!(chunks, vec!["[\"f", "oo\"", ",\"b", "ar\"", "]"]);
    assert_eq!(feed_all(chunks, ParserOptions::default()).unwrap().len(), 4);
}

#[test]
fn produce_helpers_multibyte() {
    let payload = "[\"f😊o\",\"b🚀r\"]";
    let chunks = produce_chunks(payload, 5);
    let mut idx = 0;
    for chunk in &chunks {
        idx += chunk.len();
        assert!(payload.is_char_boundary(idx));
    }
    assert_eq!(chunks.concat(), payload);
}

#[test]
fn byte_chunks_feed_the_same_values() {
    let payload = "[\"f😊o\",\"b🚀r\"]";
    let whole = feed_all([payload], ParserOptions::default()).unwrap();
    for size in 1..=4 {
        let mut parser = StreamingParser::default();
        for chunk in produce_byte_chunks(payload.as_bytes(), size) {
            parser.feed_bytes(chunk).unwrap();
        }
        parser.close().unwrap();
        let terminal: alloc::vec::Vec<_> = parser.filter(crate::ParseEvent::is_terminal).collect();
        let expected: alloc::vec::Vec<_> = whole.iter().filter(|e| e.is_terminal()).cloned().collect();
        assert_eq!(terminal, expected, "{size}-byte chunks");
    }
}

#[quickcheck_macros::quickcheck]
fn produce_chunks_concat_to_payload(payload: alloc::string::String, parts: u8) -> bool {
    let parts = usize::from(parts) + 1;
    let chunks = produce_chunks(&payload, parts);
    chunks.len() <= parts && chunks.iter().all(|c| !c.is_empty()) && chunks.concat() == payload
}
