#![no_main]
//! Feeds the same bytes to two parsers, once whole and once split at seeded
//! offsets (possibly inside a code point), and checks that both agree on the
//! events and on the outcome.

use std::cell::RefCell;

use arbitrary::Arbitrary;
use ijp::{ErrorKind, ParseEvent, ParserOptions, StreamingParser};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

/// One flag byte followed by a four-byte split seed.
const HEADER: usize = 5;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&str] = &[" ", "\t", "\n", "\r", "\u{00A0}", "\u{2003}", "\u{2028}", "\u{3000}"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size >= HEADER && !seed.is_multiple_of(10) {
        return fuzzer_mutate(data, size, max_size);
    }

    data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x0F);
    data[1..HEADER].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

    let mut len = HEADER;
    while len < size.max(HEADER + 1) && len < max_size {
        len += append_bytes(&mut data[len..max_size], pick_whitespace().as_bytes());
        len += append_bytes(&mut data[len..max_size], &random_document(size));
    }
    len
}

/// Copies as much of `src` as fits and returns the number of bytes written.
fn append_bytes(buf: &mut [u8], src: &[u8]) -> usize {
    let n = src.len().min(buf.len());
    buf[..n].copy_from_slice(&src[..n]);
    n
}

fn pick_whitespace() -> &'static str {
    with_rng(|rng| WS_TABLE[rng.random_range(0..WS_TABLE.len())])
}

fn random_document(size: usize) -> Vec<u8> {
    loop {
        let n = with_rng(|rng| rng.random_range(1..=size.max(2) * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..n).map(|_| rng.random::<u8>()).collect());
        if let Ok(doc) = Document::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            if let Ok(text) = serde_json::to_vec(&doc.0) {
                return text;
            }
        }
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A random JSON document built from fuzzer bytes.
#[derive(Debug)]
struct Document(Value);

impl<'a> Arbitrary<'a> for Document {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(20)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3 => serde_json::Number::from_f64(u.arbitrary()?)
                .map(Value::Number)
                .ok_or(arbitrary::Error::IncorrectFormat)?,
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let items: Vec<Document> = u.arbitrary()?;
                Value::Array(items.into_iter().map(|d| d.0).collect())
            }
            _ => {
                let members: Vec<(String, Document)> = u.arbitrary()?;
                Value::Object(members.into_iter().map(|(k, d)| (k, d.0)).collect::<Map<_, _>>())
            }
        };
        Ok(Document(value))
    }
}

/// Terminal events and the final error kind, if any.
type Outcome = (Vec<ParseEvent>, Option<ErrorKind>);

fn run<'a>(options: ParserOptions, chunks: impl IntoIterator<Item = &'a [u8]>) -> Outcome {
    let mut parser = StreamingParser::new(options);
    let mut events = Vec::new();
    let mut failure = None;
    for chunk in chunks {
        let result = parser.feed_bytes(chunk);
        events.extend(parser.by_ref());
        if let Err(err) = result {
            failure = Some(err.kind());
            break;
        }
    }
    if failure.is_none() {
        failure = parser.close().err().map(|err| err.kind());
    }
    events.extend(parser);
    events.retain(ParseEvent::is_terminal);
    (events, failure)
}

fn split_at_seed(data: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut state = seed | 1;
    while !rest.is_empty() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let size = 1 + (state as usize % rest.len());
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fn check(data: &[u8]) {
    if data.len() <= HEADER {
        return;
    }

    let flags = data[0];
    let seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let body = &data[HEADER..];

    let options = ParserOptions {
        allow_multiple_json_values: flags & 1 != 0,
        allow_unicode_whitespace: flags & 2 != 0,
        emit_string_parts: flags & 4 != 0,
        max_depth: if flags & 8 != 0 { Some(64) } else { None },
        ..Default::default()
    };

    let whole = run(options, [body]);
    let split = run(options, split_at_seed(body, seed));
    assert_eq!(whole, split, "chunking changed the outcome");

    // Anything accepted in single-value mode must also be valid to serde_json.
    // The depth cap keeps us under serde_json's own recursion limit.
    let plain = !options.allow_multiple_json_values && !options.allow_unicode_whitespace;
    if plain && options.max_depth.is_some() && whole.1.is_none() {
        let text = std::str::from_utf8(body).expect("accepted input is UTF-8");
        if let Err(err) = serde_json::from_str::<Value>(text) {
            panic!("accepted a document serde_json rejects: {err}");
        }
    }
}

fuzz_target!(|data: &[u8]| check(data));
