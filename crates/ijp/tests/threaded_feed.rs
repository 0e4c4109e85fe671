#![expect(missing_docs)]

mod common;

use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use ijp::{ParseEvent, ParserOptions, SessionState, StreamingParser};

use crate::common::STREAM;

fn single_shot(text: &str) -> Vec<ParseEvent> {
    let mut parser = StreamingParser::new(ParserOptions {
        emit_string_parts: false,
        ..Default::default()
    });
    parser.feed(text).unwrap();
    parser.close().unwrap();
    parser.collect()
}

/// One thread feeds fixed-size chunks while another drains, sharing the
/// parser through a mutex.
#[test_log::test]
fn feeder_and_drainer_threads() {
    let text = STREAM.join("");
    let expected = single_shot(&text);

    let parser = Arc::new(Mutex::new(StreamingParser::default()));
    let feeder = {
        let parser = Arc::clone(&parser);
        let bytes = text.clone().into_bytes();
        thread::spawn(move || {
            for chunk in bytes.chunks(4) {
                parser.lock().unwrap().feed_bytes(chunk).unwrap();
                thread::sleep(Duration::from_micros(200));
            }
            parser.lock().unwrap().close().unwrap();
        })
    };

    let mut events = Vec::new();
    loop {
        let mut guard = parser.lock().unwrap();
        events.extend(guard.drain());
        if guard.state() != SessionState::Open && guard.queued_len() == 0 {
            break;
        }
        drop(guard);
        thread::yield_now();
    }
    feeder.join().unwrap();
    assert_eq!(parser.lock().unwrap().state(), SessionState::Closed);

    let terminal: Vec<_> = events.into_iter().filter(ParseEvent::is_terminal).collect();
    assert_eq!(terminal, expected);
}

/// A fatal error seen by the feeder is visible to the drainer.
#[test]
fn drainer_sees_poisoned_state() {
    let parser = Arc::new(Mutex::new(StreamingParser::default()));
    let feeder = {
        let parser = Arc::clone(&parser);
        thread::spawn(move || parser.lock().unwrap().feed("[1, 2, }").unwrap_err())
    };
    let err = feeder.join().unwrap();

    let mut guard = parser.lock().unwrap();
    assert_eq!(guard.state(), SessionState::Poisoned);
    assert_eq!(guard.drain().count(), 2);
    assert_eq!(guard.close().unwrap_err(), err);
}
