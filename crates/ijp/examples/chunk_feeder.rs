//! Feeds a document to the parser in fixed-size byte chunks at a fixed
//! interval from a background thread, while the main thread prints events as
//! they become available.
//!
//! Long strings show up as a series of `StringPart` events long before their
//! closing quote arrives.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=ijp=debug cargo run -p ijp --example chunk_feeder -- 4 50
//! ```
//!
//! The optional arguments are the chunk size in bytes and the interval in
//! milliseconds.

use std::{
    env,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use ijp::{
    DisplayPath, ParseEvent, SessionState, StreamingParser, chunk_utils::produce_byte_chunks,
};

const DOCUMENT: &str = r#"{
"very_long_string": "The quick brown fox jumps over the lazy dog.",
"even_longer_string": "624562 435276 34576345 254362 54625 6457 6537 65734567235 6772546725 446754 76546 435634 653462346 2465234 624356 24562 62346"
}"#;

fn arg(n: usize, default: u64) -> u64 {
    env::args()
        .nth(n)
        .and_then(|a| a.parse().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    let chunk_size = usize::try_from(arg(1, 4)).unwrap_or(4);
    let interval = Duration::from_millis(arg(2, 50));

    let parser = Arc::new(Mutex::new(StreamingParser::default()));
    let feeder = {
        let parser = Arc::clone(&parser);
        thread::spawn(move || {
            for chunk in produce_byte_chunks(DOCUMENT.as_bytes(), chunk_size) {
                if let Err(err) = parser.lock().unwrap().feed_bytes(chunk) {
                    eprintln!("feed failed: {err}");
                    return;
                }
                thread::sleep(interval);
            }
            if let Err(err) = parser.lock().unwrap().close() {
                eprintln!("close failed: {err}");
            }
        })
    };

    loop {
        let (events, state) = {
            let mut guard = parser.lock().unwrap();
            (guard.drain().collect::<Vec<_>>(), guard.state())
        };
        for event in &events {
            let path = DisplayPath(event.path());
            match event {
                ParseEvent::StringPart { fragment, .. } => println!("{path} += {fragment:?}"),
                other => println!("{path} = {:?} ({})", other.value(), other.kind()),
            }
        }
        if events.is_empty() && state != SessionState::Open {
            break;
        }
        thread::sleep(interval / 4);
    }

    feeder.join().unwrap();
}
