use alloc::{string::String, vec::Vec};

use serde_json::Value;

use crate::{ParseEvent, ParserError, ParserOptions, Path, PathComponent, StreamingParser};

/// The terminal events a correct parser produces for `value`, in document
/// order.
pub(crate) fn expected_events(value: &Value) -> Vec<ParseEvent> {
    fn walk(value: &Value, path: &mut Path, out: &mut Vec<ParseEvent>) {
        let event = match value {
            Value::Null => ParseEvent::Null { path: path.clone() },
            Value::Bool(b) => ParseEvent::Bool {
                path: path.clone(),
                value: *b,
            },
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParseEvent::Int {
                    path: path.clone(),
                    value: i,
                },
                None => ParseEvent::Float {
                    path: path.clone(),
                    value: n.as_f64().unwrap_or(f64::NAN),
                },
            },
            Value::String(s) => ParseEvent::String {
                path: path.clone(),
                value: s.clone(),
            },
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    path.push(PathComponent::Index(i));
                    walk(item, path, out);
                    path.pop();
                }
                return;
            }
            Value::Object(map) => {
                for (k, item) in map {
                    path.push(PathComponent::Key(k.as_str().into()));
                    walk(item, path, out);
                    path.pop();
                }
                return;
            }
        };
        out.push(event);
    }

    let mut out = Vec::new();
    walk(value, &mut Path::new(), &mut out);
    out
}

/// Feeds `chunks` one by one, closes, and returns every event.
pub(crate) fn feed_all<'a>(
    chunks: impl IntoIterator<Item = &'a str>,
    options: ParserOptions,
) -> Result<Vec<ParseEvent>, ParserError> {
    let mut parser = StreamingParser::new(options);
    let mut events = Vec::new();
    for chunk in chunks {
        parser.feed(chunk)?;
        events.extend(parser.by_ref());
    }
    parser.close()?;
    events.extend(parser);
    Ok(events)
}

/// Splits `text` at char positions derived from `splits`.
pub(crate) fn split_by(text: &str, splits: &[usize]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut idx = 0;
    for s in splits {
        let remaining = chars.len() - idx;
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        chunks.push(chars[idx..idx + size].iter().collect());
        idx += size;
    }
    if idx < chars.len() {
        chunks.push(chars[idx..].iter().collect());
    }
    chunks
}

/// Drops `StringPart` events, checking on the way that each string's
/// fragments concatenate to a prefix of its final value.
pub(crate) fn terminal_events(events: Vec<ParseEvent>) -> Result<Vec<ParseEvent>, String> {
    let mut pending: Option<(Path, String)> = None;
    let mut out = Vec::new();
    for event in events {
        match event {
            ParseEvent::StringPart { path, fragment } => match &mut pending {
                Some((p, text)) if *p == path => text.push_str(&fragment),
                Some((p, _)) => {
                    return Err(alloc::format!("fragment for {path:?} while {p:?} is open"));
                }
                None => pending = Some((path, fragment)),
            },
            ParseEvent::String { path, value } => {
                if let Some((p, prefix)) = pending.take() {
                    if p != path || !value.starts_with(&prefix) {
                        return Err(alloc::format!(
                            "fragments {prefix:?} at {p:?} do not prefix {value:?} at {path:?}"
                        ));
                    }
                }
                out.push(ParseEvent::String { path, value });
            }
            other => {
                if let Some((p, _)) = &pending {
                    return Err(alloc::format!("{other:?} while string at {p:?} is open"));
                }
                out.push(other);
            }
        }
    }
    match pending {
        Some((p, _)) => Err(alloc::format!("string at {p:?} never finished")),
        None => Ok(out),
    }
}
