use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Number, Value};

/// A random JSON document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JsonValue(pub(crate) Value);

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

fn gen_scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 5 {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::Number(i64::arbitrary(g).into()),
        3 => Number::from_f64(JsonNumber::arbitrary(g).0).map_or(Value::Null, Value::Number),
        _ => Value::String(String::arbitrary(g)),
    }
}

fn gen_val(g: &mut Gen, depth: usize) -> Value {
    if depth == 0 {
        return gen_scalar(g);
    }
    match usize::arbitrary(g) % 4 {
        0 | 1 => gen_scalar(g),
        2 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect::<Vec<_>>())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(String::arbitrary(g), gen_val(g, depth - 1));
            }
            Value::Object(map)
        }
    }
}

impl Arbitrary for JsonValue {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        JsonValue(gen_val(g, depth))
    }
}
