#![allow(missing_docs)]
#![allow(dead_code)]
#![expect(clippy::needless_raw_string_hashes)]

pub const ORIGINAL: &str = r#"
{
    "price": 19.99,
    "itemNo": "3735272",
    "modulars": [
        {
            "zone": "A",
            "section": 29,
            "position": 10
        },
        {
            "zone": "A",
            "section": 29,
            "position": 15
        }
    ],
    "notes": "ships in 2 days \"fast\"",
    "label": "café",
    "flags": [
        true,
        false,
        null
    ],
    "dims": {
        "w": 150.5,
        "h": -3
    }
}"#;

// An order record arriving in pieces. Chunks are cut inside numbers, strings,
// escapes, literals and multi-byte characters, and on container seams.
#[rustfmt::skip]
pub const STREAM: [&str; 12] = [
    r#"{"price":19."#,                                   // mid-number
    r#"99,"itemNo":"373"#,                               // number ends -> string starts
    r#"5272","modulars":["#,                             // string ends -> array opens
    r#"{"zone":"A","section":2"#,                        // mid-number inside an element
    r#"9,"position":10},"#,                              // '},' object end -> next element
    r#"{"zone":"A","section":29,"position":15}]"#,       // '}]' object end -> array end
    r#","notes":"ships in 2 days \"#,                    // mid-escape
    r#""fast\"","label":"caf"#,                          // escape resolves, string ends, next string starts
    r#"é","flags":[tr"#,                                 // mid-literal
    r#"ue,false,nu"#,                                    // literal ends, next literal starts
    r#"ll],"dims":{"w":150.5,"h":-3}"#,                  // '}' terminates a number
    r#"}"#,                                              // closes the top-level object
];

#[test]
fn assert_stream_example() {
    let streamed = STREAM.join("");

    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    let original = serde_json::to_string(&value).unwrap();

    assert_eq!(streamed, original);
}
