//! Helpers for splitting a payload into chunks, for demos, tests and benches.
use alloc::vec::Vec;

/// Splits `payload` into `parts` chunks of roughly equal byte length, moving
/// each cut forward to the next char boundary.
///
/// ```
/// use ijp::chunk_utils::produce_chunks;
///
/// assert_eq!(produce_chunks("[1,2,3]", 3), ["[1,", "2,3", "]"]);
/// ```
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    while start < len {
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Splits `payload` into chunks of at most `size` bytes. Cuts may fall inside
/// a multi-byte code point; feed the pieces with
/// [`StreamingParser::feed_bytes`](crate::StreamingParser::feed_bytes).
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn produce_byte_chunks(payload: &[u8], size: usize) -> Vec<&[u8]> {
    assert!(size > 0);
    payload.chunks(size).collect()
}
