//! Decoding of byte chunks that may end in the middle of a UTF-8 sequence.
use alloc::string::String;

/// Bytes of a code point whose tail has not arrived yet.
#[derive(Debug, Default)]
pub(crate) struct Utf8Carry {
    pending: [u8; 4],
    len: u8,
}

/// Invalid UTF-8 at `index` bytes into the chunk being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidUtf8 {
    pub(crate) index: usize,
    pub(crate) byte: u8,
}

impl Utf8Carry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends the decodable text of `bytes` to `out`. A trailing incomplete
    /// sequence is kept back and completed by the next call.
    pub(crate) fn decode(&mut self, bytes: &[u8], out: &mut String) -> Result<(), InvalidUtf8> {
        let mut rest = bytes;
        let mut index = 0;

        while self.len > 0 {
            let Some((&b, tail)) = rest.split_first() else {
                return Ok(());
            };
            self.pending[usize::from(self.len)] = b;
            self.len += 1;
            rest = tail;
            index += 1;

            let pending = &self.pending[..usize::from(self.len)];
            match bstr::decode_utf8(pending) {
                (Some(ch), n) if n == pending.len() => {
                    out.push(ch);
                    self.len = 0;
                }
                // A valid prefix that still needs continuation bytes.
                (None, n) if n == pending.len() && pending.len() < 4 => {}
                _ => {
                    return Err(InvalidUtf8 {
                        index: index - 1,
                        byte: b,
                    });
                }
            }
        }

        match core::str::from_utf8(rest) {
            Ok(text) => out.push_str(text),
            Err(err) => {
                let valid = err.valid_up_to();
                out.push_str(core::str::from_utf8(&rest[..valid]).unwrap_or_default());
                match err.error_len() {
                    None => {
                        let tail = &rest[valid..];
                        self.pending[..tail.len()].copy_from_slice(tail);
                        #[expect(clippy::cast_possible_truncation)]
                        let len = tail.len() as u8;
                        self.len = len;
                    }
                    Some(_) => {
                        return Err(InvalidUtf8 {
                            index: index + valid,
                            byte: rest[valid],
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn whole_chunk_passes_through() {
        let mut carry = Utf8Carry::new();
        let mut out = String::new();
        carry.decode("héllo".as_bytes(), &mut out).unwrap();
        assert_eq!(out, "héllo");
        assert!(carry.is_empty());
    }

    #[test]
    fn code_point_split_across_every_boundary() {
        let text = "a😀b";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut carry = Utf8Carry::new();
            let mut out = String::new();
            carry.decode(&bytes[..split], &mut out).unwrap();
            carry.decode(&bytes[split..], &mut out).unwrap();
            assert_eq!(out, text, "split at {split}");
            assert!(carry.is_empty());
        }
    }

    #[test]
    fn one_byte_at_a_time() {
        let text = "ünï😀";
        let mut carry = Utf8Carry::new();
        let mut out = String::new();
        for b in text.as_bytes() {
            carry.decode(core::slice::from_ref(b), &mut out).unwrap();
        }
        assert_eq!(out, text);
    }

    #[test]
    fn truncated_sequence_stays_pending() {
        let mut carry = Utf8Carry::new();
        let mut out = String::new();
        carry.decode(&"é".as_bytes()[..1], &mut out).unwrap();
        assert!(out.is_empty());
        assert!(!carry.is_empty());
    }

    #[test]
    fn invalid_byte_reports_index() {
        let mut carry = Utf8Carry::new();
        let mut out = String::new();
        let err = carry.decode(b"ab\xFFcd", &mut out).unwrap_err();
        assert_eq!(err, InvalidUtf8 { index: 2, byte: 0xFF });
    }

    #[test]
    fn invalid_continuation_after_carry() {
        let mut carry = Utf8Carry::new();
        let mut out = String::new();
        carry.decode(&[0xC3], &mut out).unwrap();
        let err = carry.decode(b"a", &mut out).unwrap_err();
        assert_eq!(err, InvalidUtf8 { index: 0, byte: b'a' });
    }
}
