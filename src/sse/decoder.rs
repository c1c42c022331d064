//! Streaming UTF-8 decoding for transport chunks.
//!
//! The transport hands us arbitrary byte slices, so a multi-byte character
//! can arrive split across two chunks. `ChunkDecoder` holds the incomplete
//! tail until the next chunk completes it.

/// Replacement emitted for byte sequences that can never form valid UTF-8.
const REPLACEMENT: char = '\u{FFFD}';

/// Incremental UTF-8 decoder.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    /// Bytes of an incomplete trailing sequence from the previous chunk
    pending: Vec<u8>,
}

impl ChunkDecoder {
    /// Create a new decoder with no held bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, prefixed by any bytes held from the previous call.
    ///
    /// An incomplete sequence at the end of the chunk is held back unless
    /// `is_final` is set, in which case it is flushed as U+FFFD. Invalid
    /// sequences elsewhere are always replaced with U+FFFD.
    pub fn decode(&mut self, chunk: &[u8], is_final: bool) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));

                    match e.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            start = valid_end + len;
                        }
                        None => {
                            // Truncated sequence at the end of the input
                            start = valid_end;
                            if is_final {
                                out.push(REPLACEMENT);
                                start = self.pending.len();
                            }
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Number of bytes currently held waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop any held bytes.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(b"data: hi\n", false), "data: hi\n");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let bytes = "héllo €".as_bytes();
        // 'é' is two bytes starting at index 1
        let mut decoder = ChunkDecoder::new();
        let first = decoder.decode(&bytes[..2], false);
        assert_eq!(first, "h");
        assert_eq!(decoder.pending_len(), 1);

        let second = decoder.decode(&bytes[2..], false);
        assert_eq!(format!("{}{}", first, second), "héllo €");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_every_split_point_matches_unsplit() {
        let text = "a€b😀c";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = ChunkDecoder::new();
            let mut out = decoder.decode(&bytes[..split], false);
            out.push_str(&decoder.decode(&bytes[split..], true));
            assert_eq!(out, text, "split at {}", split);
        }
    }

    #[test]
    fn test_four_byte_char_one_byte_at_a_time() {
        let bytes = "😀".as_bytes();
        let mut decoder = ChunkDecoder::new();
        let mut out = String::new();
        for b in bytes {
            out.push_str(&decoder.decode(std::slice::from_ref(b), false));
        }
        assert_eq!(out, "😀");
    }

    #[test]
    fn test_final_flushes_incomplete_sequence() {
        let mut decoder = ChunkDecoder::new();
        let out = decoder.decode(&[b'o', b'k', 0xE2, 0x82], true);
        assert_eq!(out, "ok\u{FFFD}");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_invalid_byte_in_middle_is_replaced() {
        let mut decoder = ChunkDecoder::new();
        let out = decoder.decode(&[b'a', 0xFF, b'b'], false);
        assert_eq!(out, "a\u{FFFD}b");
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut decoder = ChunkDecoder::new();
        decoder.decode(&[0xE2], false);
        assert_eq!(decoder.pending_len(), 1);
        decoder.reset();
        assert_eq!(decoder.decode(b"x", true), "x");
    }
}
