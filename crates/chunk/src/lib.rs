//! Quill Chunker
//!
//! Models have a context window; documents don't care. This crate cuts long
//! text into an ordered list of chunks that each fit under a size limit, so
//! every chunk can be translated on its own.
//!
//! ## Rules
//!
//! - Splits happen only at `\n`. A line is never cut in half, so a single line
//!   longer than the limit comes out as its own oversized chunk.
//! - Lengths are counted in Unicode scalar values, not bytes.
//! - Each chunk has its trailing whitespace trimmed. Chunks that trim to
//!   nothing are dropped, so no chunk is ever empty.
//! - Output is deterministic: same text and limit, same chunks.
//!
//! ## Example
//!
//! ```
//! use chunk::split_into_chunks;
//!
//! let chunks = split_into_chunks("alpha\nbeta\ngamma", 11);
//! let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
//! assert_eq!(texts, ["alpha\nbeta", "gamma"]);
//! assert_eq!(chunks[1].index, 1);
//! ```

use serde::{Deserialize, Serialize};

mod config;
mod error;

pub use crate::config::{ChunkConfig, DEFAULT_MAX_CHUNK_SIZE};
pub use crate::error::ChunkError;

/// A contiguous run of whole lines from the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position in the source text.
    pub index: usize,
    /// Chunk content with trailing whitespace removed.
    pub text: String,
}

impl Chunk {
    /// Length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits `text` into chunks of at most `max_chunk_size` characters.
///
/// Before each line is appended, the accumulator is flushed if adding the line
/// plus its newline would push it past the limit. Lines are always appended
/// afterwards, which is why an overlong line still lands in a chunk of its own.
pub fn split_into_chunks(text: &str, max_chunk_size: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > max_chunk_size && !current.is_empty() {
            flush(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len + 1;
    }

    if !current.is_empty() {
        flush(&mut chunks, &current);
    }
    chunks
}

/// Validates `cfg` and splits `text` with it.
pub fn chunk_text(text: &str, cfg: &ChunkConfig) -> Result<Vec<Chunk>, ChunkError> {
    cfg.validate()?;
    Ok(split_into_chunks(text, cfg.max_chunk_size))
}

fn flush(chunks: &mut Vec<Chunk>, accumulated: &str) {
    let trimmed = accumulated.trim_end();
    if trimmed.is_empty() {
        return;
    }
    chunks.push(Chunk {
        index: chunks.len(),
        text: trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_into_chunks("one\ntwo\nthree", 100);
        assert_eq!(texts(&chunks), ["one\ntwo\nthree"]);
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_into_chunks("", 10).is_empty());
        assert!(split_into_chunks("\n\n   \n", 10).is_empty());
    }

    #[test]
    fn flushes_before_exceeding_limit() {
        // "aaaa\n" is 5, adding "bbbb" + separator would make 10 > 9
        let chunks = split_into_chunks("aaaa\nbbbb\ncc", 9);
        assert_eq!(texts(&chunks), ["aaaa", "bbbb\ncc"]);
    }

    #[test]
    fn exact_fit_stays_together() {
        // "ab\n" (3) + "cd\n" (3) == 6, not > 6
        let chunks = split_into_chunks("ab\ncd", 6);
        assert_eq!(texts(&chunks), ["ab\ncd"]);
    }

    #[test]
    fn overlong_line_is_not_split() {
        let long = "x".repeat(25);
        let input = format!("head\n{long}\ntail");
        let chunks = split_into_chunks(&input, 10);
        assert_eq!(texts(&chunks), ["head", long.as_str(), "tail"]);
        assert!(chunks[1].char_len() > 10);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // Each line is 3 chars but 9 bytes
        let chunks = split_into_chunks("你好吗\n我很好", 8);
        assert_eq!(texts(&chunks), ["你好吗\n我很好"]);
    }

    #[test]
    fn leading_indentation_is_kept() {
        let chunks = split_into_chunks("    indented\nnext", 100);
        assert_eq!(chunks[0].text, "    indented\nnext");
    }

    #[test]
    fn indices_are_sequential() {
        let input = (0..20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let chunks = split_into_chunks(&input, 16);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn chunk_text_validates_config() {
        assert_eq!(
            chunk_text("abc", &ChunkConfig::new(0)),
            Err(ChunkError::InvalidMaxChunkSize(0))
        );
        assert_eq!(chunk_text("abc", &ChunkConfig::default()).unwrap().len(), 1);
    }
}
