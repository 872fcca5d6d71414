//! Fixed-size overlapping text chunker.
//!
//! The chunk size and overlap are set once from configuration, not per
//! call. Window boundaries are character positions, so chunk counts are
//! deterministic for a given policy.

#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Panics if `chunk_overlap >= chunk_size`; configuration loading
    /// rejects such policies before a chunker is ever built.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        assert!(
            chunk_overlap < chunk_size,
            "chunk_overlap must be smaller than chunk_size"
        );
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split `text` into windows of at most `chunk_size` characters,
    /// each overlapping the previous one by `chunk_overlap` characters.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let stride = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_produces_no_chunks() {
        let chunker = TextChunker::new(10, 2);
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn text_under_chunk_size_is_one_chunk() {
        let chunker = TextChunker::new(10, 2);
        let chunks = chunker.split("short");
        assert_eq!(chunks, vec!["short".to_string()]);
    }

    #[test]
    fn text_at_exactly_chunk_size_is_one_chunk() {
        let chunker = TextChunker::new(5, 1);
        let chunks = chunker.split("abcde");
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn chunk_count_matches_window_arithmetic() {
        // size 4, overlap 1 -> stride 3; 10 chars -> windows at 0, 3, 6
        let chunker = TextChunker::new(4, 1);
        let chunks = chunker.split("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn consecutive_chunks_share_the_overlap() {
        let chunker = TextChunker::new(6, 2);
        let chunks = chunker.split("abcdefghijkl");
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().rev().take(2).collect::<Vec<_>>().into_iter().rev().collect();
            let head: String = pair[1].chars().take(2).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn final_chunk_is_bounded_by_text_length() {
        let chunker = TextChunker::new(4, 1);
        let chunks = chunker.split("abcdef");
        assert_eq!(chunks, vec!["abcd", "def"]);
    }

    #[test]
    fn no_chunk_exceeds_configured_size() {
        let chunker = TextChunker::new(7, 3);
        let text: String = std::iter::repeat('x').take(100).collect();
        for chunk in chunker.split(&text) {
            assert!(chunk.chars().count() <= 7);
        }
    }
}
