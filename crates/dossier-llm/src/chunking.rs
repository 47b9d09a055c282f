//! Document chunking for the character-buffer limit

/// Splits document text into chunks that fit the model's character buffer,
/// preferring paragraph boundaries and hard-splitting oversized paragraphs.
pub struct DocumentChunker {
    max_chars: usize,
}

impl DocumentChunker {
    /// Create a new chunker with the given character budget per chunk
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.len() <= self.max_chars {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in text.split("\n\n") {
            if current.len() + paragraph.len() + 2 > self.max_chars && !current.is_empty() {
                chunks.push(current.trim().to_string());
                current = String::new();
            }

            if paragraph.len() > self.max_chars {
                chunks.extend(self.split_at_char_limit(paragraph));
            } else {
                current.push_str(paragraph);
                current.push_str("\n\n");
            }
        }

        if !current.trim().is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }

    /// Split text into pieces of at most `max_chars` characters, respecting
    /// UTF-8 boundaries
    fn split_at_char_limit(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if current.len() + ch.len_utf8() > self.max_chars {
                chunks.push(current);
                current = String::new();
            }
            current.push(ch);
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
