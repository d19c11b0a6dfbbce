//! Heuristic token encoder.
//!
//! Real tokenization is provider-specific; the default encoder chunks
//! text into fixed-size character groups, which lands close to the common
//! ~4 chars per token approximation.

use super::TokenEncoder;

/// Characters per token used by the heuristic encoder.
const CHARS_PER_TOKEN: usize = 4;

/// Encoder that splits text into 4-character chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharChunkTokenizer;

impl CharChunkTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenEncoder for CharChunkTokenizer {
    fn encode(&self, _model_name: &str, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(CHARS_PER_TOKEN)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}
