// src/tokens.rs
//! Token estimates for generation requests.

use crate::prompt::SYSTEM_INSTRUCTION;
use std::sync::LazyLock;
use tiktoken_rs::CoreBPE;

/// Framing tokens added per chat message (role and separators).
const PER_MESSAGE: usize = 3;

/// Tokens that prime the assistant reply.
const REPLY_PRIMING: usize = 3;

/// Rough bytes-per-token ratio used when the encoding is unavailable.
const BYTES_PER_TOKEN: usize = 4;

static BPE: LazyLock<Option<CoreBPE>> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base()
        .map_err(|e| eprintln!("Failed to load cl100k_base tokenizer: {e}"))
        .ok()
});

pub struct Tokenizer;

impl Tokenizer {
    /// Tokens in `text`. Falls back to a byte-length estimate if the
    /// `cl100k_base` encoding could not be loaded.
    #[must_use]
    pub fn count(text: &str) -> usize {
        match BPE.as_ref() {
            Some(bpe) => bpe.encode_ordinary(text).len(),
            None => text.len().div_ceil(BYTES_PER_TOKEN),
        }
    }

    /// Tokens of the full chat request for one item prompt: the system
    /// instruction, the prompt, and the message framing.
    #[must_use]
    pub fn request(prompt: &str) -> usize {
        Self::count(SYSTEM_INSTRUCTION) + Self::count(prompt) + 2 * PER_MESSAGE + REPLY_PRIMING
    }
}
