use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::debug;

use crate::models::ChatLog;
use crate::normalize::{Normalizer, StopwordSet};

/// Stopword filtering and corpus assembly on top of a normalizer.
pub struct TextPipeline<N> {
    stop_words: StopwordSet,
    normalizer: N,
}

impl<N: Normalizer> TextPipeline<N> {
    /// `stop_words` must already hold canonical forms produced by this same
    /// normalizer; membership checks are exact string comparisons.
    pub fn new(stop_words: StopwordSet, normalizer: N) -> Self {
        Self {
            stop_words,
            normalizer,
        }
    }

    /// Tokenizes, drops stopwords, and rejoins the survivors with single
    /// spaces. Both each token and the final string pass through
    /// canonicalization, so the result is stable under repeated application.
    pub fn normalize_and_filter(&self, raw: &str) -> String {
        let kept = self
            .normalizer
            .tokenize(raw)
            .into_iter()
            .map(|token| self.normalizer.canonicalize(&token))
            .filter(|token| !self.stop_words.contains(token))
            .join(" ");
        self.normalizer.canonicalize(&kept)
    }

    /// Builds the word cloud corpus: one space, then the filtered content,
    /// per message in log order. Messages whose filtered content is empty
    /// still contribute their separator space.
    pub fn build_corpus(&self, chat: &ChatLog) -> Result<String> {
        let mut corpus = String::new();
        for msg in &chat.messages {
            let flat = msg
                .text
                .flatten()
                .with_context(|| format!("flattening text of message {}", msg.id))?;
            let content = self.normalize_and_filter(&flat);
            corpus.push(' ');
            corpus.push_str(&content);
        }
        debug!(
            "Corpus built - messages={}, chars={}",
            chat.messages.len(),
            corpus.len()
        );
        Ok(corpus)
    }
}
