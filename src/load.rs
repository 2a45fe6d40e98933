use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::ChatLog;
use crate::normalize::{Normalizer, StopwordSet};

/// Reads and decodes an exported chat log.
pub fn load_chat_log(path: &Path) -> Result<ChatLog> {
    info!("Loading chat log - path={}", path.display());
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading chat log {}", path.display()))?;
    let chat: ChatLog = serde_json::from_str(&raw)
        .with_context(|| format!("decoding chat log {}", path.display()))?;
    info!("Chat log loaded - messages={}", chat.messages.len());
    Ok(chat)
}

/// Reads a one-word-per-line stopword file and canonicalizes every entry,
/// so later membership checks compare canonical forms on both sides.
/// Blank lines are skipped.
pub fn load_stop_words(path: &Path, normalizer: &impl Normalizer) -> Result<StopwordSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading stopword file {}", path.display()))?;
    let set: StopwordSet = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| normalizer.canonicalize(line))
        .collect();
    info!("Stopwords loaded - entries={}", set.len());
    Ok(set)
}
