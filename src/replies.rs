use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::ChatLog;

/// Per-author tally, kept in the order authors first qualified.
struct UserReplyRecord {
    display_name: String,
    question_reply_ids: Vec<i64>,
}

/// A message counts as a question when its flattened text carries either
/// the Latin or the Arabic question mark.
fn has_question_marker(text: &str) -> bool {
    text.contains('?') || text.contains('؟')
}

/// First pass: which message ids contain a question.
fn question_index(chat: &ChatLog) -> Result<HashMap<i64, bool>> {
    let mut is_question = HashMap::with_capacity(chat.messages.len());
    for msg in &chat.messages {
        let flat = msg
            .text
            .flatten()
            .with_context(|| format!("flattening text of message {}", msg.id))?;
        is_question.insert(msg.id, has_question_marker(&flat));
    }
    Ok(is_question)
}

/// Ranks authors by how many replies they made, scanning the log in order.
///
/// Qualification is deliberately asymmetric: an author enters the ranking
/// only when their first scanned reply targets a message containing a
/// question marker, but once tracked every later reply is counted no matter
/// what it targets. A reply whose target id never appears in the log does
/// not qualify anyone. The cutoff is part of the leaderboard's contract and
/// is reproduced as-is.
///
/// Ties in the final count keep qualification order. `top_n` of zero yields
/// an empty ranking.
pub fn top_repliers(chat: &ChatLog, top_n: usize) -> Result<Vec<(String, usize)>> {
    let is_question = question_index(chat)?;
    debug!(
        "Question index built - messages={}, questions={}",
        is_question.len(),
        is_question.values().filter(|&&q| q).count()
    );

    let mut index_of: HashMap<&str, usize> = HashMap::new();
    let mut records: Vec<UserReplyRecord> = Vec::new();

    for msg in &chat.messages {
        let Some(target) = msg.reply_to_message_id else {
            continue;
        };
        if let Some(&at) = index_of.get(msg.from_id.as_str()) {
            records[at].question_reply_ids.push(target);
        } else if is_question.get(&target).copied().unwrap_or(false) {
            index_of.insert(&msg.from_id, records.len());
            records.push(UserReplyRecord {
                display_name: msg.from.clone(),
                question_reply_ids: vec![target],
            });
        }
    }

    let mut ranked: Vec<(String, usize)> = records
        .into_iter()
        .map(|r| (r.display_name, r.question_reply_ids.len()))
        .collect();
    ranked.sort_by_key(|(_, count)| Reverse(*count));
    ranked.truncate(top_n);

    info!(
        "Reply ranking completed - ranked_users={}, top_n={}",
        ranked.len(),
        top_n
    );
    Ok(ranked)
}
