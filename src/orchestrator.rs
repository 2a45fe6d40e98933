use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::ChatLog;
use crate::normalize::Normalizer;
use crate::pipeline::TextPipeline;
use crate::render::{CloudRenderer, RenderOptions};
use crate::replies;
use crate::shape::ScriptShaper;

/// Runs both analyses over one chat log and writes the word cloud PNG into
/// `out_dir`. Returns the reply leaderboard for the caller to present.
pub fn run_analysis<N: Normalizer + Sync>(
    chat: &ChatLog,
    pipeline: &TextPipeline<N>,
    shaper: &dyn ScriptShaper,
    renderer: &dyn CloudRenderer,
    opts: &RenderOptions,
    out_dir: &Path,
    top_n: usize,
) -> Result<Vec<(String, usize)>> {
    let start = Instant::now();
    info!(
        "Analysis started - messages={}, top_n={}",
        chat.messages.len(),
        top_n
    );

    // 1) Both passes take read-only views of the log. Each arm stays
    //    internally sequential; ranking ties and corpus order are unaffected.
    let (corpus, leaders) = rayon::join(
        || pipeline.build_corpus(chat),
        || replies::top_repliers(chat, top_n),
    );
    let corpus = corpus?;
    let leaders = leaders?;

    // 2) Shape for rendering only; the leaderboard never sees shaped text.
    let shaped = shaper.shape(&corpus);

    // 3) Render the cloud artifact.
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let cloud_path = out_dir.join("word_cloud.png");
    renderer.render(&shaped, opts, &cloud_path)?;

    info!(
        "Analysis completed - duration={:.2}s, ranked_users={}, cloud={}",
        start.elapsed().as_secs_f32(),
        leaders.len(),
        cloud_path.display()
    );
    Ok(leaders)
}
