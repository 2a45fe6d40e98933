//! End-to-end runs over a small fixture log, with the renderer and shaper
//! swapped for test doubles.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use serde_json::json;

use chatlens::load::{load_chat_log, load_stop_words};
use chatlens::normalize::PersianNormalizer;
use chatlens::orchestrator::run_analysis;
use chatlens::pipeline::TextPipeline;
use chatlens::render::{CloudRenderer, RenderOptions};
use chatlens::shape::{NoopShaper, ScriptShaper};

/// Captures render calls and writes a placeholder artifact.
#[derive(Default)]
struct RecordingRenderer {
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl CloudRenderer for RecordingRenderer {
    fn render(&self, shaped_corpus: &str, _opts: &RenderOptions, out_path: &Path) -> Result<()> {
        fs::write(out_path, b"png")?;
        self.calls
            .lock()
            .unwrap()
            .push((shaped_corpus.to_string(), out_path.to_path_buf()));
        Ok(())
    }
}

/// Wraps its input in angle brackets so tests can see shaping happened.
struct TaggingShaper;

impl ScriptShaper for TaggingShaper {
    fn shape(&self, text: &str) -> String {
        format!("<{text}>")
    }
}

fn write_fixture(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let chat = json!({
        "messages": [
            {"id": 1, "from": "Ava", "from_id": "user1", "text": "is this ok?"},
            {"id": 2, "from": "Omid", "from_id": "user2", "reply_to_message_id": 1,
             "text": "yes hello world"},
            {"id": 3, "from": "Omid", "from_id": "user2", "reply_to_message_id": 2,
             "text": "thanks"},
            {"id": 4, "from": "Pari", "from_id": "user3", "reply_to_message_id": 999,
             "text": "late reply"},
            {"id": 5, "from": "Ava", "from_id": "user1",
             "text": ["see ", {"type": "link", "text": "docs"}, " please?"]},
            {"id": 6, "from": "Nika", "from_id": "user4", "reply_to_message_id": 5,
             "text": "sure"},
        ]
    });
    let chat_path = dir.join("chat.json");
    fs::write(&chat_path, serde_json::to_string_pretty(&chat)?)?;

    let stop_path = dir.join("stopwords.txt");
    fs::write(&stop_path, "yes\nthanks\nis\nthis\nsure\nsee\nplease\n")?;
    Ok((chat_path, stop_path))
}

#[test]
fn full_run_produces_leaderboard_and_cloud() -> Result<()> {
    let dir = tempfile::TempDir::new()?;
    let (chat_path, stop_path) = write_fixture(dir.path())?;

    let normalizer = PersianNormalizer::new();
    let stop_words = load_stop_words(&stop_path, &normalizer)?;
    let chat = load_chat_log(&chat_path)?;
    let pipeline = TextPipeline::new(stop_words, normalizer);

    let renderer = RecordingRenderer::default();
    let out_dir = dir.path().join("out");
    let leaders = run_analysis(
        &chat,
        &pipeline,
        &TaggingShaper,
        &renderer,
        &RenderOptions::default(),
        &out_dir,
        10,
    )?;

    // Omid qualified on message 1 and kept counting; Pari's only reply
    // points at a missing id; Nika answered the question in message 5.
    assert_eq!(
        leaders,
        vec![("Omid".to_string(), 2), ("Nika".to_string(), 1)]
    );

    let calls = renderer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (shaped, path) = &calls[0];
    assert!(shaped.starts_with('<') && shaped.ends_with('>'));
    assert!(shaped.contains("hello world"));
    assert!(path.ends_with("word_cloud.png"));
    assert!(path.exists());
    Ok(())
}

#[test]
fn corpus_keeps_per_message_separators() -> Result<()> {
    let dir = tempfile::TempDir::new()?;
    let chat = json!({
        "messages": [
            {"id": 1, "from": "Ava", "from_id": "user1", "text": "hello the"},
            {"id": 2, "from": "Omid", "from_id": "user2", "text": "the"},
        ]
    });
    let chat_path = dir.path().join("chat.json");
    fs::write(&chat_path, serde_json::to_string(&chat)?)?;
    let stop_path = dir.path().join("stopwords.txt");
    fs::write(&stop_path, "the\n")?;

    let normalizer = PersianNormalizer::new();
    let stop_words = load_stop_words(&stop_path, &normalizer)?;
    let log = load_chat_log(&chat_path)?;
    let pipeline = TextPipeline::new(stop_words, normalizer);

    let renderer = RecordingRenderer::default();
    run_analysis(
        &log,
        &pipeline,
        &NoopShaper,
        &renderer,
        &RenderOptions::default(),
        &dir.path().join("out"),
        10,
    )?;

    let calls = renderer.calls.lock().unwrap();
    // Message 2 filtered down to nothing but still contributes its space.
    assert_eq!(calls[0].0, " hello ");
    Ok(())
}

#[test]
fn missing_inputs_fail_before_any_analysis() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(load_chat_log(&missing).is_err());
    assert!(load_stop_words(&missing, &PersianNormalizer::new()).is_err());
}
