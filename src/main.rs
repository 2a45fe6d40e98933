use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use chatlens::load::{load_chat_log, load_stop_words};
use chatlens::normalize::PersianNormalizer;
use chatlens::orchestrator::run_analysis;
use chatlens::pipeline::TextPipeline;
use chatlens::render::{RenderOptions, WordCloudPng};
use chatlens::shape::{ArabicShaper, NoopShaper, ScriptShaper};

/// Reply-to-question leaderboard and word cloud for exported chat logs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Exported chat log (JSON with a top-level "messages" array)
    chat_json: PathBuf,

    /// Stopword file, one word per line
    #[arg(short, long)]
    stop_words: PathBuf,

    /// Directory for generated artifacts
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// How many repliers to keep in the leaderboard
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Word cloud width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Word cloud height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Word cloud background (basic color name or #rrggbb)
    #[arg(long, default_value = "white")]
    background: String,

    /// Font file for the cloud
    #[arg(long)]
    font: Option<PathBuf>,

    /// Skip Arabic-script reshaping before rendering
    #[arg(long)]
    no_reshape: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    if !args.chat_json.exists() {
        bail!("chat log {} does not exist", args.chat_json.display());
    }

    let normalizer = PersianNormalizer::new();
    let stop_words = load_stop_words(&args.stop_words, &normalizer)?;
    let chat = load_chat_log(&args.chat_json)?;
    let pipeline = TextPipeline::new(stop_words, normalizer);

    let shaper: Box<dyn ScriptShaper> = if args.no_reshape {
        Box::new(NoopShaper)
    } else {
        Box::new(ArabicShaper::new())
    };
    let opts = RenderOptions {
        width: args.width,
        height: args.height,
        background_color: args.background.clone(),
        font_path: args.font.clone(),
    };

    let leaders = run_analysis(
        &chat,
        &pipeline,
        shaper.as_ref(),
        &WordCloudPng,
        &opts,
        &args.output_dir,
        args.top_n,
    )?;

    println!("Top repliers to questions:");
    for (rank, (name, count)) in leaders.iter().enumerate() {
        println!("{:>3}. {}  ({} replies)", rank + 1, name, count);
    }
    Ok(())
}
