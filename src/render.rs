use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::{info, warn};
use wordcloud_rs::{Token, WordCloud};

/// Rendering knobs passed through to the backend.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Basic color name or `#rrggbb`.
    pub background_color: String,
    pub font_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: "white".to_string(),
            font_path: None,
        }
    }
}

/// Turns a shaped corpus into a word cloud image on disk.
pub trait CloudRenderer {
    fn render(&self, shaped_corpus: &str, opts: &RenderOptions, out_path: &Path) -> Result<()>;
}

/// PNG word cloud renderer.
pub struct WordCloudPng;

impl CloudRenderer for WordCloudPng {
    fn render(&self, shaped_corpus: &str, opts: &RenderOptions, out_path: &Path) -> Result<()> {
        let start = Instant::now();

        // 1) Weigh tokens by frequency.
        let weights = token_weights(shaped_corpus);
        if weights.is_empty() {
            bail!("word cloud input is empty after filtering; nothing to draw");
        }
        if let Some(font) = &opts.font_path {
            warn!(
                "Custom font {} requested; the bundled rasterizer draws with its built-in font",
                font.display()
            );
        }

        // 2) Lay out and rasterize.
        let tokens: Vec<(Token, f32)> = weights
            .into_iter()
            .map(|(word, count)| (Token::Text(word), count as f32))
            .collect();
        let cloud = WordCloud::new().generate(tokens);
        cloud
            .save(out_path)
            .with_context(|| format!("writing word cloud to {}", out_path.display()))?;

        // 3) Normalize the canvas to the requested geometry and background.
        fit_canvas(out_path, opts)
            .with_context(|| format!("fitting word cloud canvas {}", out_path.display()))?;

        info!(
            "Word cloud rendered - duration={:.2}s, path={}, size={}x{}",
            start.elapsed().as_secs_f32(),
            out_path.display(),
            opts.width,
            opts.height
        );
        Ok(())
    }
}

/// Counts whitespace-separated tokens. Ordered by count descending, then
/// alphabetically so equal-weight output is stable.
fn token_weights(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut weights: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    weights.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    weights
}

/// Reopens the rendered PNG, scales it to the requested size, and composites
/// it over a solid background. The rasterizer may build against a different
/// image crate version, so the hand-off goes through the file.
fn fit_canvas(path: &Path, opts: &RenderOptions) -> Result<()> {
    let background = parse_color(&opts.background_color)?;
    let rendered = image::open(path)
        .with_context(|| format!("reopening rendered cloud {}", path.display()))?
        .resize_exact(opts.width, opts.height, FilterType::Triangle)
        .to_rgba8();
    let mut canvas = RgbaImage::from_pixel(opts.width, opts.height, background);
    imageops::overlay(&mut canvas, &rendered, 0, 0);
    canvas
        .save(path)
        .with_context(|| format!("saving composited cloud {}", path.display()))?;
    Ok(())
}

/// Accepts a handful of basic color names plus `#rrggbb`.
fn parse_color(name: &str) -> Result<image::Rgba<u8>> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "white" => [255, 255, 255],
        "black" => [0, 0, 0],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "gray" | "grey" => [128, 128, 128],
        hex => {
            let Some(digits) = hex.strip_prefix('#') else {
                bail!("unsupported background color {name:?} (use a basic name or #rrggbb)");
            };
            if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                bail!("unsupported background color {name:?} (use a basic name or #rrggbb)");
            }
            let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).unwrap();
            [channel(0), channel(2), channel(4)]
        }
    };
    Ok(image::Rgba([rgb[0], rgb[1], rgb[2], 255]))
}
