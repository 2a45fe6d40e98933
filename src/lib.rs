//! Chat transcript analytics: who answers the group's questions, and what
//! the group talks about. Input is an exported chat log (JSON); outputs are
//! a reply-to-question leaderboard and a word cloud PNG built from the
//! stopword-filtered, script-shaped corpus.

pub mod load;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod pipeline;
pub mod render;
pub mod replies;
pub mod shape;

pub use models::{ChatLog, MalformedMessage, Message, Text, TextEntity, TextSegment};
pub use normalize::{Normalizer, PersianNormalizer, StopwordSet};
pub use pipeline::TextPipeline;
pub use render::{CloudRenderer, RenderOptions, WordCloudPng};
pub use replies::top_repliers;
pub use shape::{ArabicShaper, NoopShaper, ScriptShaper};
