use ar_reshaper::ArabicReshaper;

/// Rewrites text into presentation forms for scripts whose letters change
/// shape by position. Runs between filtering and rendering; rendering input
/// only, never fed back into analysis.
pub trait ScriptShaper {
    fn shape(&self, text: &str) -> String;
}

/// Contextual shaping for Arabic-script text (Persian included). Text in
/// other scripts passes through untouched.
pub struct ArabicShaper {
    reshaper: ArabicReshaper,
}

impl ArabicShaper {
    pub fn new() -> Self {
        Self {
            reshaper: ArabicReshaper::default(),
        }
    }
}

impl Default for ArabicShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptShaper for ArabicShaper {
    fn shape(&self, text: &str) -> String {
        self.reshaper.reshape(text)
    }
}

/// Identity shaper for corpora that carry no Arabic-script text.
pub struct NoopShaper;

impl ScriptShaper for NoopShaper {
    fn shape(&self, text: &str) -> String {
        text.to_string()
    }
}
