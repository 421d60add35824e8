use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphMode {
    Unicode, // ✓ and ⨯
    Ascii,   // [OK] and [FAIL]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub glyphs: GlyphMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            glyphs: GlyphMode::Unicode,
        }
    }
}

impl FormattingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Plain output: ASCII glyphs, no colors
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            glyphs: GlyphMode::Ascii,
        }
    }

    pub fn with_color(self, color: ColorMode) -> Self {
        Self { color, ..self }
    }
}

/// Semantic color of a piece of report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Pass,
    Fail,
    Warning,
    Label,
}

/// Applies colors to report text.
///
/// The renderer only talks to this trait, so non-terminal output swaps in
/// [`PlainColorizer`] without touching pass/fail logic.
pub trait Colorizer {
    fn colorize(&self, text: &str, tag: ColorTag) -> String;

    fn glyph(&self, unicode: &str, _ascii: &str) -> String {
        unicode.to_string()
    }
}

pub struct AnsiColorizer {
    glyphs: GlyphMode,
}

impl AnsiColorizer {
    pub fn new(glyphs: GlyphMode) -> Self {
        Self { glyphs }
    }
}

impl Colorizer for AnsiColorizer {
    fn colorize(&self, text: &str, tag: ColorTag) -> String {
        match tag {
            ColorTag::Pass => text.green().to_string(),
            ColorTag::Fail => text.red().to_string(),
            ColorTag::Warning => text.yellow().to_string(),
            ColorTag::Label => text.cyan().to_string(),
        }
    }

    fn glyph(&self, unicode: &str, ascii: &str) -> String {
        select_glyph(self.glyphs, unicode, ascii)
    }
}

pub struct PlainColorizer {
    glyphs: GlyphMode,
}

impl PlainColorizer {
    pub fn new(glyphs: GlyphMode) -> Self {
        Self { glyphs }
    }
}

impl Default for PlainColorizer {
    fn default() -> Self {
        Self::new(GlyphMode::Unicode)
    }
}

impl Colorizer for PlainColorizer {
    fn colorize(&self, text: &str, _tag: ColorTag) -> String {
        text.to_string()
    }

    fn glyph(&self, unicode: &str, ascii: &str) -> String {
        select_glyph(self.glyphs, unicode, ascii)
    }
}

/// Pick the colorizer matching the resolved configuration.
///
/// This is the only place the process-wide `colored` override is set.
pub fn colorizer_for(config: FormattingConfig) -> Box<dyn Colorizer> {
    let use_color = config.color.should_use_color();
    configure_output(use_color);

    if use_color {
        Box::new(AnsiColorizer::new(config.glyphs))
    } else {
        Box::new(PlainColorizer::new(config.glyphs))
    }
}

fn configure_output(use_color: bool) {
    if use_color {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }
}

fn select_glyph(mode: GlyphMode, unicode: &str, ascii: &str) -> String {
    match mode {
        GlyphMode::Unicode => unicode.to_string(),
        GlyphMode::Ascii => ascii.to_string(),
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
