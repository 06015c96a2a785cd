/*!
 * Output composition.
 *
 * Rehydrates translated clean text into the original tag templates, applies
 * the configured display mode and line wrapping, and reassembles complete
 * timestamped SRT blocks. Blocks are produced one logical unit at a time so
 * a caller can start consuming output before the whole file is finished.
 */

use crate::app_config::{ComposeConfig, DisplayMode};
use crate::subtitle::template;
use crate::subtitle::time;

/// One logical output block: either an original entry or one split part.
///
/// Carries everything composition needs, so the composer never has to look
/// back into the parse result.
#[derive(Debug, Clone)]
pub struct OutputUnit {
    /// Final block index (renumbered when splitting changed the block count)
    pub index: usize,

    /// Start time in milliseconds
    pub start_ms: u64,

    /// End time in milliseconds
    pub end_ms: u64,

    /// Format template of the entry's first line, shared by all its parts
    pub template: String,

    /// Original clean text of this unit
    pub original_clean: String,

    /// Translated clean text of this unit
    pub translated: String,
}

/// Composer for final SRT blocks
#[derive(Debug, Clone)]
pub struct OutputComposer {
    display_mode: DisplayMode,
    line_wrap: Option<usize>,
    original_font_size: Option<u8>,
}

impl OutputComposer {
    /// Create a composer for the given display mode and compose settings
    pub fn new(display_mode: DisplayMode, config: &ComposeConfig) -> Self {
        Self {
            display_mode,
            line_wrap: config.line_wrap,
            original_font_size: config.original_font_size,
        }
    }

    /// Compose one complete SRT block (index, range, text, trailing blank line)
    pub fn compose_block(&self, unit: &OutputUnit) -> String {
        let translated = self.render_translated(unit);

        let text = match self.display_mode {
            DisplayMode::OnlyTranslated => translated,
            DisplayMode::OriginalAboveTranslated => {
                format!("{}\n{}", self.render_original(unit), translated)
            }
            DisplayMode::TranslatedAboveOriginal => {
                format!("{}\n{}", translated, self.render_original(unit))
            }
        };

        format!(
            "{}\n{}\n{}\n\n",
            unit.index,
            time::format_time_range(unit.start_ms, unit.end_ms),
            text
        )
    }

    /// Translated text wrapped and rehydrated into the entry's template
    fn render_translated(&self, unit: &OutputUnit) -> String {
        let wrapped = match self.line_wrap {
            Some(width) => wrap_hard(&unit.translated, width),
            None => unit.translated.clone(),
        };
        template::rehydrate(&unit.template, &wrapped)
    }

    /// Original text, rehydrated and optionally wrapped in a font-size tag
    fn render_original(&self, unit: &OutputUnit) -> String {
        let original = template::rehydrate(&unit.template, &unit.original_clean);
        match self.original_font_size {
            Some(size) => format!("<font size=\"{}\">{}</font>", size, original),
            None => original,
        }
    }
}

/// Hard character-length wrap with no semantic awareness.
///
/// Breaks at the last space before the width when one exists, otherwise
/// mid-word at exactly `width` characters.
pub fn wrap_hard(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut remaining: Vec<char> = text.chars().collect();

    while remaining.len() > width {
        let window = &remaining[..=width.min(remaining.len() - 1)];
        let break_at = window
            .iter()
            .rposition(|c| *c == ' ')
            .filter(|&pos| pos > 0)
            .unwrap_or(width);

        let line: String = remaining[..break_at].iter().collect();
        lines.push(line.trim_end().to_string());
        remaining.drain(..break_at);
        while remaining.first() == Some(&' ') {
            remaining.remove(0);
        }
    }

    if !remaining.is_empty() {
        lines.push(remaining.iter().collect::<String>());
    }

    lines.join("\n")
}
