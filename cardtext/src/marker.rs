use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;
use crate::glyph;

/// Tier-marker grammar: `<=N` (ASCII or `≤`), `A-B`, `N+`. Markers may carry
/// internal whitespace and can appear anywhere in a text, not only at line
/// start.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<=|≤)\s*\d+|\d+\s*-\s*\d+|\d+\+").unwrap());

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s*-\s*\d+$").unwrap());

static AT_LEAST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\+$").unwrap());

/// One tier marker located in free-form rules text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpan<'a> {
    /// Byte offset of the marker's first character.
    pub start: usize,
    /// Byte offset one past the marker's last character.
    pub end: usize,
    /// The marker text itself.
    pub marker: &'a str,
}

/// Find every non-overlapping tier marker in `text`, left to right.
///
/// Both the typed tokenizer and the HTML renderer segment text against the
/// spans returned here, so the two stay in lockstep by construction.
pub fn scan_markers(text: &str) -> Vec<MarkerSpan<'_>> {
    MARKER_RE
        .find_iter(text)
        .map(|m| MarkerSpan {
            start: m.start(),
            end: m.end(),
            marker: m.as_str(),
        })
        .collect()
}

/// The three recognized marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerClass {
    /// `<=N` or `≤N`: the roll came in at or under the threshold.
    AtMost,
    /// `A-B`: the roll landed inside the band.
    Range,
    /// `N+`: the roll met or beat the threshold.
    AtLeast,
}

impl MarkerClass {
    /// Screen-font glyph slot for this class.
    pub fn screen_glyph(self) -> char {
        match self {
            MarkerClass::AtMost => '\u{005B}',
            MarkerClass::Range => '\u{002D}',
            MarkerClass::AtLeast => '\u{005D}',
        }
    }

    /// Print-font glyph slot; the print stylesheet uses a different vertical
    /// alignment convention than the screen font.
    pub fn print_glyph(self) -> char {
        match self {
            MarkerClass::AtMost => '\u{007B}',
            MarkerClass::Range => '\u{005F}',
            MarkerClass::AtLeast => '\u{007D}',
        }
    }

    pub fn glyph(self, for_print: bool) -> char {
        if for_print {
            self.print_glyph()
        } else {
            self.screen_glyph()
        }
    }
}

/// Classify a marker string. Checked in order: at-most prefix, then the two
/// digit-led shapes.
pub fn classify_marker(marker: &str) -> Option<MarkerClass> {
    if marker.starts_with("<=") || marker.starts_with('≤') {
        Some(MarkerClass::AtMost)
    } else if RANGE_RE.is_match(marker) {
        Some(MarkerClass::Range)
    } else if AT_LEAST_RE.is_match(marker) {
        Some(MarkerClass::AtLeast)
    } else {
        None
    }
}

/// Render a marker as a glyph span, or as escaped literal text when the
/// marker is not recognized.
pub fn marker_to_glyph_html(marker: &str, for_print: bool) -> String {
    match classify_marker(marker) {
        Some(class) => glyph::span(&[class.glyph(for_print)]),
        None => escape_html(marker),
    }
}

/// Plain-character form for non-HTML contexts such as condensed level
/// summaries. Unrecognized markers come back unchanged.
pub fn marker_to_glyph_char(marker: &str) -> String {
    match classify_marker(marker) {
        Some(class) => class.screen_glyph().to_string(),
        None => marker.to_string(),
    }
}
