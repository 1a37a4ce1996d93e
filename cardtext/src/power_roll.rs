use crate::escape::escape_html;
use crate::marker::{marker_to_glyph_html, scan_markers};
use crate::potency::replace_potency_glyphs_html;

/// One segment of tokenized rules text.
///
/// Segments are ephemeral: they are recomputed from source text on every
/// render and carry no identity beyond their position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerRollPart {
    /// Prose with no tier marker.
    Plain { text: String },
    /// A tier marker and the description that follows it.
    Roll { marker: String, desc: String },
}

/// Split rules text into plain prose and tier segments.
///
/// The description for each tier runs from the end of its marker to the
/// start of the next marker (or end of input), trimmed, with leading colons,
/// dashes, and whitespace stripped. Output order matches input order.
pub fn parse_power_rolls(text: &str) -> Vec<PowerRollPart> {
    if text.is_empty() {
        return Vec::new();
    }

    let spans = scan_markers(text);
    if spans.is_empty() {
        return vec![PowerRollPart::Plain {
            text: text.trim().to_string(),
        }];
    }

    let mut parts = Vec::with_capacity(spans.len() + 1);

    let lead = text[..spans[0].start].trim();
    if !lead.is_empty() {
        parts.push(PowerRollPart::Plain {
            text: lead.to_string(),
        });
    }

    for (i, span) in spans.iter().enumerate() {
        let end = spans.get(i + 1).map_or(text.len(), |next| next.start);
        parts.push(PowerRollPart::Roll {
            marker: span.marker.to_string(),
            desc: tier_desc(&text[span.end..end]).to_string(),
        });
    }

    parts
}

/// Render rules text straight to an HTML fragment.
///
/// Shares its segmentation with [`parse_power_rolls`] via
/// [`scan_markers`]. Tier descriptions are escaped first and
/// potency-substituted second; the substitution pass expects the escaped
/// form.
pub fn format_power_rolls_html(text: &str, for_print: bool) -> String {
    if text.is_empty() {
        return String::new();
    }

    let spans = scan_markers(text);
    if spans.is_empty() {
        return format!("<p>{}</p>", esc_lines(text.trim()));
    }

    let mut out = String::new();

    let lead = text[..spans[0].start].trim();
    if !lead.is_empty() {
        out.push_str(&format!("<p>{}</p>", esc_lines(lead)));
    }

    for (i, span) in spans.iter().enumerate() {
        let end = spans.get(i + 1).map_or(text.len(), |next| next.start);
        let desc = tier_desc(&text[span.end..end]);
        out.push_str(&format!(
            "<div class=\"power-roll\"><span class=\"range\">{}</span> <span class=\"pr-desc\">{}</span></div>",
            marker_to_glyph_html(span.marker, for_print),
            replace_potency_glyphs_html(&esc_lines(desc)),
        ));
    }

    out
}

/// Trim a tier description and drop the leading separator punctuation left
/// over from the marker.
fn tier_desc(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
}

/// Escape, with newlines kept as explicit breaks inside the paragraph.
fn esc_lines(s: &str) -> String {
    escape_html(s).replace('\n', "<br/>")
}
