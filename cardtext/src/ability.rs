use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::escape::escape_html;
use crate::glyph;
use crate::marker::marker_to_glyph_html;
use crate::potency::replace_potency_glyphs_html;
use crate::power_roll::format_power_rolls_html;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*power\s+roll\b").unwrap());

static TIER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?:<=|≤)\s*\d+|\d+\s*-\s*\d+|\d+\+)\s*[-:.]?\s*(.*)$").unwrap()
});

/// A structured ability attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Action economy ("Action", "Maneuver", ...). Serialized as `type`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub power_roll: Vec<String>,
}

/// How a single `power_roll` line should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollLine<'a> {
    /// A "Power Roll ..." banner, rendered verbatim.
    Header(&'a str),
    /// A tier marker with its trailing description.
    Tier { marker: &'a str, desc: &'a str },
    /// No marker recognized; the whole line is a description.
    Bare(&'a str),
}

/// Classify one `power_roll` line. Every rendering site dispatches through
/// this, so headers, tiers, and bare lines look the same everywhere.
pub fn classify_roll_line(line: &str) -> RollLine<'_> {
    if HEADER_RE.is_match(line) {
        return RollLine::Header(line.trim());
    }
    if let Some(caps) = TIER_LINE_RE.captures(line) {
        let (_, [marker, desc]) = caps.extract();
        return RollLine::Tier {
            marker,
            desc: desc.trim(),
        };
    }
    RollLine::Bare(line.trim())
}

/// Render one `power_roll` line to its HTML block.
pub fn format_roll_line_html(line: &str, for_print: bool) -> String {
    match classify_roll_line(line) {
        RollLine::Header(text) => format!(
            "<div class=\"power-roll power-roll-header\"><strong>{}</strong></div>",
            escape_html(text)
        ),
        RollLine::Tier { marker, desc } => format!(
            "<div class=\"power-roll\"><span class=\"range\">{}</span> <span class=\"pr-desc\">{}</span></div>",
            marker_to_glyph_html(marker, for_print),
            replace_potency_glyphs_html(&escape_html(desc)),
        ),
        RollLine::Bare(text) => format!(
            "<div class=\"power-roll\"><span class=\"pr-desc\">{}</span></div>",
            escape_html(text)
        ),
    }
}

/// Render a structured ability to one HTML fragment.
///
/// Field order is fixed: name heading, description, keywords/type line,
/// range/targets line, power-roll lines, effect. Absent fields produce no
/// markup at all; only the name heading is unconditional.
pub fn format_ability_html(ability: &Ability, for_print: bool) -> String {
    let mut out = String::from("<div class=\"ability\">");
    out.push_str(&format!("<h4>{}</h4>", escape_html(&ability.name)));

    if let Some(desc) = non_empty(&ability.description) {
        out.push_str(&format!(
            "<p class=\"desc ability-desc\">{}</p>",
            replace_potency_glyphs_html(&escape_html(desc))
        ));
    }

    let keywords =
        (!ability.keywords.is_empty()).then(|| escape_html(&ability.keywords.join(", ")));
    match (keywords, non_empty(&ability.kind)) {
        (Some(kw), Some(kind)) => out.push_str(&format!(
            "<div class=\"ability-meta\">{} &bull; {}</div>",
            kw,
            escape_html(kind)
        )),
        (Some(kw), None) => {
            out.push_str(&format!("<div class=\"ability-meta\">{}</div>", kw));
        }
        (None, Some(kind)) => out.push_str(&format!(
            "<div class=\"ability-meta\">{}</div>",
            escape_html(kind)
        )),
        (None, None) => {}
    }

    let range = non_empty(&ability.range);
    let targets = non_empty(&ability.targets);
    if range.is_some() || targets.is_some() {
        out.push_str("<div class=\"ability-meta\">");
        if let Some(range) = range {
            out.push_str(&format!(
                "{} {}",
                glyph::span(&[glyph::RANGE_GLYPH]),
                escape_html(range)
            ));
        }
        if let Some(targets) = targets {
            if range.is_some() {
                out.push(' ');
            }
            out.push_str(&format!(
                "{} {}",
                glyph::span(&[glyph::TARGETS_GLYPH]),
                escape_html(targets)
            ));
        }
        out.push_str("</div>");
    }

    if !ability.power_roll.is_empty() {
        out.push_str("<div class=\"ability-prs\">");
        for line in &ability.power_roll {
            out.push_str(&format_roll_line_html(line, for_print));
        }
        out.push_str("</div>");
    }

    if let Some(effect) = non_empty(&ability.effect) {
        out.push_str(&format_power_rolls_html(effect, for_print));
    }

    out.push_str("</div>");
    out
}

/// Concatenate fragments for a list of abilities; an empty list renders
/// nothing.
pub fn format_abilities_html_structured(abilities: &[Ability], for_print: bool) -> String {
    abilities
        .iter()
        .map(|a| format_ability_html(a, for_print))
        .collect()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
