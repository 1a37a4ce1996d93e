use cardtext::{
    PowerRollPart, escape_html, format_abilities_html_structured, format_power_rolls_html,
    format_roll_line_html, marker_to_glyph_char, parse_power_rolls,
};

use crate::deck::Deck;
use crate::item::{Item, Project};

/// Rendering switches for cards and print documents.
#[derive(Debug, Clone, Copy)]
pub struct CardOptions {
    /// Include the crafting-project block.
    pub include_project: bool,
    /// Select the print glyph table instead of the screen one.
    pub for_print: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        CardOptions {
            include_project: true,
            for_print: false,
        }
    }
}

/// Render one item as a self-contained card fragment.
pub fn render_item_card(item: &Item, opts: &CardOptions) -> String {
    let mut out = String::from("<div class=\"print-card\">");
    out.push_str(&format!("<h3>{}</h3>", escape_html(&item.name)));

    let mut meta = escape_html(&item.kind);
    if let Some(echelon) = item.echelon {
        meta.push_str(&format!(" &bull; {}", echelon));
    }
    out.push_str(&format!("<div class=\"muted\">{}</div>", meta));

    if !item.keywords.is_empty() {
        out.push_str(&format!(
            "<div class=\"keywords\">{}</div>",
            escape_html(&item.keywords.join(", "))
        ));
    }

    if let Some(desc) = non_empty(&item.description) {
        out.push_str(&format!("<div class=\"desc\">{}</div>", escape_html(desc)));
    }

    out.push_str("<div class=\"effect\">");
    if let Some(effect) = non_empty(&item.effect) {
        out.push_str(&format_power_rolls_html(effect, opts.for_print));
    }
    for line in &item.power_roll {
        out.push_str(&format_roll_line_html(line, opts.for_print));
    }
    out.push_str(&format_abilities_html_structured(
        &item.abilities,
        opts.for_print,
    ));
    out.push_str("</div>");

    for (label, text) in [
        ("1st level", &item.first_level),
        ("5th level", &item.fifth_level),
        ("9th level", &item.ninth_level),
    ] {
        if let Some(text) = non_empty(text) {
            out.push_str(&format!(
                "<div class=\"level\"><h4>{}</h4>{}</div>",
                label,
                format_power_rolls_html(text, opts.for_print)
            ));
        }
    }

    if opts.include_project {
        if let Some(project) = &item.project {
            if !project.is_empty() {
                out.push_str(&render_project(project));
            }
        }
    }

    out.push_str("</div>");
    out
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn render_project(project: &Project) -> String {
    let mut out = String::from("<div class=\"project\"><strong>Project:</strong>");
    if let Some(prereq) = non_empty(&project.prerequisite) {
        out.push_str(&format!("<div>Prereq: {}</div>", escape_html(prereq)));
    }
    if let Some(source) = non_empty(&project.source) {
        out.push_str(&format!("<div>Source: {}</div>", escape_html(source)));
    }
    if !project.characteristics.is_empty() {
        out.push_str(&format!(
            "<div>Characteristics: {}</div>",
            escape_html(&project.characteristics.join(", "))
        ));
    }
    if let Some(goal) = non_empty(&project.goal) {
        out.push_str(&format!("<div>Goal: {}</div>", escape_html(goal)));
    }
    out.push_str("</div>");
    out
}

/// Condensed one-line summary of a leveled item's tiers, for compact deck
/// listings. Each level contributes its label plus the plain glyph
/// characters of its tier markers.
pub fn render_level_summary(item: &Item) -> Option<String> {
    let mut parts = Vec::new();
    for (label, text) in [
        ("1st", &item.first_level),
        ("5th", &item.fifth_level),
        ("9th", &item.ninth_level),
    ] {
        let Some(text) = text.as_deref() else {
            continue;
        };
        let glyphs: String = parse_power_rolls(text)
            .iter()
            .filter_map(|part| match part {
                PowerRollPart::Roll { marker, .. } => Some(marker_to_glyph_char(marker)),
                PowerRollPart::Plain { .. } => None,
            })
            .collect();
        if glyphs.is_empty() {
            parts.push(label.to_string());
        } else {
            parts.push(format!("{} {}", label, glyphs));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

// Print documents carry their stylesheet inline so the output file stands
// alone. The `ds-glyph` class binds to the icon font the consumer installs.
const PRINT_STYLE: &str = "\
body{ font-family: Arial, Helvetica, sans-serif; margin:20px; color:#111 }
.print-grid{ display:grid; grid-template-columns:repeat(auto-fill,minmax(260px,1fr)); gap:12px }
.print-card{ border:1px solid #222; padding:12px; border-radius:6px; background:#fff }
.print-card h3{ margin:0 0 6px 0 }
.print-card h4{ margin:8px 0 4px 0 }
.muted{ color:#666; font-size:0.9rem }
.keywords{ color:#444; font-size:0.85rem; margin-top:4px }
.desc{ margin-top:6px }
.effect{ margin-top:8px }
.level{ margin-top:8px }
.project{ margin-top:8px; font-size:0.9rem; color:#444 }
.power-roll{ margin-top:6px }
.power-roll .range{ color:#2b6cb0; font-weight:700; display:inline-block; width:72px }
.power-roll .pr-desc{ display:inline-block }
.power-roll.power-roll-header{ background:#f7f7f7; padding:6px; border-radius:6px; font-weight:700; display:block }
.ability{ margin-top:8px }
.ability h4{ margin:0 0 4px 0 }
.ability-meta{ color:#444; font-size:0.9rem }
.ds-glyph{ font-family:'DS Open Glyphs', Arial, sans-serif }
@media print{ body{ margin:0 } .print-grid{ gap:8px } }
";

/// Render a deck as a complete, standalone print-ready HTML document.
pub fn render_print_document(deck: &Deck, opts: &CardOptions) -> String {
    let mut out = String::from(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>Deck</title>\n<style>\n",
    );
    out.push_str(PRINT_STYLE);
    out.push_str("</style>\n</head>\n<body>\n<div class=\"print-grid\">\n");
    for item in deck.items() {
        out.push_str(&render_item_card(item, opts));
        out.push('\n');
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}
