pub mod ability;
pub mod escape;
pub mod glyph;
pub mod marker;
pub mod potency;
pub mod power_roll;

pub use ability::{
    Ability, RollLine, classify_roll_line, format_abilities_html_structured, format_ability_html,
    format_roll_line_html,
};
pub use escape::escape_html;
pub use marker::{MarkerClass, MarkerSpan, marker_to_glyph_char, marker_to_glyph_html, scan_markers};
pub use potency::{replace_potency_glyphs, replace_potency_glyphs_html};
pub use power_roll::{PowerRollPart, format_power_rolls_html, parse_power_rolls};
