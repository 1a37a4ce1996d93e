use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::glyph;

/// Potency tokens: a category letter, a `<` separator, and a strength word
/// or tier digit; or a bare `<digit>` with no category. Anything else that
/// looks like `<...>` passes through untouched.
static POTENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([IMPRA])<(WEAK|AVERAGE|STRONG|[0-6])|<([0-6])").unwrap());

/// Same grammar with the separator also accepted in its escaped forms, so
/// the pass composes with HTML escaping applied upstream.
static POTENCY_HTML_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([IMPRA])(?:<|&lt;|&#60;)(WEAK|AVERAGE|STRONG|[0-6])|(?:<|&lt;|&#60;)([0-6])")
        .unwrap()
});

/// Strength words a potency token may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Average,
    Strong,
}

impl Strength {
    fn parse(s: &str) -> Option<Strength> {
        match s {
            "WEAK" => Some(Strength::Weak),
            "AVERAGE" => Some(Strength::Average),
            "STRONG" => Some(Strength::Strong),
            _ => None,
        }
    }

    /// Glyph-font slot for this strength.
    fn glyph(self) -> char {
        match self {
            Strength::Weak => '\u{0078}',
            Strength::Average => '\u{0079}',
            Strength::Strong => '\u{007A}',
        }
    }
}

/// Glyph codepoints for one matched token: the category letter's own slot
/// followed by the strength or tier slot. Digit tiers use the digit's own
/// slot; a bare tier has no category glyph.
fn token_glyphs(caps: &Captures<'_>) -> Vec<char> {
    if let Some(bare) = caps.get(3) {
        return bare.as_str().chars().collect();
    }
    // Groups 1 and 2 are present whenever group 3 is not.
    let letter = caps[1].chars().next().unwrap();
    let level = &caps[2];
    let level_glyph = match Strength::parse(level) {
        Some(strength) => strength.glyph(),
        None => level.chars().next().unwrap(),
    };
    vec![letter, level_glyph]
}

/// Replace potency tokens with bare glyph codepoints, for contexts where no
/// HTML wrapping is wanted.
pub fn replace_potency_glyphs(text: &str) -> String {
    POTENCY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            token_glyphs(caps).into_iter().collect::<String>()
        })
        .into_owned()
}

/// Replace potency tokens with entity-encoded glyph runs wrapped in the
/// icon-font span. Accepts `&lt;` and `&#60;` separators so it can run after
/// HTML escaping without a decode step.
pub fn replace_potency_glyphs_html(text: &str) -> String {
    POTENCY_HTML_RE
        .replace_all(text, |caps: &Captures<'_>| glyph::span(&token_glyphs(caps)))
        .into_owned()
}
