use cardtext::{
    Ability, PowerRollPart, escape_html, format_abilities_html_structured, format_ability_html,
    format_power_rolls_html, marker_to_glyph_char, marker_to_glyph_html, parse_power_rolls,
    replace_potency_glyphs, replace_potency_glyphs_html,
};

fn roll(marker: &str, desc: &str) -> PowerRollPart {
    PowerRollPart::Roll {
        marker: marker.to_string(),
        desc: desc.to_string(),
    }
}

fn plain(text: &str) -> PowerRollPart {
    PowerRollPart::Plain {
        text: text.to_string(),
    }
}

#[test]
fn escape_html_special_characters() {
    assert_eq!(escape_html("&"), "&amp;");
    assert_eq!(escape_html("<"), "&lt;");
    assert_eq!(escape_html(">"), "&gt;");
    assert_eq!(escape_html("\""), "&quot;");
    assert_eq!(escape_html("'"), "&#039;");
    assert_eq!(escape_html(""), "");
}

#[test]
fn escape_html_mixed_text() {
    assert_eq!(
        escape_html("<div class=\"test\">"),
        "&lt;div class=&quot;test&quot;&gt;"
    );
}

#[test]
fn escape_html_defuses_injection() {
    let escaped = escape_html("<script>alert(1)</script>");
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
    assert!(escaped.contains("&lt;script&gt;"));
}

#[test]
fn parse_empty_text() {
    assert_eq!(parse_power_rolls(""), Vec::new());
}

#[test]
fn parse_plain_text() {
    assert_eq!(
        parse_power_rolls("This is plain text"),
        vec![plain("This is plain text")]
    );
    // Plain segments come back trimmed.
    assert_eq!(parse_power_rolls("  padded  "), vec![plain("padded")]);
}

#[test]
fn parse_single_markers() {
    assert_eq!(
        parse_power_rolls("<=11: Description here"),
        vec![roll("<=11", "Description here")]
    );
    assert_eq!(
        parse_power_rolls("12-16: Mid range effect"),
        vec![roll("12-16", "Mid range effect")]
    );
    assert_eq!(
        parse_power_rolls("17+: High roll effect"),
        vec![roll("17+", "High roll effect")]
    );
}

#[test]
fn parse_unicode_at_most_marker() {
    assert_eq!(
        parse_power_rolls("≤11: Under the line"),
        vec![roll("≤11", "Under the line")]
    );
}

#[test]
fn parse_multiple_markers_in_order() {
    let parts = parse_power_rolls("<=11: Low 12-16: Mid 17+: High");
    assert_eq!(
        parts,
        vec![roll("<=11", "Low"), roll("12-16", "Mid"), roll("17+", "High")]
    );
}

#[test]
fn parse_leading_text_before_marker() {
    let parts = parse_power_rolls("Some intro text <=11: Effect");
    assert_eq!(parts, vec![plain("Some intro text"), roll("<=11", "Effect")]);
}

#[test]
fn parse_strips_leading_punctuation_from_descriptions() {
    let parts = parse_power_rolls("<=11:  -  Description");
    assert_eq!(parts, vec![roll("<=11", "Description")]);
}

#[test]
fn parse_rejoin_reconstructs_normalized_input() {
    let input = "Before the rolls <=11: Low 12-16: Mid 17+: High";
    let mut pieces = Vec::new();
    for part in parse_power_rolls(input) {
        match part {
            PowerRollPart::Plain { text } => pieces.push(text),
            PowerRollPart::Roll { marker, desc } => pieces.push(format!("{}: {}", marker, desc)),
        }
    }
    let normalized: Vec<&str> = input.split_whitespace().collect();
    assert_eq!(pieces.join(" "), normalized.join(" "));
}

#[test]
fn format_empty_text() {
    assert_eq!(format_power_rolls_html("", false), "");
}

#[test]
fn format_plain_text_as_paragraph() {
    assert_eq!(
        format_power_rolls_html("  Plain text ", false),
        "<p>Plain text</p>"
    );
}

#[test]
fn format_keeps_newlines_as_breaks() {
    assert_eq!(
        format_power_rolls_html("one\ntwo", false),
        "<p>one<br/>two</p>"
    );
}

#[test]
fn format_marker_with_description() {
    let html = format_power_rolls_html("<=11: Effect", false);
    assert!(html.contains("class=\"power-roll\""));
    assert!(html.contains("class=\"range\""));
    assert!(html.contains("class=\"pr-desc\""));
    assert!(html.contains("Effect"));
}

#[test]
fn format_escapes_descriptions() {
    let html = format_power_rolls_html("<=11: <script>alert(\"xss\")</script>", false);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn format_three_tiers_in_order_without_leading_paragraph() {
    let html = format_power_rolls_html("<=11: Low 12-16: Mid 17+: High", false);
    assert_eq!(html.matches("class=\"power-roll\"").count(), 3);
    assert!(!html.contains("<p>"));
    let low = html.find("Low").unwrap();
    let mid = html.find("Mid").unwrap();
    let high = html.find("High").unwrap();
    assert!(low < mid && mid < high);
    assert_eq!(html.matches("ds-glyph").count(), 3);
}

#[test]
fn format_print_mode_uses_different_glyphs() {
    for text in ["<=11: Effect", "12-16: Effect", "17+: Effect"] {
        let screen = format_power_rolls_html(text, false);
        let print = format_power_rolls_html(text, true);
        assert_ne!(screen, print, "screen and print must differ for {}", text);
    }
}

#[test]
fn marker_glyph_html_screen_mode() {
    let at_most = marker_to_glyph_html("<=11", false);
    assert!(at_most.contains("ds-glyph"));
    assert!(at_most.contains("&#x005B;"));
    assert!(marker_to_glyph_html("12-16", false).contains("&#x002D;"));
    assert!(marker_to_glyph_html("17+", false).contains("&#x005D;"));
    assert!(marker_to_glyph_html("≤11", false).contains("&#x005B;"));
}

#[test]
fn marker_glyph_html_print_mode() {
    assert!(marker_to_glyph_html("<=11", true).contains("&#x007B;"));
    assert!(marker_to_glyph_html("12-16", true).contains("&#x005F;"));
    assert!(marker_to_glyph_html("17+", true).contains("&#x007D;"));
}

#[test]
fn marker_glyph_html_escapes_unknown_markers() {
    let html = marker_to_glyph_html("<unknown>", false);
    assert!(!html.contains("ds-glyph"));
    assert!(html.contains("&lt;"));
}

#[test]
fn marker_glyph_char_classes() {
    assert_eq!(marker_to_glyph_char("<=11"), "[");
    assert_eq!(marker_to_glyph_char("12-16"), "-");
    assert_eq!(marker_to_glyph_char("17+"), "]");
    assert_eq!(marker_to_glyph_char("≤11"), "[");
    assert_eq!(marker_to_glyph_char("unrecognized"), "unrecognized");
}

#[test]
fn potency_plain_strengths() {
    assert_eq!(replace_potency_glyphs(""), "");
    assert_eq!(replace_potency_glyphs("I<WEAK"), "Ix");
    assert_eq!(replace_potency_glyphs("I<AVERAGE"), "Iy");
    assert_eq!(replace_potency_glyphs("I<STRONG"), "Iz");
}

#[test]
fn potency_plain_all_category_letters() {
    let replaced = replace_potency_glyphs("I<WEAK M<WEAK P<WEAK R<WEAK A<WEAK");
    assert!(!replaced.contains("<WEAK"));
    assert_eq!(replaced, "Ix Mx Px Rx Ax");
}

#[test]
fn potency_plain_numeric_tiers() {
    assert_eq!(replace_potency_glyphs("I<0 I<6"), "I0 I6");
    assert_eq!(replace_potency_glyphs("M<3"), "M3");
    // A bare tier has no category glyph.
    assert_eq!(replace_potency_glyphs("<3"), "3");
}

#[test]
fn potency_plain_leaves_other_angle_text_alone() {
    assert_eq!(replace_potency_glyphs("a < b"), "a < b");
    assert_eq!(replace_potency_glyphs("<7"), "<7");
    assert_eq!(replace_potency_glyphs("X<WEAK"), "X<WEAK");
}

#[test]
fn potency_html_wraps_glyph_run() {
    assert_eq!(replace_potency_glyphs_html(""), "");
    assert_eq!(
        replace_potency_glyphs_html("I<WEAK"),
        "<span class=\"ds-glyph\">&#x0049;&#x0078;</span>"
    );
}

#[test]
fn potency_html_accepts_escaped_separator() {
    let literal = replace_potency_glyphs_html("I<WEAK");
    assert_eq!(replace_potency_glyphs_html("I&lt;WEAK"), literal);
    assert_eq!(replace_potency_glyphs_html("I&#60;WEAK"), literal);
}

#[test]
fn potency_html_all_strengths() {
    let html = replace_potency_glyphs_html("I<WEAK I<AVERAGE I<STRONG");
    assert!(html.contains("&#x0078;"));
    assert!(html.contains("&#x0079;"));
    assert!(html.contains("&#x007A;"));
}

#[test]
fn potency_html_numeric_tiers() {
    let html = replace_potency_glyphs_html("M<3");
    assert_eq!(html, "<span class=\"ds-glyph\">&#x004D;&#x0033;</span>");
    let bare = replace_potency_glyphs_html("<5");
    assert_eq!(bare, "<span class=\"ds-glyph\">&#x0035;</span>");
}

#[test]
fn ability_name_only_renders_single_heading() {
    let ability = Ability {
        name: "X".to_string(),
        ..Ability::default()
    };
    assert_eq!(
        format_ability_html(&ability, false),
        "<div class=\"ability\"><h4>X</h4></div>"
    );
}

#[test]
fn ability_description_is_potency_substituted() {
    let ability = Ability {
        name: "Test".to_string(),
        description: Some("Target takes I<WEAK damage".to_string()),
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(html.contains("class=\"desc ability-desc\""));
    assert!(html.contains("ds-glyph"));
    assert!(!html.contains("I<WEAK"));
}

#[test]
fn ability_escapes_name_and_description() {
    let ability = Ability {
        name: "<script>alert(\"xss\")</script>".to_string(),
        description: Some("<img src=x onerror=alert(1)>".to_string()),
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;"));
}

#[test]
fn ability_keywords_and_type_line() {
    let ability = Ability {
        name: "Test".to_string(),
        keywords: vec!["Magic".to_string(), "Attack".to_string()],
        kind: Some("Action".to_string()),
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(html.contains("Magic, Attack"));
    assert!(html.contains("Action"));
    assert!(html.contains("class=\"ability-meta\""));
}

#[test]
fn ability_range_and_targets_glyphs() {
    let ability = Ability {
        name: "Test".to_string(),
        range: Some("5".to_string()),
        targets: Some("3 enemies".to_string()),
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(html.contains("ds-glyph"));
    assert!(html.contains("&#x0044;"));
    assert!(html.contains("&#x0054;"));
    assert!(html.contains("5"));
    assert!(html.contains("3 enemies"));
}

#[test]
fn ability_power_roll_lines() {
    let ability = Ability {
        name: "Test".to_string(),
        power_roll: vec!["Power Roll + Might".to_string(), "<=11: Low effect".to_string()],
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(html.contains("class=\"ability-prs\""));
    assert!(html.contains("power-roll-header"));
    assert!(html.contains("Power Roll + Might"));
    assert!(html.contains("Low effect"));
}

#[test]
fn ability_bare_roll_line_has_no_glyph() {
    let ability = Ability {
        name: "Test".to_string(),
        power_roll: vec!["Just some text".to_string()],
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(html.contains("Just some text"));
    assert!(!html.contains("ds-glyph"));
}

#[test]
fn ability_effect_paragraph() {
    let ability = Ability {
        name: "Test".to_string(),
        effect: Some("This is the effect".to_string()),
        ..Ability::default()
    };
    let html = format_ability_html(&ability, false);
    assert!(html.contains("<p>This is the effect</p>"));
}

#[test]
fn ability_complete_record() {
    let ability = Ability {
        name: "Complete Ability".to_string(),
        description: Some("Full description".to_string()),
        keywords: vec!["Magic".to_string(), "Attack".to_string()],
        kind: Some("Action".to_string()),
        range: Some("5".to_string()),
        targets: Some("2 creatures".to_string()),
        effect: Some("Additional effect text".to_string()),
        power_roll: vec![
            "Power Roll".to_string(),
            "<=11: Low".to_string(),
            "12-16: Mid".to_string(),
            "17+: High".to_string(),
        ],
    };
    let html = format_ability_html(&ability, false);
    for needle in [
        "Complete Ability",
        "Full description",
        "Magic, Attack",
        "Action",
        "2 creatures",
        "Low",
        "Mid",
        "High",
        "Additional effect text",
    ] {
        assert!(html.contains(needle), "missing {:?} in {}", needle, html);
    }
}

#[test]
fn ability_deserializes_from_catalog_json() {
    let ability: Ability = serde_json::from_str(
        r#"{
            "name": "Jolt",
            "type": "Action",
            "keywords": ["Magic"],
            "power_roll": ["Power Roll", "<=11: 2 damage"]
        }"#,
    )
    .expect("ability should deserialize");
    assert_eq!(ability.name, "Jolt");
    assert_eq!(ability.kind.as_deref(), Some("Action"));
    assert_eq!(ability.keywords, vec!["Magic"]);
    assert_eq!(ability.power_roll.len(), 2);
}

#[test]
fn abilities_structured_empty_renders_nothing() {
    assert_eq!(format_abilities_html_structured(&[], false), "");
}

#[test]
fn abilities_structured_concatenates_in_order() {
    let abilities = vec![
        Ability {
            name: "First Ability".to_string(),
            description: Some("First desc".to_string()),
            ..Ability::default()
        },
        Ability {
            name: "Second Ability".to_string(),
            description: Some("Second desc".to_string()),
            ..Ability::default()
        },
    ];
    let html = format_abilities_html_structured(&abilities, false);
    let first = html.find("First Ability").unwrap();
    let second = html.find("Second Ability").unwrap();
    assert!(first < second);
    assert!(html.contains("First desc"));
    assert!(html.contains("Second desc"));
}

#[test]
fn abilities_structured_print_mode_differs() {
    let abilities = vec![Ability {
        name: "Test".to_string(),
        power_roll: vec!["<=11: Effect".to_string()],
        ..Ability::default()
    }];
    let screen = format_abilities_html_structured(&abilities, false);
    let print = format_abilities_html_structured(&abilities, true);
    assert_ne!(screen, print);
}
