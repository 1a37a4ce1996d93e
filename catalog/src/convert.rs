use std::ops::Range;
use std::sync::LazyLock;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use regex::Regex;

use crate::item::{Category, Item, Project};

/// Labels that end the wrapped continuation of any earlier field.
const FIELD_LABELS: &[&str] = &[
    "Project Source",
    "Project Roll Characteristic",
    "Project Goal",
    "1st Level",
    "5th Level",
    "9th Level",
];

static OR_AND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+(?:or|and)\s+").unwrap());

/// A non-fatal structural oddity found while converting rulebook text.
#[derive(Debug, Clone)]
pub struct ConvertWarning {
    pub message: String,
    /// Byte span into the source text.
    pub span: Range<usize>,
}

impl ConvertWarning {
    /// Convert to a codespan-reporting Diagnostic for terminal display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::new(Severity::Warning)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(file_id, self.span.clone())])
    }
}

/// Convert the rulebook's plain-text leveled-item listing into catalog
/// records.
///
/// Entries are blank-line-separated: a name line, description lines up to
/// `Keywords:`, the labeled project fields, then `1st/5th/9th Level:`
/// sections. Any labeled field may wrap onto following lines; labels match
/// case-insensitively. Conversion never fails; oddities come back as
/// warnings with spans into the source.
pub fn convert_leveled(source: &str) -> (Vec<Item>, Vec<ConvertWarning>) {
    let lines = split_lines(source);
    let mut converter = Converter {
        lines: &lines,
        pos: 0,
        warnings: Vec::new(),
    };
    let mut items = Vec::new();
    while let Some(item) = converter.next_item() {
        items.push(item);
    }
    (items, converter.warnings)
}

struct Line<'a> {
    start: usize,
    text: &'a str,
}

struct Converter<'a> {
    lines: &'a [Line<'a>],
    pos: usize,
    warnings: Vec<ConvertWarning>,
}

impl<'a> Converter<'a> {
    fn next_item(&mut self) -> Option<Item> {
        self.skip_blank();
        let name_line = self.lines.get(self.pos)?;
        let name_span = name_line.start..name_line.start + name_line.text.len();
        let name = name_line.text.trim().to_string();
        self.pos += 1;

        // Description: everything up to the Keywords: label.
        let mut desc_lines: Vec<&str> = Vec::new();
        while let Some(line) = self.lines.get(self.pos) {
            if label_rest(line.text, "Keywords").is_some() {
                break;
            }
            if !line.text.trim().is_empty() {
                desc_lines.push(line.text.trim());
            }
            self.pos += 1;
        }
        let description = desc_lines.join(" ");

        let mut keywords = Vec::new();
        if let Some(line) = self.lines.get(self.pos) {
            if let Some(rest) = label_rest(line.text, "Keywords") {
                keywords = rest
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if keywords.is_empty() {
                    self.warnings.push(ConvertWarning {
                        message: format!("'{}' has an empty keywords list", name),
                        span: line.start..line.start + line.text.len(),
                    });
                }
                self.pos += 1;
            }
        }

        let prerequisite = self.wrapped_field("Item Prerequisite");
        let project_source = self.wrapped_field("Project Source");
        let characteristics = self
            .wrapped_field("Project Roll Characteristic")
            .map(|raw| split_characteristics(&raw))
            .unwrap_or_default();
        let goal = self.wrapped_field("Project Goal");

        self.skip_blank();

        let first_level = self.wrapped_field("1st Level");
        let fifth_level = self.wrapped_field("5th Level");
        let ninth_level = self.wrapped_field("9th Level");

        if first_level.is_none() && fifth_level.is_none() && ninth_level.is_none() {
            self.warnings.push(ConvertWarning {
                message: format!("'{}' has no level entries", name),
                span: name_span,
            });
        }

        let project = Project {
            prerequisite,
            source: project_source,
            characteristics,
            goal,
        };

        Some(Item {
            name,
            kind: "Leveled".to_string(),
            category: Some(Category::Leveled),
            source: Some("Draw Steel Heroes".to_string()),
            keywords,
            description: (!description.is_empty()).then_some(description),
            project: (!project.is_empty()).then_some(project),
            first_level,
            fifth_level,
            ninth_level,
            ..Item::default()
        })
    }

    /// Read one labeled field, absorbing wrapped continuation lines until a
    /// blank line or the next recognized label.
    fn wrapped_field(&mut self, label: &str) -> Option<String> {
        let line = self.lines.get(self.pos)?;
        let mut value = label_rest(line.text, label)?.trim().to_string();
        self.pos += 1;
        while let Some(line) = self.lines.get(self.pos) {
            if line.text.trim().is_empty() {
                break;
            }
            if FIELD_LABELS
                .iter()
                .any(|stop| label_rest(line.text, stop).is_some())
            {
                break;
            }
            value.push(' ');
            value.push_str(line.text.trim());
            self.pos += 1;
        }
        (!value.is_empty()).then_some(value)
    }

    fn skip_blank(&mut self) {
        while self
            .lines
            .get(self.pos)
            .is_some_and(|line| line.text.trim().is_empty())
        {
            self.pos += 1;
        }
    }
}

/// Case-insensitive `Label:` prefix match; returns the text after the colon.
fn label_rest<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let head = trimmed.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = trimmed[label.len()..].strip_prefix(':')?;
    Some(rest.trim_start())
}

/// Normalize `or`/`and` separators to commas and split.
fn split_characteristics(raw: &str) -> Vec<String> {
    OR_AND_RE
        .replace_all(raw, ",")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for segment in source.split_inclusive('\n') {
        let text = segment.strip_suffix('\n').unwrap_or(segment);
        let text = text.strip_suffix('\r').unwrap_or(text);
        lines.push(Line { start, text });
        start += segment.len();
    }
    lines
}
