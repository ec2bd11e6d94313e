//! Section body markup.
//!
//! Body lines are turned into `<p>`, `<ul>` and `<table>` fragments by a
//! small state machine: consecutive bullets are buffered into one list,
//! consecutive table rows into one table, and any other line closes
//! whatever is open.

use html_escape::encode_quoted_attribute;
use regex::Regex;

use crate::model::LineKind;

/// Markup emitted for a section with no recovered text.
pub const EMPTY_SECTION_HTML: &str = r#"<p class="text-muted">No text detected for this section.</p>"#;

/// Runs of whitespace that separate table cells.
const CELL_SEPARATOR: &str = r"\s{2,}";

/// A typed body line.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyLine {
    /// Line type
    pub kind: LineKind,
    /// Assembled text, including column separators
    pub text: String,
}

impl BodyLine {
    /// Create a body line.
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Renders typed body lines into escaped markup.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    bullet_glyphs: Vec<char>,
    cell_separator: Regex,
}

impl HtmlRenderer {
    /// Create a renderer that strips the given bullet glyphs from list items.
    pub fn new(bullet_glyphs: &[char]) -> Self {
        Self {
            bullet_glyphs: bullet_glyphs.to_vec(),
            cell_separator: Regex::new(CELL_SEPARATOR).expect("cell separator pattern is valid"),
        }
    }

    /// Render a section body. An empty body renders [`EMPTY_SECTION_HTML`].
    pub fn render(&self, lines: &[BodyLine]) -> String {
        let mut writer = SectionWriter {
            renderer: self,
            out: String::new(),
            state: State::Idle,
        };
        for line in lines {
            writer.push(line);
        }
        writer.finish()
    }

    /// List item text: leading glyphs and spaces stripped.
    fn list_item(&self, text: &str) -> String {
        let stripped = text
            .trim_start_matches(|c: char| c == ' ' || self.bullet_glyphs.contains(&c))
            .trim();
        if stripped.is_empty() {
            text.trim().to_string()
        } else {
            stripped.to_string()
        }
    }

    /// Table row markup, or `None` when the row has no cells.
    fn table_row(&self, text: &str) -> Option<String> {
        let cells: Vec<String> = self
            .cell_separator
            .split(text.trim())
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(|cell| format!("<td>{}</td>", escape(cell)))
            .collect();

        (!cells.is_empty()).then(|| format!("<tr>{}</tr>", cells.concat()))
    }
}

/// Buffering state of the writer.
enum State {
    Idle,
    InList(Vec<String>),
    InTable(Vec<String>),
}

struct SectionWriter<'r> {
    renderer: &'r HtmlRenderer,
    out: String,
    state: State,
}

impl SectionWriter<'_> {
    fn push(&mut self, line: &BodyLine) {
        match line.kind {
            LineKind::Bullet => {
                let item = self.renderer.list_item(&line.text);
                match &mut self.state {
                    State::InList(items) => items.push(item),
                    _ => {
                        self.flush();
                        self.state = State::InList(vec![item]);
                    }
                }
            }
            LineKind::Table => match &mut self.state {
                State::InTable(rows) => rows.push(line.text.clone()),
                _ => {
                    self.flush();
                    self.state = State::InTable(vec![line.text.clone()]);
                }
            },
            LineKind::Blank => self.flush(),
            LineKind::Paragraph => {
                self.flush();
                let text = line.text.trim();
                if !text.is_empty() {
                    self.out.push_str(&format!("<p>{}</p>", escape(text)));
                }
            }
        }
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => {}
            State::InList(items) => {
                self.out.push_str("<ul>");
                for item in items {
                    self.out.push_str(&format!("<li>{}</li>", escape(&item)));
                }
                self.out.push_str("</ul>");
            }
            State::InTable(rows) => {
                let rows: Vec<String> = rows
                    .iter()
                    .filter_map(|row| self.renderer.table_row(row))
                    .collect();
                if !rows.is_empty() {
                    self.out.push_str(&format!("<table>{}</table>", rows.concat()));
                }
            }
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        if self.out.is_empty() {
            EMPTY_SECTION_HTML.to_string()
        } else {
            self.out
        }
    }
}

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    encode_quoted_attribute(text).into_owned()
}
