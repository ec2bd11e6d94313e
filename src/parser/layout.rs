//! Content stream interpretation.
//!
//! Walks a page's content stream, tracks the text and graphics state, and
//! places every glyph on the page. Glyphs are then merged into words the
//! way pdfplumber does it: a word ends at whitespace, at a horizontal or
//! vertical jump, or where the font changes.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{tenths, Word};

/// Fraction of the font size above the baseline used as the glyph top.
const ASCENT: f32 = 0.8;
/// Glyph width (thousandths of an em) when the font carries no metrics.
const DEFAULT_GLYPH_WIDTH: f32 = 500.0;
/// Maximum horizontal distance between glyphs of the same word.
const X_TOLERANCE: f32 = 3.0;
/// Maximum vertical distance between glyphs of the same word.
const Y_TOLERANCE: f32 = 3.0;
/// US Letter height, used when a page has no MediaBox.
const DEFAULT_PAGE_TOP: f32 = 792.0;

/// Extract the words of one page.
pub(crate) fn extract_page_words(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<Word>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::Decoder(e.to_string()))?;

    let content = get_page_content(doc, page_id)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let content =
        lopdf::content::Content::decode(&content).map_err(|e| Error::Decoder(e.to_string()))?;

    let mut interpreter = PageInterpreter::new(doc, fonts, page_top(doc, page_id)?);
    for op in &content.operations {
        interpreter.apply(&op.operator, &op.operands);
    }
    Ok(interpreter.words.finish())
}

/// Get the decompressed content stream of a page.
fn get_page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::Decoder(e.to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        // A page without content is legal (e.g. a blank separator page)
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return decode_stream(s);
            }
            Err(Error::Decoder("Invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = decode_stream(s) {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::Decoder("Invalid content stream".to_string())),
    }
}

/// Stream bytes, decompressed when the stream carries a filter.
fn decode_stream(stream: &lopdf::Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| Error::Decoder(e.to_string()))
    } else {
        Ok(stream.content.clone())
    }
}

/// Top edge of the page in user space, from the (possibly inherited) MediaBox.
fn page_top(doc: &LopdfDocument, page_id: ObjectId) -> Result<f32> {
    let mut current = page_id;
    loop {
        let dict = doc
            .get_dictionary(current)
            .map_err(|e| Error::Decoder(e.to_string()))?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            let values: Vec<f32> = match resolve(doc, media_box) {
                Object::Array(arr) => arr.iter().filter_map(get_number).collect(),
                _ => Vec::new(),
            };
            if values.len() == 4 {
                return Ok(values[1].max(values[3]));
            }
            return Err(Error::Decoder("MediaBox is not a rectangle".to_string()));
        }

        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => return Ok(DEFAULT_PAGE_TOP),
        }
    }
}

/// Follow an indirect reference, returning the object itself otherwise.
fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let v: Vec<f32> = operands[..6].iter().filter_map(get_number).collect();
        (v.len() == 6).then(|| Matrix {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
        })
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Glyph advance widths of a font.
#[derive(Debug, Clone, Default)]
struct FontMetrics {
    first_char: u32,
    widths: Vec<f32>,
    cid_widths: HashMap<u32, f32>,
    default_width: f32,
    two_byte: bool,
}

impl FontMetrics {
    fn from_dict(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let subtype = font.get(b"Subtype").and_then(Object::as_name).unwrap_or(b"");
        if subtype == b"Type0" {
            return Self::from_type0(doc, font);
        }

        let first_char = font
            .get(b"FirstChar")
            .ok()
            .and_then(get_number)
            .map_or(0, |n| n as u32);
        let widths = match font.get(b"Widths").map(|w| resolve(doc, w)) {
            Ok(Object::Array(arr)) => arr
                .iter()
                .map(|o| get_number(resolve(doc, o)).unwrap_or(0.0))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            first_char,
            widths,
            default_width: DEFAULT_GLYPH_WIDTH,
            ..Self::default()
        }
    }

    /// Composite fonts: two-byte codes, `DW` default and the `W` array of the
    /// descendant CID font.
    fn from_type0(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let mut metrics = Self {
            default_width: 1000.0,
            two_byte: true,
            ..Self::default()
        };

        let descendant = match font.get(b"DescendantFonts").map(|d| resolve(doc, d)) {
            Ok(Object::Array(arr)) => arr.first().map(|d| resolve(doc, d)),
            _ => None,
        };
        let Some(Object::Dictionary(cid_font)) = descendant else {
            return metrics;
        };

        if let Some(dw) = cid_font.get(b"DW").ok().and_then(get_number) {
            metrics.default_width = dw;
        }

        // W: [c [w1 w2 ...]] or [c_first c_last w]
        if let Ok(Object::Array(w)) = cid_font.get(b"W").map(|w| resolve(doc, w)) {
            let mut i = 0;
            while i < w.len() {
                let Some(start) = get_number(resolve(doc, &w[i])) else {
                    break;
                };
                let start = start as u32;
                match w.get(i + 1).map(|o| resolve(doc, o)) {
                    Some(Object::Array(run)) => {
                        for (offset, width) in run.iter().enumerate() {
                            if let Some(width) = get_number(resolve(doc, width)) {
                                metrics
                                    .cid_widths
                                    .insert(start.saturating_add(offset as u32), width);
                            }
                        }
                        i += 2;
                    }
                    Some(end) => {
                        let end = get_number(end).map_or(start, |n| n as u32);
                        let width = w.get(i + 2).and_then(|o| get_number(resolve(doc, o)));
                        if let Some(width) = width {
                            for cid in start..=end.min(start.saturating_add(0xFFFF)) {
                                metrics.cid_widths.insert(cid, width);
                            }
                        }
                        i += 3;
                    }
                    None => break,
                }
            }
        }
        metrics
    }

    /// Split a shown string into character codes.
    fn codes<'b>(&self, bytes: &'b [u8]) -> std::slice::Chunks<'b, u8> {
        bytes.chunks(if self.two_byte { 2 } else { 1 })
    }

    /// Advance width of a code, in thousandths of an em.
    fn width(&self, code: &[u8]) -> f32 {
        let value = code.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
        if self.two_byte {
            return self
                .cid_widths
                .get(&value)
                .copied()
                .unwrap_or(self.default_width);
        }
        value
            .checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(self.default_width)
    }
}

/// Text state parameters (part of the graphics state).
#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scale: f32,
    leading: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

/// A positioned glyph, already decoded to text.
struct Glyph<'g> {
    text: &'g str,
    x0: f32,
    x1: f32,
    top: f32,
    size: f32,
    font_name: &'g str,
}

/// Merges consecutive glyphs into words.
#[derive(Default)]
struct WordBuilder {
    words: Vec<Word>,
    current: Option<Word>,
}

impl WordBuilder {
    fn push(&mut self, glyph: Glyph<'_>) {
        if glyph.text.trim().is_empty() {
            self.flush();
            return;
        }

        if let Some(current) = &self.current {
            let same_line = (glyph.top - current.top).abs() <= Y_TOLERANCE;
            let adjacent = glyph.x0 - current.x1 <= X_TOLERANCE
                && glyph.x0 >= current.x0 - X_TOLERANCE;
            let same_font = current.font_name == glyph.font_name
                && tenths(current.size) == tenths(glyph.size);
            if !(same_line && adjacent && same_font) {
                self.flush();
            }
        }

        match &mut self.current {
            Some(current) => {
                current.text.push_str(glyph.text);
                current.x1 = current.x1.max(glyph.x1);
            }
            None => {
                self.current = Some(
                    Word::new(glyph.text, glyph.x0, glyph.x1, glyph.top, glyph.size)
                        .with_font(glyph.font_name),
                );
            }
        }
    }

    fn flush(&mut self) {
        if let Some(word) = self.current.take() {
            self.words.push(word);
        }
    }

    fn finish(mut self) -> Vec<Word> {
        self.flush();
        self.words
    }
}

/// Interpreter state for one page.
struct PageInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    font_names: HashMap<Vec<u8>, String>,
    metrics: HashMap<Vec<u8>, FontMetrics>,
    page_top: f32,
    ctm: Matrix,
    saved: Vec<(Matrix, TextState)>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    state: TextState,
    words: WordBuilder,
}

impl<'a> PageInterpreter<'a> {
    fn new(doc: &'a LopdfDocument, fonts: BTreeMap<Vec<u8>, &'a Dictionary>, page_top: f32) -> Self {
        let mut font_names = HashMap::new();
        let mut metrics = HashMap::new();
        for (key, font) in &fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            font_names.insert(key.clone(), base_font);
            metrics.insert(key.clone(), FontMetrics::from_dict(doc, font));
        }

        Self {
            doc,
            fonts,
            font_names,
            metrics,
            page_top,
            ctm: Matrix::IDENTITY,
            saved: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            state: TextState::default(),
            words: WordBuilder::default(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        let num = |i: usize| operands.get(i).and_then(get_number);

        match operator {
            "q" => self.saved.push((self.ctm, self.state.clone())),
            "Q" => {
                if let Some((ctm, state)) = self.saved.pop() {
                    self.ctm = ctm;
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.multiply(&self.ctm);
                }
            }
            "BT" => {
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.words.flush(),
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.state.font_key = name.clone();
                }
                if let Some(size) = num(1) {
                    self.state.size = size;
                }
            }
            "Tc" => self.state.char_spacing = num(0).unwrap_or(0.0),
            "Tw" => self.state.word_spacing = num(0).unwrap_or(0.0),
            "Tz" => self.state.horizontal_scale = num(0).unwrap_or(100.0) / 100.0,
            "TL" => self.state.leading = num(0).unwrap_or(0.0),
            "Ts" => self.state.rise = num(0).unwrap_or(0.0),
            "Td" => {
                if let (Some(tx), Some(ty)) = (num(0), num(1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (num(0), num(1)) {
                    self.state.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(bytes);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(bytes);
                }
            }
            "\"" => {
                self.state.word_spacing = num(0).unwrap_or(0.0);
                self.state.char_spacing = num(1).unwrap_or(0.0);
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    self.show_text(bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => self.show_text(bytes),
                            other => {
                                // Positioning adjustment in thousandths of an em
                                if let Some(adjust) = get_number(other) {
                                    let tx = -adjust / 1000.0
                                        * self.state.size
                                        * self.state.horizontal_scale;
                                    self.advance(tx);
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.leading;
        self.move_line(0.0, -leading);
    }

    fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    fn show_text(&mut self, bytes: &[u8]) {
        let doc = self.doc;
        let key = self.state.font_key.clone();
        let font: Option<&'a Dictionary> = self.fonts.get(&key).copied();
        let encoding = font.and_then(|f| f.get_font_encoding(doc).ok());
        let metrics = self.metrics.get(&key).cloned().unwrap_or_else(|| FontMetrics {
            default_width: DEFAULT_GLYPH_WIDTH,
            ..FontMetrics::default()
        });
        let font_name = self
            .font_names
            .get(&key)
            .cloned()
            .unwrap_or_else(|| String::from_utf8_lossy(&key).to_string());

        for code in metrics.codes(bytes) {
            let raw = match &encoding {
                Some(enc) => LopdfDocument::decode_text(enc, code).unwrap_or_default(),
                None => decode_text_simple(code),
            };
            let text: String = raw.nfkc().collect();

            let fs = self.state.size;
            let th = self.state.horizontal_scale;
            let w0 = metrics.width(code) / 1000.0;

            let m = self.text_matrix.multiply(&self.ctm);
            let (x0, y0) = m.apply(0.0, self.state.rise);
            let (x1, _) = m.apply(w0 * fs * th, self.state.rise);
            let size = fs * m.vertical_scale();

            self.words.push(Glyph {
                text: &text,
                x0: x0.min(x1),
                x1: x0.max(x1),
                top: self.page_top - (y0 + size * ASCENT),
                size,
                font_name: &font_name,
            });

            let mut tx = w0 * fs + self.state.char_spacing;
            if code == b" " {
                tx += self.state.word_spacing;
            }
            self.advance(tx * th);
        }
    }
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
