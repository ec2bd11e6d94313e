//! Integration tests for outline inference on synthetic documents.

use pdfoutline::outline::{build_tree, flatten, SectionSpan};
use pdfoutline::render::{to_json, to_text, JsonFormat, EMPTY_SECTION_HTML};
use pdfoutline::{
    extract_outline_from_source, Error, HeadingNode, MemorySource, OutlineDocument,
    OutlineOptions, Word,
};

/// Lay out `text` as words on one line, 6 units per character.
fn line(text: &str, top: f32, size: f32) -> Vec<Word> {
    words_at(text, 72.0, top, size)
}

fn words_at(text: &str, x: f32, top: f32, size: f32) -> Vec<Word> {
    let mut x = x;
    text.split_whitespace()
        .map(|t| {
            let word = Word::new(t, x, x + 6.0 * t.chars().count() as f32, top, size);
            x = word.x1 + 4.0;
            word
        })
        .collect()
}

/// A table row with cells far enough apart to count as columns.
fn row(cells: &[&str], top: f32, size: f32) -> Vec<Word> {
    cells
        .iter()
        .enumerate()
        .flat_map(|(i, cell)| words_at(cell, 72.0 + 150.0 * i as f32, top, size))
        .collect()
}

fn body(top: f32) -> Vec<Word> {
    line("ordinary body text that sets the common size", top, 10.0)
}

fn outline(pages: Vec<Vec<Word>>) -> OutlineDocument {
    extract_outline_from_source(
        &MemorySource::new(pages),
        "manual.pdf",
        &OutlineOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_title_section_and_non_tier_subheading() {
    // A size needs min_heading_occurrences (3) words to become a tier, so the
    // title has three words and a second 14pt section brings that size to
    // four. "1.1 Overview" stays at two words and is read as body text.
    let mut page1 = line("Manual Title Page", 40.0, 24.0);
    page1.extend(line("1. INTRODUCTION", 100.0, 14.0));
    page1.extend(body(120.0));
    page1.extend(line("1.1 Overview", 140.0, 12.0));
    page1.extend(body(160.0));
    let mut page2 = line("2. SCOPE", 60.0, 14.0);
    page2.extend(body(80.0));

    let doc = outline(vec![page1, page2]);

    assert_eq!(doc.headings.len(), 1);
    let root = &doc.headings[0];
    assert_eq!((root.level, root.text.as_str()), (1, "Manual Title Page"));
    assert_eq!(root.children.len(), 2);

    let intro = &root.children[0];
    assert_eq!((intro.level, intro.text.as_str()), (2, "1. INTRODUCTION"));
    assert!(intro.children.is_empty());
    assert!(intro.content_html.contains("<p>1.1 Overview</p>"));
    assert!(!intro.content_html.contains("2. SCOPE"));
    assert_eq!(root.children[1].page, 2);
}

#[test]
fn test_profile_and_heading_sizes() {
    let mut page = line("Big Title Words", 40.0, 24.0);
    page.extend(line("1. ONE", 100.0, 14.0));
    page.extend(line("2. TWO", 200.0, 14.0));
    page.extend(body(120.0));
    page.extend(body(220.0));
    // Only two words at 18: not frequent enough for a tier
    page.extend(line("Rare size", 400.0, 18.0));

    let doc = outline(vec![page]);
    assert_eq!(doc.profile.body_size, 10.0);
    assert_eq!(doc.profile.heading_sizes, vec![24.0, 14.0]);
    assert!(doc
        .profile
        .heading_sizes
        .iter()
        .all(|s| *s > doc.profile.body_size + 0.5));
}

#[test]
fn test_section_spans_pages() {
    let mut page1 = line("1. DOSING", 100.0, 14.0);
    page1.extend(body(120.0));
    let page2 = line("continued on the next page of the manual", 50.0, 10.0);
    let mut page3 = line("2. ROUTES", 50.0, 14.0);
    page3.extend(line("3. REVIEW", 300.0, 14.0));

    let doc = outline(vec![page1, page2, page3]);
    let dosing = &doc.headings[0];
    assert!(dosing.content_html.contains("ordinary body text"));
    assert!(dosing.content_html.contains("continued on the next page"));
    assert!(!dosing.content_html.contains("ROUTES"));

    let routes = &doc.headings[1];
    assert_eq!(routes.content_html, EMPTY_SECTION_HTML);
}

#[test]
fn test_bullets_and_tables_in_section() {
    let mut page = line("1. TREATMENT", 100.0, 14.0);
    page.extend(line("Give the following:", 120.0, 10.0));
    page.extend(line("• oxygen", 135.0, 10.0));
    page.extend(line("• fluids", 150.0, 10.0));
    page.extend(row(&["Drug", "Dose", "Route"], 170.0, 10.0));
    page.extend(row(&["Morphine", "0.1 mg/kg", "IV"], 185.0, 10.0));
    // Bullet glyph but laid out as a table row
    page.extend(row(&["•", "Adrenaline", "IM"], 200.0, 10.0));
    page.extend(line("2. NOTES", 300.0, 14.0));
    page.extend(line("3. INDEX", 400.0, 14.0));

    let doc = outline(vec![page]);
    let html = &doc.headings[0].content_html;

    assert_eq!(
        html,
        "<p>Give the following:</p>\
         <ul><li>oxygen</li><li>fluids</li></ul>\
         <table><tr><td>Drug</td><td>Dose</td><td>Route</td></tr>\
         <tr><td>Morphine</td><td>0.1 mg/kg</td><td>IV</td></tr>\
         <tr><td>•</td><td>Adrenaline</td><td>IM</td></tr></table>"
    );
}

#[test]
fn test_markup_is_escaped() {
    let mut page = line("1. SAFETY", 100.0, 14.0);
    page.extend(line("dose < 5 mg & \"never\" IV", 120.0, 10.0));
    page.extend(line("2. MORE", 200.0, 14.0));
    page.extend(line("3. END", 300.0, 14.0));
    page.extend(body(320.0));

    let doc = outline(vec![page]);
    assert!(doc.headings[0]
        .content_html
        .contains("dose &lt; 5 mg &amp; &quot;never&quot; IV"));
}

#[test]
fn test_tree_round_trip_on_extracted_outline() {
    let mut page1 = line("Guide Guide Guide", 40.0, 24.0);
    page1.extend(line("1. START", 100.0, 14.0));
    page1.extend(line("1.1 First step", 150.0, 14.0));
    page1.extend(body(170.0));
    let mut page2 = line("2. FINISH", 60.0, 14.0);
    page2.extend(line("Appendix material", 200.0, 14.0));
    page2.extend(body(220.0));

    let doc = outline(vec![page1, page2]);
    let flat = flatten(&doc.headings);

    let ids: Vec<usize> = flat.iter().map(|h| h.id).collect();
    assert_eq!(ids, (0..flat.len()).collect::<Vec<_>>());
    let mut by_position = flat.clone();
    by_position.sort_by(|a, b| a.position().partial_cmp(&b.position()).unwrap());
    assert_eq!(by_position, flat);

    assert_eq!(build_tree(&flat), doc.headings);

    let levels: Vec<u32> = flat.iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![1, 2, 3, 2, 2]);
}

#[test]
fn test_span_boundaries() {
    let mut page = line("Title Title Title", 40.0, 24.0);
    page.extend(line("2. ALPHA", 100.0, 14.0));
    page.extend(line("2.1 Beta", 200.0, 12.0));
    page.extend(line("3. GAMMA", 300.0, 14.0));
    page.extend(line("3.1 Delta", 320.0, 12.0));
    page.extend(line("3.2 Epsilon", 340.0, 12.0));
    page.extend(body(360.0));

    let doc = outline(vec![page]);
    let flat = flatten(&doc.headings);
    let levels: Vec<u32> = flat.iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![1, 2, 3, 2, 3, 3]);

    let beta = SectionSpan::of(&flat, 2, 1);
    assert_eq!(beta.start_page, 1);
    assert!(beta.start_top > flat[2].top);
    assert_eq!(beta.end_top, Some(flat[3].top));

    let alpha = SectionSpan::of(&flat, 1, 1);
    assert_eq!(alpha.end_top, Some(flat[3].top));

    let title = SectionSpan::of(&flat, 0, 1);
    assert_eq!((title.end_page, title.end_top), (1, None));
}

#[test]
fn test_text_and_json_rendering() {
    let mut page = line("Handbook Handbook Handbook", 40.0, 24.0);
    page.extend(line("1. USE", 100.0, 14.0));
    page.extend(line("2. CARE", 200.0, 14.0));
    page.extend(body(220.0));

    let doc = outline(vec![page]);
    let text = to_text(&doc);
    assert!(text.starts_with("Body font size (most common): 10\n"));
    assert!(text.contains("- (L1, p1) Handbook Handbook Handbook\n"));
    assert!(text.contains("  - (L2, p1) 1. USE\n"));

    let json = to_json(&doc, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pdf"], "manual.pdf");
    assert_eq!(value["headings"][0]["children"][1]["text"], "2. CARE");

    let parsed: Vec<HeadingNode> = serde_json::from_value(value["headings"].clone()).unwrap();
    assert_eq!(parsed, doc.headings);
}

#[test]
fn test_invalid_sizes_are_ignored() {
    let mut page = line("Title Title Title", 40.0, 24.0);
    page.extend(body(100.0));
    page.push(Word::new("broken", 72.0, 100.0, 120.0, f32::NAN));
    page.push(Word::new("zero", 72.0, 100.0, 130.0, 0.0));

    let doc = outline(vec![page]);
    assert_eq!(doc.profile.body_size, 10.0);
    assert!(!doc.headings[0].content_html.contains("broken"));
}

#[test]
fn test_page_limit() {
    let pages = vec![
        line("Title Title Title", 40.0, 24.0),
        body(100.0),
        line("Hidden Hidden Hidden", 40.0, 24.0),
    ];
    let options = OutlineOptions::default().with_max_pages(2);
    let doc =
        extract_outline_from_source(&MemorySource::new(pages), "limited.pdf", &options).unwrap();
    assert_eq!(doc.heading_count(), 1);
}

#[test]
fn test_no_text_fails() {
    let result = extract_outline_from_source(
        &MemorySource::new(vec![Vec::new()]),
        "blank.pdf",
        &OutlineOptions::default(),
    );
    assert!(matches!(result, Err(Error::Profiling(_))));
}

#[test]
fn test_sequential_matches_parallel() {
    let pages: Vec<Vec<Word>> = (0..12)
        .map(|i| {
            let mut page = line(&format!("{}. PART", i + 1), 60.0, 14.0);
            page.extend(line(&format!("{}.1 Detail", i + 1), 200.0, 12.0));
            page.extend(line(&format!("{}.2 Detail", i + 1), 300.0, 12.0));
            page.extend(body(320.0));
            page
        })
        .collect();

    let source = MemorySource::new(pages);
    let parallel =
        extract_outline_from_source(&source, "p.pdf", &OutlineOptions::default()).unwrap();
    let sequential = extract_outline_from_source(
        &source,
        "p.pdf",
        &OutlineOptions::default().sequential(),
    )
    .unwrap();

    assert_eq!(parallel.headings, sequential.headings);
    assert_eq!(parallel.heading_count(), 36);
}
