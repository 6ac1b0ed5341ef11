//! Free text capture at word boundaries.

mod common;

use common::{count, partial_count, results_with};
use suggestkit::{Marker, MatchKind, ParseOptions, Parser, freetext, literal, sequence};
use test_case::test_case;

fn text() -> Parser<()> {
    freetext().build().unwrap()
}

fn limited() -> Parser<()> {
    freetext().max_length(10).build().unwrap()
}

#[test]
fn test_empty_input_yields_nothing() {
    assert_eq!(count(text(), ""), 0);
}

#[test]
fn test_accepts_any_text() {
    assert_eq!(count(text(), "te"), 1);
    assert_eq!(count(text(), " te"), 1);
}

#[test_case("te st word another here", 5; "five words")]
#[test_case("te st", 2; "two words")]
#[test_case("12  45", 2; "repeated spaces")]
#[test_case("12,  45", 2; "mixed delimiters")]
#[test_case("12 , 45 , 50", 3; "spaced commas")]
#[test_case(",12 , 45 , 50", 3; "leading comma")]
#[test_case(" ", 1; "single space")]
#[test_case("  ", 1; "two spaces")]
#[test_case(" , ", 1; "spaced comma")]
#[test_case(", , , ", 1; "only delimiters")]
fn test_branch_per_word(input: &str, expected: usize) {
    assert_eq!(partial_count(text(), input), expected);
}

#[test_case("12 45 78 0", 4; "fits")]
#[test_case("12 45 78 01", 3; "last word overflows")]
#[test_case("12 45 78 01 23", 3; "two words overflow")]
#[test_case("longwordtoolongtobeincluded", 0; "single long word")]
fn test_max_length(input: &str, expected: usize) {
    assert_eq!(partial_count(limited(), input), expected);
}

#[test]
fn test_max_length_keeps_leading_words() {
    let results = results_with(
        limited(),
        "test longwordtoolongtobeincluded",
        ParseOptions::new().allow_partial(),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].all_parts().len(), 1);
    assert_eq!(results[0].all_parts()[0].content, "test");
}

#[test]
fn test_custom_delimiters() {
    let custom = || freetext().split_by(["foo"]).build().unwrap();

    assert_eq!(partial_count(custom(), "barfoobar"), 2);
    assert_eq!(partial_count(custom(), "bar foobar"), 2);
    assert_eq!(partial_count(custom(), "barfoobarfoobar"), 3);
}

#[test]
fn test_filter_rejects_captures() {
    let parser = freetext().filter(|text| !text.contains('x')).build().unwrap();
    assert_eq!(partial_count(parser, "ab cx de"), 1);
}

#[test]
fn test_capture_followed_by_literal() {
    let name = Marker::new("name");
    let parser: Parser<()> = sequence([
        literal("my name is ").build().unwrap(),
        freetext().marker(name.clone()).build().unwrap(),
        literal(" foo").build().unwrap(),
    ])
    .build()
    .unwrap();

    let mut results = results_with(parser, "my name is john foo", ParseOptions::new().allow_partial());
    assert_eq!(results.len(), 2);

    results.sort_by(|a, b| b.score().total_cmp(&a.score()));
    let best = results[0].parts(&[name.clone()]);
    let captured: Vec<_> = best
        .iter()
        .filter(|part| part.marker.as_ref() == Some(&name))
        .collect();

    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].content, "john");
    assert_eq!(captured[0].kind, MatchKind::Input);
}

#[test]
fn test_emits_capture() {
    let parser = freetext::<Vec<String>>()
        .on_emit(|capture, seen| {
            let mut seen = seen.clone();
            seen.push(capture);
            Some(seen)
        })
        .build()
        .unwrap();

    let results = results_with(parser, "a b", ParseOptions::new().allow_partial());
    let data: Vec<_> = results.iter().map(|r| r.data().clone()).collect();

    assert_eq!(data, [vec!["a".to_owned()], vec!["a b".to_owned()]]);
}
