//! Word boundaries around literals and nested parsers.

mod common;

use common::{count, lit, lits, matched};
use suggestkit::{Error, Parser, fork, sequence, word, word_with};
use test_case::test_case;

fn w(text: &str) -> Parser<()> {
    word(text).build().unwrap()
}

fn words_sequence() -> Parser<()> {
    sequence([w("foo"), w("bar"), w("baz")]).build().unwrap()
}

fn mixed_sequence() -> Parser<()> {
    sequence([lit("foo"), w("bar"), lit("baz")]).build().unwrap()
}

#[test_case("foo bar baz", 1; "complete")]
#[test_case("foo bar ", 1; "trailing separator")]
#[test_case("foo bar b", 1; "partial last word")]
#[test_case("foo bar", 1; "missing separator at end")]
#[test_case("foo ba", 1; "partial middle word")]
#[test_case("fooba", 0; "glued words")]
#[test_case("foobar baz", 0; "glued first pair")]
fn test_sequence_of_words(input: &str, expected: usize) {
    assert_eq!(count(words_sequence(), input), expected);
}

#[test_case("foo bar baz", 1; "complete")]
#[test_case("foo bar ", 1; "trailing separator")]
#[test_case("foo bar b", 1; "partial literal")]
#[test_case("foo bar", 1; "word at end")]
#[test_case("foo ba", 1; "partial word")]
#[test_case("fooba", 0; "no separator before word")]
#[test_case("foobar baz", 0; "glued word")]
fn test_word_between_literals(input: &str, expected: usize) {
    assert_eq!(count(mixed_sequence(), input), expected);
}

#[test]
fn test_end_of_input() {
    let parser = || sequence([w("foo")]).build().unwrap();

    assert_eq!(count(parser(), "fo"), 1);
    assert_eq!(count(parser(), "foo"), 1);
    assert_eq!(matched(parser(), "foo"), ["foo "]);
}

#[test_case("foo", 2; "nothing typed")]
#[test_case("foo ", 2; "separator typed")]
#[test_case("fooa", 0; "glued child")]
#[test_case("foo a", 1; "child typed")]
#[test_case("foo a ", 1; "child and separator")]
#[test_case("foo a bar", 1; "complete")]
#[test_case("foo a foo", 0; "wrong tail")]
fn test_word_with_child(input: &str, expected: usize) {
    let parser = sequence([
        w("foo"),
        word_with(fork(lits(&["a", "b"])).build().unwrap()).build().unwrap(),
        lit("bar"),
    ])
    .build()
    .unwrap();

    assert_eq!(count(parser, input), expected);
}

fn nested() -> Parser<()> {
    let inner = sequence([w("a"), w("b"), word_with(w("c")).build().unwrap()])
        .build()
        .unwrap();

    sequence([w("foo"), word_with(inner).build().unwrap(), lit("bar")])
        .build()
        .unwrap()
}

#[test_case("foo a b c b", 1; "partial tail")]
#[test_case("foo a b c bar", 1; "complete")]
#[test_case("foo a bc", 0; "glued inner words")]
fn test_nested_words(input: &str, expected: usize) {
    assert_eq!(count(nested(), input), expected);
}

#[test]
fn test_nested_words_suggest_single_separators() {
    assert_eq!(matched(nested(), "foo"), ["foo a b c bar"]);
}

#[test]
fn test_requires_text_or_child() {
    assert_eq!(
        word::<()>("foo").child(lit("foo")).build().unwrap_err(),
        Error::WordTextAndChild
    );
    assert_eq!(word::<()>("").build().unwrap_err(), Error::WordMissingContent);
}
