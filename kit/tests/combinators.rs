//! Fork, sequence, optional and whitespace, plus the shared enable options.

mod common;

use common::{count, lit, lits, matched};
use suggestkit::{Error, Parser, fork, literal, optional, sequence, whitespace, word};
use test_case::test_case;

#[test]
fn test_fork_spreads_results() {
    let parser = || fork(lits(&["foo", "bar", "baz"])).build().unwrap();

    assert_eq!(count(parser(), "foo"), 1);
    assert_eq!(matched(parser(), "ba"), ["bar", "baz"]);
    assert_eq!(count(parser(), "x"), 0);
}

#[test]
fn test_sequence_multiplies_alternatives() {
    let parser = sequence([
        fork(lits(&["a", "b"])).build().unwrap(),
        fork(lits(&["c", "d"])).build().unwrap(),
    ])
    .build()
    .unwrap();

    assert_eq!(matched(parser, ""), ["ac", "ad", "bc", "bd"]);
}

#[test]
fn test_sequence_stops_when_a_child_fails() {
    let parser = sequence([lit("foo"), lit("bar")]).build().unwrap();
    assert_eq!(count(parser, "foobaz"), 0);
}

#[test]
fn test_combinators_require_children() {
    assert_eq!(
        sequence::<()>([]).build().unwrap_err(),
        Error::MissingChildren { combinator: "sequence" }
    );
    assert_eq!(
        fork::<()>([]).build().unwrap_err(),
        Error::MissingChildren { combinator: "fork" }
    );
    assert!(matches!(
        optional::<()>(lit("a")).child(lit("b")).build(),
        Err(Error::ChildCount { combinator: "optional", .. })
    ));
}

fn optional_middle() -> Parser<()> {
    sequence([
        lit("foo"),
        optional(lit("bar")).build().unwrap(),
        lit("baz"),
    ])
    .build()
    .unwrap()
}

#[test_case("foo"; "first complete")]
#[test_case("fo"; "first partial")]
#[test_case("fooba"; "ambiguous tail")]
fn test_optional_allows_skipping(input: &str) {
    assert_eq!(matched(optional_middle(), input), ["foobaz", "foobarbaz"]);
}

#[test]
fn test_optional_takes_child_when_typed() {
    assert_eq!(matched(optional_middle(), "foobarb"), ["foobarbaz"]);
}

#[test]
fn test_whitespace_consumes_run() {
    let parser = || {
        sequence([lit("foo"), whitespace().build().unwrap(), lit("bar")])
            .build()
            .unwrap()
    };

    assert_eq!(count(parser(), "foo \t bar"), 1);
    assert_eq!(count(parser(), "foobar"), 0);
}

#[test]
fn test_whitespace_emits_matched_run() {
    let parser = whitespace::<String>().on_emit(|run, _| Some(run)).build().unwrap();
    let results = common::results(parser, "  ");

    assert_eq!(results[0].data(), "  ");
}

#[test]
fn test_disabled_parser_is_skipped() {
    let parser = || {
        sequence([
            word("foo").build().unwrap(),
            word("bar").enabled(false).build().unwrap(),
            word("baz").build().unwrap(),
        ])
        .build()
        .unwrap()
    };

    assert_eq!(count(parser(), "foo bar baz"), 0);
    assert_eq!(count(parser(), "foo baz"), 1);
}

#[test]
fn test_enabled_predicate_sees_options() {
    let parser = || {
        sequence([
            word("foo").build().unwrap(),
            word("bar")
                .enabled_when(|word| word.text() != Some("bar"))
                .build()
                .unwrap(),
            word("baz").build().unwrap(),
        ])
        .build()
        .unwrap()
    };

    assert_eq!(count(parser(), "foo bar baz"), 0);
    assert_eq!(count(parser(), "foo baz"), 1);
}

#[test]
fn test_requires_input_finishes_branch() {
    let parser = sequence([
        lit("foo"),
        literal("bar").requires_input(true).build().unwrap(),
    ])
    .build()
    .unwrap();

    assert_eq!(matched(parser, "foo"), ["foo"]);
}
