//! Glued repetition.

mod common;

use common::{count, lit, lits, matched, results};
use suggestkit::{Error, MAX_REPEATS, Match, MatchKind, Parser, fork, literal, repeat};

fn fruits() -> Parser<()> {
    repeat(fork(lits(&["foo", "bar", "baz"])).build().unwrap())
        .glue(" and ")
        .build()
        .unwrap()
}

#[test]
fn test_rejects_bad_configuration() {
    assert!(matches!(
        repeat::<()>(lit("foo")).child(lit("foo")).glue(" and ").build(),
        Err(Error::ChildCount { combinator: "repeat", .. })
    ));
    assert_eq!(
        repeat::<()>(lit("foo")).glue(" and ").limit(10).build().unwrap_err(),
        Error::RepeatLimitTooLarge {
            limit: 10,
            max: MAX_REPEATS
        }
    );
    assert_eq!(repeat::<()>(lit("foo")).build().unwrap_err(), Error::EmptyGlue);
    assert_eq!(
        repeat::<()>(lit("foo")).glue_any([" and ", ""]).build().unwrap_err(),
        Error::EmptyGlue
    );
    assert!(repeat::<()>(lit("foo")).glue(" and ").limit(4).build().is_ok());
}

#[test]
fn test_suggests_subject_only_until_matched() {
    assert_eq!(matched(fruits(), "fo"), ["foo"]);
}

#[test]
fn test_suggests_glue_after_subject() {
    assert_eq!(matched(fruits(), "foo"), ["foo", "foo and "]);
}

#[test]
fn test_suggests_next_subject_after_glue() {
    assert_eq!(
        matched(fruits(), "foo and "),
        ["foo and foo", "foo and bar", "foo and baz"]
    );
}

#[test]
fn test_partial_glue() {
    assert_eq!(matched(fruits(), "foo an"), ["foo and "]);
}

#[test]
fn test_respects_limit() {
    let limited = || repeat(lit("foo")).glue(" and ").limit(2).build().unwrap();

    assert_eq!(count(limited(), "foo and foo"), 1);
    assert_eq!(count(limited(), "foo and foo and foo"), 0);
}

#[test]
fn test_custom_glue() {
    let parser = || repeat(lit("foo")).glue(" & ").build().unwrap();

    assert_eq!(count(parser(), "foo and foo"), 0);
    assert_eq!(matched(parser(), "foo & foo"), ["foo & foo", "foo & foo & "]);
}

#[test]
fn test_any_of_several_glues() {
    let parser = || repeat(lit("foo")).glue_any([", ", " or "]).build().unwrap();

    assert_eq!(
        matched(parser(), "foo, foo or foo"),
        ["foo, foo or foo", "foo, foo or foo, ", "foo, foo or foo or "]
    );
    assert_eq!(matched(parser(), "foo"), ["foo", "foo, ", "foo or "]);
}

#[test]
fn test_placeholder_after_fuzzy_input() {
    let lorem = || literal::<()>("lorem").fuzzy(true).build().unwrap();

    let found = results(repeat(lorem()).glue(" and ").build().unwrap(), "lrem");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].matched(), "lorem");
    assert_eq!(found[1].all_parts().last(), Some(&Match::placeholder(" and ")));

    let named = results(
        repeat(lorem()).glue(" and ").repetition_placeholder("more").build().unwrap(),
        "lrem",
    );
    assert_eq!(named[1].all_parts().last().map(|part| part.kind), Some(MatchKind::Placeholder));
    assert_eq!(named[1].matched(), "loremmore");
}

#[test]
fn test_typed_input_keeps_glue_suggestion() {
    let parser: Parser<()> = repeat(lit("foo")).glue(" and ").repetition_placeholder("more").build().unwrap();
    let found = results(parser, "foo");

    assert_eq!(found[1].all_parts().last(), Some(&Match::suggestion(" and ")));
}
