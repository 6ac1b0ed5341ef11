//! Shared helpers for the integration tests.
#![allow(dead_code)]

use suggestkit::{Grammar, ParseOptions, ParseResult, Parser, literal};

pub fn lit<D: 'static>(text: &str) -> Parser<D> {
    literal(text).build().expect("valid literal")
}

pub fn lits<D: 'static>(texts: &[&str]) -> Vec<Parser<D>> {
    texts.iter().map(|text| lit(text)).collect()
}

pub fn results_with<D>(parser: Parser<D>, input: &str, options: ParseOptions) -> Vec<ParseResult<D>>
where
    D: Default + Clone + 'static,
{
    Grammar::new(parser).parse_all(input, options).expect("parse failed")
}

pub fn results<D>(parser: Parser<D>, input: &str) -> Vec<ParseResult<D>>
where
    D: Default + Clone + 'static,
{
    results_with(parser, input, ParseOptions::default())
}

pub fn count(parser: Parser<()>, input: &str) -> usize {
    results(parser, input).len()
}

pub fn partial_count(parser: Parser<()>, input: &str) -> usize {
    results_with(parser, input, ParseOptions::new().allow_partial()).len()
}

pub fn matched(parser: Parser<()>, input: &str) -> Vec<String> {
    results(parser, input).iter().map(ParseResult::matched_input).collect()
}
