use divan::{Bencher, black_box};
use suggestkit::prelude::*;

fn main() {
    divan::main();
}

const CITIES: &[&str] = &[
    "Amsterdam", "Athens", "Barcelona", "Berlin", "Brussels", "Budapest", "Copenhagen", "Dublin", "Helsinki",
    "Lisbon", "London", "Madrid", "Oslo", "Paris", "Prague", "Rome", "Stockholm", "Vienna", "Warsaw", "Zurich",
];

fn city() -> Parser<()> {
    let children = CITIES.iter().map(|name| literal(*name).build().unwrap());
    fork(children).placeholder("city").build().unwrap()
}

/// `from <city> to <city> for <n> people`
fn ticket() -> Grammar<()> {
    let parser = sequence([
        word("from").build().unwrap(),
        word_with(city()).build().unwrap(),
        word("to").build().unwrap(),
        word_with(city()).build().unwrap(),
        word("for").build().unwrap(),
        word_with(number().min(1.0).max(10.0).only_integer(true).build().unwrap())
            .build()
            .unwrap(),
        literal("people").build().unwrap(),
    ])
    .build()
    .unwrap();

    Grammar::new(parser)
}

#[divan::bench(args = ["", "fr", "from B", "from Berlin to ", "from Berlin to Warsaw for 2 people"])]
fn bench_ticket(bencher: Bencher, input: &str) {
    let grammar = ticket();
    let options = ParseOptions::new().allow_partial();

    bencher.bench(|| black_box(grammar.parse(input, options).count()));
}

#[divan::bench(args = [1, 5, 20])]
fn bench_first_results(bencher: Bencher, n: usize) {
    let grammar = ticket();
    let options = ParseOptions::new().with_max_results(n);

    bencher.bench(|| black_box(grammar.parse("from ", options).count()));
}

#[divan::bench(args = [2, 4, 6])]
fn bench_repeat(bencher: Bencher, limit: usize) {
    let fruit = fork(["apple", "banana", "cherry"].map(|name| literal(name).build().unwrap()))
        .build()
        .unwrap();
    let grammar = Grammar::<()>::new(repeat(fruit).glue(" and ").limit(limit).build().unwrap());

    bencher.bench(|| black_box(grammar.parse("apple and b", ParseOptions::default()).count()));
}

#[divan::bench]
fn bench_fuzzy(bencher: Bencher) {
    let children = CITIES.iter().map(|name| literal(*name).fuzzy(true).build().unwrap());
    let grammar = Grammar::<()>::new(fork(children).build().unwrap());

    bencher.bench(|| black_box(grammar.parse("ra", ParseOptions::default()).count()));
}
