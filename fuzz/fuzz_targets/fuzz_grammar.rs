#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use suggestkit::prelude::*;

#[derive(Debug, Arbitrary)]
struct Case {
    input: String,
    max_results: Option<u8>,
    partial: bool,
}

fn grammar() -> Result<Grammar<Vec<String>>, Error> {
    let remember = |value: String, seen: &Vec<String>| {
        let mut seen = seen.clone();
        seen.push(value);
        Some(seen)
    };

    let color = fork([
        literal("red").on_emit(remember).build()?,
        literal("green").on_emit(remember).build()?,
        literal("blue").fuzzy(true).on_emit(remember).build()?,
    ])
    .placeholder("color")
    .build()?;

    let colors = repeat(color).glue_any([", ", " and "]).limit(4).build()?;

    let parser = sequence([
        word("i").build()?,
        word("like").build()?,
        word_with(colors).build()?,
        optional(
            sequence([
                word("x").build()?,
                word_with(number().min(-5.0).max(500.0).build()?).build()?,
            ])
            .build()?,
        )
        .build()?,
        pick([
            word("today").build()?,
            word("and").build()?,
            word_with(freetext().max_length(12).on_emit(remember).build()?).build()?,
        ])
        .limit(16)
        .build()?,
    ])
    .build()?;

    Ok(Grammar::new(parser))
}

fuzz_target!(|case: Case| {
    let Ok(grammar) = grammar() else {
        return;
    };

    let mut options = ParseOptions::new().with_require_entire_input(!case.partial);
    if let Some(max) = case.max_results {
        options = options.with_max_results(usize::from(max));
    }

    for result in grammar.parse(&case.input, options).take(256) {
        let result = result.unwrap_or_else(|err| panic!("invariant broken for {:?}: {err}", case.input));
        assert!(result.score() > 0.0 && result.score() <= 1.0);
        assert!(case.input.ends_with(result.input()));

        let typed: String = result
            .all_parts()
            .iter()
            .take_while(|part| matches!(part.kind, MatchKind::Input | MatchKind::Fuzzy))
            .filter(|part| part.kind == MatchKind::Input)
            .map(|part| part.content.as_str())
            .collect();
        assert!(case.input.to_lowercase().starts_with(&typed.to_lowercase()));
    }
});
