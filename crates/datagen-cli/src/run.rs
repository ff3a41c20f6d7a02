//! Builds the requested generator and prints its values.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDate;
use datagen_core::clock::SystemClock;
use datagen_core::config::SeedConfig;
use datagen_core::context::{with_seed, with_source};
use datagen_core::{Range, Seed};
use datagen_generators::Generator;
use datagen_generators::charset::CharacterSetGenerator;
use datagen_generators::factory;
use serde::Serialize;

use crate::args::{Args, Kind};
use crate::error::CliError;

/// Prints `args.count` values of `args.kind` to `out` as JSON lines.
///
/// Returns the seed the run used, so the caller can report it.
///
/// # Errors
///
/// Returns `CliError` if a bound does not parse, the bounds are inverted, or
/// writing fails.
pub fn run(args: &Args, out: &mut dyn Write) -> Result<Seed, CliError> {
    let seed = SeedConfig {
        root_seed: args.seed,
    }
    .resolve_root(&SystemClock);
    tracing::info!(seed, kind = ?args.kind, count = args.count, "generating values");
    with_seed(seed, || generate(args, out))?;
    Ok(seed)
}

fn generate(args: &Args, out: &mut dyn Write) -> Result<(), CliError> {
    let count = args.count;
    match args.kind {
        Kind::Int => emit(
            factory::integers_in(bounds(args, i32::MIN, i32::MAX)?),
            count,
            out,
        ),
        Kind::Long => emit(
            factory::longs_in(bounds(args, i64::MIN, i64::MAX)?),
            count,
            out,
        ),
        Kind::Double => {
            let range = bounds(args, f64::MIN, f64::MAX)?;
            match args.scale {
                Some(scale) => emit(factory::doubles_scaled(range, scale), count, out),
                None => emit(factory::doubles_in(range), count, out),
            }
        }
        Kind::Bool => emit(factory::booleans(), count, out),
        Kind::String => {
            let length = Range::closed(args.min_len, args.max_len)?;
            let words = factory::strings(CharacterSetGenerator::ascii_alphanumeric(), length)?;
            emit(words, count, out)
        }
        Kind::Date => {
            let envelope = factory::date_envelope();
            let range = bounds::<NaiveDate>(args, envelope.lower_bound(), envelope.upper_bound())?;
            emit(factory::dates_in(range), count, out)
        }
        Kind::Uuid => emit(factory::uuids(), count, out),
    }
}

/// Writes each value as soon as it is drawn, so memory stays flat however
/// large `count` is.
fn emit<G>(generator: G, count: usize, out: &mut dyn Write) -> Result<(), CliError>
where
    G: Generator,
    G::Output: Serialize,
{
    with_source(|source| -> Result<(), CliError> {
        for _ in 0..count {
            let value = generator.generate(source)?;
            serde_json::to_writer(&mut *out, &value)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    })
}

fn bounds<T>(args: &Args, lower: T, upper: T) -> Result<Range<T>, CliError>
where
    T: FromStr + PartialOrd + Copy,
    T::Err: fmt::Display,
{
    let lower = parse_bound("min", args.min.as_deref(), lower)?;
    let upper = parse_bound("max", args.max.as_deref(), upper)?;
    Ok(Range::closed(lower, upper)?)
}

fn parse_bound<T>(flag: &'static str, raw: Option<&str>, default: T) -> Result<T, CliError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(value) = raw else {
        return Ok(default);
    };
    value.trim().parse().map_err(|e: T::Err| CliError::InvalidBound {
        flag,
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use clap::Parser;
    use datagen_core::GenerationError;
    use datagen_generators::from_fn;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["datagen"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn lines(args: &Args) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        run(args, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    // --- reproducibility ---

    #[test]
    fn test_same_seed_prints_same_values() {
        let run_args = args(&["--seed", "42", "--kind", "long", "--count", "8"]);
        assert_eq!(lines(&run_args), lines(&run_args));
    }

    #[test]
    fn test_returns_the_seed_used() {
        let mut out = Vec::new();
        assert_eq!(run(&args(&["--seed", "-3", "--count", "0"]), &mut out).unwrap(), -3);
        assert!(out.is_empty());
    }

    // --- kinds ---

    #[test]
    fn test_integers_respect_bounds() {
        let values = lines(&args(&[
            "--seed", "1", "--kind", "int", "--min", "-5", "--max", "5", "--count", "200",
        ]));
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (-5..=5).contains(&v.as_i64().unwrap())));
    }

    #[test]
    fn test_scaled_doubles() {
        let values = lines(&args(&[
            "--seed", "2", "--kind", "double", "--min", "0", "--max", "10", "--scale", "1",
        ]));
        for value in values {
            let d = value.as_f64().unwrap();
            assert!((0.0..=10.0).contains(&d));
            assert!((d * 10.0 - (d * 10.0).round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_strings_use_length_bounds() {
        let values = lines(&args(&[
            "--seed", "3", "--kind", "string", "--min-len", "2", "--max-len", "4",
        ]));
        for value in values {
            let word = value.as_str().unwrap();
            assert!((2..=4).contains(&word.len()));
            assert!(word.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_dates_print_iso_format() {
        let values = lines(&args(&[
            "--seed", "4", "--kind", "date", "--min", "2024-02-29", "--max", "2024-02-29",
            "--count", "2",
        ]));
        assert_eq!(values, vec![serde_json::json!("2024-02-29"); 2]);
    }

    #[test]
    fn test_bools_and_uuids() {
        let bools = lines(&args(&["--seed", "5", "--kind", "bool"]));
        assert!(bools.iter().all(serde_json::Value::is_boolean));
        for value in lines(&args(&["--seed", "5", "--kind", "uuid", "--count", "3"])) {
            assert_eq!(value.as_str().unwrap().len(), 36);
        }
    }

    // --- output ---

    #[test]
    fn test_values_are_written_before_a_later_failure() {
        let drawn = Cell::new(0);
        let failing_third = from_fn(|_| {
            drawn.set(drawn.get() + 1);
            if drawn.get() == 3 {
                Err(GenerationError::invalid("third value"))
            } else {
                Ok(drawn.get())
            }
        });
        let mut out = Vec::new();
        let err = emit(failing_third, 5, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Generation(_)));
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
        assert_eq!(drawn.get(), 3);
    }

    // --- errors ---

    #[test]
    fn test_unparseable_bound() {
        let mut out = Vec::new();
        let err = run(&args(&["--seed", "1", "--min", "ten"]), &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidBound { flag: "min", .. }));
    }

    #[test]
    fn test_inverted_bounds() {
        let mut out = Vec::new();
        let err = run(&args(&["--seed", "1", "--min", "9", "--max", "1"]), &mut out).unwrap_err();
        assert!(matches!(
            err,
            CliError::Generation(GenerationError::InvalidArgument(_))
        ));
    }
}
