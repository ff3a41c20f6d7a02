//! Command-line arguments.

use clap::{Parser, ValueEnum};
use datagen_core::Seed;
use datagen_core::config::SEED_ENV_VAR;

/// The kind of value to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Kind {
    /// 32-bit signed integers.
    Int,
    /// 64-bit signed integers.
    Long,
    /// Finite doubles, optionally rounded with `--scale`.
    Double,
    /// Fair booleans.
    Bool,
    /// ASCII letter-and-digit strings.
    String,
    /// Calendar dates (`YYYY-MM-DD`).
    Date,
    /// Version 4 UUIDs.
    Uuid,
}

/// Prints reproducible random values, one JSON value per line.
#[derive(Debug, Parser)]
#[command(name = "datagen", version, about)]
pub struct Args {
    /// Seed driving the run; a clock-derived seed is used and logged when absent.
    #[arg(long, env = SEED_ENV_VAR, allow_hyphen_values = true)]
    pub seed: Option<Seed>,

    /// Kind of value to print.
    #[arg(long, value_enum, default_value_t = Kind::Int)]
    pub kind: Kind,

    /// Inclusive lower bound (number or `YYYY-MM-DD` date, depending on kind).
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Inclusive upper bound (number or `YYYY-MM-DD` date, depending on kind).
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Decimal digits kept for doubles.
    #[arg(long)]
    pub scale: Option<u32>,

    /// Minimum string length.
    #[arg(long, default_value_t = 15, allow_hyphen_values = true)]
    pub min_len: i32,

    /// Maximum string length.
    #[arg(long, default_value_t = 15, allow_hyphen_values = true)]
    pub max_len: i32,

    /// Number of values to print.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub count: usize,

    /// Emit logs on stderr as JSON objects instead of text.
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_full_argument_set() {
        let args = Args::try_parse_from([
            "datagen", "--seed", "-7", "--kind", "double", "--min", "-1.5", "--max", "2.5",
            "--scale", "2", "--count", "3",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(-7));
        assert_eq!(args.kind, Kind::Double);
        assert_eq!(args.min.as_deref(), Some("-1.5"));
        assert_eq!(args.max.as_deref(), Some("2.5"));
        assert_eq!(args.scale, Some(2));
        assert_eq!(args.count, 3);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["datagen", "--seed", "1"]).unwrap();
        assert_eq!(args.kind, Kind::Int);
        assert_eq!((args.min_len, args.max_len), (15, 15));
        assert_eq!(args.count, 10);
        assert!(args.min.is_none() && args.max.is_none() && args.scale.is_none());
        assert!(!args.log_json);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Args::try_parse_from(["datagen", "--kind", "matrix"]).is_err());
    }
}
