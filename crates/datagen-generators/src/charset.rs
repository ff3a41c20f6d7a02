//! Character filters and the palettes built from them.

use datagen_core::{GenerationError, RandomBitSource, RandomValues, Range};
use regex::Regex;
use regex_syntax::hir::{Hir, Look};

use crate::generator::Generator;

/// Highest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Decides whether a code point belongs in a palette.
pub trait CharacterFilter {
    /// Whether `code_point` is accepted.
    fn include_character(&self, code_point: u32) -> bool;

    /// Accepts what both filters accept.
    fn and<F: CharacterFilter>(self, other: F) -> And<Self, F>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Accepts what either filter accepts.
    fn or<F: CharacterFilter>(self, other: F) -> Or<Self, F>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Accepts what this filter rejects.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<F: CharacterFilter + ?Sized> CharacterFilter for &F {
    fn include_character(&self, code_point: u32) -> bool {
        (**self).include_character(code_point)
    }
}

impl<F: CharacterFilter + ?Sized> CharacterFilter for Box<F> {
    fn include_character(&self, code_point: u32) -> bool {
        (**self).include_character(code_point)
    }
}

/// Accepts every code point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl CharacterFilter for AcceptAll {
    fn include_character(&self, _code_point: u32) -> bool {
        true
    }
}

/// Accepts alphabetic and numeric characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LettersAndDigits;

impl CharacterFilter for LettersAndDigits {
    fn include_character(&self, code_point: u32) -> bool {
        char::from_u32(code_point).is_some_and(char::is_alphanumeric)
    }
}

/// Accepts alphabetic characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Letters;

impl CharacterFilter for Letters {
    fn include_character(&self, code_point: u32) -> bool {
        char::from_u32(code_point).is_some_and(char::is_alphabetic)
    }
}

/// Accepts everything except one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excluding(pub char);

impl CharacterFilter for Excluding {
    fn include_character(&self, code_point: u32) -> bool {
        code_point != u32::from(self.0)
    }
}

/// Accepts a code point when the character on its own fully matches a
/// regular expression.
#[derive(Debug, Clone)]
pub struct MatchingPattern {
    regex: Regex,
}

impl MatchingPattern {
    /// Compiles `pattern` and anchors it to match a whole single character.
    ///
    /// The pattern is validated on its own, then anchored on its parsed form,
    /// so its text never has to be spliced into a larger expression.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `pattern` is malformed.
    pub fn new(pattern: &str) -> Result<Self, GenerationError> {
        Regex::new(pattern).map_err(invalid_pattern)?;
        let parsed = regex_syntax::Parser::new()
            .parse(pattern)
            .map_err(invalid_pattern)?;
        let anchored = Hir::concat(vec![Hir::look(Look::Start), parsed, Hir::look(Look::End)]);
        let regex = Regex::new(&anchored.to_string()).map_err(invalid_pattern)?;
        Ok(Self { regex })
    }
}

fn invalid_pattern(e: impl std::fmt::Display) -> GenerationError {
    GenerationError::invalid(format!("invalid character pattern: {e}"))
}

impl CharacterFilter for MatchingPattern {
    fn include_character(&self, code_point: u32) -> bool {
        let Some(c) = char::from_u32(code_point) else {
            return false;
        };
        let mut buf = [0u8; 4];
        self.regex.is_match(c.encode_utf8(&mut buf))
    }
}

/// Filter returned by [`CharacterFilter::and`].
#[derive(Debug, Clone)]
pub struct And<A, B>(A, B);

impl<A: CharacterFilter, B: CharacterFilter> CharacterFilter for And<A, B> {
    fn include_character(&self, code_point: u32) -> bool {
        self.0.include_character(code_point) && self.1.include_character(code_point)
    }
}

/// Filter returned by [`CharacterFilter::or`].
#[derive(Debug, Clone)]
pub struct Or<A, B>(A, B);

impl<A: CharacterFilter, B: CharacterFilter> CharacterFilter for Or<A, B> {
    fn include_character(&self, code_point: u32) -> bool {
        self.0.include_character(code_point) || self.1.include_character(code_point)
    }
}

/// Filter returned by [`CharacterFilter::not`].
#[derive(Debug, Clone)]
pub struct Not<A>(A);

impl<A: CharacterFilter> CharacterFilter for Not<A> {
    fn include_character(&self, code_point: u32) -> bool {
        !self.0.include_character(code_point)
    }
}

/// An ordered palette of characters selected by a filter.
///
/// Ranges are scanned in the order given, each in ascending order. Overlapping
/// ranges are not merged, so they contribute duplicates. Code points that are
/// not Unicode scalar values are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSetGenerator {
    charset: Vec<char>,
}

impl CharacterSetGenerator {
    /// Scans `ranges` and keeps the code points `filter` accepts.
    pub fn new<F: CharacterFilter + ?Sized>(filter: &F, ranges: &[Range<u32>]) -> Self {
        let mut charset = Vec::new();
        for range in ranges {
            if range.lower_bound() > MAX_CODE_POINT {
                continue;
            }
            let upper = range.upper_bound().min(MAX_CODE_POINT);
            charset.extend(
                (range.lower_bound()..=upper)
                    .filter(|&code_point| filter.include_character(code_point))
                    .filter_map(char::from_u32),
            );
        }
        Self { charset }
    }

    /// ASCII letters and digits.
    #[must_use]
    pub fn ascii_alphanumeric() -> Self {
        Self::new(&LettersAndDigits, &[Range::spanning(0, 0x7F)])
    }

    /// ASCII letters.
    #[must_use]
    pub fn ascii_letters() -> Self {
        Self::new(&Letters, &[Range::spanning(0, 0x7F)])
    }

    /// A copy of the palette.
    #[must_use]
    pub fn charset(&self) -> Vec<char> {
        self.charset.clone()
    }

    /// Number of palette entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.charset.len()
    }

    /// Whether no code point passed the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charset.is_empty()
    }

    /// Whether `c` is in the palette.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.charset.contains(&c)
    }

    /// A uniformly chosen palette character.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if the palette is empty.
    pub fn random_char(&self, source: &mut dyn RandomBitSource) -> Result<char, GenerationError> {
        if self.charset.is_empty() {
            return Err(GenerationError::invalid("character set is empty"));
        }
        source.choose(&self.charset).copied()
    }
}

impl Generator for CharacterSetGenerator {
    type Output = char;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<char, GenerationError> {
        self.random_char(source)
    }
}
