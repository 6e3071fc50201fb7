//! Placeholder tokens standing in for interpolations while parsing.
//!
//! A template's fragments are joined into one text with a token between
//! each pair: `emjay_substitution<index>`. The index is zero-padded to
//! the width of the template's largest index, so a token is always the
//! prefix plus a fixed number of digits and digits written right after
//! an interpolation (`${n}5`) never merge into its index.
//!
//! Authored text must not contain the prefix itself.

use std::fmt::Write as _;
use std::ops::Range;

use memchr::memmem;

/// Reserved token prefix.
pub const PREFIX: &str = "emjay_substitution";

/// Token grammar for one template: how many slots it has and how many
/// digits each index is written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholders {
    slots: usize,
    width: usize,
}

/// One token found in a text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Interpolation index named by the token.
    pub index: usize,
    /// Byte range of the whole token in the scanned text.
    pub range: Range<usize>,
}

impl Placeholders {
    pub fn new(slots: usize) -> Self {
        let mut width = 1;
        let mut largest = slots.saturating_sub(1);
        while largest >= 10 {
            largest /= 10;
            width += 1;
        }
        Placeholders { slots, width }
    }

    /// Grammar for a template with these fragments (one slot per gap).
    pub fn for_fragments(fragments: &[&str]) -> Self {
        Placeholders::new(fragments.len().saturating_sub(1))
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// The token for `index`.
    pub fn token(&self, index: usize) -> String {
        let mut token = String::with_capacity(PREFIX.len() + self.width);
        self.write_token(&mut token, index);
        token
    }

    fn write_token(&self, out: &mut String, index: usize) {
        let _ = write!(out, "{PREFIX}{index:0width$}", width = self.width);
    }

    /// Join fragments into one text, a token in each gap.
    pub fn encode(&self, fragments: &[&str]) -> String {
        let Some((last, leading)) = fragments.split_last() else {
            return String::new();
        };

        let capacity = fragments.iter().map(|f| f.len()).sum::<usize>()
            + leading.len() * (PREFIX.len() + self.width);
        let mut text = String::with_capacity(capacity);
        for (index, fragment) in leading.iter().enumerate() {
            text.push_str(fragment);
            self.write_token(&mut text, index);
        }
        text.push_str(last);
        text
    }

    /// Index named by `text` when the whole of it is one token.
    pub fn parse(&self, text: &str) -> Option<usize> {
        let digits = text.strip_prefix(PREFIX)?;
        if digits.len() != self.width {
            return None;
        }
        self.read_index(digits)
    }

    /// Every token in `text`, left to right.
    pub fn find_iter<'t>(&self, text: &'t str) -> impl Iterator<Item = Token> + 't {
        let grammar = *self;
        memmem::find_iter(text.as_bytes(), PREFIX.as_bytes()).filter_map(move |start| {
            let digits_start = start + PREFIX.len();
            let end = digits_start + grammar.width;
            let index = grammar.read_index(text.get(digits_start..end)?)?;
            Some(Token {
                index,
                range: start..end,
            })
        })
    }

    /// Whether `text` contains at least one token.
    pub fn contains(&self, text: &str) -> bool {
        self.find_iter(text).next().is_some()
    }

    /// Decode exactly `width` digits naming an index below the slot count.
    fn read_index(&self, digits: &str) -> Option<usize> {
        if digits.len() != self.width || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().filter(|&index| index < self.slots)
    }
}
