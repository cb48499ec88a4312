//! Random metadata text generation.
//!
//! Produces bounded-length strings drawn from mixed Unicode ranges so that
//! generated fixtures exercise consumers with non-ASCII tag values. Results
//! are kept filesystem-safe: `/` never appears and every `\` is doubled.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Codepoint ranges characters are sampled from, inclusive on both ends.
///
/// See https://en.wikipedia.org/wiki/Unicode_block
const CHAR_RANGES: [(u32, u32); 4] = [
    (0x20, 0x7f),       // ascii
    (0x80, 0x2af),      // extended latin1
    (0x3040, 0x309f),   // hiragana
    (0x1f600, 0x1f64f), // emoticons
];

/// Generator for random tag text.
///
/// Seedable so that fixture runs can be reproduced; the default constructor
/// seeds from OS entropy.
pub struct TextGenerator {
    rng: StdRng,
}

impl TextGenerator {
    /// Create a generator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a random string of `min_len..=max_len` characters.
    ///
    /// Per character: 10% space, 40% printable ASCII, 50% a codepoint from
    /// one of the fixed ranges, the range itself picked uniformly. The
    /// assembled string is stripped of `/` and has every `\` doubled, so
    /// the result is safe to embed in paths and tag values.
    pub fn generate(&mut self, min_len: usize, max_len: usize) -> String {
        let len = self.rng.gen_range(min_len..=max_len);
        let mut out = String::with_capacity(len * 4);

        for _ in 0..len {
            match self.rng.gen_range(0..10) {
                0 => out.push(' '),
                1..=4 => out.push(self.sample_char(CHAR_RANGES[0])),
                _ => {
                    let range = CHAR_RANGES[self.rng.gen_range(0..CHAR_RANGES.len())];
                    out.push(self.sample_char(range));
                }
            }
        }

        out.replace('/', "").replace('\\', "\\\\")
    }

    fn sample_char(&mut self, (lo, hi): (u32, u32)) -> char {
        // Every configured range lies inside valid scalar-value space.
        char::from_u32(self.rng.gen_range(lo..=hi)).unwrap_or(' ')
    }
}

impl Default for TextGenerator {
    fn default() -> Self {
        Self::new()
    }
}
