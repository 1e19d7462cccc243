use std::ops::RangeInclusive;

use ::pinyin::ToPinyin;

use super::Romanizer;
use crate::CJK_RANGE;

const RANGES: &[RangeInclusive<u32>] = &[CJK_RANGE];

/// Mandarin romanizer backed by the `pinyin` crate's lookup table.
///
/// Each character is romanized independently, one syllable per character;
/// for polyphones the table's most common reading wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MandarinRomanizer;

impl Romanizer for MandarinRomanizer {
    fn romanize(&self, ch: char) -> Option<String> {
        ch.to_pinyin().map(|p| p.with_tone_num_end().to_owned())
    }

    fn ranges(&self) -> &[RangeInclusive<u32>] {
        RANGES
    }
}
