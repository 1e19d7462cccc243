//! Annotate runs of Chinese text with pinyin readings, colored by tone.
//!
//! The core is a stateless pipeline over a windowed text range: scan the
//! window for Chinese characters, romanize each one, derive the
//! diacritic-marked reading and the tone color, and emit one non-overlapping,
//! position-addressed [`Annotation`] per character. The host owns the buffer,
//! the window bounds, and the color configuration; it calls
//! [`annotate_range`] whenever either changes. Two calls with identical
//! inputs produce identical output, and nothing here ever returns an error —
//! unknown or malformed readings degrade to a neutral, unmarked annotation.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub mod render;
pub mod romanizer;
pub mod scan;
pub mod tone;

use crate::romanizer::Romanizer;
use crate::scan::scan_range;

// CJK Unified Ideographs
pub(crate) const CJK_RANGE: RangeInclusive<u32> = 0x4e00..=0x9fff;

/// True iff `ch` lies in the CJK Unified Ideographs block.
#[must_use]
pub fn is_chinese_char(ch: char) -> bool {
    CJK_RANGE.contains(&(ch as u32))
}

/// Tone-to-color settings, one entry per tone class.
///
/// Values are plain user-editable color strings (CSS names or hex); nothing
/// here validates them — invalid values pass through opaquely to the
/// renderer. Every field carries a serde default so a partial config file
/// merges against the documented defaults before the core ever sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneColors {
    /// First tone (high level).
    pub tone1: String,
    /// Second tone (rising).
    pub tone2: String,
    /// Third tone (dipping).
    pub tone3: String,
    /// Fourth tone (falling).
    pub tone4: String,
    /// Neutral tone, and the fallback for anything unrecognized.
    pub tone0: String,
}

impl Default for ToneColors {
    fn default() -> Self {
        Self {
            tone1: "blue".to_owned(),
            tone2: "green".to_owned(),
            tone3: "black".to_owned(),
            tone4: "red".to_owned(),
            tone0: "gray".to_owned(),
        }
    }
}

impl ToneColors {
    /// The color for a tone class. Tones outside `1..=4` (including the
    /// literal neutral `0`) resolve to `tone0`. Never fails.
    #[must_use]
    pub fn color_for(&self, tone: u8) -> &str {
        match tone {
            1 => &self.tone1,
            2 => &self.tone2,
            3 => &self.tone3,
            4 => &self.tone4,
            _ => &self.tone0,
        }
    }
}

/// One per-character display instruction: color the source span and offer
/// the diacritic-marked reading as a hover tooltip.
///
/// Offsets are half-open UTF-16 code units; a character above U+FFFF spans
/// two units. Within one [`annotate_range`] pass, spans are strictly
/// increasing and never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub color: String,
    pub tooltip: String,
}

/// Compute the annotations for the window `[from, to)` of `text`.
///
/// Characters outside the romanizer's ranges produce nothing. Characters the
/// romanizer does not know produce a neutral-colored annotation with an
/// empty tooltip. The pass is pure: no state survives between calls.
#[must_use]
pub fn annotate_range(
    text: &str,
    from: usize,
    to: usize,
    romanizer: &dyn Romanizer,
    colors: &ToneColors,
) -> Vec<Annotation> {
    let ranges = romanizer.ranges();
    let mut annotations = Vec::new();

    for scanned in scan_range(text, from, to) {
        if !ranges.iter().any(|r| r.contains(&(scanned.ch as u32))) {
            continue;
        }

        let annotation = match romanizer.romanize(scanned.ch) {
            Some(romanization) => {
                let syllable = tone::parse(&romanization);
                let marked = tone::add_tone_mark(&syllable.base, syllable.tone);
                Annotation {
                    start: scanned.offset,
                    end: scanned.offset + scanned.width,
                    color: colors.color_for(syllable.tone).to_owned(),
                    tooltip: marked,
                }
            }
            None => Annotation {
                start: scanned.offset,
                end: scanned.offset + scanned.width,
                color: colors.tone0.clone(),
                tooltip: String::new(),
            },
        };

        annotations.push(annotation);
    }

    annotations
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// A fixed table standing in for the real lookup, so tests stay
    /// deterministic and independent of the `mandarin` feature.
    struct FixedRomanizer;

    const FIXED_RANGES: &[RangeInclusive<u32>] = &[CJK_RANGE];

    impl Romanizer for FixedRomanizer {
        fn romanize(&self, ch: char) -> Option<String> {
            match ch {
                '中' => Some("zhong1".to_owned()),
                '文' => Some("wen2".to_owned()),
                '好' => Some("hao3".to_owned()),
                '是' => Some("shi4".to_owned()),
                '吗' => Some("ma0".to_owned()),
                _ => None,
            }
        }

        fn ranges(&self) -> &[RangeInclusive<u32>] {
            FIXED_RANGES
        }
    }

    fn full_range(text: &str) -> (usize, usize) {
        (0, text.encode_utf16().count())
    }

    #[test]
    fn chinese_block_membership() {
        assert!(is_chinese_char('中'));
        assert!(is_chinese_char('\u{4e00}'));
        assert!(is_chinese_char('\u{9fff}'));
        assert!(!is_chinese_char('\u{4dff}'));
        assert!(!is_chinese_char('\u{a000}'));
        assert!(!is_chinese_char('a'));
        assert!(!is_chinese_char('。'));
    }

    #[test]
    fn default_colors_match_documentation() {
        let colors = ToneColors::default();
        assert_eq!(colors.color_for(1), "blue");
        assert_eq!(colors.color_for(2), "green");
        assert_eq!(colors.color_for(3), "black");
        assert_eq!(colors.color_for(4), "red");
        assert_eq!(colors.color_for(0), "gray");
        assert_eq!(colors.color_for(7), "gray");
    }

    #[test]
    fn partial_config_merges_against_defaults() {
        let colors: ToneColors = serde_json::from_str(r##"{"tone1": "#0000ff"}"##).unwrap();
        assert_eq!(colors.tone1, "#0000ff");
        assert_eq!(colors.tone2, "green");
        assert_eq!(colors.tone0, "gray");
    }

    #[test]
    fn mixed_text_annotates_only_chinese() {
        let text = "I love 中文";
        let (from, to) = full_range(text);
        let annotations = annotate_range(text, from, to, &FixedRomanizer, &ToneColors::default());

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].start, 7);
        assert_eq!(annotations[0].end, 8);
        assert_eq!(annotations[0].color, "blue");
        assert_eq!(annotations[0].tooltip, "zhōng");
        assert_eq!(annotations[1].start, 8);
        assert_eq!(annotations[1].end, 9);
        assert_eq!(annotations[1].color, "green");
        assert_eq!(annotations[1].tooltip, "wén");
    }

    #[test]
    fn tone_colors_round_trip_through_the_pipeline() {
        let colors = ToneColors::default();
        let text = "中文好是吗";
        let (from, to) = full_range(text);
        let annotations = annotate_range(text, from, to, &FixedRomanizer, &colors);

        let got: Vec<&str> = annotations.iter().map(|a| a.color.as_str()).collect();
        assert_eq!(got, vec!["blue", "green", "black", "red", "gray"]);
        // The neutral syllable stays unmarked in the tooltip.
        assert_eq!(annotations[4].tooltip, "ma");
    }

    #[test]
    fn unknown_chinese_character_degrades_to_neutral() {
        // In the CJK block but absent from the fixed table.
        let text = "鑫";
        let (from, to) = full_range(text);
        let annotations = annotate_range(text, from, to, &FixedRomanizer, &ToneColors::default());

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].color, "gray");
        assert_eq!(annotations[0].tooltip, "");
    }

    #[test]
    fn spans_are_strictly_increasing_and_disjoint() {
        let text = "好中a文b好 中文";
        let (from, to) = full_range(text);
        let annotations = annotate_range(text, from, to, &FixedRomanizer, &ToneColors::default());

        assert!(!annotations.is_empty());
        for pair in annotations.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end <= pair[1].start);
        }
        for a in &annotations {
            assert!(a.start < a.end);
        }
    }

    #[test]
    fn supplementary_characters_shift_following_spans() {
        // U+1D11E takes two UTF-16 units, so 中 starts at offset 3.
        let text = "a\u{1D11E}中";
        let (from, to) = full_range(text);
        let annotations = annotate_range(text, from, to, &FixedRomanizer, &ToneColors::default());

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].start, 3);
        assert_eq!(annotations[0].end, 4);
    }

    #[test]
    fn window_bounds_the_output() {
        let text = "中文好";
        let annotations = annotate_range(text, 1, 2, &FixedRomanizer, &ToneColors::default());

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].tooltip, "wén");
    }

    #[test]
    fn identical_inputs_produce_identical_output() {
        let text = "你好 中文 hello 好";
        let colors = ToneColors::default();
        let (from, to) = full_range(text);

        let first = annotate_range(text, from, to, &FixedRomanizer, &colors);
        let second = annotate_range(text, from, to, &FixedRomanizer, &colors);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_and_empty_window() {
        let colors = ToneColors::default();
        assert_eq!(annotate_range("", 0, 0, &FixedRomanizer, &colors), vec![]);
        assert_eq!(annotate_range("中文", 1, 1, &FixedRomanizer, &colors), vec![]);
    }
}
