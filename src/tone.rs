//! Numeric-toned romanization parsing and diacritic placement.
//!
//! A romanization arrives as `<letters><optional tone digit>` ("hao3"). We
//! split off the tone and rewrite the bare syllable with the conventional
//! diacritic (tone 1 = macron, 2 = acute, 3 = caron, 4 = grave) on the vowel
//! that canonically carries the mark. Nothing in here fails: malformed input
//! degrades to a neutral, unmarked rendering.

/// A romanization split into its bare syllable and tone class (0 = neutral).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSyllable {
    pub base: String,
    pub tone: u8,
}

/// Letters a syllable may contain: ASCII letters plus the umlaut u.
fn is_syllable_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == 'ü' || ch == 'Ü'
}

/// Split a numeric-toned romanization into base syllable and tone.
///
/// The input must be entirely syllable letters optionally followed by a
/// single digit `0`–`4`; the digit, when present, is the tone (a literal `0`
/// means neutral). Anything else is treated as an already-bare syllable with
/// neutral tone — the whole input becomes `base`, unmodified.
pub fn parse(romanization: &str) -> ParsedSyllable {
    if let Some(digit @ b'0'..=b'4') = romanization.as_bytes().last().copied() {
        let base = &romanization[..romanization.len() - 1];
        if !base.is_empty() && base.chars().all(is_syllable_letter) {
            return ParsedSyllable {
                base: base.to_owned(),
                tone: digit - b'0',
            };
        }
    }

    ParsedSyllable {
        base: romanization.to_owned(),
        tone: 0,
    }
}

/// Vowels that carry the mark outright, in priority order. The first one
/// present anywhere in the syllable wins.
const PREFERRED_VOWELS: [char; 6] = ['a', 'A', 'o', 'O', 'e', 'E'];

/// Rewrite `base` with the tone diacritic on the canonical vowel.
///
/// Tones outside `1..=4` return `base` unchanged. Mark placement: the first
/// of `a A o O e E` found in the syllable; failing that, the *rightmost* of
/// `i I u U ü Ü`, so diphthongs like "iu" and "ui" mark their second vowel
/// ("liú", "guì"). A syllable with no eligible vowel comes back unmarked.
pub fn add_tone_mark(base: &str, tone: u8) -> String {
    if !(1..=4).contains(&tone) {
        return base.to_owned();
    }

    let target = PREFERRED_VOWELS
        .iter()
        .find_map(|&vowel| base.find(vowel).map(|at| (at, vowel)))
        .or_else(|| {
            base.char_indices()
                .rev()
                .find(|&(_, ch)| matches!(ch, 'i' | 'I' | 'u' | 'U' | 'ü' | 'Ü'))
        });

    let Some((at, vowel)) = target else {
        return base.to_owned();
    };
    let Some(marked) = toned_vowel(vowel, tone) else {
        return base.to_owned();
    };

    let mut out = String::with_capacity(base.len() + 2);
    out.push_str(&base[..at]);
    out.push(marked);
    out.push_str(&base[at + vowel.len_utf8()..]);
    out
}

/// The fixed diacritic table: each markable vowel has exactly four toned
/// forms, indexed by tone 1–4.
fn toned_vowel(vowel: char, tone: u8) -> Option<char> {
    let variants = match vowel {
        'a' => ['ā', 'á', 'ǎ', 'à'],
        'A' => ['Ā', 'Á', 'Ǎ', 'À'],
        'e' => ['ē', 'é', 'ě', 'è'],
        'E' => ['Ē', 'É', 'Ě', 'È'],
        'i' => ['ī', 'í', 'ǐ', 'ì'],
        'I' => ['Ī', 'Í', 'Ǐ', 'Ì'],
        'o' => ['ō', 'ó', 'ǒ', 'ò'],
        'O' => ['Ō', 'Ó', 'Ǒ', 'Ò'],
        'u' => ['ū', 'ú', 'ǔ', 'ù'],
        'U' => ['Ū', 'Ú', 'Ǔ', 'Ù'],
        'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
        'Ü' => ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ'],
        _ => return None,
    };

    match tone {
        1..=4 => Some(variants[usize::from(tone) - 1]),
        _ => None,
    }
}
