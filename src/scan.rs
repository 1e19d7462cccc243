//! Windowed codepoint scanning over UTF-16 offset space.
//!
//! Annotation offsets are expressed in UTF-16 code units so the output maps
//! directly onto editor buffers that address text that way. A character above
//! U+FFFF (a surrogate pair on the wire) occupies two units; everything else
//! occupies one.

/// One scanned character: its starting offset (UTF-16 units), the character
/// itself, and the number of units it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    pub offset: usize,
    pub ch: char,
    pub width: usize,
}

/// Scan `text` for the characters contained in the half-open window
/// `[from, to)` of UTF-16 offsets.
///
/// The scan is lazy and side-effect free; calling it again with the same
/// arguments restarts from scratch. A wide character straddling `from` is
/// skipped whole, and a wide character whose two units would cross `to` is
/// not yielded at all — the scanner never reads past `to`. (The underlying
/// buffer representation would see each half of such a pair as a lone
/// surrogate, which can never be a Chinese character, so dropping the
/// straddler is observably identical downstream.)
pub fn scan_range(text: &str, from: usize, to: usize) -> CodepointScan<'_> {
    CodepointScan {
        chars: text.chars(),
        offset: 0,
        from,
        to,
    }
}

/// Iterator state for [`scan_range`].
pub struct CodepointScan<'a> {
    chars: std::str::Chars<'a>,
    offset: usize,
    from: usize,
    to: usize,
}

impl Iterator for CodepointScan<'_> {
    type Item = Scanned;

    fn next(&mut self) -> Option<Scanned> {
        loop {
            if self.offset >= self.to {
                return None;
            }

            let ch = self.chars.next()?;
            let width = ch.len_utf16();
            let offset = self.offset;
            self.offset += width;

            if offset < self.from {
                continue;
            }
            if offset + width > self.to {
                return None;
            }

            return Some(Scanned { offset, ch, width });
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn collect(text: &str, from: usize, to: usize) -> Vec<(usize, char, usize)> {
        scan_range(text, from, to)
            .map(|s| (s.offset, s.ch, s.width))
            .collect()
    }

    #[test]
    fn narrow_characters_advance_by_one() {
        assert_eq!(
            collect("abc", 0, 3),
            vec![(0, 'a', 1), (1, 'b', 1), (2, 'c', 1)]
        );
    }

    #[test]
    fn wide_character_advances_by_two() {
        // U+1D11E is above U+FFFF: two UTF-16 units.
        assert_eq!(
            collect("a\u{1D11E}b", 0, 4),
            vec![(0, 'a', 1), (1, '\u{1D11E}', 2), (3, 'b', 1)]
        );
    }

    #[test]
    fn window_excludes_outside_characters() {
        assert_eq!(collect("abcde", 1, 4), vec![(1, 'b', 1), (2, 'c', 1), (3, 'd', 1)]);
    }

    #[test]
    fn wide_character_straddling_end_is_dropped() {
        // The pair occupies offsets 1..3; a window ending at 2 splits it.
        assert_eq!(collect("a\u{1D11E}b", 0, 2), vec![(0, 'a', 1)]);
    }

    #[test]
    fn wide_character_straddling_start_is_skipped() {
        assert_eq!(collect("a\u{1D11E}b", 2, 4), vec![(3, 'b', 1)]);
    }

    #[test]
    fn empty_window_yields_nothing() {
        assert_eq!(collect("abc", 2, 2), vec![]);
        assert_eq!(collect("", 0, 10), vec![]);
    }

    #[test]
    fn window_past_end_of_text_is_fine() {
        assert_eq!(collect("ab", 1, 100), vec![(1, 'b', 1)]);
    }

    #[test]
    fn chinese_text_offsets() {
        assert_eq!(
            collect("中文", 0, 2),
            vec![(0, '中', 1), (1, '文', 1)]
        );
    }
}
