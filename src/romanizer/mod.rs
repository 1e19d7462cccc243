#[cfg(feature = "mandarin")]
pub mod mandarin;

use std::ops::RangeInclusive;

/// A pluggable source of per-character romanizations. Implementations (such
/// as the Mandarin pinyin table) are provided behind features.
pub trait Romanizer: Send + Sync {
    /// The numeric-toned romanization of `ch`, with the tone digit appended
    /// ("hao3"), or `None` when the character is unknown. Unknown characters
    /// degrade to a neutral annotation rather than an error.
    fn romanize(&self, ch: char) -> Option<String>;

    /// The character ranges this romanizer can annotate.
    fn ranges(&self) -> &[RangeInclusive<u32>];
}
