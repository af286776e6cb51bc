use thiserror::Error;

/// Failures reported by tree construction, decoding and archive handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// Fewer than two distinct symbols, so no prefix code can be formed.
    #[error("only {distinct} distinct symbol(s) in the input, at least 2 are needed")]
    AlphabetTooSmall { distinct: usize },

    /// The bit string stopped part way down the tree.
    #[error("bit string ends {dangling} bit(s) into an unfinished code")]
    TruncatedCode { dangling: usize },

    /// The counts add up to more than a `Frequency` can hold.
    #[error("frequency counts overflow their total")]
    FrequencyOverflow,

    #[error("frequency table has {len} entries, expected {}", crate::NUM_SYMBOLS)]
    TableLength { len: usize },

    #[error("archive claims {bit_len} bits but carries {bytes} byte(s)")]
    LengthMismatch { bit_len: usize, bytes: usize },

    #[error("archive decodes to {actual} symbols, its frequency table records {expected}")]
    SymbolCount { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
