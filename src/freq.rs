use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::ops::Index;

use crate::error::HuffmanError;
use crate::{Frequency, Symbol, NUM_SYMBOLS};

/// Occurrence count for every symbol of the alphabet, indexed by symbol.
///
/// A table is filled once when it is built and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Frequency>", into = "Vec<Frequency>")]
pub struct FrequencyTable {
    counts: Box<[Frequency]>,
}

impl FrequencyTable {
    fn empty() -> Self {
        Self {
            counts: vec![0; NUM_SYMBOLS].into_boxed_slice(),
        }
    }

    /// Count every symbol of `symbols`.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut table = Self::empty();
        for s in symbols {
            table.counts[s as usize] += 1;
        }

        table
    }

    /// Build a table from explicit `(symbol, count)` pairs. Repeated symbols add up.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Symbol, Frequency)>) -> Self {
        let mut table = Self::empty();
        for (s, count) in pairs {
            table.counts[s as usize] += count;
        }

        table
    }

    /// Scan a byte stream to the end, counting each byte.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut table = Self::empty();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            for &b in &buf[..n] {
                table.counts[b as usize] += 1;
            }
        }

        Ok(table)
    }

    pub fn get(&self, s: Symbol) -> Frequency {
        self.counts[s as usize]
    }

    /// Symbols with a nonzero count, in increasing symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Frequency)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(s, &count)| (s as Symbol, count))
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Sum of all counts.
    ///
    /// # Panics
    ///
    /// Panics if the sum overflows; tables from [`TryFrom`] never do.
    pub fn total(&self) -> Frequency {
        match self.checked_total() {
            Some(total) => total,
            None => panic!("frequency counts overflow their total"),
        }
    }

    /// Sum of all counts, or `None` if it does not fit in a `Frequency`.
    pub fn checked_total(&self) -> Option<Frequency> {
        self.counts
            .iter()
            .try_fold(0, |sum: Frequency, &count| sum.checked_add(count))
    }
}

impl Index<Symbol> for FrequencyTable {
    type Output = Frequency;

    fn index(&self, s: Symbol) -> &Frequency {
        &self.counts[s as usize]
    }
}

impl FromIterator<Symbol> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}

impl TryFrom<Vec<Frequency>> for FrequencyTable {
    type Error = HuffmanError;

    fn try_from(counts: Vec<Frequency>) -> Result<Self, Self::Error> {
        if counts.len() != NUM_SYMBOLS {
            return Err(HuffmanError::TableLength { len: counts.len() });
        }

        let table = Self {
            counts: counts.into_boxed_slice(),
        };
        if table.checked_total().is_none() {
            return Err(HuffmanError::FrequencyOverflow);
        }

        Ok(table)
    }
}

impl From<FrequencyTable> for Vec<Frequency> {
    fn from(table: FrequencyTable) -> Self {
        table.counts.into_vec()
    }
}
