use std::sync::LazyLock;

use crate::core::chunk::CHUNK_LEN;
use crate::core::config::PatternTable;
use crate::core::symbol::is_supported;

use super::chunk::{ChunkEncoder, EncodedSymbol};

static BUILTIN: LazyLock<PasswordCodec> = LazyLock::new(|| {
    PasswordCodec::new(PatternTable::load_default().expect("embedded pattern table is valid"))
});

/// One input symbol and what it became.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracedSymbol {
    pub position: usize,
    pub symbol: char,
    pub encoded: EncodedSymbol,
}

/// String-level codec reproducing the legacy password obfuscation.
///
/// The codec owns an immutable [`PatternTable`] and holds no other state, so
/// a single instance can be shared by reference across threads. There is no
/// `decode`: stored values are checked by re-encoding a candidate and
/// comparing.
#[derive(Debug, Clone)]
pub struct PasswordCodec {
    table: PatternTable,
}

impl PasswordCodec {
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    /// Shared codec backed by the built-in table.
    pub fn builtin() -> &'static PasswordCodec {
        &BUILTIN
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    pub fn encoder(&self) -> ChunkEncoder<'_> {
        ChunkEncoder::new(&self.table)
    }

    /// Encodes `text`. Positions are UTF-16 offsets, so an unsupported
    /// symbol still shifts everything after it, by two for characters
    /// outside the BMP.
    pub fn encode(&self, text: &str) -> String {
        let encoder = self.encoder();
        let mut result = String::with_capacity(text.len() * CHUNK_LEN);
        for (position, symbol) in utf16_positions(text) {
            encoder.encode_one(symbol, position).push_to(&mut result);
        }
        result
    }

    /// Per-symbol breakdown of [`encode`](Self::encode).
    pub fn trace(&self, text: &str) -> Vec<TracedSymbol> {
        let encoder = self.encoder();
        utf16_positions(text)
            .map(|(position, symbol)| TracedSymbol {
                position,
                symbol,
                encoded: encoder.encode_one(symbol, position),
            })
            .collect()
    }

    /// Whether encoding `candidate` reproduces `stored` exactly.
    pub fn matches(&self, candidate: &str, stored: &str) -> bool {
        encoded_len(candidate) == stored.chars().count() && self.encode(candidate) == stored
    }
}

/// Each character with its UTF-16 offset in `text`.
fn utf16_positions(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    text.chars().scan(0, |offset, c| {
        let position = *offset;
        *offset += c.len_utf16();
        Some((position, c))
    })
}

/// Length in characters of the encoding of `text`:
/// four per supported symbol, one per unsupported symbol.
pub fn encoded_len(text: &str) -> usize {
    text.chars()
        .map(|c| if is_supported(c) { CHUNK_LEN } else { 1 })
        .sum()
}
