use crate::core::chunk::{CHUNK_LEN, Chunk};
use crate::core::config::PatternTable;
use crate::core::symbol::value_of;

use super::formula;

/// A chunk together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSource {
    /// Recorded legacy output for this key
    Exact(Chunk),
    /// Extrapolated by the fallback formula (best-effort)
    Formula(Chunk),
}

impl ChunkSource {
    pub fn chunk(&self) -> Chunk {
        match self {
            ChunkSource::Exact(c) | ChunkSource::Formula(c) => *c,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, ChunkSource::Exact(_))
    }
}

/// Outcome of encoding a single input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedSymbol {
    /// Supported symbol replaced by a four-character chunk
    Chunk(ChunkSource),
    /// Unsupported symbol copied through unchanged
    Passthrough(char),
}

impl EncodedSymbol {
    /// Appends this symbol's output to `out`.
    pub fn push_to(&self, out: &mut String) {
        match self {
            EncodedSymbol::Chunk(source) => source.chunk().push_to(out),
            EncodedSymbol::Passthrough(c) => out.push(*c),
        }
    }

    /// Number of characters this symbol contributes to the output.
    pub fn char_len(&self) -> usize {
        match self {
            EncodedSymbol::Chunk(_) => CHUNK_LEN,
            EncodedSymbol::Passthrough(_) => 1,
        }
    }

    /// True when the output came from the fallback formula.
    pub fn is_best_effort(&self) -> bool {
        matches!(self, EncodedSymbol::Chunk(ChunkSource::Formula(_)))
    }
}

/// Per-symbol encoder: exact table first, formula second.
#[derive(Debug, Clone, Copy)]
pub struct ChunkEncoder<'a> {
    table: &'a PatternTable,
}

impl<'a> ChunkEncoder<'a> {
    pub fn new(table: &'a PatternTable) -> Self {
        Self { table }
    }

    /// Encodes `symbol` found at `position` of the input.
    pub fn encode_one(&self, symbol: char, position: usize) -> EncodedSymbol {
        match value_of(symbol) {
            Some(value) => EncodedSymbol::Chunk(self.chunk_for(value, position)),
            None => EncodedSymbol::Passthrough(symbol),
        }
    }

    /// Chunk for an ordinal value at a position.
    pub fn chunk_for(&self, value: u8, position: usize) -> ChunkSource {
        match self.table.lookup(value, position) {
            Some(chunk) => ChunkSource::Exact(chunk),
            None => {
                log::debug!("no exact entry at position {}, using formula", position);
                ChunkSource::Formula(formula::generate(value, position))
            }
        }
    }
}
