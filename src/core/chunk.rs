use std::fmt;
use std::str::FromStr;

/// Number of characters produced for each supported symbol.
pub const CHUNK_LEN: usize = 4;

/// Lowest printable ASCII code a chunk may contain.
pub const MIN_CODE: u8 = 32;
/// Highest printable ASCII code a chunk may contain.
pub const MAX_CODE: u8 = 126;

/// Four printable ASCII characters standing in for one input symbol.
///
/// Every constructor enforces the printable range, so a `Chunk` can be
/// appended to output without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk([u8; CHUNK_LEN]);

impl Chunk {
    /// Builds a chunk from raw codes, clamping each one into `[32, 126]`.
    pub fn from_codes_clamped(codes: [u32; CHUNK_LEN]) -> Self {
        Chunk(codes.map(|code| code.clamp(MIN_CODE as u32, MAX_CODE as u32) as u8))
    }

    /// Raw ASCII bytes of the chunk.
    pub fn as_bytes(&self) -> &[u8; CHUNK_LEN] {
        &self.0
    }

    /// Appends the chunk to `out`.
    pub fn push_to(&self, out: &mut String) {
        out.extend(self.0.iter().map(|&b| b as char));
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// Reasons a string cannot be used as a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// The string does not hold exactly four characters.
    InvalidLength { actual: usize },
    /// A character falls outside printable ASCII.
    NotPrintable { char: char, index: usize },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::InvalidLength { actual } => {
                write!(f, "chunk must be {} characters, got {}", CHUNK_LEN, actual)
            }
            ChunkError::NotPrintable { char: c, index } => write!(
                f,
                "chunk character {:?} at index {} is not printable ASCII",
                c, index
            ),
        }
    }
}

impl std::error::Error for ChunkError {}

impl FromStr for Chunk {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actual = s.chars().count();
        if actual != CHUNK_LEN {
            return Err(ChunkError::InvalidLength { actual });
        }

        let mut bytes = [0u8; CHUNK_LEN];
        for (index, c) in s.chars().enumerate() {
            let code = c as u32;
            if code < MIN_CODE as u32 || code > MAX_CODE as u32 {
                return Err(ChunkError::NotPrintable { char: c, index });
            }
            bytes[index] = code as u8;
        }
        Ok(Chunk(bytes))
    }
}
