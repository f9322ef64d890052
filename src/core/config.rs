use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::chunk::{Chunk, ChunkError};
use super::symbol::{symbol_of, value_of};

/// Index into the exact table: a symbol's ordinal value and its position in
/// the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternKey {
    pub value: u8,
    pub position: usize,
}

impl PatternKey {
    pub fn new(value: u8, position: usize) -> Self {
        Self { value, position }
    }

    /// The symbol this key's value stands for.
    pub fn symbol(&self) -> Option<char> {
        symbol_of(self.value)
    }
}

/// One run of chunks loaded from TOML.
///
/// `chunks[i]` is the exact output for `symbol` at position `start + i`.
#[derive(Debug, Deserialize, Clone)]
pub struct PatternRun {
    /// The input symbol (a single character from the supported alphabet)
    pub symbol: String,
    /// Position of the first chunk
    #[serde(default)]
    pub start: usize,
    /// Chunks for consecutive positions
    pub chunks: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PatternFile {
    #[serde(default)]
    run: Vec<PatternRun>,
}

/// Errors raised while loading a pattern table.
#[derive(Debug)]
pub enum PatternTableError {
    /// The TOML document could not be parsed
    Parse(toml::de::Error),
    /// A table file could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// A run names something other than one supported symbol
    UnknownSymbol { symbol: String },
    /// A chunk string is not four printable ASCII characters
    InvalidChunk {
        symbol: char,
        position: usize,
        source: ChunkError,
    },
    /// `start + index` does not fit in a position
    PositionOverflow { symbol: char, start: usize },
}

impl fmt::Display for PatternTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTableError::Parse(e) => write!(f, "invalid pattern table: {}", e),
            PatternTableError::Io { path, source } => {
                write!(f, "cannot read pattern table {:?}: {}", path, source)
            }
            PatternTableError::UnknownSymbol { symbol } => write!(
                f,
                "run symbol {:?} is not a single character from 0-9, a-z, A-Z",
                symbol
            ),
            PatternTableError::InvalidChunk {
                symbol,
                position,
                source,
            } => write!(
                f,
                "bad chunk for '{}' at position {}: {}",
                symbol, position, source
            ),
            PatternTableError::PositionOverflow { symbol, start } => {
                write!(f, "run for '{}' starting at {} overflows", symbol, start)
            }
        }
    }
}

impl std::error::Error for PatternTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternTableError::Parse(e) => Some(e),
            PatternTableError::Io { source, .. } => Some(source),
            PatternTableError::InvalidChunk { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PatternTableError {
    fn from(e: toml::de::Error) -> Self {
        PatternTableError::Parse(e)
    }
}

/// Exact chunk table keyed by `(value, position)`.
///
/// Built once and then only read. A hit here always wins over the fallback
/// formula.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    entries: BTreeMap<PatternKey, Chunk>,
}

impl PatternTable {
    /// Parses a pattern table from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, PatternTableError> {
        let file: PatternFile = toml::from_str(content)?;
        let mut table = PatternTable::default();

        for run in file.run {
            let (symbol, value) = single_symbol(&run.symbol)?;

            for (i, chunk) in run.chunks.iter().enumerate() {
                let position =
                    run.start
                        .checked_add(i)
                        .ok_or(PatternTableError::PositionOverflow {
                            symbol,
                            start: run.start,
                        })?;
                let chunk = chunk
                    .parse::<Chunk>()
                    .map_err(|source| PatternTableError::InvalidChunk {
                        symbol,
                        position,
                        source,
                    })?;
                table.entries.insert(PatternKey::new(value, position), chunk);
            }
        }

        Ok(table)
    }

    /// Loads the built-in table bundled with the library.
    pub fn load_default() -> Result<Self, PatternTableError> {
        let content = include_str!("../../patterns.toml");
        Self::from_toml(content)
    }

    /// Loads a table from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self, PatternTableError> {
        let content = std::fs::read_to_string(path).map_err(|source| PatternTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads the built-in table plus any augmentation files.
    ///
    /// Searches in priority order:
    /// 1. Built-in table (from library)
    /// 2. `~/.config/legacy-codec/patterns.toml`
    /// 3. `./patterns.toml`
    ///
    /// Later tables override earlier ones for matching keys. A broken
    /// augmentation file is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, PatternTableError> {
        let mut table = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("legacy-codec").join("patterns.toml");
            table.merge_file_if_present(&user_path);
        }

        table.merge_file_if_present(Path::new("patterns.toml"));

        Ok(table)
    }

    fn merge_file_if_present(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(extra) => {
                let replaced = self.replaced_by(&extra);
                if replaced > 0 {
                    log::warn!(
                        "{:?} replaces {} existing entries ({} total)",
                        path,
                        replaced,
                        extra.len()
                    );
                } else {
                    log::info!("merging {} entries from {:?}", extra.len(), path);
                }
                self.merge(extra);
            }
            Err(e) => log::warn!("ignoring pattern table {:?}: {}", path, e),
        }
    }

    /// Number of entries here that merging `other` would change.
    pub fn replaced_by(&self, other: &PatternTable) -> usize {
        other
            .entries
            .iter()
            .filter(|(key, chunk)| self.entries.get(*key).is_some_and(|c| c != *chunk))
            .count()
    }

    /// Merges another table into this one.
    ///
    /// Entries from `other` replace entries with the same key in `self`.
    pub fn merge(&mut self, other: PatternTable) {
        self.entries.extend(other.entries);
    }

    /// Exact chunk for `value` at `position`, if one was recorded.
    pub fn lookup(&self, value: u8, position: usize) -> Option<Chunk> {
        self.entries.get(&PatternKey::new(value, position)).copied()
    }

    /// All entries, ordered by value then position.
    pub fn entries(&self) -> impl Iterator<Item = (PatternKey, Chunk)> + '_ {
        self.entries.iter().map(|(k, c)| (*k, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn single_symbol(s: &str) -> Result<(char, u8), PatternTableError> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && let Some(value) = value_of(c)
    {
        return Ok((c, value));
    }
    Err(PatternTableError::UnknownSymbol {
        symbol: s.to_string(),
    })
}
