//! Bit-exact reimplementation of a legacy password obfuscation.
//!
//! Every supported symbol (`0-9`, `a-z`, `A-Z`) becomes a four-character
//! chunk that depends on both the symbol and its position; anything else is
//! copied through. Chunks come from a recorded table when one exists and from
//! a fitted formula otherwise.
//!
//! ```
//! assert_eq!(legacy_codec::encode("0"), ";493");
//! assert_eq!(legacy_codec::encode("0-1"), ";493-?<><");
//! assert!(!legacy_codec::looks_already_encoded("123"));
//! ```
//!
//! The transform has no inverse. Check a credential by encoding the
//! candidate and comparing it to the stored value.

mod core;
mod encoders;
mod features;

pub mod prelude;

pub use crate::core::chunk::{CHUNK_LEN, Chunk, ChunkError};
pub use crate::core::config::{PatternKey, PatternRun, PatternTable, PatternTableError};
pub use crate::core::symbol::{ALPHABET_SIZE, is_supported, symbol_of, value_of};

pub use crate::encoders::chunk::{ChunkEncoder, ChunkSource, EncodedSymbol};
pub use crate::encoders::codec::{PasswordCodec, TracedSymbol, encoded_len};
pub use crate::encoders::formula;

pub use crate::features::conformance::{self, ConformanceReport, ReferenceSample, SampleKind};
pub use crate::features::detection::{ENCODED_LOOKING, StoredFormat, looks_already_encoded};
pub use crate::features::migration::{self, FieldAction, MigrationPlan, MigrationSummary, UserRecord};
pub use crate::features::verify::{
    self, BLOCKED_LOGINS, PlaintextPolicy, Verdict, is_blocked_login, verify_login,
};

/// Encodes `text` with the built-in table.
pub fn encode(text: &str) -> String {
    PasswordCodec::builtin().encode(text)
}
