//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use legacy_codec::prelude::*;
//!
//! let codec = PasswordCodec::builtin();
//! let stored = codec.encode("123");
//! let verdict = verify(codec, "123", &[Some(stored.as_str())], PlaintextPolicy::Reject);
//! assert!(verdict.is_match());
//! ```

pub use crate::{
    // Core encoding
    PasswordCodec,
    PatternTable,
    encode,
    // Migration tooling
    FieldAction,
    MigrationPlan,
    StoredFormat,
    UserRecord,
    looks_already_encoded,
    // Verification
    PlaintextPolicy,
    Verdict,
    verify::verify,
};
