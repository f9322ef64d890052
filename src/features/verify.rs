//! Credential checks against stored legacy values.
//!
//! A submitted password is encoded and compared for plain equality with each
//! stored value (the primary password and the app password, either of which
//! may be missing). Rows that were never migrated still hold plaintext, so a
//! caller may opt into comparing the raw submission as well.

use crate::encoders::codec::PasswordCodec;

/// Logins the legacy system never lets through, compared case-insensitively.
pub const BLOCKED_LOGINS: &[&str] = &["PARAFLEX", "SISTEMA", "PARCEIRO"];

/// Whether raw submissions may match unmigrated plaintext values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaintextPolicy {
    /// Only encoded comparisons count
    #[default]
    Reject,
    /// Also accept a raw match, as the legacy login did
    AllowLegacy,
}

/// Result of checking a submitted credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The encoded submission equals the stored value at `slot`
    Encoded { slot: usize },
    /// The raw submission equals the stored value at `slot`
    Plaintext { slot: usize },
    /// Nothing matched
    Mismatch,
    /// The login is on [`BLOCKED_LOGINS`]; no password was compared
    Blocked,
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Encoded { .. } | Verdict::Plaintext { .. })
    }
}

/// Checks `submitted` against every stored value.
///
/// Encoded matches are tried on all slots before any plaintext match. An
/// empty submission never matches.
pub fn verify(
    codec: &PasswordCodec,
    submitted: &str,
    stored: &[Option<&str>],
    policy: PlaintextPolicy,
) -> Verdict {
    if submitted.is_empty() {
        return Verdict::Mismatch;
    }

    let encoded = codec.encode(submitted);
    if let Some(slot) = position_of(stored, &encoded) {
        return Verdict::Encoded { slot };
    }

    if policy == PlaintextPolicy::AllowLegacy
        && let Some(slot) = position_of(stored, submitted)
    {
        log::warn!("credential matched an unmigrated plaintext value in slot {}", slot);
        return Verdict::Plaintext { slot };
    }

    Verdict::Mismatch
}

/// Like [`verify`], but refuses blocked logins before looking at the
/// password.
pub fn verify_login(
    codec: &PasswordCodec,
    login: &str,
    submitted: &str,
    stored: &[Option<&str>],
    policy: PlaintextPolicy,
) -> Verdict {
    if is_blocked_login(login) {
        log::info!("login {:?} is blocked", login);
        return Verdict::Blocked;
    }
    verify(codec, submitted, stored, policy)
}

fn position_of(stored: &[Option<&str>], needle: &str) -> Option<usize> {
    stored.iter().position(|value| *value == Some(needle))
}

/// Whether `login` is on the blocked list.
pub fn is_blocked_login(login: &str) -> bool {
    let upper = login.to_uppercase();
    BLOCKED_LOGINS.iter().any(|blocked| *blocked == upper)
}
