//! Tooling built on top of the codec.
//!
//! Login checks go through [`verify`]. Offline migration uses [`migration`]
//! with the [`detection`] heuristic, and [`conformance`] re-checks the
//! recorded legacy corpus.

pub mod conformance;
pub mod detection;
pub mod migration;
pub mod verify;
