#![deny(missing_docs)]

//! # acadledger-core -- Foundational Types for the Academic Credential Ledger
//!
//! This crate defines the domain primitives every other crate in the
//! workspace depends on. It has no internal crate dependencies -- only
//! `serde`, `serde_json`, `thiserror`, and `sha2` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Account addresses,
//!    content identifiers, and credential identifiers are distinct types
//!    validated at construction. You cannot pass a [`ContentId`] where an
//!    [`AccountAddress`] is expected.
//!
//! 2. **Digests commit to content identifiers, not raw bytes.** A
//!    [`DocDigest`] is computed over the content-id string issued by the
//!    pinning service. Verification recomputes over the same string; it
//!    never re-derives from freshly fetched file bytes.
//!
//! 3. **Empty-string-tolerant wire shapes.** The ledger's read surface
//!    encodes "absent" as an empty name. Record types here carry whatever
//!    the ledger returned; normalizing absence into an explicit error is
//!    the identity resolver's job, one layer up.

pub mod address;
pub mod content;
pub mod credential;
pub mod digest;
pub mod error;

pub use address::AccountAddress;
pub use content::{ContentId, CONTENT_URI_SCHEME};
pub use credential::{
    CredentialId, CredentialRecord, Expiry, InstitutionRecord, SubjectRecord,
};
pub use digest::DocDigest;
pub use error::ValidationError;
