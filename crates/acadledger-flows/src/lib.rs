//! # acadledger-flows -- Issuance and query flows
//!
//! Composes the pinning client and the gateway client into the two
//! workflows the system exists for:
//!
//! 1. **Issuance** ([`issuance::IssuanceCoordinator`]) -- turn a raw
//!    document plus metadata into an on-chain credential record:
//!    document pin, metadata pin, ledger write, receipt parse. Each
//!    step is a suspend point and each failure is classified by the
//!    step that caused it.
//!
//! 2. **Query** ([`query::QueryAggregator`]) -- resolve the credential
//!    ids for a principal, fetch each record, and join it with the
//!    counterpart identity, degrading per record and per join instead
//!    of failing the whole listing.
//!
//! Supporting pieces: [`directory::IdentityDirectory`] normalizes the
//! ledger's empty-name encoding of "not registered" into an explicit
//! error, and [`roles::resolve_role`] classifies a connected account
//! into its effective capability class.
//!
//! Flows hold no state beyond their adapter clients; session context
//! (the connected account) lives in the chain client and is passed in
//! explicitly at construction.

pub mod directory;
pub mod issuance;
pub mod metadata;
pub mod query;
pub mod roles;

pub use directory::{DirectoryError, IdentityDirectory};
pub use issuance::{IssuanceCoordinator, IssuanceOutcome, IssuanceRequest, IssueError};
pub use metadata::CredentialMetadata;
pub use query::{
    Counterpart, CredentialEntry, PrincipalRole, QueryAggregator, QueryError, ResolvedCredential,
};
pub use roles::{resolve_role, SessionRole};
