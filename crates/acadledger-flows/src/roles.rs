//! Effective role classification for a connected account.
//!
//! Checks run in strict priority order: administrator capability, then
//! issuer capability paired with a resolvable institution profile, then
//! subject profile, then unauthenticated. An issuer capability without
//! an institution profile does not classify as issuer; the account
//! falls through the remaining checks like any other.
//!
//! Resolution is total. A probe that fails with a transport error
//! counts as "not granted / not resolvable" and evaluation continues;
//! every path terminates in one of the four states.

use acadledger_chain_client::{Capability, ChainClient};
use acadledger_core::AccountAddress;

use crate::directory::IdentityDirectory;

/// The effective capability class of a connected account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    /// Holds the administrator capability.
    Administrator,
    /// Holds the issuer capability and has a registered institution
    /// profile.
    Issuer,
    /// Has a registered, named subject profile.
    Subject,
    /// None of the above resolved.
    Unauthenticated,
}

impl std::fmt::Display for SessionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Administrator => "administrator",
            Self::Issuer => "issuer",
            Self::Subject => "subject",
            Self::Unauthenticated => "unauthenticated",
        };
        write!(f, "{label}")
    }
}

/// Classify a connected account into its effective role.
pub async fn resolve_role(
    chain: &ChainClient,
    directory: &IdentityDirectory,
    account: &AccountAddress,
) -> SessionRole {
    match chain.has_capability(Capability::Admin, account).await {
        Ok(true) => return SessionRole::Administrator,
        Ok(false) => {}
        Err(e) => tracing::debug!(%account, error = %e, "admin probe failed, continuing"),
    }

    match chain.has_capability(Capability::Issuer, account).await {
        Ok(true) => match directory.institution(account).await {
            Ok(_) => return SessionRole::Issuer,
            // Capability without a profile: keep evaluating. The account
            // may still resolve as a subject.
            Err(e) => {
                tracing::debug!(%account, error = %e, "issuer capability without profile")
            }
        },
        Ok(false) => {}
        Err(e) => tracing::debug!(%account, error = %e, "issuer probe failed, continuing"),
    }

    match directory.subject(account).await {
        Ok(_) => SessionRole::Subject,
        Err(e) => {
            tracing::debug!(%account, error = %e, "no subject profile");
            SessionRole::Unauthenticated
        }
    }
}
