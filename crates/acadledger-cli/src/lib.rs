//! # acadledger-cli -- CLI for the academic credential ledger
//!
//! Provides the `acadledger` command-line interface over the issuance
//! and query flows.
//!
//! ## Subcommands
//!
//! - `acadledger whoami` -- effective role of the connected account.
//! - `acadledger issue` -- pin a document and issue a credential.
//! - `acadledger credentials <address>` -- enriched credential listing.
//! - `acadledger credential <id>` -- full detail view with identity joins.
//! - `acadledger register-institution` / `register-subject` /
//!   `set-subject-status` / `update-credential-uri` -- administrative
//!   writes.
//! - `acadledger check-storage` -- pinning service credential probe.
//!
//! Configuration comes from the environment (`CHAIN_GATEWAY_URL`,
//! `PIN_API_TOKEN`, …); the connected account is passed explicitly via
//! `--account` or `ACADLEDGER_ACCOUNT`.

pub mod commands;
pub mod render;

use anyhow::Context;

use acadledger_chain_client::{ChainClient, ChainGatewayConfig};
use acadledger_core::AccountAddress;
use acadledger_pin_client::{PinClient, PinServiceConfig};

/// Build the gateway client for the connected account from environment
/// configuration.
pub fn chain_client(account: &str) -> anyhow::Result<ChainClient> {
    let account = AccountAddress::parse(account)
        .with_context(|| format!("invalid account address: {account}"))?;
    let config = ChainGatewayConfig::from_env().context("loading chain gateway configuration")?;
    ChainClient::new(config, account).context("building chain gateway client")
}

/// Build the pinning client from environment configuration.
pub fn pin_client() -> anyhow::Result<PinClient> {
    let config = PinServiceConfig::from_env().context("loading pin service configuration")?;
    PinClient::new(config).context("building pin service client")
}
