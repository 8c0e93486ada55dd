//! Subcommand argument structs and handlers.
//!
//! Each handler builds the clients it needs, runs one flow, and prints
//! a human-facing result. Exit codes: 0 on success, 1 on failure, 2 for
//! the indeterminate issuance outcome that needs operator follow-up.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use acadledger_chain_client::WriteOperation;
use acadledger_core::{AccountAddress, CredentialId, Expiry};
use acadledger_flows::{
    resolve_role, IdentityDirectory, IssuanceCoordinator, IssuanceRequest, IssueError,
    PrincipalRole, QueryAggregator,
};

use crate::render;

/// Arguments for `acadledger issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Subject account address (0x…).
    #[arg(long)]
    pub subject: String,

    /// Program name.
    #[arg(long)]
    pub program: String,

    /// Level / degree name.
    #[arg(long)]
    pub level: String,

    /// Expiry as a unix timestamp; 0 means the credential never expires.
    #[arg(long, default_value_t = 0)]
    pub expires_at: u64,

    /// Optional description recorded in the off-chain metadata.
    #[arg(long)]
    pub description: Option<String>,

    /// Path to the supporting document (image or PDF).
    #[arg(long)]
    pub document: PathBuf,
}

/// Arguments for `acadledger credentials`.
#[derive(Args, Debug)]
pub struct CredentialsArgs {
    /// Principal address to list credentials for.
    pub address: String,

    /// Which side of the credentials the principal is on.
    #[arg(long, value_parser = parse_role, default_value = "subject")]
    pub role: PrincipalRole,
}

fn parse_role(raw: &str) -> Result<PrincipalRole, String> {
    match raw {
        "subject" => Ok(PrincipalRole::Subject),
        "issuer" => Ok(PrincipalRole::Issuer),
        other => Err(format!("unknown role \"{other}\" (expected subject or issuer)")),
    }
}

/// Arguments for `acadledger credential`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Credential id.
    pub id: u64,
}

/// Arguments for `acadledger register-institution`.
#[derive(Args, Debug)]
pub struct RegisterInstitutionArgs {
    /// Institution account address.
    #[arg(long)]
    pub address: String,
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Optional metadata URI.
    #[arg(long, default_value = "")]
    pub metadata_uri: String,
}

/// Arguments for `acadledger register-subject`.
#[derive(Args, Debug)]
pub struct RegisterSubjectArgs {
    /// Subject account address.
    #[arg(long)]
    pub address: String,
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// External identifier (e.g. a student number).
    #[arg(long)]
    pub external_id: String,
    /// Optional metadata URI.
    #[arg(long, default_value = "")]
    pub metadata_uri: String,
}

/// Arguments for `acadledger set-subject-status`.
#[derive(Args, Debug)]
pub struct SetSubjectStatusArgs {
    /// Subject account address.
    #[arg(long)]
    pub address: String,
    /// New active state (true or false).
    #[arg(long, action = clap::ArgAction::Set)]
    pub active: bool,
}

/// Arguments for `acadledger update-credential-uri`.
#[derive(Args, Debug)]
pub struct UpdateCredentialUriArgs {
    /// Credential id to amend.
    #[arg(long)]
    pub id: u64,
    /// Replacement document URI.
    #[arg(long)]
    pub uri: String,
}

/// `acadledger whoami`.
pub async fn run_whoami(account: &str) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let directory = IdentityDirectory::new(chain.clone());
    let role = resolve_role(&chain, &directory, chain.account()).await;
    println!("{} is {role}", chain.account().short());
    Ok(0)
}

/// `acadledger issue`.
pub async fn run_issue(args: &IssueArgs, account: &str) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let pin = crate::pin_client()?;
    let document = std::fs::read(&args.document)
        .with_context(|| format!("reading document {}", args.document.display()))?;
    let file_name = args
        .document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let coordinator = IssuanceCoordinator::new(pin, chain);
    let request = IssuanceRequest {
        subject: args.subject.clone(),
        program: args.program.clone(),
        level: args.level.clone(),
        expires_at: Expiry::from_unix(args.expires_at),
        document,
        document_file_name: file_name,
        description: args.description.clone(),
    };

    match coordinator.issue(request).await {
        Ok(outcome) => {
            match outcome.credential_id {
                Some(id) => println!("credential #{id} issued"),
                None => println!(
                    "credential issued, but the ledger receipt carried no id; \
                     list the subject's credentials to find it"
                ),
            }
            println!("  document:  ipfs://{}", outcome.document_id);
            println!("  metadata:  ipfs://{}", outcome.metadata_id);
            println!("  doc hash:  {}", outcome.document_hash);
            println!("  tx:        {}", outcome.tx_hash);
            Ok(0)
        }
        Err(IssueError::Indeterminate { tx_hash, waited_secs }) => {
            eprintln!(
                "transaction {tx_hash} was broadcast but not confirmed within {waited_secs}s.\n\
                 The credential may still be issued. Check the subject's credential list\n\
                 before retrying; a blind retry can issue a duplicate."
            );
            Ok(2)
        }
        Err(e) => Err(e.into()),
    }
}

/// `acadledger credentials`.
pub async fn run_credentials(args: &CredentialsArgs, account: &str) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let aggregator = QueryAggregator::new(chain);
    let entries = aggregator.list_for_principal(&args.address, args.role).await?;

    if entries.is_empty() {
        println!("no credentials for {}", args.address);
        return Ok(0);
    }
    let unavailable = entries.iter().filter(|e| !e.is_resolved()).count();
    for entry in &entries {
        println!("{}", render::entry_line(entry));
    }
    if unavailable > 0 {
        println!("({unavailable} of {} entries could not be fetched)", entries.len());
    }
    Ok(0)
}

/// `acadledger credential`.
pub async fn run_show(args: &ShowArgs, account: &str) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let directory = IdentityDirectory::new(chain.clone());
    let id = CredentialId::new(args.id).context("credential id must be positive")?;

    let record = chain.credential(id).await?;
    print!("{}", render::record_detail(&record));

    // Identity joins degrade to unregistered markers, as in listings.
    match directory.subject(&record.subject).await {
        Ok(subject) => print!(
            "{}",
            render::counterpart_detail(&acadledger_flows::Counterpart::Subject(subject))
        ),
        Err(e) => {
            tracing::debug!(error = %e, "subject join failed");
            println!("subject not registered ({})", record.subject.short());
        }
    }
    match directory.institution(&record.issuer).await {
        Ok(institution) => print!(
            "{}",
            render::counterpart_detail(&acadledger_flows::Counterpart::Institution(institution))
        ),
        Err(e) => {
            tracing::debug!(error = %e, "institution join failed");
            println!("institution not registered ({})", record.issuer.short());
        }
    }
    Ok(0)
}

/// `acadledger register-institution`.
pub async fn run_register_institution(
    args: &RegisterInstitutionArgs,
    account: &str,
) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let institution = AccountAddress::parse(&args.address)?;
    chain.ensure_network().await?;
    chain
        .submit(&WriteOperation::RegisterInstitution {
            institution,
            name: args.name.clone(),
            metadata_uri: args.metadata_uri.clone(),
        })
        .await?;
    println!("institution \"{}\" registered", args.name);
    Ok(0)
}

/// `acadledger register-subject`.
pub async fn run_register_subject(
    args: &RegisterSubjectArgs,
    account: &str,
) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let subject = AccountAddress::parse(&args.address)?;
    chain.ensure_network().await?;
    chain
        .submit(&WriteOperation::RegisterSubject {
            subject,
            name: args.name.clone(),
            external_id: args.external_id.clone(),
            metadata_uri: args.metadata_uri.clone(),
        })
        .await?;
    println!("subject \"{}\" registered", args.name);
    Ok(0)
}

/// `acadledger set-subject-status`.
pub async fn run_set_subject_status(
    args: &SetSubjectStatusArgs,
    account: &str,
) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let subject = AccountAddress::parse(&args.address)?;
    chain.ensure_network().await?;
    chain
        .submit(&WriteOperation::SetSubjectStatus {
            subject: subject.clone(),
            active: args.active,
        })
        .await?;
    println!("subject {} active = {}", subject.short(), args.active);
    Ok(0)
}

/// `acadledger update-credential-uri`.
pub async fn run_update_credential_uri(
    args: &UpdateCredentialUriArgs,
    account: &str,
) -> anyhow::Result<u8> {
    let chain = crate::chain_client(account)?;
    let id = CredentialId::new(args.id).context("credential id must be positive")?;
    chain.ensure_network().await?;
    chain
        .submit(&WriteOperation::UpdateCredentialUri {
            id,
            new_uri: args.uri.clone(),
        })
        .await?;
    println!("credential #{id} document uri updated");
    Ok(0)
}

/// `acadledger check-storage`.
pub async fn run_check_storage() -> anyhow::Result<u8> {
    let pin = crate::pin_client()?;
    pin.check_auth().await?;
    println!("pin service reachable, credentials accepted");
    Ok(0)
}

/// Arguments for `acadledger metadata`.
#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Content id (or ipfs:// URI) of a pinned metadata document.
    pub content_id: String,
}

/// `acadledger metadata`: fetch and pretty-print a pinned document.
pub async fn run_metadata(args: &MetadataArgs) -> anyhow::Result<u8> {
    let pin = crate::pin_client()?;
    let content_id = acadledger_core::ContentId::parse(&args.content_id)?;
    let doc: serde_json::Value = pin.fetch_json(&content_id).await?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(0)
}
