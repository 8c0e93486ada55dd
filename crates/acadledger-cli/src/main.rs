//! # acadledger CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; tracing verbosity is driven by the repeated
//! `-v` flag.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use acadledger_cli::commands::{
    run_check_storage, run_credentials, run_issue, run_metadata, run_register_institution,
    run_register_subject, run_set_subject_status, run_show, run_update_credential_uri,
    run_whoami, CredentialsArgs, IssueArgs, MetadataArgs, RegisterInstitutionArgs,
    RegisterSubjectArgs, SetSubjectStatusArgs, ShowArgs, UpdateCredentialUriArgs,
};

/// Academic credential ledger CLI.
///
/// Issues and queries credentials anchored to the ledger, with
/// supporting documents in content-addressed storage. Service endpoints
/// come from the environment; the connected account is always passed
/// explicitly.
#[derive(Parser, Debug)]
#[command(name = "acadledger", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Connected account address (0x…).
    #[arg(long, env = "ACADLEDGER_ACCOUNT", global = true, default_value = "")]
    account: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the effective role of the connected account.
    Whoami,

    /// Pin a document and issue a credential.
    Issue(IssueArgs),

    /// List credentials for a principal, enriched with identity joins.
    Credentials(CredentialsArgs),

    /// Show one credential with its subject and institution details.
    Credential(ShowArgs),

    /// Register an institution identity (administrator only).
    RegisterInstitution(RegisterInstitutionArgs),

    /// Register a subject identity (administrator only).
    RegisterSubject(RegisterSubjectArgs),

    /// Activate or deactivate a subject (administrator only).
    SetSubjectStatus(SetSubjectStatusArgs),

    /// Amend a credential's document URI (issuer only).
    UpdateCredentialUri(UpdateCredentialUriArgs),

    /// Probe the pinning service with the configured credentials.
    CheckStorage,

    /// Fetch and pretty-print a pinned metadata document.
    Metadata(MetadataArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Whoami => run_whoami(&cli.account).await,
        Commands::Issue(args) => run_issue(args, &cli.account).await,
        Commands::Credentials(args) => run_credentials(args, &cli.account).await,
        Commands::Credential(args) => run_show(args, &cli.account).await,
        Commands::RegisterInstitution(args) => run_register_institution(args, &cli.account).await,
        Commands::RegisterSubject(args) => run_register_subject(args, &cli.account).await,
        Commands::SetSubjectStatus(args) => run_set_subject_status(args, &cli.account).await,
        Commands::UpdateCredentialUri(args) => run_update_credential_uri(args, &cli.account).await,
        Commands::CheckStorage => run_check_storage().await,
        Commands::Metadata(args) => run_metadata(args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
