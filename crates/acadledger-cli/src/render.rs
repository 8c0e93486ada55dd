//! Human-facing formatting for credential listings and detail views.

use chrono::{DateTime, Utc};

use acadledger_core::{CredentialRecord, Expiry};
use acadledger_flows::{Counterpart, CredentialEntry};

/// Format a unix-seconds timestamp as a date, or a dash for zero.
pub fn format_timestamp(unix_secs: u64) -> String {
    if unix_secs == 0 {
        return "-".to_string();
    }
    match DateTime::<Utc>::from_timestamp(unix_secs as i64, 0) {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

/// Format an expiry, spelling out the perpetual sentinel.
pub fn format_expiry(expiry: Expiry) -> String {
    match expiry {
        Expiry::Never => "perpetual".to_string(),
        Expiry::At(ts) => format_timestamp(ts),
    }
}

/// One listing line for a credential entry.
pub fn entry_line(entry: &CredentialEntry) -> String {
    match entry {
        CredentialEntry::Resolved(resolved) => {
            let record = &resolved.record;
            format!(
                "#{}  {} / {}  issued {}  expires {}  {}",
                record.id,
                record.program,
                record.level,
                format_timestamp(record.issued_at),
                format_expiry(record.expires_at),
                resolved.counterpart.display_name(),
            )
        }
        CredentialEntry::Unavailable { id, error } => {
            format!("#{id}  <unavailable: {error}>")
        }
    }
}

/// Multi-line detail view for a credential record.
pub fn record_detail(record: &CredentialRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("credential #{}\n", record.id));
    out.push_str(&format!("  program:   {}\n", record.program));
    out.push_str(&format!("  level:     {}\n", record.level));
    out.push_str(&format!("  issued:    {}\n", format_timestamp(record.issued_at)));
    out.push_str(&format!("  expires:   {}\n", format_expiry(record.expires_at)));
    out.push_str(&format!("  subject:   {}\n", record.subject));
    out.push_str(&format!("  issuer:    {}\n", record.issuer));
    if !record.document_uri.is_empty() {
        out.push_str(&format!("  document:  {}\n", record.document_uri));
    }
    out.push_str(&format!("  doc hash:  {}\n", record.document_hash));
    out
}

/// Section describing a resolved or unregistered counterpart.
pub fn counterpart_detail(counterpart: &Counterpart) -> String {
    match counterpart {
        Counterpart::Institution(inst) => {
            let mut out = format!("institution: {} ({})\n", inst.name, inst.address.short());
            if !inst.metadata_uri.is_empty() {
                out.push_str(&format!("  metadata:  {}\n", inst.metadata_uri));
            }
            out
        }
        Counterpart::Subject(subj) => {
            let mut out = format!("subject: {} ({})\n", subj.name, subj.address.short());
            if !subj.external_id.is_empty() {
                out.push_str(&format!("  external id: {}\n", subj.external_id));
            }
            out.push_str(&format!(
                "  active: {}  registered: {}\n",
                subj.active,
                format_timestamp(subj.registered_at)
            ));
            out
        }
        Counterpart::Unregistered { address } => {
            format!("counterpart not registered ({})\n", address.short())
        }
    }
}
