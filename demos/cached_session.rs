//! Example: reuse a persisted session instead of logging in every time
//!
//! The session is kept in the configured session file (see
//! `OFS_SESSION_FILE`) and revalidated with the server on startup. If it is
//! missing or rejected, the demo logs in with the given credentials.
//!
//! Usage:
//!   cargo run --example cached_session -- --username USER --password PASS [--session-file PATH]

mod cli;

use cli::{init_logging, parse_credentials, usage_and_exit};
use ofs_client::ClientHandle;

const USAGE: &str = "Usage: cargo run --example cached_session -- --username USER --password PASS [--api-base URL] [--proxy PROXY] [--session-file PATH]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let creds = parse_credentials(USAGE);
    if !creds.positionals.is_empty() {
        usage_and_exit(USAGE);
    }

    println!("Checking for cached session in {}...", creds.config.session_file.display());
    let handle = ClientHandle::connect(&creds.config).await?;

    match handle.snapshot().username {
        Some(user) => println!("✅ Restored session for: {}", user),
        None => {
            println!("No valid cached session, logging in...");
            handle.login(&creds.username, &creds.password).await?;
            println!(
                "💾 Logged in as {}, session saved",
                handle.snapshot().username.unwrap_or_default()
            );
        }
    }

    let snap = handle.snapshot();
    println!("\n📁 Root directory: {} items", snap.file_count);
    if let ofs_client::ListingView::LoadFailed { message, .. } = &snap.listing {
        println!("⚠️  {}", message);
    }

    handle.shutdown().await?;
    Ok(())
}
