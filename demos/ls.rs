//! Example: log in and list a directory
//!
//! Usage:
//!   cargo run --example ls -- --username USER --password PASS [--api-base URL] [--proxy PROXY] [PATH]

mod cli;

use cli::{init_logging, parse_credentials, usage_and_exit};
use ofs_client::{Client, ListingView, MemorySessionStore};
use std::sync::Arc;

const USAGE: &str = "Usage: cargo run --example ls -- --username USER --password PASS [--api-base URL] [--proxy PROXY] [PATH]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let creds = parse_credentials(USAGE);
    let path = match creds.positionals.as_slice() {
        [] => "/".to_string(),
        [path] => path.clone(),
        _ => usage_and_exit(USAGE),
    };

    // Nothing is persisted: this demo logs out when done.
    let api = ofs_client::api::ApiClient::new(&creds.config)?;
    let mut client = Client::with_parts(api, Arc::new(MemorySessionStore::new()));

    println!("Logging in to {}...", creds.config.api_base);
    client.login(&creds.username, &creds.password).await?;

    client.navigate_to(&path).await?;
    let snap = client.snapshot();

    let trail: Vec<&str> = snap.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
    println!("\n📁 {}  ({})\n", snap.path, trail.join(" › "));

    match snap.listing {
        ListingView::Empty => println!("  No files in this directory"),
        _ => {
            for entry in &snap.entries {
                let icon = if entry.is_directory() { "📁" } else { "📄" };
                let size = entry.display_size().unwrap_or_default();
                println!("  {} {:<40} {:>10}", icon, entry.name, size);
            }
        }
    }
    println!("\n{} item(s)", snap.file_count);

    client.logout().await;
    Ok(())
}
