use std::io::Write;
use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiClient;
use crate::notify::NotificationHub;
use crate::workflow::approval::Decision;

pub mod badges;
pub mod close;
pub mod concerns;
pub mod decide;
pub mod file;
pub mod history;
pub mod queues;
pub mod tickets;

/// Build the backend client and the shared notification hub from the
/// loaded configuration.
pub fn connect() -> Result<(Arc<ApiClient>, NotificationHub)> {
    let config = crate::config::config()?;
    let client = Arc::new(ApiClient::new(&config.backend)?);
    let hub = NotificationHub::new(Arc::clone(&client));
    Ok((client, hub))
}

/// Blocking Yes/No prompt. `--yes` skips it; everything that mutates
/// goes through here first.
pub fn confirm(text: &str, advisory: Option<&str>, assume_yes: bool) -> Decision {
    println!("❓ {text}");
    if let Some(advisory) = advisory {
        println!("⚠️  {advisory}");
    }
    if assume_yes {
        println!("   (--yes) confirmed");
        return Decision::Confirmed;
    }
    print!("   Confirm [y/N]: ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return Decision::Dismissed;
    }
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Decision::Confirmed,
        _ => Decision::Dismissed,
    }
}

pub async fn show_how_to_get_started() -> Result<()> {
    println!("🎫 Fixdesk - Ticketing Workflow Client");
    println!();
    println!("To get started:");
    println!("  📥 fixdesk file --concern \"...\" --attach photo.png   # File a concern");
    println!("  📋 fixdesk queues --tab tickets                        # Browse approval queues");
    println!("  ✅ fixdesk approve <id>                                # Approve a closing request");
    println!("  🔧 fixdesk close --ticket <id> --resolution \"...\"      # Close a ticket");
    println!("  🕓 fixdesk history <id>                                # Ticket timeline");
    println!("  🔔 fixdesk badges                                      # Unread counts");
    Ok(())
}
