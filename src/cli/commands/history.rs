use anyhow::Result;

use crate::workflow::timeline::{assemble, Marker};

pub struct HistoryCommand {
    pub id: u64,
}

impl HistoryCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, _hub) = super::connect()?;

        let history = client.ticket_history(self.id).await?;
        let entries = assemble(&history);

        println!("🕓 Timeline for ticket #{}", self.id);
        println!("==========================================");
        for entry in &entries {
            let marker = match entry.marker {
                Marker::Pending => "○",
                Marker::Done => "🟢",
                Marker::Refused => "🔴",
            };
            println!(
                "{} {}  {}  — {} ({})",
                marker,
                entry.at.format("%Y-%m-%d %H:%M"),
                entry.action,
                entry.actor,
                entry.status
            );
            if let Some(remark) = &entry.remark {
                println!("      Reason: {remark}");
            }
        }
        if entries.is_empty() {
            println!("   No history recorded yet.");
        }
        Ok(())
    }
}
