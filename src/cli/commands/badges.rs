use anyhow::Result;

pub struct BadgesCommand;

impl BadgesCommand {
    pub async fn execute(&self) -> Result<()> {
        let (_client, hub) = super::connect()?;

        let counts = hub.refresh_badges().await?;
        println!("🔔 Unread notifications");
        println!("==========================================");
        println!("   Tickets (for closing):  {}", counts.for_approval_closing_notif);
        println!("   For Transfer:           {}", counts.for_approval_transfer_notif);
        println!("   On Hold:                {}", counts.on_hold_notif);
        println!("   Receiver concerns:      {}", counts.receiver_concerns_notif);
        println!();
        println!("   Total: {}", counts.total());
        Ok(())
    }
}
