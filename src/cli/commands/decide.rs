use anyhow::Result;
use tracing::Instrument;

use crate::telemetry::{create_workflow_span, generate_correlation_id};
use crate::workflow::approval::{ApprovalAction, ApprovalDispatcher, Decision, DispatchOutcome};
use crate::workflow::DialogSession;

pub struct DecideCommand {
    pub action: ApprovalAction,
    pub id: u64,
    pub yes: bool,
}

impl DecideCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, hub) = super::connect()?;
        let dispatcher = ApprovalDispatcher::new(client, hub);

        let decision = super::confirm(self.action.confirm_text(), None, self.yes);
        if decision == Decision::Dismissed {
            println!("   Nothing sent.");
            return Ok(());
        }

        let session = DialogSession::new();
        let token = session.open();
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("approval_dispatch", Some(self.id), Some(&correlation_id));
        match dispatcher
            .dispatch(self.action, self.id, decision, &session, token)
            .instrument(span)
            .await
        {
            DispatchOutcome::Success { notice } => {
                println!("✅ {notice}");
                Ok(())
            }
            DispatchOutcome::Failed { message } => {
                println!("❌ {message}");
                Err(anyhow::anyhow!(message))
            }
            DispatchOutcome::Dismissed => {
                println!("   Nothing sent.");
                Ok(())
            }
            DispatchOutcome::InFlight => {
                println!("⏳ Another request is still in flight.");
                Ok(())
            }
            DispatchOutcome::Stale => Ok(()),
        }
    }
}
