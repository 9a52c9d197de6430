use std::path::PathBuf;

use anyhow::Result;
use statig::prelude::*;
use tracing::Instrument;

use crate::telemetry::{create_workflow_span, generate_correlation_id};

use crate::workflow::attachments::{AttachmentTray, IncomingFile};
use crate::workflow::closing::{
    CategoryRef, ClosingEvent, ClosingForm, ClosingSubmitter, FieldEdit, SubCategoryRef,
    SubmitOutcome, TechnicianRef,
};
use crate::workflow::approval::Decision;
use crate::workflow::DialogSession;

pub struct CloseCommand {
    pub ticket: u64,
    pub resolution: String,
    pub categories: Vec<u64>,
    pub sub_categories: Vec<u64>,
    pub technicians: Vec<u64>,
    pub notes: String,
    pub attachments: Vec<PathBuf>,
    pub yes: bool,
}

impl CloseCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, hub) = super::connect()?;
        let config = crate::config::config()?;

        // Resolve ids against the masterlists; the sub-category options
        // are fetched for the selected categories, exactly the cascade
        // the closing dialog performs.
        let categories = client.list_categories().await?;
        let selected_categories: Vec<CategoryRef> = self
            .categories
            .iter()
            .map(|id| {
                categories
                    .iter()
                    .find(|c| c.id == *id)
                    .map(CategoryRef::from)
                    .ok_or_else(|| anyhow::anyhow!("unknown category id {id}"))
            })
            .collect::<Result<_>>()?;

        let options = client.list_sub_categories(&self.categories).await?;
        let selected_sub_categories: Vec<SubCategoryRef> = self
            .sub_categories
            .iter()
            .map(|id| {
                options
                    .iter()
                    .find(|o| o.sub_category_id == *id)
                    .map(SubCategoryRef::from)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "sub-category {id} does not belong to any selected category"
                        )
                    })
            })
            .collect::<Result<_>>()?;

        let selected_technicians: Vec<TechnicianRef> = if self.technicians.is_empty() {
            Vec::new()
        } else {
            let technicians = client.list_technicians().await?;
            self.technicians
                .iter()
                .map(|id| {
                    technicians
                        .iter()
                        .find(|t| t.technician_id == *id)
                        .map(TechnicianRef::from)
                        .ok_or_else(|| anyhow::anyhow!("unknown technician id {id}"))
                })
                .collect::<Result<_>>()?
        };

        // Seed the tray with what the server already holds for this
        // ticket so freshly staged names dedup against it.
        let persisted = client.ticket_attachments(self.ticket).await?;
        let mut tray = AttachmentTray::from_persisted(persisted);
        for path in &self.attachments {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("invalid attachment path: {}", path.display()))?;
            let size = std::fs::metadata(path)?.len();
            if tray.stage(vec![IncomingFile::new(name, size)]) == 0 {
                println!("⚠️  Skipped {name} (duplicate name or unsupported extension)");
            }
        }
        let uploads = tray.upload_rows(|name| {
            let path = self
                .attachments
                .iter()
                .find(|p| p.file_name().and_then(|n| n.to_str()) == Some(name))
                .expect("staged names come from these paths");
            std::fs::read(path)
        })?;

        let mut machine = ClosingForm::new(self.ticket).state_machine();
        machine.handle(&ClosingEvent::Edit(FieldEdit::Resolution(
            self.resolution.clone(),
        )));
        machine.handle(&ClosingEvent::Edit(FieldEdit::Notes(self.notes.clone())));
        machine.handle(&ClosingEvent::Edit(FieldEdit::Categories(selected_categories)));
        machine.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(
            selected_sub_categories,
        )));
        machine.handle(&ClosingEvent::Edit(FieldEdit::SubCategoryOptions(options)));
        machine.handle(&ClosingEvent::Edit(FieldEdit::Technicians(
            selected_technicians,
        )));
        machine.handle(&ClosingEvent::Edit(FieldEdit::Attachments(uploads)));

        if !machine.is_submittable() {
            println!("❌ The closing form is not complete:");
            println!("   resolution, at least one category and one sub-category are");
            println!("   required, and every sub-category must belong to a selected");
            println!("   category.");
            anyhow::bail!("closing form validation failed");
        }

        let prompt = machine.confirm_prompt(
            chrono::Local::now().time(),
            config.workflow.closing_advisory_hour,
        );
        let decision = super::confirm(&prompt.text, prompt.advisory.as_deref(), self.yes);
        if decision == Decision::Dismissed {
            println!("   Nothing sent.");
            return Ok(());
        }

        let session = DialogSession::new();
        let token = session.open();
        let submitter = ClosingSubmitter::new(client, hub);
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("close_ticket", Some(self.ticket), Some(&correlation_id));
        match submitter
            .submit(&mut machine, &session, token)
            .instrument(span)
            .await
        {
            SubmitOutcome::Submitted { notice } => {
                println!("✅ {notice}");
                Ok(())
            }
            SubmitOutcome::Failed { message } => {
                println!("❌ {message}");
                println!("   Entered data kept; rerun to retry.");
                Err(anyhow::anyhow!(message))
            }
            SubmitOutcome::NotReady => anyhow::bail!("closing form validation failed"),
            SubmitOutcome::Stale => Ok(()),
        }
    }
}
