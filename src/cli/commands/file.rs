use std::path::PathBuf;

use anyhow::Result;

use crate::workflow::attachments::{AttachmentTray, IncomingFile};
use crate::workflow::intake::{submit_concern, ConcernDraft};

pub struct FileCommand {
    pub concern: String,
    pub attachments: Vec<PathBuf>,
}

impl FileCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, hub) = super::connect()?;

        // The tray applies the same extension filter and name dedup the
        // picker does; paths that fall out are reported, not uploaded.
        let mut tray = AttachmentTray::new();
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

        let mut draft = ConcernDraft::new(self.concern.clone());
        draft.attachments = tray.upload_rows(|name| {
            let path = self
                .attachments
                .iter()
                .find(|p| p.file_name().and_then(|n| n.to_str()) == Some(name))
                .expect("staged names come from these paths");
            std::fs::read(path)
        })?;

        match submit_concern(&client, &hub, &draft).await {
            Ok(()) => {
                println!("✅ Concern added successfully!");
                println!("   {} attachment(s) uploaded", draft.attachments.len());
                Ok(())
            }
            Err(e) => {
                println!("❌ {e}");
                Err(e.into())
            }
        }
    }
}
