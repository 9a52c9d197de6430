use anyhow::Result;
use clap::Parser;

use fixdesk::cli::commands::{
    badges::BadgesCommand, close::CloseCommand, concerns::ConcernsCommand, decide::DecideCommand,
    file::FileCommand, history::HistoryCommand, queues::QueuesCommand, show_how_to_get_started,
    tickets::TicketsCommand,
};
use fixdesk::cli::{Cli, Commands};
use fixdesk::workflow::approval::ApprovalAction;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    fixdesk::config::init_config()?;
    fixdesk::telemetry::init_telemetry(&fixdesk::config::config()?.observability)?;

    match cli.command {
        // Default behavior: no subcommand - explain how to get started
        None => show_how_to_get_started().await,
        Some(Commands::File {
            concern,
            attachments,
        }) => {
            FileCommand {
                concern,
                attachments,
            }
            .execute()
            .await
        }
        Some(Commands::Concerns {
            search,
            page,
            page_size,
        }) => {
            ConcernsCommand {
                search,
                page,
                page_size,
            }
            .execute()
            .await
        }
        Some(Commands::Queues {
            tab,
            search,
            page,
            page_size,
        }) => {
            QueuesCommand {
                tab,
                search,
                page,
                page_size,
            }
            .execute()
            .await
        }
        Some(Commands::Tickets {
            search,
            page,
            page_size,
        }) => {
            TicketsCommand {
                search,
                page,
                page_size,
            }
            .execute()
            .await
        }
        Some(Commands::Close {
            ticket,
            resolution,
            categories,
            sub_categories,
            technicians,
            notes,
            attachments,
            yes,
        }) => {
            CloseCommand {
                ticket,
                resolution,
                categories,
                sub_categories,
                technicians,
                notes,
                attachments,
                yes,
            }
            .execute()
            .await
        }
        Some(Commands::Approve { id, yes }) => {
            DecideCommand {
                action: ApprovalAction::Approve,
                id,
                yes,
            }
            .execute()
            .await
        }
        Some(Commands::Transfer { id, yes }) => {
            DecideCommand {
                action: ApprovalAction::Transfer,
                id,
                yes,
            }
            .execute()
            .await
        }
        Some(Commands::Hold { id, yes }) => {
            DecideCommand {
                action: ApprovalAction::Hold,
                id,
                yes,
            }
            .execute()
            .await
        }
        Some(Commands::History { id }) => HistoryCommand { id }.execute().await,
        Some(Commands::Badges) => BadgesCommand.execute().await,
    }
}
