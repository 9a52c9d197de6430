use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "fixdesk")]
#[command(about = "Workflow client for the fixdesk ticketing backend")]
#[command(
    long_about = "Fixdesk drives the ticketing workflow from the terminal: requestors file \
                  concerns, approvers work their queues, issue handlers close tickets. Start \
                  with 'fixdesk queues' to see what is waiting on you."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// File a new concern with at least one attachment
    File {
        /// Concern description, e.g. "System Name - Concern"
        #[arg(long)]
        concern: String,
        /// Attachment file path (repeatable, at least one required)
        #[arg(long = "attach", required = true)]
        attachments: Vec<std::path::PathBuf>,
    },
    /// Browse pending concerns awaiting a receiver decision
    Concerns {
        /// Search text (debounced before it reaches the backend)
        #[arg(long, default_value = "")]
        search: String,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,
        /// Page size
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Browse an approval queue (tickets, transfer, on-hold)
    Queues {
        /// Queue tab to show: tickets, transfer, or on-hold
        #[arg(long, default_value = "tickets")]
        tab: String,
        /// Search text (debounced before it reaches the backend)
        #[arg(long, default_value = "")]
        search: String,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,
        /// Page size
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Browse the open tickets assigned to you as issue handler
    Tickets {
        /// Search text (debounced before it reaches the backend)
        #[arg(long, default_value = "")]
        search: String,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,
        /// Page size
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Close an open ticket as its issue handler
    Close {
        /// Ticket concern id
        #[arg(long)]
        ticket: u64,
        /// Resolution text
        #[arg(long)]
        resolution: String,
        /// Category id (repeatable, at least one required)
        #[arg(long = "category", required = true)]
        categories: Vec<u64>,
        /// Sub-category id (repeatable, at least one required; must belong to a selected category)
        #[arg(long = "sub-category", required = true)]
        sub_categories: Vec<u64>,
        /// Technician id (repeatable, optional)
        #[arg(long = "technician")]
        technicians: Vec<u64>,
        /// Optional notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Attachment file path (repeatable, optional)
        #[arg(long = "attach")]
        attachments: Vec<std::path::PathBuf>,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Approve a queued closing request
    Approve {
        /// Closing ticket id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Approve a queued transfer request
    Transfer {
        /// Transfer ticket id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Put a queued request on hold
    Hold {
        /// On-hold ticket id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show a ticket's approval timeline and history
    History {
        /// Ticket concern id
        id: u64,
    },
    /// Show unread notification badge counts
    Badges,
}
