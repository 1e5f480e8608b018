//! QueueMate CLI - manage your shop, team and live queue from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and a shop
//! queuemate signup -e owner@example.com
//! queuemate shop setup -n "Fade House" -p 555-0100 -l "12 Main St"
//!
//! # Run the day
//! queuemate shop status open
//! queuemate queue watch
//! queuemate barbers status <id> on-break
//! ```
//!
//! # Commands
//!
//! - `login` / `signup` / `logout` / `status` - Session
//! - `shop` - Setup, details, status and public link
//! - `queue` - Today's customers
//! - `barbers` - Team roster
//!
//! Every command restores the saved session first and only runs when its
//! screen is reachable from the current route (signed out, awaiting shop
//! setup, or signed in).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use queuemate_client::{ClientConfig, QueueMate, StatusFilter};
use queuemate_core::{BarberId, BarberStatus, ServiceDraft, ShopStatus};

mod commands;
mod error;
mod prompt;
mod render;
mod telemetry;

use commands::auth::Mode;
use commands::shop::ShopForm;
use error::CliError;

#[derive(Parser)]
#[command(name = "queuemate")]
#[command(author, version, about = "QueueMate for shop owners")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to an existing account
    Login(Credentials),
    /// Create a new account
    Signup(Credentials),
    /// Log out and forget the saved session
    Logout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show who is signed in and which screens are available
    Status,
    /// Set up and manage your shop
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// View today's queue
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },
    /// Manage your team
    Barbers {
        #[command(subcommand)]
        action: BarberAction,
    },
}

#[derive(clap::Args)]
struct Credentials {
    /// Account email address
    #[arg(short, long)]
    email: String,

    /// Account password (prompted for when omitted)
    #[arg(long, env = "QUEUEMATE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(clap::Args)]
struct ShopFields {
    /// Shop name
    #[arg(short, long)]
    name: Option<String>,

    /// Contact phone number
    #[arg(short, long)]
    phone: Option<String>,

    /// Street address
    #[arg(short, long)]
    location: Option<String>,

    /// Opening time, e.g. 09:00 or "9:00 AM" (default 09:00)
    #[arg(long)]
    open: Option<String>,

    /// Closing time, e.g. 19:00 or "7:00 PM" (default 19:00)
    #[arg(long)]
    close: Option<String>,
}

impl From<ShopFields> for ShopForm {
    fn from(fields: ShopFields) -> Self {
        Self {
            name: fields.name,
            phone: fields.phone,
            location: fields.location,
            open: fields.open,
            close: fields.close,
        }
    }
}

#[derive(Subcommand)]
enum ShopAction {
    /// Link your existing shop, or create one
    Setup(ShopFields),
    /// Show shop details and today's counters
    Show,
    /// Change shop details; omitted fields are kept
    Edit(ShopFields),
    /// Open, close or freeze the queue
    Status {
        /// `open`, `close` or `frozen`
        status: ShopStatus,
    },
    /// Freeze the queue, or reopen it when frozen
    ToggleFreeze,
    /// Print the public link and share message
    Link,
}

#[derive(Subcommand)]
enum QueueAction {
    /// Print today's queue
    Show,
    /// Refresh the queue until interrupted
    Watch {
        /// Seconds between refreshes (default: QUEUEMATE_POLL_INTERVAL_SECS)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
enum BarberAction {
    /// List team members
    List {
        /// `all`, `active`, `on-break` or `off-today`
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Match against names and services
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a team member
    Add {
        #[arg(short, long)]
        name: String,

        /// Service as `name` or `name:minutes` (repeatable, default 30 minutes)
        #[arg(short, long = "service", required = true)]
        services: Vec<ServiceDraft>,

        /// `active`, `on-break` or `off-today`
        #[arg(long, default_value = "active")]
        status: BarberStatus,
    },
    /// Edit a team member; omitted fields are kept
    Edit {
        id: BarberId,

        #[arg(short, long)]
        name: Option<String>,

        /// Replacement services as `name` or `name:minutes` (repeatable)
        #[arg(short, long = "service")]
        services: Vec<ServiceDraft>,

        #[arg(long)]
        status: Option<BarberStatus>,
    },
    /// Change a team member's availability
    Status { id: BarberId, status: BarberStatus },
    /// Remove a team member
    Delete {
        id: BarberId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let telemetry = telemetry::TelemetryConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&telemetry);
    telemetry::init_tracing(&telemetry);

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let app = QueueMate::new(ClientConfig::from_env()?)?;

    match cli.command {
        Commands::Login(creds) => {
            commands::auth::sign_in(&app, Mode::Login, &creds.email, creds.password).await?;
        }
        Commands::Signup(creds) => {
            commands::auth::sign_in(&app, Mode::Signup, &creds.email, creds.password).await?;
        }
        Commands::Logout { yes } => commands::auth::logout(&app, yes).await?,
        Commands::Status => commands::auth::status(&app).await?,
        Commands::Shop { action } => match action {
            ShopAction::Setup(fields) => commands::shop::setup(&app, fields.into()).await?,
            ShopAction::Show => commands::shop::show(&app).await?,
            ShopAction::Edit(fields) => commands::shop::edit(&app, fields.into()).await?,
            ShopAction::Status { status } => commands::shop::set_status(&app, status).await?,
            ShopAction::ToggleFreeze => commands::shop::toggle_freeze(&app).await?,
            ShopAction::Link => commands::shop::link(&app).await?,
        },
        Commands::Queue { action } => match action {
            QueueAction::Show => commands::queue::show(&app).await?,
            QueueAction::Watch { interval } => commands::queue::watch(&app, interval).await?,
        },
        Commands::Barbers { action } => match action {
            BarberAction::List { status, search } => {
                commands::barbers::list(&app, status, search).await?;
            }
            BarberAction::Add {
                name,
                services,
                status,
            } => commands::barbers::add(&app, &name, services, status).await?,
            BarberAction::Edit {
                id,
                name,
                services,
                status,
            } => commands::barbers::edit(&app, &id, name, services, status).await?,
            BarberAction::Status { id, status } => {
                commands::barbers::set_status(&app, &id, status).await?;
            }
            BarberAction::Delete { id, yes } => commands::barbers::delete(&app, id, yes).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_repeated_services() {
        let cli = Cli::try_parse_from([
            "queuemate", "barbers", "add", "-n", "Sam", "-s", "Fade:45", "-s", "Beard",
        ])
        .unwrap();
        let Commands::Barbers {
            action: BarberAction::Add { services, status, .. },
        } = cli.command
        else {
            panic!("expected barbers add");
        };
        assert_eq!(services, [ServiceDraft::new("Fade", Some(45)), ServiceDraft::new("Beard", None)]);
        assert_eq!(status, BarberStatus::Active);
    }

    #[test]
    fn test_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["queuemate", "queue", "watch", "-i", "0"]).is_err());
    }
}
