// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gramdash CLI
//!
//! Thin driver for the dashboard client core: authenticate, link an
//! Instagram account via OAuth, and inspect cached metrics. The UI proper
//! lives elsewhere; this binary only triggers core operations and prints
//! their outputs.

use clap::{Parser, Subcommand};
use gramdash::config::Config;
use gramdash::error::ApiError;
use gramdash::models::instagram::CallbackParams;
use gramdash::models::user::RegisterRequest;
use gramdash::Dashboard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gramdash", about = "Instagram dashboard client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account (does not log in)
    Register {
        email: String,
        username: String,
        password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Log in right after registering
        #[arg(long)]
        login: bool,
    },
    /// Log in with an email or username
    Login { login: String, password: String },
    /// Clear the stored session
    Logout,
    /// Show the current user
    Whoami,
    /// Start linking an Instagram account (prints the URL to open)
    Connect,
    /// Finish linking: paste the redirect URL or its query string
    Callback { redirect: String },
    /// List linked accounts
    Accounts,
    /// Refresh an account's metrics and media server-side
    Sync { account_id: i64 },
    /// List media for an account
    Media { account_id: i64 },
    /// Disconnect an account (irreversible)
    Disconnect { account_id: i64 },
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().expect("Failed to load configuration");
    let dashboard = Dashboard::from_config(&config).expect("Failed to build client");

    if let Err(e) = run(cli.command, &dashboard).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, dashboard: &Dashboard) -> Result<(), ApiError> {
    let session = &dashboard.session;
    let linker = &dashboard.linker;

    match command {
        Command::Register {
            email,
            username,
            password,
            first_name,
            last_name,
            login,
        } => {
            let request = RegisterRequest {
                email,
                username,
                password,
                first_name,
                last_name,
            };
            if login {
                let user = session.register_then_login(&request).await?;
                println!("registered and logged in as {} (id {})", user.username, user.id);
            } else {
                let user = session.register(&request).await?;
                println!("registered {} (id {})", user.username, user.id);
            }
        }
        Command::Login { login, password } => {
            let user = session.login(&login, &password).await?;
            println!("logged in as {} (id {})", user.username, user.id);
        }
        Command::Logout => {
            session.logout().await;
            println!("logged out");
        }
        Command::Whoami => {
            session.load_persisted().await?;
            let user = session.current_user().await?;
            println!("{}", serde_json::to_string_pretty(&user).unwrap_or_default());
        }
        Command::Connect => {
            session.load_persisted().await?;
            let url = linker.authorization_url().await?;
            println!("Open this URL in a browser to authorize:");
            println!("{}", url.auth_url);
        }
        Command::Callback { redirect } => {
            session.load_persisted().await?;
            let params = CallbackParams::from_query(&redirect);
            let account = linker.handle_callback(&params).await?;
            println!("linked @{} (account id {})", account.username, account.id);
        }
        Command::Accounts => {
            session.load_persisted().await?;
            let accounts = linker.accounts().await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&accounts).unwrap_or_default()
            );
        }
        Command::Sync { account_id } => {
            session.load_persisted().await?;
            let outcome = linker.sync(account_id).await?;
            println!("{} ({} media synced)", outcome.message, outcome.synced_media_count);
        }
        Command::Media { account_id } => {
            session.load_persisted().await?;
            let media = linker.media(account_id).await?;
            println!("{}", serde_json::to_string_pretty(&media).unwrap_or_default());
        }
        Command::Disconnect { account_id } => {
            session.load_persisted().await?;
            let outcome = linker.disconnect(account_id).await?;
            println!("{}", outcome.message);
        }
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
