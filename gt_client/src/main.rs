//! A command-line client for the GameTracker account service.
//!
//! Logs in (answering a 2FA challenge when the account requires one),
//! then prints the account's active sessions and achievements.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::io::{self, Write};
use std::sync::Arc;

use gametracker::auth::flow::LoginFlow;
use gametracker::events::UserEvents;
use gametracker::storage::{AuthStore, MemoryStorage};
use gt_client::api_client::ApiClient;
use gt_client::config::ClientConfig;
use gt_client::controllers::{AchievementsController, LoginController, SessionsController};
use gt_client::navigation::LoggingNavigator;

const HELP: &str = "\
Connect to a GameTracker account server

USAGE:
  gt_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: http://localhost:3000]
  --email EMAIL         Email for login
  --password PASS       Password for login

FLAGS:
  -h, --help            Print help information
";

struct Args {
    server_url: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs.opt_value_from_str("--server").ok().flatten(),
        email: pargs.opt_value_from_str("--email").ok().flatten(),
        password: pargs.opt_value_from_str("--password").ok().flatten(),
    };

    run(args).await
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.server_url).context("Invalid configuration")?;
    let http = config.http_client().context("Failed to build HTTP client")?;

    let api = Arc::new(ApiClient::with_client(config.base_url.clone(), http));
    let store = AuthStore::new(Arc::new(MemoryStorage::new()));
    let events = UserEvents::new();
    let navigator = Arc::new(LoggingNavigator);

    let mut login = LoginController::new(
        api.clone(),
        store.clone(),
        events.clone(),
        navigator.clone(),
    );

    // Get credentials
    let email = match args.email {
        Some(e) => e,
        None => prompt("Email")?,
    };
    let password = match args.password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    println!("Logging in as {email}...");
    if let Err(e) = login
        .submit_credentials(&email, &password, config.public_ip.as_deref())
        .await
    {
        anyhow::bail!("Login failed: {}", e.user_message());
    }

    // Answer the 2FA challenge when the account requires one.
    while matches!(login.flow(), LoginFlow::AwaitingTwoFactorCode { .. }) {
        let code = prompt("2FA code")?;
        for c in code.chars() {
            login.enter_code_digit(c);
        }
        match login.submit_code(config.public_ip.as_deref()).await {
            Ok(()) => break,
            Err(e) => println!("Code rejected: {}", e.user_message()),
        }
    }
    println!("Login successful!");

    // Active sessions
    let mut sessions = SessionsController::new(
        api.clone(),
        store.clone(),
        events.clone(),
        navigator.clone(),
    );
    println!("\nActive sessions:");
    for session in sessions.refresh().await.context("Failed to list sessions")? {
        println!(
            "  {} - {} - {} - created {}",
            session.id,
            session.device(),
            session.ip,
            session.created_at.with_timezone(&chrono::Local)
        );
    }

    // Achievements
    let achievements = AchievementsController::new(api.clone());
    println!("\nAchievements:");
    for entry in achievements
        .load()
        .await
        .context("Failed to load achievements")?
    {
        let status = match entry.unlock_date {
            Some(date) => format!("unlocked {date}"),
            None => "locked".to_string(),
        };
        println!("  {} - {}", entry.achievement.name, status);
    }

    Ok(())
}
