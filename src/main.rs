use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use spendlink::api::HttpBackend;
use spendlink::auth::{DiagnosticsSink, TracingDiagnostics};
use spendlink::cli::{
    handle_account_command, handle_expense_command, handle_link_command, handle_login,
    handle_logout, handle_setup_command, handle_status, persist_session,
};
use spendlink::config::{Settings, SpendlinkPaths};
use spendlink::logging::init_tracing;
use spendlink::services::AuthService;
use spendlink::storage::Session;
use spendlink::store::{AppState, StoreHandle};

#[derive(Parser)]
#[command(
    name = "spendlink",
    author = "Kaylee Beyene",
    version,
    about = "Terminal client for your budgeting server",
    long_about = "spendlink talks to a personal budgeting server from the command \
                  line. Log in, link your bank, and plan recurring expenses so you \
                  always know what is safe to spend."
)]
struct Cli {
    /// Server API base URL (overrides the configured one)
    #[arg(long, global = true, env = "SPENDLINK_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        /// Account email (prompted for when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Log out and forget the session
    Logout,

    /// Show who is logged in
    Status,

    /// Link a bank account (first-time setup)
    Setup,

    /// Expense commands
    #[command(subcommand)]
    Expense(spendlink::cli::ExpenseCommands),

    /// Bank account commands
    #[command(subcommand)]
    Account(spendlink::cli::AccountCommands),

    /// Linked institution commands
    #[command(subcommand)]
    Link(spendlink::cli::LinkCommands),

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SpendlinkPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }

    init_tracing(settings.log_format);

    let command = match cli.command {
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("spendlink - plan your spending from the terminal");
            println!();
            println!("Run 'spendlink --help' for usage information.");
            println!("Run 'spendlink login' to get started.");
            return Ok(());
        }
    };

    let backend = HttpBackend::new(&settings)?;
    let diagnostics: Arc<dyn DiagnosticsSink> = Arc::new(TracingDiagnostics::new());
    let store = StoreHandle::spawn(AppState::default(), vec![diagnostics]);

    match Session::load(&paths) {
        Ok(Some(session)) => {
            AuthService::new(&backend, &store).restore(session).await?;
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable session file");
            Session::clear(&paths)?;
        }
    }

    let result = match command {
        Commands::Login { email } => handle_login(&backend, &store, &settings, email).await,
        Commands::Logout => handle_logout(&backend, &store).await,
        Commands::Status => handle_status(&backend, &store, &settings).await,
        Commands::Setup => handle_setup_command(&backend, &store, &paths).await,
        Commands::Expense(cmd) => handle_expense_command(&backend, &store, &settings, cmd).await,
        Commands::Account(cmd) => handle_account_command(&backend, &store, &settings, cmd).await,
        Commands::Link(cmd) => handle_link_command(&backend, &store, cmd).await,
        Commands::Config => Ok(()),
    };

    // The session reflects the store even when the command failed
    persist_session(&paths, &store.snapshot().auth)?;
    result?;

    Ok(())
}

fn print_config(paths: &SpendlinkPaths, settings: &Settings) {
    println!("spendlink Configuration");
    println!("=======================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Session file:     {}", paths.session_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:      {}", settings.api_base_url);
    println!("  Request timeout:   {}s", settings.request_timeout_secs);
    println!("  Long poll timeout: {}s", settings.long_poll_timeout_secs);
    println!("  Currency symbol:   {}", settings.currency_symbol);
    println!("  Date format:       {}", settings.date_format);
    println!("  Log format:        {:?}", settings.log_format);
    println!("  Setup completed:   {}", settings.setup_completed);
}
