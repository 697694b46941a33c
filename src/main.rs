//! Fleet Admin console
//!
//! Entry point: every view is reached through the navigation guard, exactly as
//! a click in the web client would be.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fleet_admin::App;
use fleet_admin::config::{AppConfig, ConfigArgs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Emit logs as JSON
    #[arg(long, env = "FLEET_LOG_JSON", global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session token
    Login { email: String, password: String },
    /// Forget the persisted session token
    Logout,
    /// Show the claims of the current session
    Whoami,
    /// Request a password reset e-mail
    ForgotPassword { email: String },
    /// Set a new password with a reset token
    ResetPassword { token: String, new_password: String },
    /// Navigate to a view and print its data
    Open { path: String },
    /// List the views available to the current session
    Routes,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before clap reads env-backed flags
    let _ = dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let config = AppConfig::load(&cli.config).context("loading configuration")?;
    info!(
        name: "config.loaded",
        api = %config.api.base_url,
        session = %config.session.path.display(),
        "Configuration loaded"
    );

    let app = App::from_config(&config).context("building console")?;

    match cli.command {
        Command::Login { email, password } => {
            app.client()
                .auth()
                .login(email, password)
                .await
                .context("login failed")?;
            print_json(&app.whoami())?;
        }
        Command::Logout => app.client().auth().logout()?,
        Command::Whoami => print_json(&app.whoami())?,
        Command::ForgotPassword { email } => {
            let response = app.client().auth().forgot_password(email).await?;
            print_json(&response)?;
        }
        Command::ResetPassword {
            token,
            new_password,
        } => {
            let outcome = app.client().auth().reset_password(token, new_password).await?;
            print_json(&outcome)?;
            if !outcome.ok {
                anyhow::bail!("password reset rejected ({})", outcome.status);
            }
        }
        Command::Open { path } => {
            let page = app
                .open(&path)
                .await
                .with_context(|| format!("loading {path}"))?;
            print_json(&page)?;
        }
        Command::Routes => {
            for (path, name) in app.menu() {
                println!("{path:<16} {name}");
            }
        }
    }

    Ok(())
}
