//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `xenforo_client` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Cookie persistence between runs
//!
//! All forum logic is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};

use xenforo_client::config::{DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
use xenforo_client::cookies::{firefox, merge};
use xenforo_client::initialization::init_logger_with;
use xenforo_client::{Action, ClientOptions, CookieSet, LogFormat, LogLevel, Session};

/// Command-line client for XenForo forums.
#[derive(Debug, Parser)]
#[command(name = "xenforo_client", version, about)]
struct Cli {
    /// Forum base URL, e.g. https://forum.example.com/
    #[arg(long, env = "XENFORO_URL")]
    url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// JSON file the session cookies are loaded from and saved to
    #[arg(long, env = "XENFORO_COOKIES", default_value = "xenforo_cookies.json")]
    cookies: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and save the session cookies
    Login {
        /// Account username or email
        #[arg(long, env = "XENFORO_USERNAME")]
        username: String,
        /// Account password
        #[arg(long, env = "XENFORO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Verify the saved session and refresh its cookies
    Check,
    /// Fetch a forum page with the saved cookies and print it
    Get {
        /// Path below the forum base URL
        path: String,
    },
    /// Read a cookie from the local Firefox profile
    FirefoxCookie {
        /// Cookie host as stored by Firefox, e.g. .forum.example.com
        #[arg(long)]
        host: String,
        /// Cookie name
        #[arg(long, default_value = firefox::REMEMBER_COOKIE)]
        name: String,
        /// Path to cookies.sqlite (defaults to the first Firefox profile)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Merge the cookie into the saved cookie file
        #[arg(long)]
        save: bool,
    },
    #[command(flatten)]
    Action(Action),
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env, falling back to one next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("xenforo_client error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let connect = || -> Result<Session> {
        let options = ClientOptions::new(cli.url.clone().unwrap_or_default())
            .timeout(Duration::from_millis(cli.timeout_ms))
            .header("User-Agent", cli.user_agent.clone())
            .verbose(|message| println!("{}", message.green()));
        Session::new(options).context("Failed to initialize session")
    };

    match cli.command {
        Command::Login { username, password } => {
            let mut session = connect()?;
            let cookies = session
                .login(&username, &password)
                .await
                .with_context(|| format!("Login as '{}' failed", username))?;
            save_cookies(&cli.cookies, &cookies)?;
        }
        Command::Check => {
            let mut session = connect()?;
            refresh_session(&mut session, &cli.cookies).await?;
        }
        Command::Get { path } => {
            let mut session = connect()?;
            session.set_cookies(load_cookies(&cli.cookies)?);
            let page = session
                .get(&path)
                .await
                .with_context(|| format!("Failed to fetch '{}'", path))?;
            println!("{}", page.body);
        }
        Command::FirefoxCookie {
            host,
            name,
            db,
            save,
        } => {
            firefox_cookie(&host, &name, db.as_deref(), save, &cli.cookies).await?;
        }
        Command::Action(action) => {
            let mut session = connect()?;
            refresh_session(&mut session, &cli.cookies).await?;
            session
                .perform(&action)
                .await
                .with_context(|| format!("Action '{}' failed", action.name()))?;
        }
    }

    Ok(())
}

/// Checks the saved cookies against the forum and saves the refreshed set.
async fn refresh_session(session: &mut Session, cookie_file: &Path) -> Result<()> {
    let stored = load_cookies(cookie_file)?;
    let authenticated = session
        .check_login(Some(stored))
        .await
        .context("Session check failed")?;
    save_cookies(cookie_file, &authenticated.cookies)
}

async fn firefox_cookie(
    host: &str,
    name: &str,
    db: Option<&Path>,
    save: bool,
    cookie_file: &Path,
) -> Result<()> {
    let db_path = match db {
        Some(path) => path.to_path_buf(),
        None => firefox::default_cookie_db().context("Failed to locate a Firefox profile")?,
    };
    debug!("Reading cookies from {}", db_path.display());

    let Some(cookie) = firefox::latest_cookie(&db_path, host, name)
        .await
        .with_context(|| format!("Failed to read {}", db_path.display()))?
    else {
        bail!("No '{}' cookie for host '{}' in {}", name, host, db_path.display());
    };

    println!("{}", cookie);
    if save {
        let stored = load_cookies(cookie_file)?;
        save_cookies(cookie_file, &merge(&stored, &CookieSet::from(vec![cookie])))?;
    }
    Ok(())
}

/// Loads the cookie file; a missing file is an empty set.
fn load_cookies(path: &Path) -> Result<CookieSet> {
    if !path.exists() {
        debug!("No cookie file at {}", path.display());
        return Ok(CookieSet::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cookie file {}", path.display()))?;
    CookieSet::from_json(&json)
        .with_context(|| format!("Cookie file {} is not a JSON array of strings", path.display()))
}

fn save_cookies(path: &Path, cookies: &CookieSet) -> Result<()> {
    let json = cookies.to_json().context("Failed to serialize cookies")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write cookie file {}", path.display()))?;
    info!("Saved {} cookies to {}", cookies.len(), path.display());
    Ok(())
}
