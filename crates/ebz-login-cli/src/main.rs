//! ebz-login - command-line login client.
//!
//! Wires the HTTP auth provider, the on-disk session store and a
//! connectivity probe into an `AuthOrchestrator`, and maps each login
//! outcome to a message and an exit code.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use ebz_auth_core::{
    AuthOrchestrator, Config, ConnectivityProbe, Credentials, FileSessionStore,
    FixedConnectivity, HttpAuthProvider, OutcomeStatus, ProviderFailure, SessionStore,
    TcpConnectivityProbe,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ============================================================================
// Constants
// ============================================================================

const USERNAME_ENV: &str = "EBZ_USERNAME";
const PASSWORD_ENV: &str = "EBZ_PASSWORD";

const USAGE: &str = "Usage: ebz-login [login [USERNAME] | status | logout]";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

enum Command {
    Login(Option<String>),
    Status,
    Logout,
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args.first().map(String::as_str) {
        None => Some(Command::Login(None)),
        Some("login") => Some(Command::Login(args.get(1).cloned())),
        Some("status") => Some(Command::Status),
        Some("logout") => Some(Command::Logout),
        Some(_) => None,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    };

    let mut config = Config::load()?;
    let store = Arc::new(open_store(&config)?);
    let orchestrator = build_orchestrator(&config, store.clone())?;

    match command {
        Command::Status => {
            println!("{}", status_message(&orchestrator, store.as_ref()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => {
            orchestrator.logout()?;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        Command::Login(username) => login(&orchestrator, &mut config, username).await,
    }
}

fn open_store(config: &Config) -> Result<FileSessionStore> {
    let store = FileSessionStore::new(config.cache_dir()?);
    // A corrupt session file is the same as no session
    if let Err(e) = store.reload() {
        warn!(error = %e, "Ignoring unreadable session file");
    }
    Ok(store)
}

fn build_orchestrator(config: &Config, store: Arc<FileSessionStore>) -> Result<AuthOrchestrator> {
    let auth_url = config.auth_url()?;
    let provider = Arc::new(HttpAuthProvider::new(auth_url, config.request_timeout())?);

    let connectivity: Arc<dyn ConnectivityProbe> = if config.offline_mode {
        Arc::new(FixedConnectivity::offline())
    } else {
        Arc::new(TcpConnectivityProbe::for_url(auth_url, config.connect_timeout())?)
    };

    Ok(AuthOrchestrator::new(provider, store, connectivity))
}

fn status_message(orchestrator: &AuthOrchestrator, store: &dyn SessionStore) -> String {
    if let Some(session) = orchestrator.current_session() {
        return format!(
            "Logged in as {} ({}), valid until {} ({} days left)",
            session.username,
            session.role,
            session.valid_until,
            session.days_until_expiry()
        );
    }
    // Anything still stored at this point has expired
    match store.load() {
        Some(session) => format!(
            "Session for {} expired on {}",
            session.username, session.valid_until
        ),
        None => "Not logged in.".to_string(),
    }
}

async fn login(
    orchestrator: &AuthOrchestrator,
    config: &mut Config,
    username: Option<String>,
) -> Result<ExitCode> {
    let username = match username
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .or_else(|| config.last_username.clone())
    {
        Some(username) => username,
        None => prompt_username()?,
    };
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) => password,
        Err(_) => rpassword::prompt_password("Password: ")?,
    };
    let credentials = Credentials::new(username, password);

    if credentials.is_blank() {
        eprintln!("Username and password required");
        return Ok(ExitCode::from(2));
    }

    eprintln!("Authenticating...");
    let outcome = orchestrator.attempt_login(&credentials).await;

    match &outcome {
        OutcomeStatus::Authenticated(session) => {
            config.last_username = Some(session.username.clone());
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to save config");
            }
            info!("Login complete");
            println!(
                "Logged in as {} ({}), valid until {}",
                session.username, session.role, session.valid_until
            );
        }
        OutcomeStatus::InvalidCredentials => {
            eprintln!("Error logging you in: this username/password combination is not valid");
        }
        OutcomeStatus::Offline => {
            eprintln!("Error logging you in: no network connection. Check your internet connection.");
        }
        OutcomeStatus::ProviderError(kind) => {
            eprintln!("Error logging you in: {}", failure_message(*kind));
        }
    }

    Ok(exit_code(&outcome))
}

fn failure_message(kind: ProviderFailure) -> &'static str {
    match kind {
        ProviderFailure::Timeout => "connection timed out. Please try again.",
        ProviderFailure::Transport => "unable to connect to server. Please try again.",
        ProviderFailure::Unavailable => "the service is temporarily unavailable. Please try again later.",
        ProviderFailure::Rejected => "the server refused the request.",
        ProviderFailure::MalformedResponse => "the server sent an unexpected response.",
        ProviderFailure::Internal => "an internal error occurred.",
    }
}

fn exit_code(outcome: &OutcomeStatus) -> ExitCode {
    match outcome {
        OutcomeStatus::Authenticated(_) => ExitCode::SUCCESS,
        OutcomeStatus::InvalidCredentials => ExitCode::from(1),
        OutcomeStatus::Offline => ExitCode::from(3),
        OutcomeStatus::ProviderError(kind) if kind.is_transient() => ExitCode::from(4),
        OutcomeStatus::ProviderError(_) => ExitCode::from(5),
    }
}

fn prompt_username() -> Result<String> {
    print!("Username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    Ok(username.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::{NaiveDate, Utc};
    use ebz_auth_core::{MemorySessionStore, SessionRecord};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert!(matches!(parse_args(&args(&[])), Some(Command::Login(None))));
        assert!(matches!(
            parse_args(&args(&["login", "alice"])),
            Some(Command::Login(Some(ref u))) if u == "alice"
        ));
        assert!(matches!(parse_args(&args(&["status"])), Some(Command::Status)));
        assert!(matches!(parse_args(&args(&["logout"])), Some(Command::Logout)));
        assert!(parse_args(&args(&["--bogus"])).is_none());
    }

    fn orchestrator_over(store: Arc<MemorySessionStore>) -> AuthOrchestrator {
        let provider = Arc::new(
            HttpAuthProvider::new("http://127.0.0.1:9/api/authenticate", Duration::from_secs(1))
                .unwrap(),
        );
        AuthOrchestrator::new(provider, store, Arc::new(FixedConnectivity::offline()))
    }

    fn session_until(valid_until: NaiveDate) -> SessionRecord {
        SessionRecord {
            username: "alice".to_string(),
            token: "t1".to_string(),
            valid_until,
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_status_message() {
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator_over(store.clone());
        assert_eq!(status_message(&orchestrator, store.as_ref()), "Not logged in.");

        store.save(session_until(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()));
        assert_eq!(
            status_message(&orchestrator, store.as_ref()),
            "Session for alice expired on 2000-01-01"
        );

        let tomorrow = Utc::now().date_naive() + chrono::Days::new(1);
        store.save(session_until(tomorrow));
        assert!(status_message(&orchestrator, store.as_ref())
            .starts_with("Logged in as alice (user)"));
    }

    #[test]
    fn test_logout_goes_through_orchestrator() {
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator_over(store.clone());
        store.save(session_until(NaiveDate::from_ymd_opt(2999, 1, 1).unwrap()));

        orchestrator.logout().unwrap();
        assert_eq!(status_message(&orchestrator, store.as_ref()), "Not logged in.");
    }

    #[test]
    fn test_exit_codes_distinguish_outcomes() {
        assert_eq!(exit_code(&OutcomeStatus::InvalidCredentials), ExitCode::from(1));
        assert_eq!(exit_code(&OutcomeStatus::Offline), ExitCode::from(3));
        assert_eq!(
            exit_code(&OutcomeStatus::ProviderError(ProviderFailure::Timeout)),
            ExitCode::from(4)
        );
        assert_eq!(
            exit_code(&OutcomeStatus::ProviderError(ProviderFailure::MalformedResponse)),
            ExitCode::from(5)
        );
    }
}
