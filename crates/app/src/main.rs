use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use planes_core::model::{Role, UserRecord};
use services::{AppServices, Clock, PlanService, ProfileService, SessionService};
use storage::remote::RemoteConfig;
use storage::repository::Storage;
use storage::session_store::{FileSessionStore, SessionStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://planes.sqlite3";
const DEFAULT_SESSION_FILE: &str = "session.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStore { raw: String },
    InvalidDbUrl { raw: String },
    MissingRemoteUrl,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStore { raw } => {
                write!(f, "invalid --store value: {raw} (expected memory, sqlite or remote)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingRemoteUrl => {
                write!(f, "--store remote needs --remote-url or PLANES_REMOTE_URL")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreKind {
    Memory,
    Sqlite,
    Remote,
}

impl StoreKind {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            "remote" => Ok(Self::Remote),
            _ => Err(ArgsError::InvalidStore {
                raw: raw.to_string(),
            }),
        }
    }
}

struct Args {
    store: StoreKind,
    db_url: String,
    remote_url: Option<String>,
    remote_token: Option<String>,
    session_file: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--store memory|sqlite|remote] [--db <sqlite_url>] [--remote-url <url>] [--session-file <path>]"
    );
    eprintln!("  cargo run -p storage --bin seed -- --name <name> --pin <pin> [--role docente|verificador]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store sqlite");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --session-file {DEFAULT_SESSION_FILE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PLANES_STORE, PLANES_DB_URL, PLANES_REMOTE_URL, PLANES_REMOTE_TOKEN,");
    eprintln!("  PLANES_SESSION_FILE, RUST_LOG");
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut store = match env_value("PLANES_STORE") {
            Some(raw) => StoreKind::parse(&raw)?,
            None => StoreKind::Sqlite,
        };
        let mut db_url =
            env_value("PLANES_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut remote_url = env_value("PLANES_REMOTE_URL");
        let remote_token = env_value("PLANES_REMOTE_TOKEN");
        let mut session_file = env_value("PLANES_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => {
                    let value = require_value(args, "--store")?;
                    store = StoreKind::parse(&value)?;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--remote-url" => {
                    remote_url = Some(require_value(args, "--remote-url")?);
                }
                "--session-file" => {
                    session_file = PathBuf::from(require_value(args, "--session-file")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if store == StoreKind::Remote && remote_url.is_none() {
            return Err(ArgsError::MissingRemoteUrl);
        }

        Ok(Self {
            store,
            db_url,
            remote_url,
            remote_token,
            session_file,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database's directory exists; the file itself is created on connect.
fn prepare_sqlite_dir(db_url: &str) -> Result<(), ArgsError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|_| ArgsError::InvalidDbUrl {
                raw: db_url.to_string(),
            })?;
        }
    }
    Ok(())
}

struct DesktopApp {
    services: AppServices,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Arc<SessionService> {
        self.services.session()
    }

    fn plans(&self) -> Arc<PlanService> {
        self.services.plans()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

/// The in-memory store starts empty; give it one account to log in with.
async fn seed_memory_store(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let demo = UserRecord {
        name: "demo".into(),
        pin: 0,
        role: Role::Docente,
    };
    storage.users.upsert_user(&demo).await?;
    info!(user = %demo.name, "in-memory store seeded with demo account (PIN 0)");
    Ok(())
}

async fn build_services(
    args: &Args,
    session_store: Arc<dyn SessionStore>,
    clock: Clock,
) -> Result<AppServices, Box<dyn std::error::Error>> {
    let services = match args.store {
        StoreKind::Memory => {
            let storage = Storage::in_memory();
            seed_memory_store(&storage).await?;
            AppServices::from_storage(&storage, session_store, clock)
        }
        StoreKind::Sqlite => {
            prepare_sqlite_dir(&args.db_url)?;
            info!(db = %args.db_url, "opening sqlite store");
            AppServices::new_sqlite(&args.db_url, session_store, clock).await?
        }
        StoreKind::Remote => {
            let base_url = args.remote_url.clone().ok_or(ArgsError::MissingRemoteUrl)?;
            info!(url = %base_url, "using remote document store");
            AppServices::new_remote(
                RemoteConfig {
                    base_url,
                    token: args.remote_token.clone(),
                },
                session_store,
                clock,
            )?
        }
    };
    Ok(services)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut iter = std::env::args().skip(1);
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default_clock();
    let session_store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(args.session_file.clone()));
    let services = build_services(&args, session_store, clock).await?;

    if services.session().restore().is_none() {
        info!("no stored session, starting at login");
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services, clock });
    let context = build_app_context(&app);

    // Some window managers default to always-on-top in dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Planes Educativos")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        warn!(error = %err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
