use std::fmt;

use planes_core::model::{Role, UserRecord};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    name: String,
    pin: u32,
    role: Role,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingRequired { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidPin { raw: String },
    InvalidRole { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingRequired { flag } => write!(f, "{flag} is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPin { raw } => {
                write!(f, "invalid --pin value (expected digits): {raw}")
            }
            ArgsError::InvalidRole { raw } => {
                write!(f, "invalid --role value (docente|verificador): {raw}")
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("PLANES_DB_URL").unwrap_or_else(|_| "sqlite://planes.sqlite3".into());
        let mut name: Option<String> = None;
        let mut pin: Option<u32> = None;
        let mut role = Role::Docente;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--name" => {
                    let value = require_value(&mut args, "--name")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::MissingRequired { flag: "--name" });
                    }
                    name = Some(value.trim().to_string());
                }
                "--pin" => {
                    let value = require_value(&mut args, "--pin")?;
                    let parsed = value
                        .trim()
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidPin { raw: value.clone() })?;
                    pin = Some(parsed);
                }
                "--role" => {
                    let value = require_value(&mut args, "--role")?;
                    role = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidRole { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            name: name.ok_or(ArgsError::MissingRequired { flag: "--name" })?,
            pin: pin.ok_or(ArgsError::MissingRequired { flag: "--pin" })?,
            role,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- --name <name> --pin <digits> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite://planes.sqlite3)");
    eprintln!("  --name <name>             User name to create or overwrite");
    eprintln!("  --pin <digits>            Numeric PIN");
    eprintln!("  --role <role>             docente | verificador (default: docente)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PLANES_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let user = UserRecord {
        name: args.name.clone(),
        pin: args.pin,
        role: args.role,
    };
    storage.users.upsert_user(&user).await?;

    println!(
        "Seeded user {} ({}) into {}",
        user.name, user.role, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
