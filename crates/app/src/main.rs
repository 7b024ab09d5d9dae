mod tracing_setup;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ConfigOverrides, DEFAULT_BASE_URL, ExamConfig, ExamSession, HttpExamApi};
use storage::Storage;
use ui::{App, UiApp, build_app_context};

use crate::tracing_setup::{Verbosity, init_subscriber};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

struct DesktopApp {
    session: ExamSession,
}

impl UiApp for DesktopApp {
    fn exam_session(&self) -> ExamSession {
        self.session.clone()
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    config: ConfigOverrides,
    verbosity: Verbosity,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --course <id> [--db <sqlite_url>] [--base-url <url>] [--start-url <path>] [-v|-q]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:exam.sqlite3");
    eprintln!("  --base-url {DEFAULT_BASE_URL}");
    eprintln!("  --start-url /exam/<course>/start/");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_DB_URL, EXAM_COURSE_ID, EXAM_BASE_URL, EXAM_START_URL, EXAM_LOG");
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut db_url = std::env::var("EXAM_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://exam.sqlite3".into(), normalize_sqlite_url);
        let mut config = ConfigOverrides::default();
        let mut verbose = false;
        let mut quiet = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--course" => config.course_id = Some(require_value(&mut args, "--course")?),
                "--base-url" => config.base_url = Some(require_value(&mut args, "--base-url")?),
                "--start-url" => {
                    config.start_url = Some(require_value(&mut args, "--start-url")?);
                }
                "--verbose" | "-v" => verbose = true,
                "--quiet" | "-q" => quiet = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            config,
            verbosity: Verbosity::from_flags(verbose, quiet),
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
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
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    init_subscriber(args.verbosity);

    // Flags win over the EXAM_* environment.
    let config = ExamConfig::from_env(args.config.clone()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    tracing::info!(
        target: "exam.app",
        course = %config.course_id(),
        start = %config.start_url(),
        db = %args.db_url,
        "starting exam window"
    );

    // Client-local status maps live in SQLite; open and migrate before the window comes up.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let api = Arc::new(HttpExamApi::new(REQUEST_TIMEOUT)?);
    let session = ExamSession::new(config, api, Arc::clone(&storage.kv)).await;

    let title = format!("Exam {}", session.course_id());
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { session });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(title)
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
    if let Err(err) = run().await {
        // Binary glue: print once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
