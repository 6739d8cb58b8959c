use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use course_core::model::UserId;
use services::{
    AppServices, AuthProvider, CatalogService, Clock, MarkOutcome, PreferencesService,
    ProgressService,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ui::views::render_page;
use ui::{Page, Presenter, Route, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://curriculum.sqlite3";
const DEFAULT_USER: &str = "demo";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingOperand { command: &'static str },
    UnknownArg(String),
    InvalidMinutes { raw: String },
    InvalidUser { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingOperand { command } => write!(f, "{command} requires an argument"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMinutes { raw } => write!(f, "invalid --minutes value: {raw}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value: {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// An error page, already rendered.
#[derive(Debug)]
struct PageError(String);

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim_end())
    }
}

impl std::error::Error for PageError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct CliApp {
    services: AppServices,
}

impl UiApp for CliApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn preferences(&self) -> Arc<PreferencesService> {
        self.services.preferences()
    }

    fn auth(&self) -> Arc<dyn AuthProvider> {
        self.services.auth()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- show <path>                 [--db <sqlite_url>] [--user <id>]");
    eprintln!("  cargo run -p app -- complete <lesson> [--minutes <n>] [--db <sqlite_url>] [--user <id>]");
    eprintln!("  cargo run -p app -- progress                    [--db <sqlite_url>] [--user <id>]");
    eprintln!("  cargo run -p app -- courses                     [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --user {DEFAULT_USER}");
    eprintln!("  --minutes 0");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CURRICULUM_DB_URL, CURRICULUM_USER, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show { path: String },
    Complete { lesson: String, minutes: u32 },
    Progress,
    Courses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Show,
    Complete,
    Progress,
    Courses,
}

impl CommandKind {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "show" => Some(Self::Show),
            "complete" => Some(Self::Complete),
            "progress" => Some(Self::Progress),
            "courses" => Some(Self::Courses),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Complete => "complete",
            Self::Progress => "progress",
            Self::Courses => "courses",
        }
    }

    fn takes_operand(self) -> bool {
        matches!(self, Self::Show | Self::Complete)
    }
}

struct Args {
    db_url: String,
    user: UserId,
    command: Command,
}

impl Args {
    fn parse(
        kind: CommandKind,
        args: &mut impl Iterator<Item = String>,
        env_db: Option<String>,
        env_user: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env_db.map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut user_raw = env_user.unwrap_or_else(|| DEFAULT_USER.into());
        let mut minutes = 0_u32;
        let mut operand: Option<String> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--user" => user_raw = require_value(args, "--user")?,
                "--minutes" if kind == CommandKind::Complete => {
                    let value = require_value(args, "--minutes")?;
                    minutes = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidMinutes { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if !arg.starts_with("--") && kind.takes_operand() && operand.is_none() => {
                    operand = Some(arg);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let user = UserId::from_str(&user_raw).map_err(|_| ArgsError::InvalidUser {
            raw: user_raw.clone(),
        })?;
        let missing = || ArgsError::MissingOperand {
            command: kind.name(),
        };
        let command = match kind {
            CommandKind::Show => Command::Show {
                path: operand.ok_or_else(missing)?,
            },
            CommandKind::Complete => Command::Complete {
                lesson: operand.ok_or_else(missing)?,
                minutes,
            },
            CommandKind::Progress => Command::Progress,
            CommandKind::Courses => Command::Courses,
        };

        Ok(Self {
            db_url,
            user,
            command,
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Present a page, following one canonical redirect. Error pages become errors.
async fn show(presenter: &Presenter, path: &str, user: &UserId) -> Result<String, PageError> {
    let mut page = presenter.present_path(path, Some(user)).await;
    if let Page::Redirect(to) = &page {
        let to = to.clone();
        debug!(from = path, to = %to, "following redirect");
        page = presenter.present_path(&to, Some(user)).await;
    }
    let text = render_page(&page);
    if page.is_error() {
        return Err(PageError(text));
    }
    Ok(text)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let kind = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        Some(first) => CommandKind::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let parsed = Args::parse(
        kind,
        &mut argv,
        std::env::var("CURRICULUM_DB_URL").ok(),
        std::env::var("CURRICULUM_USER").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system()).await?;
    let progress = services.progress();
    let app: Arc<dyn UiApp> = Arc::new(CliApp { services });
    let presenter = Presenter::new(build_app_context(&app));

    match parsed.command {
        Command::Show { path } => {
            println!("{}", show(&presenter, &path, &parsed.user).await?);
        }
        Command::Complete { lesson, minutes } => {
            let outcome = progress
                .mark_lesson_complete(&parsed.user, &lesson, minutes)
                .await?;
            let verb = match &outcome {
                MarkOutcome::Recorded(_) => "completed",
                MarkOutcome::AlreadyCompleted(_) => "already completed",
            };
            let record = outcome.progress();
            println!(
                "{verb}: {} at {}",
                record.lesson_id,
                record.completed_at.to_rfc3339()
            );
        }
        Command::Progress => {
            println!(
                "{}",
                show(&presenter, &Route::Dashboard.path(), &parsed.user).await?
            );
        }
        Command::Courses => {
            println!(
                "{}",
                show(&presenter, &Route::Courses.path(), &parsed.user).await?
            );
        }
    }
    Ok(())
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kind: CommandKind, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_owned());
        Args::parse(kind, &mut iter, None, None)
    }

    #[test]
    fn complete_takes_lesson_and_minutes() {
        let args = parse(
            CommandKind::Complete,
            &["functions", "--minutes", "25", "--user", "dao", "--db", "sqlite::memory:"],
        )
        .unwrap();
        assert_eq!(
            args.command,
            Command::Complete {
                lesson: "functions".into(),
                minutes: 25
            }
        );
        assert_eq!(args.user, UserId::new("dao"));
        assert_eq!(args.db_url, "sqlite::memory:");
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = parse(CommandKind::Progress, &[]).unwrap();
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert_eq!(args.user, UserId::new(DEFAULT_USER));
    }

    #[test]
    fn environment_is_overridden_by_flags() {
        let mut iter = ["--user", "flag-user"].into_iter().map(str::to_owned);
        let args = Args::parse(
            CommandKind::Courses,
            &mut iter,
            Some("sqlite://from-env.sqlite3".into()),
            Some("env-user".into()),
        )
        .unwrap();
        assert_eq!(args.user, UserId::new("flag-user"));
        assert_eq!(args.db_url, "sqlite://from-env.sqlite3");
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(matches!(
            parse(CommandKind::Show, &[]),
            Err(ArgsError::MissingOperand { command: "show" })
        ));
        assert!(matches!(
            parse(CommandKind::Complete, &["x", "--minutes", "lots"]),
            Err(ArgsError::InvalidMinutes { .. })
        ));
        assert!(matches!(
            parse(CommandKind::Progress, &["--minutes", "3"]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            parse(CommandKind::Show, &["/a", "/b"]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            parse(CommandKind::Courses, &["--user", "  "]),
            Err(ArgsError::InvalidUser { .. })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/dev.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/dev.sqlite3"));
    }
}
