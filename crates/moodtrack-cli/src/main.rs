mod tui;

use std::future::Future;
use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use moodtrack_core::api::auth::{self, AuthError};
use moodtrack_core::api::{ApiClient, MoodApi};
use moodtrack_core::config::MoodConfig;
use moodtrack_core::editor::{EditorError, MoodEditor};
use moodtrack_core::model::*;
use moodtrack_core::report::{self, FetchState, HomeView, ReportView, NO_NOTE, TODAY_MISSING};
use moodtrack_core::session::{FileSessionStore, Session, SessionStore};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moodtrack", about = "moodtrack: a daily mood journal for the terminal", version)]
enum Cli {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Profile {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Greeting, today's mood and this month's recommendation
    Home {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Record or change today's mood
    Mood {
        /// Mood label, weight (1-5) or colour (#RRGGBB). Prompts when omitted.
        category: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Monthly mood chart and daily list
    Report {
        /// Month 1-12 (default: current)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year (default: current)
        #[arg(short, long)]
        year: Option<i32>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// This week's moods
    Weekly {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// The server's recommendation for a month
    Recommend {
        #[arg(short, long)]
        month: Option<u32>,
        #[arg(short, long)]
        year: Option<i32>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the screen the app opens on (`home` or `login`)
    Route,
    /// Launch the interactive TUI
    Tui,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodtrack=warn")),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let config = MoodConfig::load(Some(&std::env::current_dir()?)).unwrap_or_else(|e| {
        tracing::warn!("falling back to default config: {e}");
        MoodConfig::default_config()
    });

    let result = run(cli, &config).await;
    if let Err(ref err) = result {
        let friendly = format_backend_error(err, &config);
        if friendly != format!("{}", err) {
            eprintln!("{}", friendly);
            std::process::exit(1);
        }
    }
    result
}

async fn run(cli: Cli, config: &MoodConfig) -> Result<()> {
    let store: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::from_config(config).context("failed to locate session file")?,
    );

    match cli {
        Cli::Route => cmd_route(store.as_ref()),
        Cli::Logout => cmd_logout(store.as_ref()),
        Cli::Profile { json } => cmd_profile(store.as_ref(), json),
        Cli::Login { email, password } => {
            let api = make_client(config, store.clone())?;
            cmd_login(&api, store.as_ref(), email, password).await
        }
        Cli::Register {
            name,
            email,
            password,
        } => {
            let api = make_client(config, store.clone())?;
            cmd_register(&api, name, email, password).await
        }
        Cli::Home { json } => {
            let session = require_session(store.as_ref())?;
            let api = make_client(config, store.clone())?;
            authenticated(store.as_ref(), cmd_home(&api, &session, json)).await
        }
        Cli::Mood { category, note } => {
            require_session(store.as_ref())?;
            let api = make_client(config, store.clone())?;
            authenticated(store.as_ref(), cmd_mood(&api, category, note)).await
        }
        Cli::Report { month, year, json } => {
            require_session(store.as_ref())?;
            let api = make_client(config, store.clone())?;
            let period = resolve_period(month, year)?;
            authenticated(store.as_ref(), cmd_report(&api, period, json)).await
        }
        Cli::Weekly { json } => {
            require_session(store.as_ref())?;
            let api = make_client(config, store.clone())?;
            authenticated(store.as_ref(), cmd_weekly(&api, json)).await
        }
        Cli::Recommend { month, year, json } => {
            require_session(store.as_ref())?;
            let api = make_client(config, store.clone())?;
            let period = resolve_period(month, year)?;
            authenticated(store.as_ref(), cmd_recommend(&api, period, json)).await
        }
        Cli::Tui => {
            let api = make_client(config, store.clone())?;
            tui::run_tui(config, api).await
        }
    }
}

fn make_client(config: &MoodConfig, store: Arc<dyn SessionStore>) -> Result<ApiClient> {
    ApiClient::new(config, store).context("failed to create API client")
}

/// Authenticated commands need a stored token; mirrors the launch-time route guard.
fn require_session(store: &dyn SessionStore) -> Result<Session> {
    let session = store.get().context("failed to read session")?;
    if !session.is_authenticated() {
        anyhow::bail!("not logged in. Run `moodtrack login` first.");
    }
    Ok(session)
}

const SESSION_EXPIRED: &str = "session expired. Run `moodtrack login` again.";

/// A 401 during a command clears the session; say so instead of showing stale output.
fn check_still_logged_in(store: &dyn SessionStore) -> Result<()> {
    if !store.get().context("failed to read session")?.is_authenticated() {
        anyhow::bail!(SESSION_EXPIRED);
    }
    Ok(())
}

/// Run an authenticated command, then report an expired session over its own result.
async fn authenticated(
    store: &dyn SessionStore,
    command: impl Future<Output = Result<()>>,
) -> Result<()> {
    let result = command.await;
    check_still_logged_in(store)?;
    result
}

fn resolve_period(month: Option<u32>, year: Option<i32>) -> Result<Period> {
    let current = Period::current();
    Ok(Period::new(
        month.unwrap_or(current.month),
        year.unwrap_or(current.year),
    )?)
}

/// Format backend connection errors with a user-friendly message.
fn format_backend_error(err: &anyhow::Error, config: &MoodConfig) -> String {
    let msg = format!("{:#}", err);
    let is_connection = msg.contains("connection refused")
        || msg.contains("Connection refused")
        || msg.contains("timed out")
        || msg.contains("error sending request")
        || msg.contains("dns error");
    if is_connection {
        format!(
            "{}\n\n  Cannot reach the mood-tracker backend at {}.\n  Check {} or set {}.\n",
            "Error: backend unavailable".red(),
            config.api.base_url,
            "api.base_url".cyan(),
            "MOODTRACK__API__BASE_URL".cyan()
        )
    } else {
        format!("{}", err)
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}

/// A coloured dot for a `#RRGGBB` colour.
fn mood_dot(color: &str) -> String {
    match hex_to_rgb(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".dimmed().to_string(),
    }
}

// ---------------------------------------------------------------------------
// route / session
// ---------------------------------------------------------------------------

fn cmd_route(store: &dyn SessionStore) -> Result<()> {
    let session = store.get().context("failed to read session")?;
    println!("{}", if session.is_authenticated() { "home" } else { "login" });
    Ok(())
}

async fn cmd_login(
    api: &ApiClient,
    store: &dyn SessionStore,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;
    let password = value_or_prompt(password, "Password")?;

    match auth::login(api, store, &email, &password).await {
        Ok(user) => {
            println!("{} Logged in as {}", "OK:".green(), user.display_name().bold());
            Ok(())
        }
        Err(AuthError::Session(e)) => Err(anyhow::Error::new(e).context("failed to save session")),
        Err(e) => anyhow::bail!("{e}"),
    }
}

async fn cmd_register(
    api: &ApiClient,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let name = value_or_prompt(name, "Name")?;
    let email = value_or_prompt(email, "Email")?;
    let password = value_or_prompt(password, "Password")?;

    let message = auth::register(api, &name, &email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{} {}", "OK:".green(), message);
    println!("  Next: {}", "moodtrack login".cyan());
    Ok(())
}

fn cmd_logout(store: &dyn SessionStore) -> Result<()> {
    auth::logout(store).context("failed to clear session")?;
    println!("Logged out.");
    Ok(())
}

#[derive(Serialize)]
struct ProfileView<'a> {
    name: &'a str,
    email: &'a str,
    avatar: &'a str,
    status: &'a str,
}

fn cmd_profile(store: &dyn SessionStore, json: bool) -> Result<()> {
    let session = require_session(store)?;
    let fallback = User::new("", "");
    let user = session.user.as_ref().unwrap_or(&fallback);
    let profile = ProfileView {
        name: user.display_name(),
        email: &user.email,
        avatar: user.avatar_url(),
        status: "Active",
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{}", profile.name.bold());
    println!("  {}   {}", "Email:".dimmed(), profile.email);
    println!("  {}  {}", "Avatar:".dimmed(), profile.avatar.cyan());
    println!("  {}  {}", "Status:".dimmed(), profile.status.green());
    Ok(())
}

// ---------------------------------------------------------------------------
// home
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HomeJson<'a> {
    greeting: &'a str,
    today: Option<&'a MoodRecord>,
    recommendation: Option<&'a Recommendation>,
}

async fn cmd_home(api: &ApiClient, session: &Session, json: bool) -> Result<()> {
    let mut home = HomeView::new(Period::current());
    home.refresh(api).await;

    if json {
        let out = HomeJson {
            greeting: session.display_name(),
            today: home.today().ready(),
            recommendation: home.recommendation().ready(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", format!("Hello, {}", session.display_name()).bold());
    println!();
    println!("{}", "--- Today's mood ---".dimmed());
    match home.today() {
        FetchState::Ready(record) => {
            println!(
                "  {} {}  {}",
                mood_dot(&record.color),
                record.mood.bold(),
                record.date.format("%d %b %Y").to_string().dimmed()
            );
            match record.note_text() {
                Some(note) => println!("  {} {}", "Note:".dimmed(), note),
                None => println!("  {}", NO_NOTE.dimmed().italic()),
            }
        }
        FetchState::Empty | FetchState::Loading => println!("  {}", TODAY_MISSING.dimmed()),
        FetchState::Failed(msg) => println!("  {} {}", "ERROR:".red(), msg),
    }
    println!(
        "  {} {}",
        "→".cyan(),
        format!("{} with `moodtrack mood`", home.editor_label()).dimmed()
    );

    println!();
    match home.recommendation() {
        FetchState::Ready(rec) => print_recommendation(rec, home.period()),
        FetchState::Failed(msg) => {
            println!("{}", "--- Recommendation ---".dimmed());
            println!("  {} {}", "ERROR:".red(), msg);
        }
        FetchState::Empty | FetchState::Loading => {
            println!("{}", "--- Recommendation ---".dimmed());
            println!("  {}", "No recommendation for this month yet.".dimmed());
        }
    }
    Ok(())
}

fn print_recommendation(rec: &Recommendation, period: Period) {
    let (r, g, b) = hex_to_rgb(rec.level.accent()).unwrap_or((255, 255, 255));
    println!(
        "{} {}",
        "┃".truecolor(r, g, b),
        format!("Recommendation · {period}").bold()
    );
    println!(
        "{} {} {}",
        "┃".truecolor(r, g, b),
        "Mood level:".dimmed(),
        rec.level.to_string().truecolor(r, g, b)
    );
    println!(
        "{} {} {}/5",
        "┃".truecolor(r, g, b),
        "Average mood:".dimmed(),
        format_average(rec.average_mood)
    );
    println!(
        "{} {} {}",
        "┃".truecolor(r, g, b),
        "Low-mood days:".dimmed(),
        rec.low_mood_days
    );
    println!(
        "{} {}",
        "┃".truecolor(r, g, b),
        format!("“{}”", rec.recommendation).italic()
    );
}

fn format_average(avg: f64) -> String {
    let s = format!("{avg:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ---------------------------------------------------------------------------
// mood
// ---------------------------------------------------------------------------

async fn cmd_mood(api: &ApiClient, category: Option<String>, note: Option<String>) -> Result<()> {
    let today = api.today_mood().await;
    if matches!(&today, Err(e) if e.is_unauthorized()) {
        anyhow::bail!(SESSION_EXPIRED);
    }
    let mut editor = MoodEditor::new();
    editor.on_loaded(today);
    if let Some(err) = editor.load_error() {
        println!(
            "  {} could not load today's mood ({err}); a new entry will be created",
            "WARNING:".yellow()
        );
    }

    let category = match category {
        Some(raw) => Some(
            raw.parse::<MoodCategory>()
                .map_err(|e| anyhow::anyhow!("{e}"))?,
        ),
        None => pick_category(editor.selected())?,
    };
    if let Some(category) = category {
        editor.select(category);
    }
    if let Some(note) = note {
        editor.set_note(note);
    }

    match editor.submit(api, Local::now().date_naive()).await {
        Ok(outcome) => {
            println!("{} {}", "OK:".green(), outcome.message());
            if let Some(c) = editor.selected() {
                let (r, g, b) = c.rgb();
                println!("  {} {}", "●".truecolor(r, g, b), c.label().bold());
            }
            Ok(())
        }
        Err(EditorError::AlreadyFilled) => {
            println!("{} {}", "INFO:".yellow(), EditorError::AlreadyFilled);
            Ok(())
        }
        Err(e) => anyhow::bail!("{e}"),
    }
}

/// Show the five moods and read a choice. Empty input keeps `current`.
fn pick_category(current: Option<MoodCategory>) -> Result<Option<MoodCategory>> {
    println!("{}", "How are you feeling today?".bold());
    for category in MoodCategory::ALL {
        let marker = if Some(category) == current { "›" } else { " " };
        println!(
            " {} {} {} {:<14} {}",
            marker.cyan(),
            category.weight().to_string().cyan(),
            mood_dot(category.color()),
            category.label(),
            category.description().dimmed()
        );
    }
    let input = prompt("Mood (1-5, label, or Enter to keep)")?;
    if input.trim().is_empty() {
        return Ok(current);
    }
    input
        .parse::<MoodCategory>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("{e}"))
}

// ---------------------------------------------------------------------------
// report / weekly / recommend
// ---------------------------------------------------------------------------

async fn cmd_report(api: &ApiClient, period: Period, json: bool) -> Result<()> {
    let mut view = ReportView::new(period);
    view.load(api).await;

    let report = match view.state() {
        FetchState::Ready(report) => report,
        FetchState::Empty | FetchState::Loading => {
            if json {
                println!("[]");
            } else {
                println!("No moods recorded in {period}.");
            }
            return Ok(());
        }
        FetchState::Failed(msg) => anyhow::bail!("failed to load report: {msg}"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
        return Ok(());
    }

    println!("{}", format!("Monthly mood report · {period}").bold());
    println!();
    print_chart(&report.points);
    if let Some(avg) = report.average() {
        println!("  {} {}/5", "Average:".dimmed(), format_average(avg));
    }

    println!();
    println!("{}", "--- Daily moods ---".dimmed());
    for record in &report.records {
        println!(
            "  {} {}  {}",
            mood_dot(&record.color),
            record.date.format("%d %B %Y").to_string().bold(),
            record.mood
        );
        println!(
            "      {} {}",
            "Note:".dimmed(),
            record.note_text().unwrap_or("-")
        );
    }
    Ok(())
}

/// One column per day, one row per weight.
fn print_chart(points: &[report::ChartPoint]) {
    if points.is_empty() {
        return;
    }
    for level in (1..=5u8).rev() {
        let mut row = format!("  {} {}", level.to_string().dimmed(), "│".dimmed());
        for point in points {
            if point.value == level {
                row.push_str(&format!(" {} ", mood_dot(point.color)));
            } else {
                row.push_str(&format!(" {} ", "·".dimmed()));
            }
        }
        println!("{row}");
    }
    println!("    {}{}", "└".dimmed(), "───".repeat(points.len()).dimmed());
    let labels: String = points.iter().map(|p| format!("{:>3}", p.day_label)).collect();
    println!("     {}", labels.dimmed());
}

async fn cmd_weekly(api: &ApiClient, json: bool) -> Result<()> {
    let mut records = api
        .weekly_moods()
        .await
        .context("failed to load weekly moods")?;
    report::sort_by_date(&mut records);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No moods recorded this week.");
        return Ok(());
    }

    println!(
        "  {}  {}  {}",
        format!("{:<10}", "Date").dimmed(),
        format!("{:<16}", "Mood").dimmed(),
        "Note".dimmed(),
    );
    println!("{}", "─".repeat(60).dimmed());
    for record in &records {
        println!(
            "  {}  {} {:<14}  {}",
            record.date.format("%a %d %b"),
            mood_dot(&record.color),
            record.mood,
            record.note_text().unwrap_or("-").dimmed(),
        );
    }
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} day{}",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

async fn cmd_recommend(api: &ApiClient, period: Period, json: bool) -> Result<()> {
    let rec = api
        .recommendation(period)
        .await
        .context("failed to load recommendation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }

    match rec {
        Some(rec) => print_recommendation(&rec, period),
        None => println!("No recommendation for {period} yet."),
    }
    Ok(())
}
