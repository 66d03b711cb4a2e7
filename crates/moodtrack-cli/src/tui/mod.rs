pub mod app;
pub mod event;
mod views;
mod widgets;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use moodtrack_core::api::{auth, ApiClient, MoodApi};
use moodtrack_core::config::MoodConfig;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;

use self::app::{App, Screen, ToastKind};
use self::event::{AsyncAction, AsyncResult};

/// Entry point for the interactive TUI mode.
pub async fn run_tui(config: &MoodConfig, api: ApiClient) -> Result<()> {
    let session = api.session().get().context("failed to read session")?;

    // Channels for async communication
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AsyncAction>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    let backend = api.base_url().to_string();
    tokio::spawn(async move {
        worker_loop(api, &mut action_rx, result_tx).await;
    });

    let mut terminal = ratatui::init();
    let mut app = App::new(session, &config.tui, config.auth.logout_on_unauthorized);

    let result = run_loop(&mut terminal, &mut app, &action_tx, &mut result_rx, &backend);

    ratatui::restore();

    result
}

fn run_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    action_tx: &mpsc::UnboundedSender<AsyncAction>,
    result_rx: &mut mpsc::UnboundedReceiver<AsyncResult>,
    backend: &str,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app, backend))?;

        // Poll for async results (non-blocking)
        while let Ok(result) = result_rx.try_recv() {
            if let Some(action) = app.handle_result(result) {
                let _ = action_tx.send(action);
            }
        }

        if let Some(action) = app.tick_splash(Instant::now()) {
            let _ = action_tx.send(action);
        }

        // Poll for keyboard events (50ms timeout for responsive UI)
        if ct_event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        let _ = action_tx.send(action);
                    }
                }
            }
        }

        app.tick_toast();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App, backend: &str) {
    let area = frame.area();

    match app.screen {
        Screen::Splash => views::splash::render(frame, area, backend),
        Screen::Login => views::login::render(frame, app, area),
        Screen::Register => views::register::render(frame, app, area),
        Screen::Home => views::home::render(frame, app, area),
        Screen::Report => views::report::render(frame, app, area),
        Screen::Editor => views::editor::render(frame, app, area),
        Screen::Profile => views::profile::render(frame, app, area),
    }

    if let Some((kind, ref msg)) = app.toast {
        render_toast(frame, kind, msg);
    }
}

fn render_toast(frame: &mut Frame, kind: ToastKind, msg: &str) {
    use ratatui::{
        layout::{Constraint, Flex, Layout},
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph, Wrap},
    };

    let (color, icon, title) = match kind {
        ToastKind::Error => (Color::Red, "✗", " Error "),
        ToastKind::Info => (Color::Green, "✓", " Info "),
    };

    let area = frame.area();
    let [toast_area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(area);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(toast_area);

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(format!(" {icon} {msg}"))
        .style(Style::default().fg(Color::White).bg(color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    frame.render_widget(toast, toast_area);
}

/// Async worker loop: runs each action on its own task so a slow request
/// never holds up the next one. Stale report responses are dropped by the UI.
async fn worker_loop(
    api: ApiClient,
    action_rx: &mut mpsc::UnboundedReceiver<AsyncAction>,
    result_tx: mpsc::UnboundedSender<AsyncResult>,
) {
    while let Some(action) = action_rx.recv().await {
        if result_tx.is_closed() {
            break; // UI closed
        }
        let api = api.clone();
        let tx = result_tx.clone();
        tokio::spawn(async move {
            perform(&api, action, &tx).await;
        });
    }
}

async fn perform(api: &ApiClient, action: AsyncAction, tx: &mpsc::UnboundedSender<AsyncResult>) {
    let result = match action {
        AsyncAction::Login { email, password } => {
            match auth::login(api, api.session().as_ref(), &email, &password).await {
                Ok(_) => match api.session().get() {
                    Ok(session) => AsyncResult::LoggedIn(session),
                    Err(e) => AsyncResult::Error(format!("Failed to read session: {e}")),
                },
                Err(e) => AsyncResult::AuthFailed(e.to_string()),
            }
        }
        AsyncAction::Register {
            name,
            email,
            password,
        } => match auth::register(api, &name, &email, &password).await {
            Ok(message) => AsyncResult::Registered(message),
            Err(e) => AsyncResult::AuthFailed(e.to_string()),
        },
        AsyncAction::Logout => match auth::logout(api.session().as_ref()) {
            Ok(()) => AsyncResult::LoggedOut,
            Err(e) => AsyncResult::Error(format!("Failed to log out: {e}")),
        },
        AsyncAction::LoadHome { period } => {
            // Each half renders independently, so send them separately.
            let (today, recommendation) =
                tokio::join!(api.today_mood(), api.recommendation(period));
            let _ = tx.send(AsyncResult::HomeToday(today));
            AsyncResult::HomeRecommendation(recommendation)
        }
        AsyncAction::LoadReport(request) => {
            let result = request.fetch(api).await;
            AsyncResult::Report { request, result }
        }
        AsyncAction::LoadEditor => AsyncResult::EditorLoaded(api.today_mood().await),
        AsyncAction::SubmitMood(request) => AsyncResult::MoodSubmitted(request.send(api).await),
    };
    let _ = tx.send(result);
}
