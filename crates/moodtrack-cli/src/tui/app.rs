use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use moodtrack_core::config::TuiConfig;
use moodtrack_core::editor::{EditorError, MoodEditor};
use moodtrack_core::error::Result;
use moodtrack_core::model::*;
use moodtrack_core::report::{HomeView, ReportView};
use moodtrack_core::session::Session;

use super::event::{AsyncAction, AsyncResult};

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Login,
    Register,
    Home,
    Report,
    Editor,
    Profile,
}

/// Home, Report and Profile are tabs, in this order.
pub const TABS: [Screen; 3] = [Screen::Home, Screen::Report, Screen::Profile];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Login form: 0 = email, 1 = password.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: usize,
}

/// Register form: 0 = name, 1 = email, 2 = password.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub field: usize,
}

/// Central application state.
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    /// An auth request is in flight.
    pub busy: bool,
    pub session: Session,
    logout_on_unauthorized: bool,

    // -- Splash --
    pub splash_until: Instant,

    // -- Auth forms --
    pub login: LoginForm,
    pub register: RegisterForm,

    // -- Views --
    pub home: HomeView,
    pub report: ReportView,
    pub report_scroll: u16,
    report_requested: bool,
    pub editor: MoodEditor,
    /// Editor focus: 0 = mood picker, 1 = note.
    pub editor_field: usize,

    // -- Toast --
    pub toast: Option<(ToastKind, String)>,
    pub toast_timer: u8, // ticks remaining
    toast_ticks: u8,
}

impl App {
    pub fn new(session: Session, tui: &TuiConfig, logout_on_unauthorized: bool) -> Self {
        let period = Period::current();
        Self {
            screen: Screen::Splash,
            should_quit: false,
            busy: false,
            session,
            logout_on_unauthorized,

            splash_until: Instant::now() + Duration::from_millis(tui.splash_ms),

            login: LoginForm::default(),
            register: RegisterForm::default(),

            home: HomeView::new(period),
            report: ReportView::new(period),
            report_scroll: 0,
            report_requested: false,
            editor: MoodEditor::new(),
            editor_field: 0,

            toast: None,
            toast_timer: 0,
            toast_ticks: tui.toast_ticks.max(1),
        }
    }

    /// Leave the splash once its time is up, replacing it with Home or Login.
    pub fn tick_splash(&mut self, now: Instant) -> Option<AsyncAction> {
        if self.screen != Screen::Splash || now < self.splash_until {
            return None;
        }
        if self.session.is_authenticated() {
            Some(self.enter_home())
        } else {
            self.screen = Screen::Login;
            None
        }
    }

    fn enter_home(&mut self) -> AsyncAction {
        self.screen = Screen::Home;
        self.home = HomeView::new(Period::current());
        AsyncAction::LoadHome {
            period: self.home.period(),
        }
    }

    fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some((kind, message.into()));
        self.toast_timer = self.toast_ticks;
    }

    /// Route to Login after the server rejected the token.
    fn check_unauthorized<T>(&mut self, result: &Result<T>) -> bool {
        match result {
            Err(e) if e.is_unauthorized() && self.logout_on_unauthorized => {
                self.reset_to_login();
                self.show_toast(ToastKind::Error, SESSION_EXPIRED);
                true
            }
            _ => false,
        }
    }

    fn reset_to_login(&mut self) {
        let period = Period::current();
        self.session = Session::default();
        self.screen = Screen::Login;
        self.login = LoginForm::default();
        self.home = HomeView::new(period);
        self.report = ReportView::new(period);
        self.report_requested = false;
        self.editor = MoodEditor::new();
    }

    /// Process an async result from the worker. May ask for a follow-up action.
    pub fn handle_result(&mut self, result: AsyncResult) -> Option<AsyncAction> {
        match result {
            AsyncResult::LoggedIn(session) => {
                self.busy = false;
                self.session = session;
                self.login = LoginForm::default();
                Some(self.enter_home())
            }
            AsyncResult::Registered(message) => {
                self.busy = false;
                self.login.email = std::mem::take(&mut self.register.email);
                self.register = RegisterForm::default();
                self.login.field = 1;
                self.screen = Screen::Login;
                self.show_toast(ToastKind::Info, message);
                None
            }
            AsyncResult::LoggedOut => {
                self.reset_to_login();
                None
            }
            AsyncResult::AuthFailed(message) => {
                self.busy = false;
                self.show_toast(ToastKind::Error, message);
                None
            }
            AsyncResult::HomeToday(result) => {
                if !self.check_unauthorized(&result) {
                    self.home.apply_today(result);
                }
                None
            }
            AsyncResult::HomeRecommendation(result) => {
                if !self.check_unauthorized(&result) {
                    self.home.apply_recommendation(result);
                }
                None
            }
            AsyncResult::Report { request, result } => {
                if !self.check_unauthorized(&result) && self.report.apply(request, result) {
                    self.report_scroll = 0;
                }
                None
            }
            AsyncResult::EditorLoaded(result) => {
                if !self.check_unauthorized(&result) {
                    self.editor.on_loaded(result);
                }
                None
            }
            AsyncResult::MoodSubmitted(result) => {
                if self.check_unauthorized(&result) {
                    return None;
                }
                match self.editor.finish_submit(result) {
                    Ok(outcome) => {
                        self.show_toast(ToastKind::Info, outcome.message());
                        // The report may now be stale too.
                        self.report_requested = false;
                        Some(self.enter_home())
                    }
                    Err(EditorError::AlreadyFilled) => {
                        self.show_toast(ToastKind::Info, EditorError::AlreadyFilled.to_string());
                        None
                    }
                    Err(e) => {
                        self.show_toast(ToastKind::Error, e.to_string());
                        None
                    }
                }
            }
            AsyncResult::Error(msg) => {
                self.busy = false;
                self.show_toast(ToastKind::Error, msg);
                None
            }
        }
    }

    /// Handle a key event. Returns an optional async action to dispatch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Splash => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
                None
            }
            Screen::Login => self.handle_login(key),
            Screen::Register => self.handle_register(key),
            Screen::Home => self.handle_home(key),
            Screen::Report => self.handle_report(key),
            Screen::Editor => self.handle_editor(key, Local::now().date_naive()),
            Screen::Profile => self.handle_profile(key),
        }
    }

    /// Tab / Shift+Tab between Home, Report and Profile.
    fn switch_tab(&mut self, delta: i32) -> Option<AsyncAction> {
        let current = TABS.iter().position(|s| *s == self.screen).unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(TABS.len() as i32) as usize;
        self.screen = TABS[next];
        if self.screen == Screen::Report && !self.report_requested {
            self.report_requested = true;
            return Some(AsyncAction::LoadReport(self.report.refresh()));
        }
        None
    }

    fn open_editor(&mut self) -> AsyncAction {
        self.editor = MoodEditor::new();
        self.editor_field = 0;
        self.screen = Screen::Editor;
        AsyncAction::LoadEditor
    }

    fn handle_login(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            self.register = RegisterForm::default();
            self.screen = Screen::Register;
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.login.field = (self.login.field + 1) % 2;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login.field = (self.login.field + 1) % 2;
                None
            }
            KeyCode::Enter => {
                if self.busy {
                    return None;
                }
                self.busy = true;
                Some(AsyncAction::Login {
                    email: self.login.email.clone(),
                    password: self.login.password.clone(),
                })
            }
            KeyCode::Backspace => {
                self.login_field_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                self.login_field_mut().push(c);
                None
            }
            _ => None,
        }
    }

    fn login_field_mut(&mut self) -> &mut String {
        if self.login.field == 0 {
            &mut self.login.email
        } else {
            &mut self.login.password
        }
    }

    fn handle_register(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Login;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.register.field = (self.register.field + 1) % 3;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.register.field = (self.register.field + 2) % 3;
                None
            }
            KeyCode::Enter => {
                if self.busy {
                    return None;
                }
                self.busy = true;
                Some(AsyncAction::Register {
                    name: self.register.name.clone(),
                    email: self.register.email.clone(),
                    password: self.register.password.clone(),
                })
            }
            KeyCode::Backspace => {
                self.register_field_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                self.register_field_mut().push(c);
                None
            }
            _ => None,
        }
    }

    fn register_field_mut(&mut self) -> &mut String {
        match self.register.field {
            0 => &mut self.register.name,
            1 => &mut self.register.email,
            _ => &mut self.register.password,
        }
    }

    fn handle_home(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => Some(self.open_editor()),
            KeyCode::Char('r') => {
                self.home.begin_refresh();
                Some(AsyncAction::LoadHome {
                    period: self.home.period(),
                })
            }
            KeyCode::Tab => self.switch_tab(1),
            KeyCode::BackTab => self.switch_tab(-1),
            _ => None,
        }
    }

    fn handle_report(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.report.prev_month().map(AsyncAction::LoadReport)
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.report.next_month().map(AsyncAction::LoadReport)
            }
            KeyCode::Char('r') => Some(AsyncAction::LoadReport(self.report.refresh())),
            KeyCode::Char('j') | KeyCode::Down => {
                self.report_scroll = self.report_scroll.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.report_scroll = self.report_scroll.saturating_sub(1);
                None
            }
            KeyCode::Tab => self.switch_tab(1),
            KeyCode::BackTab => self.switch_tab(-1),
            _ => None,
        }
    }

    fn handle_editor(&mut self, key: KeyEvent, today: NaiveDate) -> Option<AsyncAction> {
        let submit = (key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('s'))
            || (self.editor_field == 0 && key.code == KeyCode::Enter);
        if submit {
            return match self.editor.begin_submit(today) {
                Ok(request) => Some(AsyncAction::SubmitMood(request)),
                Err(e) => {
                    self.show_toast(ToastKind::Error, e.to_string());
                    None
                }
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.editor_field = (self.editor_field + 1) % 2;
                None
            }
            KeyCode::Left | KeyCode::Up if self.editor_field == 0 => {
                self.editor.cycle_selection(-1);
                None
            }
            KeyCode::Right | KeyCode::Down if self.editor_field == 0 => {
                self.editor.cycle_selection(1);
                None
            }
            KeyCode::Char(c) if self.editor_field == 0 => {
                if let Some(category) = c
                    .to_digit(10)
                    .and_then(|d| MoodCategory::from_weight(d as u8))
                {
                    self.editor.select(category);
                }
                None
            }
            KeyCode::Char(c) => {
                self.editor.push_note_char(c);
                None
            }
            KeyCode::Enter => {
                self.editor.push_note_char('\n');
                None
            }
            KeyCode::Backspace if self.editor_field == 1 => {
                self.editor.pop_note_char();
                None
            }
            _ => None,
        }
    }

    fn handle_profile(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('o') => Some(AsyncAction::Logout),
            KeyCode::Tab => self.switch_tab(1),
            KeyCode::BackTab => self.switch_tab(-1),
            _ => None,
        }
    }

    /// Tick the toast timer down.
    pub fn tick_toast(&mut self) {
        if self.toast_timer > 0 {
            self.toast_timer -= 1;
            if self.toast_timer == 0 {
                self.toast = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtrack_core::error::MoodError;
    use moodtrack_core::report::FetchState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn tui_config() -> TuiConfig {
        TuiConfig {
            splash_ms: 0,
            toast_ticks: 100,
        }
    }

    fn logged_in() -> App {
        let session = Session {
            token: Some("tok".into()),
            user: Some(User::new("Rina", "rina@example.com")),
        };
        App::new(session, &tui_config(), true)
    }

    fn logged_out() -> App {
        App::new(Session::default(), &tui_config(), true)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    }

    fn typed(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_splash_routes_to_home_with_session() {
        let mut app = logged_in();
        assert_eq!(app.screen, Screen::Splash);
        let action = app.tick_splash(Instant::now());
        assert_eq!(app.screen, Screen::Home);
        assert!(matches!(action, Some(AsyncAction::LoadHome { .. })));
    }

    #[test]
    fn test_splash_routes_to_login_without_session() {
        let mut app = logged_out();
        assert!(app.tick_splash(Instant::now()).is_none());
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_splash_waits() {
        let mut app = App::new(
            Session::default(),
            &TuiConfig {
                splash_ms: 60_000,
                toast_ticks: 100,
            },
            true,
        );
        assert!(app.tick_splash(Instant::now()).is_none());
        assert_eq!(app.screen, Screen::Splash);
    }

    #[test]
    fn test_login_form_submits_fields() {
        let mut app = logged_out();
        app.tick_splash(Instant::now());
        typed(&mut app, "rina@example.com");
        app.handle_key(key(KeyCode::Tab));
        typed(&mut app, "pw");

        let action = app.handle_key(key(KeyCode::Enter));
        match action {
            Some(AsyncAction::Login { email, password }) => {
                assert_eq!(email, "rina@example.com");
                assert_eq!(password, "pw");
            }
            other => panic!("expected login action, got {other:?}"),
        }
        assert!(app.busy);
        // A second Enter while busy does nothing.
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_login_success_replaces_with_home() {
        let mut app = logged_out();
        app.tick_splash(Instant::now());
        let action = app.handle_result(AsyncResult::LoggedIn(Session {
            token: Some("tok".into()),
            user: Some(User::new("Rina", "r@x")),
        }));
        assert_eq!(app.screen, Screen::Home);
        assert!(app.session.is_authenticated());
        assert_eq!(app.session.display_name(), "Rina");
        assert!(matches!(action, Some(AsyncAction::LoadHome { .. })));
    }

    #[test]
    fn test_login_to_home_with_nothing_today() {
        use moodtrack_core::report::TODAY_MISSING;
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = logged_out();
        app.tick_splash(Instant::now());
        typed(&mut app, "rina@example.com");
        app.handle_key(key(KeyCode::Tab));
        typed(&mut app, "pw");
        assert!(matches!(
            app.handle_key(key(KeyCode::Enter)),
            Some(AsyncAction::Login { .. })
        ));

        let follow_up = app.handle_result(AsyncResult::LoggedIn(Session {
            token: Some("tok".into()),
            user: Some(User::new("Rina", "rina@example.com")),
        }));
        let Some(AsyncAction::LoadHome { period }) = follow_up else {
            panic!("expected home load");
        };
        assert_eq!(period, app.home.period());
        assert_eq!(app.screen, Screen::Home);

        app.handle_result(AsyncResult::HomeToday(Ok(None)));
        app.handle_result(AsyncResult::HomeRecommendation(Ok(None)));
        assert_eq!(app.home.today(), &FetchState::Empty);
        assert_eq!(app.home.editor_label(), "Fill in today's mood");

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| crate::tui::views::home::render(frame, &app, frame.area()))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains(TODAY_MISSING));
        assert!(screen.contains("Fill in today's mood"));
        assert!(screen.contains("Rina"));

        assert!(matches!(
            app.handle_key(key(KeyCode::Char('e'))),
            Some(AsyncAction::LoadEditor)
        ));
        app.handle_result(AsyncResult::EditorLoaded(Ok(None)));
        assert_eq!(app.screen, Screen::Editor);
        assert!(!app.editor.is_update());
    }

    #[test]
    fn test_submit_before_editor_loaded_is_refused() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(key(KeyCode::Char('4')));

        assert!(app.handle_editor(key(KeyCode::Enter), today()).is_none());
        assert_eq!(
            app.toast,
            Some((ToastKind::Error, "Still loading today's mood.".to_string()))
        );
    }

    #[test]
    fn test_login_failure_shows_toast() {
        let mut app = logged_out();
        app.tick_splash(Instant::now());
        app.busy = true;
        app.handle_result(AsyncResult::AuthFailed("Login failed!".into()));
        assert!(!app.busy);
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(
            app.toast,
            Some((ToastKind::Error, "Login failed!".to_string()))
        );
    }

    #[test]
    fn test_register_flow_returns_to_login() {
        let mut app = logged_out();
        app.tick_splash(Instant::now());
        app.handle_key(ctrl('r'));
        assert_eq!(app.screen, Screen::Register);

        typed(&mut app, "Rina");
        app.handle_key(key(KeyCode::Tab));
        typed(&mut app, "rina@example.com");
        app.handle_key(key(KeyCode::Tab));
        typed(&mut app, "pw");
        assert!(matches!(
            app.handle_key(key(KeyCode::Enter)),
            Some(AsyncAction::Register { .. })
        ));

        app.handle_result(AsyncResult::Registered("Registration succeeded, please log in"));
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.login.email, "rina@example.com");
        assert!(!app.session.is_authenticated());
    }

    #[test]
    fn test_tabs_cycle_and_load_report_once() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());

        let action = app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Report);
        assert!(matches!(action, Some(AsyncAction::LoadReport(_))));

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Profile);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Home);

        // Coming back does not refetch.
        assert!(app.handle_key(key(KeyCode::BackTab)).is_none());
        assert_eq!(app.screen, Screen::Profile);
        assert!(app.handle_key(key(KeyCode::BackTab)).is_none());
        assert_eq!(app.screen, Screen::Report);
    }

    #[test]
    fn test_month_change_issues_one_fetch_and_drops_stale() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());
        let Some(AsyncAction::LoadReport(first)) = app.handle_key(key(KeyCode::Tab)) else {
            panic!("expected report load");
        };
        let Some(AsyncAction::LoadReport(second)) = app.handle_key(key(KeyCode::Right)) else {
            panic!("expected one fetch for the next month");
        };
        assert_eq!(second.period, first.period.next());

        app.handle_result(AsyncResult::Report {
            request: first,
            result: Ok(Vec::new()),
        });
        assert!(app.report.state().is_loading());

        app.handle_result(AsyncResult::Report {
            request: second,
            result: Ok(Vec::new()),
        });
        assert_eq!(app.report.state(), &FetchState::Empty);
    }

    #[test]
    fn test_unauthorized_routes_to_login() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());
        app.handle_result(AsyncResult::HomeToday(Err(MoodError::Unauthorized {
            message: None,
        })));
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert_eq!(
            app.toast,
            Some((ToastKind::Error, SESSION_EXPIRED.to_string()))
        );
    }

    #[test]
    fn test_unauthorized_kept_when_disabled() {
        let session = Session {
            token: Some("tok".into()),
            user: None,
        };
        let mut app = App::new(session, &tui_config(), false);
        app.tick_splash(Instant::now());
        app.handle_result(AsyncResult::HomeToday(Err(MoodError::Unauthorized {
            message: None,
        })));
        assert_eq!(app.screen, Screen::Home);
        assert!(matches!(app.home.today(), FetchState::Failed(_)));
    }

    #[test]
    fn test_editor_without_category_does_not_submit() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('e'))),
            Some(AsyncAction::LoadEditor)
        ));
        app.handle_result(AsyncResult::EditorLoaded(Ok(None)));

        assert!(app.handle_editor(key(KeyCode::Enter), today()).is_none());
        assert_eq!(
            app.toast,
            Some((ToastKind::Error, "Pick a mood colour first.".to_string()))
        );
    }

    #[test]
    fn test_editor_submit_then_home() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_result(AsyncResult::EditorLoaded(Ok(None)));

        app.handle_key(key(KeyCode::Char('4')));
        app.handle_key(key(KeyCode::Tab));
        typed(&mut app, "ok");
        assert_eq!(app.editor.note(), "ok");

        let action = app.handle_editor(ctrl('s'), today());
        let Some(AsyncAction::SubmitMood(request)) = action else {
            panic!("expected submit");
        };
        assert_eq!(request.input().mood, "Senang");
        assert_eq!(request.input().date, today());

        let follow_up = app.handle_result(AsyncResult::MoodSubmitted(Ok(None)));
        assert_eq!(app.screen, Screen::Home);
        assert!(matches!(follow_up, Some(AsyncAction::LoadHome { .. })));
        assert_eq!(app.toast, Some((ToastKind::Info, "Mood saved!".to_string())));
    }

    #[test]
    fn test_logout_from_profile() {
        let mut app = logged_in();
        app.tick_splash(Instant::now());
        app.screen = Screen::Profile;
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('o'))),
            Some(AsyncAction::Logout)
        ));
        app.handle_result(AsyncResult::LoggedOut);
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = logged_out();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_toast_timer() {
        let mut app = logged_out();
        app.handle_result(AsyncResult::Error("test error".into()));
        assert!(app.toast.is_some());
        assert_eq!(app.toast_timer, 100);

        for _ in 0..99 {
            app.tick_toast();
        }
        assert!(app.toast.is_some());

        app.tick_toast();
        assert!(app.toast.is_none());
        assert_eq!(app.toast_timer, 0);
    }
}
