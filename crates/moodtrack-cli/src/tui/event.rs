use moodtrack_core::editor::SubmitRequest;
use moodtrack_core::error::Result;
use moodtrack_core::model::*;
use moodtrack_core::report::ReportRequest;
use moodtrack_core::session::Session;

/// Actions the UI sends to the async worker task.
#[derive(Debug)]
pub enum AsyncAction {
    Login { email: String, password: String },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,
    /// Today's mood and the month's recommendation, fetched concurrently.
    LoadHome { period: Period },
    LoadReport(ReportRequest),
    /// Fetch today's record for the editor.
    LoadEditor,
    SubmitMood(SubmitRequest),
}

/// Results the async worker sends back to the UI.
#[derive(Debug)]
pub enum AsyncResult {
    /// The session as stored after a successful login.
    LoggedIn(Session),
    Registered(&'static str),
    LoggedOut,
    /// Login or registration failed; the message is ready to show.
    AuthFailed(String),
    HomeToday(Result<Option<MoodRecord>>),
    HomeRecommendation(Result<Option<Recommendation>>),
    Report {
        request: ReportRequest,
        result: Result<Vec<MoodRecord>>,
    },
    EditorLoaded(Result<Option<MoodRecord>>),
    MoodSubmitted(Result<Option<MoodRecord>>),
    /// An error occurred during an async operation.
    Error(String),
}
