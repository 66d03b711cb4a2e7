//! Today's-mood editor.
//!
//! The editor loads today's record first. If one exists the form is
//! pre-populated and saving updates that record by id; otherwise saving
//! creates a new record dated today. The pure `begin_submit` /
//! `finish_submit` pair lets a UI run the request elsewhere, and `load` /
//! `submit` drive the same steps directly against a [`MoodApi`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::MoodApi;
use crate::error::{MoodError, Result};
use crate::model::{MoodCategory, MoodInput, MoodRecord};

pub const SAVE_FAILED: &str = "Failed to save mood. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Pick a mood colour first.")]
    NoCategory,

    #[error("You have already filled in today's mood. Edit it from the home screen instead.")]
    AlreadyFilled,

    #[error("A save is already in progress.")]
    Busy,

    #[error("Still loading today's mood.")]
    NotReady,

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Create,
    Update(MoodRecord),
}

/// The request a submission turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(MoodInput),
    Update { id: String, input: MoodInput },
}

impl SubmitRequest {
    pub fn input(&self) -> &MoodInput {
        match self {
            Self::Create(input) | Self::Update { input, .. } => input,
        }
    }

    /// Issue the request.
    pub async fn send<A: MoodApi>(&self, api: &A) -> Result<Option<MoodRecord>> {
        match self {
            Self::Create(input) => api.create_mood(input).await,
            Self::Update { id, input } => api.update_mood(id, input).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

impl SubmitOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Mood saved!",
            Self::Updated => "Mood updated!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoodEditor {
    phase: Phase,
    mode: EditorMode,
    selected: Option<MoodCategory>,
    note: String,
    load_error: Option<String>,
    pending: Option<SubmitRequest>,
}

impl Default for MoodEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodEditor {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            mode: EditorMode::Create,
            selected: None,
            note: String::new(),
            load_error: None,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, EditorMode::Update(_))
    }

    pub fn selected(&self) -> Option<MoodCategory> {
        self.selected
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Why loading today's record failed, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Apply the result of fetching today's record.
    /// Ignored while a save is in flight; the save's result wins.
    pub fn on_loaded(&mut self, result: Result<Option<MoodRecord>>) {
        if self.phase == Phase::Submitting {
            tracing::debug!("ignoring load result during submit");
            return;
        }
        self.phase = Phase::Idle;
        match result {
            Ok(Some(record)) => {
                self.selected =
                    MoodCategory::from_color(&record.color).or_else(|| record.category());
                self.note = record.note.clone().unwrap_or_default();
                self.mode = EditorMode::Update(record);
                self.load_error = None;
            }
            Ok(None) => {
                self.selected = None;
                self.note.clear();
                self.mode = EditorMode::Create;
                self.load_error = None;
            }
            Err(e) => {
                tracing::warn!("failed to load today's mood: {e}");
                self.mode = EditorMode::Create;
                self.load_error = Some(e.to_string());
            }
        }
    }

    pub fn select(&mut self, category: MoodCategory) {
        self.selected = Some(category);
    }

    /// Move the selection by `delta` places, wrapping around.
    pub fn cycle_selection(&mut self, delta: i32) {
        let len = MoodCategory::ALL.len() as i32;
        let next = match self.selected {
            Some(current) => (current.index() as i32 + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected = Some(MoodCategory::ALL[next as usize]);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn push_note_char(&mut self, c: char) {
        self.note.push(c);
    }

    pub fn pop_note_char(&mut self) {
        self.note.pop();
    }

    /// Validate the form and build the request to send.
    pub fn begin_submit(&mut self, today: NaiveDate) -> std::result::Result<SubmitRequest, EditorError> {
        match self.phase {
            Phase::Submitting => return Err(EditorError::Busy),
            Phase::Loading => return Err(EditorError::NotReady),
            Phase::Idle => {}
        }
        let category = self.selected.ok_or(EditorError::NoCategory)?;

        let request = match &self.mode {
            // A record created without a response body has no id to update by.
            EditorMode::Update(record) if !record.mood_id.is_empty() => SubmitRequest::Update {
                id: record.mood_id.clone(),
                input: MoodInput::new(record.date, category, self.note.clone()),
            },
            _ => SubmitRequest::Create(MoodInput::new(today, category, self.note.clone())),
        };

        tracing::debug!(mood = category.label(), update = self.is_update(), "submitting mood");
        self.phase = Phase::Submitting;
        self.pending = Some(request.clone());
        Ok(request)
    }

    /// Apply the result of the request returned by [`Self::begin_submit`].
    pub fn finish_submit(
        &mut self,
        result: Result<Option<MoodRecord>>,
    ) -> std::result::Result<SubmitOutcome, EditorError> {
        self.phase = Phase::Idle;
        let Some(request) = self.pending.take() else {
            return Err(EditorError::Failed(SAVE_FAILED.to_string()));
        };

        match result {
            Ok(written) => {
                let outcome = match request {
                    SubmitRequest::Update { .. } => SubmitOutcome::Updated,
                    SubmitRequest::Create(_) => SubmitOutcome::Created,
                };
                let record = written.unwrap_or_else(|| self.assumed_record(&request));
                tracing::info!(date = %record.date, mood = %record.mood, "{}", outcome.message());
                self.mode = EditorMode::Update(record);
                Ok(outcome)
            }
            Err(e) => Err(submit_error(e)),
        }
    }

    /// What the server is assumed to hold when a write returns no body.
    fn assumed_record(&self, request: &SubmitRequest) -> MoodRecord {
        let input = request.input();
        let mood_id = match (request, &self.mode) {
            (SubmitRequest::Update { id, .. }, _) => id.clone(),
            (SubmitRequest::Create(_), EditorMode::Update(previous)) => previous.mood_id.clone(),
            (SubmitRequest::Create(_), EditorMode::Create) => String::new(),
        };
        MoodRecord {
            mood_id,
            date: input.date,
            mood: input.mood.clone(),
            color: input.color.clone(),
            note: Some(input.note.clone()),
        }
    }

    /// Fetch today's record and apply it.
    pub async fn load<A: MoodApi>(&mut self, api: &A) {
        if self.phase == Phase::Submitting {
            return;
        }
        self.phase = Phase::Loading;
        let result = api.today_mood().await;
        self.on_loaded(result);
    }

    /// Validate, send, and apply the result in one go.
    pub async fn submit<A: MoodApi>(
        &mut self,
        api: &A,
        today: NaiveDate,
    ) -> std::result::Result<SubmitOutcome, EditorError> {
        let request = self.begin_submit(today)?;
        let result = request.send(api).await;
        self.finish_submit(result)
    }
}

fn submit_error(e: MoodError) -> EditorError {
    if e.is_mood_conflict() {
        tracing::info!("mood for today already exists");
        return EditorError::AlreadyFilled;
    }
    tracing::warn!("failed to save mood: {e}");
    EditorError::Failed(e.user_message(SAVE_FAILED))
}
