//! Recording `MoodApi` double for unit tests.

use std::sync::Mutex;

use super::MoodApi;
use crate::error::{MoodError, Result};
use crate::model::*;

/// Status and optional server message of a canned failure.
pub(crate) type Failure = (u16, Option<&'static str>);

#[derive(Default)]
pub(crate) struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub login: Option<LoginResponse>,
    pub register_failure: Option<Failure>,
    pub today: Option<MoodRecord>,
    pub today_failure: Option<Failure>,
    pub written: Option<MoodRecord>,
    pub write_failure: Option<Failure>,
    pub monthly: Vec<MoodRecord>,
    pub recommendation: Option<Recommendation>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn fail(failure: Option<Failure>) -> Result<()> {
    match failure {
        Some((status, message)) => Err(MoodError::Api {
            status,
            message: message.map(str::to_string),
        }),
        None => Ok(()),
    }
}

impl MoodApi for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse> {
        self.record(format!("login {email}"));
        self.login.clone().ok_or(MoodError::Unauthorized {
            message: Some("Invalid credentials".into()),
        })
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> Result<serde_json::Value> {
        self.record(format!("register {name} {email}"));
        fail(self.register_failure)?;
        Ok(serde_json::json!({"name": name, "email": email}))
    }

    async fn create_mood(&self, input: &MoodInput) -> Result<Option<MoodRecord>> {
        self.record(format!("create {} {}", input.date, input.mood));
        fail(self.write_failure)?;
        Ok(self.written.clone())
    }

    async fn update_mood(&self, id: &str, input: &MoodInput) -> Result<Option<MoodRecord>> {
        self.record(format!("update {id} {} {}", input.date, input.mood));
        fail(self.write_failure)?;
        Ok(self.written.clone())
    }

    async fn today_mood(&self) -> Result<Option<MoodRecord>> {
        self.record("today".into());
        fail(self.today_failure)?;
        Ok(self.today.clone())
    }

    async fn weekly_moods(&self) -> Result<Vec<MoodRecord>> {
        self.record("weekly".into());
        Ok(self.monthly.clone())
    }

    async fn monthly_moods(&self, period: Period) -> Result<Vec<MoodRecord>> {
        self.record(format!("monthly {}/{}", period.month, period.year));
        Ok(self.monthly.clone())
    }

    async fn recommendation(&self, period: Period) -> Result<Option<Recommendation>> {
        self.record(format!("recommendation {}/{}", period.month, period.year));
        Ok(self.recommendation.clone())
    }
}
