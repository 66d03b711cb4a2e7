//! Backend access: the [`MoodApi`] seam, its HTTP implementation, and the
//! login/register/logout flows built on top of it.

pub mod auth;
mod client;
#[cfg(test)]
pub(crate) mod fake;

pub use client::ApiClient;

use std::future::Future;

use crate::error::Result;
use crate::model::{LoginResponse, MoodInput, MoodRecord, Period, Recommendation};

/// One pass-through method per backend endpoint.
///
/// Implementations:
/// - `ApiClient`: JSON over HTTP with bearer auth from the session store
/// - test doubles that record calls instead of hitting the network
pub trait MoodApi: Send + Sync {
    /// `POST /login`.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse>> + Send;

    /// `POST /register`. The payload is whatever the server sends back.
    fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;

    /// `POST /mood/create`.
    fn create_mood(
        &self,
        input: &MoodInput,
    ) -> impl Future<Output = Result<Option<MoodRecord>>> + Send;

    /// `PUT /mood/update/{id}`.
    fn update_mood(
        &self,
        id: &str,
        input: &MoodInput,
    ) -> impl Future<Output = Result<Option<MoodRecord>>> + Send;

    /// `GET /report/today`. `None` when nothing was recorded today.
    fn today_mood(&self) -> impl Future<Output = Result<Option<MoodRecord>>> + Send;

    /// `GET /report/weekly`.
    fn weekly_moods(&self) -> impl Future<Output = Result<Vec<MoodRecord>>> + Send;

    /// `GET /report/monthly?month=&year=`.
    fn monthly_moods(&self, period: Period)
        -> impl Future<Output = Result<Vec<MoodRecord>>> + Send;

    fn recommendation(
        &self,
        period: Period,
    ) -> impl Future<Output = Result<Option<Recommendation>>> + Send;
}
