//! Home and monthly-report view state.
//!
//! Every fetch lands in a [`FetchState`] so a view can tell "still loading",
//! "nothing there" and "failed" apart.

use chrono::NaiveDate;

use crate::api::MoodApi;
use crate::error::Result;
use crate::model::{weight_color, MoodRecord, Period, Recommendation};

pub const TODAY_MISSING: &str = "You haven't filled in today's mood yet";
pub const NO_NOTE: &str = "No note today";

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> FetchState<T> {
    /// `Ok` values for which `is_empty` holds become [`FetchState::Empty`].
    pub fn from_result(result: Result<T>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(value) if is_empty(&value) => Self::Empty,
            Ok(value) => Self::Ready(value),
            Err(e) => {
                tracing::warn!("fetch failed: {e}");
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn from_option(result: Result<Option<T>>) -> Self {
        match FetchState::from_result(result, Option::is_none) {
            FetchState::Ready(Some(value)) => Self::Ready(value),
            FetchState::Ready(None) | FetchState::Empty => Self::Empty,
            FetchState::Loading => Self::Loading,
            FetchState::Failed(e) => Self::Failed(e),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Stable ascending sort by calendar date.
pub fn sort_by_date(records: &mut [MoodRecord]) {
    records.sort_by_key(|r| r.date);
}

/// One plotted day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Two-digit day of month.
    pub day_label: String,
    pub value: u8,
    pub color: &'static str,
    pub mood: String,
}

/// Chart points in date order. Records with an unknown label are skipped.
pub fn project(records: &[MoodRecord]) -> Vec<ChartPoint> {
    let mut sorted = records.to_vec();
    sort_by_date(&mut sorted);
    sorted
        .into_iter()
        .filter_map(|record| {
            let Some(category) = record.category() else {
                tracing::debug!(mood = %record.mood, date = %record.date, "skipping unknown mood label");
                return None;
            };
            let value = category.weight();
            Some(ChartPoint {
                date: record.date,
                day_label: record.date.format("%d").to_string(),
                value,
                color: weight_color(value),
                mood: record.mood,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub period: Period,
    /// Sorted ascending by date.
    pub records: Vec<MoodRecord>,
    pub points: Vec<ChartPoint>,
}

impl MonthlyReport {
    pub fn new(period: Period, mut records: Vec<MoodRecord>) -> Self {
        sort_by_date(&mut records);
        let points = project(&records);
        Self {
            period,
            records,
            points,
        }
    }

    /// Mean chart value, `None` with nothing charted.
    pub fn average(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let total: u32 = self.points.iter().map(|p| u32::from(p.value)).sum();
        Some(f64::from(total) / self.points.len() as f64)
    }
}

/// A monthly fetch tagged with the selection it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub period: Period,
    generation: u64,
}

impl ReportRequest {
    pub async fn fetch<A: MoodApi>(&self, api: &A) -> Result<Vec<MoodRecord>> {
        api.monthly_moods(self.period).await
    }
}

/// Monthly report screen: the selected period and what was fetched for it.
#[derive(Debug, Clone)]
pub struct ReportView {
    period: Period,
    generation: u64,
    state: FetchState<MonthlyReport>,
}

impl ReportView {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            generation: 0,
            state: FetchState::Loading,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn state(&self) -> &FetchState<MonthlyReport> {
        &self.state
    }

    /// Change month. Issues one request when the period actually changed.
    pub fn select(&mut self, period: Period) -> Option<ReportRequest> {
        if period == self.period {
            return None;
        }
        self.period = period;
        Some(self.refresh())
    }

    pub fn next_month(&mut self) -> Option<ReportRequest> {
        self.select(self.period.next())
    }

    pub fn prev_month(&mut self) -> Option<ReportRequest> {
        self.select(self.period.prev())
    }

    /// Re-fetch the current period. Any request still in flight becomes stale.
    pub fn refresh(&mut self) -> ReportRequest {
        self.generation += 1;
        self.state = FetchState::Loading;
        ReportRequest {
            period: self.period,
            generation: self.generation,
        }
    }

    /// Store a response. Returns `false` when it belongs to an older request.
    pub fn apply(&mut self, request: ReportRequest, result: Result<Vec<MoodRecord>>) -> bool {
        if request.generation != self.generation {
            tracing::debug!(period = %request.period, "discarding stale report response");
            return false;
        }
        let period = request.period;
        self.state = FetchState::from_result(
            result.map(|records| MonthlyReport::new(period, records)),
            |report| report.records.is_empty(),
        );
        true
    }

    /// Refresh and wait for the result.
    pub async fn load<A: MoodApi>(&mut self, api: &A) {
        let request = self.refresh();
        let result = request.fetch(api).await;
        self.apply(request, result);
    }
}

/// Home screen: today's record and the month's recommendation.
#[derive(Debug, Clone)]
pub struct HomeView {
    period: Period,
    today: FetchState<MoodRecord>,
    recommendation: FetchState<Recommendation>,
}

impl HomeView {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            today: FetchState::Loading,
            recommendation: FetchState::Loading,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn today(&self) -> &FetchState<MoodRecord> {
        &self.today
    }

    pub fn recommendation(&self) -> &FetchState<Recommendation> {
        &self.recommendation
    }

    pub fn begin_refresh(&mut self) {
        self.today = FetchState::Loading;
        self.recommendation = FetchState::Loading;
    }

    pub fn apply_today(&mut self, result: Result<Option<MoodRecord>>) {
        self.today = FetchState::from_option(result);
    }

    pub fn apply_recommendation(&mut self, result: Result<Option<Recommendation>>) {
        self.recommendation = FetchState::from_option(result);
    }

    /// Fetch both concurrently. Each result only touches its own state.
    pub async fn refresh<A: MoodApi>(&mut self, api: &A) {
        self.begin_refresh();
        let (today, recommendation) =
            tokio::join!(api.today_mood(), api.recommendation(self.period));
        self.apply_today(today);
        self.apply_recommendation(recommendation);
    }

    /// Label for the button that opens the editor.
    pub fn editor_label(&self) -> &'static str {
        if self.today.ready().is_some() {
            "Edit today's mood"
        } else {
            "Fill in today's mood"
        }
    }
}
