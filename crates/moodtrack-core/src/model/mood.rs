use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// The five mood categories, ordered from most to least positive.
///
/// This is the single source of truth for label, weight, and colour. Every
/// screen and the chart read from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodCategory {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 5] = [
        Self::VeryHappy,
        Self::Happy,
        Self::Neutral,
        Self::Sad,
        Self::VerySad,
    ];

    /// Label stored by the backend in the `mood` field.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHappy => "Sangat Senang",
            Self::Happy => "Senang",
            Self::Neutral => "Biasa Saja",
            Self::Sad => "Sedih",
            Self::VerySad => "Sangat Sedih",
        }
    }

    /// Numeric weight used for charting, 5 (best) down to 1.
    pub fn weight(self) -> u8 {
        match self {
            Self::VeryHappy => 5,
            Self::Happy => 4,
            Self::Neutral => 3,
            Self::Sad => 2,
            Self::VerySad => 1,
        }
    }

    /// Hex colour the user picks from; stored alongside the label.
    pub fn color(self) -> &'static str {
        match self {
            Self::VeryHappy => "#4CAF50",
            Self::Happy => "#8BC34A",
            Self::Neutral => "#FFC107",
            Self::Sad => "#FF9800",
            Self::VerySad => "#F44336",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        // The table above only holds well-formed colours.
        hex_to_rgb(self.color()).unwrap_or((0, 0, 0))
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::VeryHappy => "Very happy and full of positive energy.",
            Self::Happy => "Positive mood, feeling comfortable and good.",
            Self::Neutral => "Neutral, neither happy nor sad.",
            Self::Sad => "Low on energy or a little disappointed.",
            Self::VerySad => "Feeling heavy or deeply sad.",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label.trim())
    }

    pub fn from_weight(weight: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.weight() == weight)
    }

    pub fn from_color(color: &str) -> Option<Self> {
        let color = color.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.color().eq_ignore_ascii_case(color))
    }

    /// Position in [`Self::ALL`].
    pub fn index(self) -> usize {
        (5 - self.weight()) as usize
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MoodCategory {
    type Err = String;

    /// Accepts a label (case-insensitive), a weight digit, or a hex colour.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(weight) = s.parse::<u8>() {
            return Self::from_weight(weight).ok_or_else(|| format!("mood weight out of range: {s}"));
        }
        if s.starts_with('#') {
            return Self::from_color(s).ok_or_else(|| format!("unknown mood colour: {s}"));
        }
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown mood: {s}"))
    }
}

impl Serialize for MoodCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for MoodCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown mood: {label}")))
    }
}

/// Chart colour for a weight. Independent of the record's stored colour.
pub fn weight_color(weight: u8) -> &'static str {
    match weight {
        5 => "#4CAF50",
        4 => "#8BC34A",
        3 => "#FFC107",
        2 => "#FF9800",
        _ => "#F44336",
    }
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// One user's mood for one calendar day, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    #[serde(deserialize_with = "de_opaque_id")]
    pub mood_id: String,
    #[serde(deserialize_with = "de_calendar_date")]
    pub date: NaiveDate,
    /// Raw label. Kept as a string so unknown labels still list.
    pub mood: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl MoodRecord {
    pub fn category(&self) -> Option<MoodCategory> {
        MoodCategory::from_label(&self.mood)
    }

    /// The note, with empty treated the same as absent.
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Request body for creating or updating a mood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodInput {
    #[serde(serialize_with = "ser_calendar_date")]
    pub date: NaiveDate,
    pub color: String,
    pub mood: String,
    pub note: String,
}

impl MoodInput {
    pub fn new(date: NaiveDate, category: MoodCategory, note: impl Into<String>) -> Self {
        Self {
            date,
            color: category.color().to_string(),
            mood: category.label().to_string(),
            note: note.into(),
        }
    }
}

fn ser_calendar_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.format("%Y-%m-%d").to_string())
}

/// Accepts `YYYY-MM-DD` or any ISO datetime; keeps the calendar date.
fn de_calendar_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Backends disagree on whether ids are numbers or strings.
fn de_opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
