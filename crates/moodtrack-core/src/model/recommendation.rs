use serde::{Deserialize, Deserializer, Serialize};

/// Server-computed monthly summary. The client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub average_mood: f64,
    #[serde(default, alias = "low_moood_days")]
    pub low_mood_days: u32,
    #[serde(default)]
    pub level: MoodLevel,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLevel {
    Good,
    Neutral,
    #[default]
    Bad,
}

impl MoodLevel {
    /// Card background colour.
    pub fn background(self) -> &'static str {
        match self {
            Self::Good => "#ECFDF5",
            Self::Neutral => "#FFFBEB",
            Self::Bad => "#FEF2F2",
        }
    }

    /// Card accent (left border) colour.
    pub fn accent(self) -> &'static str {
        match self {
            Self::Good => "#10B981",
            Self::Neutral => "#F59E0B",
            Self::Bad => "#EF4444",
        }
    }
}

impl std::fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Neutral => write!(f, "neutral"),
            Self::Bad => write!(f, "bad"),
        }
    }
}

impl std::str::FromStr for MoodLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "neutral" => Ok(Self::Neutral),
            "bad" => Ok(Self::Bad),
            _ => Err(format!("unknown mood level: {s}")),
        }
    }
}

// Anything that is not "good" or "neutral" renders as bad.
impl<'de> Deserialize<'de> for MoodLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Self::Bad))
    }
}
