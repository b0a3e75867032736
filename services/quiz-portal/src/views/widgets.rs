//! Dashboard widgets
//!
//! View models for the macros in `widgets.html`. Percentages are clamped to
//! 100 as they are serialized.

use serde::{Serialize, Serializer};

/// Accent palette shared by the cards. Serializes to its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Indigo,
    Emerald,
    Amber,
    Rose,
    Blue,
    Slate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    pub label: String,
    pub up: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub accent: Accent,
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizCard {
    pub title: String,
    pub category: String,
    pub questions: u32,
    pub duration: String,
    pub difficulty: Difficulty,
    /// Percent complete. `None` means not started.
    #[serde(serialize_with = "optional_percent")]
    pub progress: Option<u8>,
    pub cover: Accent,
}

/// Book the visitor is partway through.
#[derive(Debug, Clone, Serialize)]
pub struct ContinueLearning {
    pub title: String,
    pub chapter: String,
    pub category: String,
    #[serde(serialize_with = "percent")]
    pub progress: u8,
    pub time_left: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub points: u32,
    pub accent: Accent,
}

impl LeaderboardEntry {
    /// Podium places get their own colour.
    pub fn new(rank: u32, name: impl Into<String>, points: u32) -> Self {
        let accent = match rank {
            1 => Accent::Amber,
            2 => Accent::Slate,
            3 => Accent::Rose,
            _ => Accent::Indigo,
        };
        Self {
            rank,
            name: name.into(),
            points,
            accent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    pub icon: String,
    pub name: String,
    pub requirement: String,
    pub earned: u32,
    pub required: u32,
}

impl Badge {
    pub fn percent(&self) -> u32 {
        if self.required == 0 {
            return 100;
        }
        (self.earned.min(self.required) * 100) / self.required
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Exam {
    pub month: String,
    #[serde(serialize_with = "two_digits")]
    pub day: u8,
    pub title: String,
    pub time: String,
}

fn percent<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8((*value).min(100))
}

fn optional_percent<S: Serializer>(value: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_some(&(*value).min(100)),
        None => serializer.serialize_none(),
    }
}

fn two_digits<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{value:02}"))
}
