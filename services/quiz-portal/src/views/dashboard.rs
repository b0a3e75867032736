//! Dashboard page
//!
//! Content is static sample data until a quiz backend exists. The only state
//! the page carries is whether the mobile sidebar is open, which lives in the
//! `menu` query parameter.

use serde::Serialize;

use super::View;
use super::widgets::{
    Accent, Badge, ContinueLearning, Difficulty, Exam, LeaderboardEntry, QuizCard, StatCard, Trend,
};

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name: String,
    pub account: String,
    pub weekly_goal_percent: u8,
    pub streak_days: u32,
    pub tokens: u32,
}

impl Profile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub profile: Profile,
    pub stats: Vec<StatCard>,
    pub continue_learning: ContinueLearning,
    pub recommended: Vec<QuizCard>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub badge: Badge,
    pub exams: Vec<Exam>,
}

impl DashboardData {
    pub fn sample() -> Self {
        Self {
            profile: Profile {
                name: "Alex Morgan".into(),
                account: "Student Account".into(),
                weekly_goal_percent: 80,
                streak_days: 12,
                tokens: 2450,
            },
            stats: vec![
                stat("Quizzes Taken", "24", Accent::Indigo, Some(("+3", true))),
                stat("Avg. Score", "86%", Accent::Emerald, Some(("+2.4%", true))),
                stat("Time Spent", "12h 4m", Accent::Amber, Some(("-40m", false))),
                stat("Pending Quizzes", "2", Accent::Rose, None),
            ],
            continue_learning: ContinueLearning {
                title: "Advanced React Patterns".into(),
                chapter: "Chapter 4: Custom Hooks & Composition".into(),
                category: "Web Dev".into(),
                progress: 65,
                time_left: "~15 mins left".into(),
            },
            recommended: vec![
                quiz(
                    "Intro to UI Design",
                    "Design",
                    15,
                    "20m",
                    Difficulty::Easy,
                    None,
                    Accent::Rose,
                ),
                quiz(
                    "TypeScript Generics",
                    "Coding",
                    10,
                    "15m",
                    Difficulty::Hard,
                    None,
                    Accent::Blue,
                ),
                quiz(
                    "World History 101",
                    "History",
                    25,
                    "30m",
                    Difficulty::Medium,
                    Some(30),
                    Accent::Amber,
                ),
                quiz(
                    "Chemistry Basics",
                    "Science",
                    20,
                    "25m",
                    Difficulty::Medium,
                    None,
                    Accent::Emerald,
                ),
            ],
            leaderboard: (1..=4)
                .map(|rank| LeaderboardEntry::new(rank, format!("User {rank}"), 2500 - rank * 150))
                .collect(),
            badge: Badge {
                icon: "\u{1f3af}".into(),
                name: "Sharpshooter".into(),
                requirement: "Score 100% on 3 quizzes".into(),
                earned: 2,
                required: 3,
            },
            exams: vec![
                Exam {
                    month: "Oct".into(),
                    day: 24,
                    title: "Physics Midterm".into(),
                    time: "10:00 AM".into(),
                },
                Exam {
                    month: "Nov".into(),
                    day: 2,
                    title: "History Final".into(),
                    time: "09:00 AM".into(),
                },
            ],
        }
    }
}

fn stat(title: &str, value: &str, accent: Accent, trend: Option<(&str, bool)>) -> StatCard {
    StatCard {
        title: title.into(),
        value: value.into(),
        accent,
        trend: trend.map(|(label, up)| Trend {
            label: label.into(),
            up,
        }),
    }
}

fn quiz(
    title: &str,
    category: &str,
    questions: u32,
    duration: &str,
    difficulty: Difficulty,
    progress: Option<u8>,
    cover: Accent,
) -> QuizCard {
    QuizCard {
        title: title.into(),
        category: category.into(),
        questions,
        duration: duration.into(),
        difficulty,
        progress,
        cover,
    }
}

/// Context for `dashboard.html`.
#[derive(Debug, Serialize)]
pub struct DashboardPage<'a> {
    data: &'a DashboardData,
    menu_open: bool,
    first_name: &'a str,
    initials: String,
    badge_percent: u32,
}

impl<'a> DashboardPage<'a> {
    pub fn new(data: &'a DashboardData, menu_open: bool) -> Self {
        Self {
            data,
            menu_open,
            first_name: data.profile.first_name(),
            initials: data.profile.initials(),
            badge_percent: data.badge.percent(),
        }
    }
}

impl View for DashboardPage<'_> {
    const TEMPLATE: &'static str = "dashboard.html";
}
