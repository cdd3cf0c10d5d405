//! Focus session records and task categories.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bucket name used when a stored session carries no category.
pub const OTHER_CATEGORY: &str = "Other";

/// One completed or manually ended focus interval.
///
/// Field names follow the persisted JSON layout (`id`, `category`,
/// `durationSeconds`, `createdAt`, `distractCount`). Records written before
/// `distractCount` existed read back with a count of zero. A `null`
/// category or count reads the same as a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    pub duration_seconds: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distract_count: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Session {
    /// Build a new session with a fresh identifier.
    pub fn new(
        category: impl Into<String>,
        duration_seconds: u64,
        created_at: DateTime<Utc>,
        distract_count: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category: category.into(),
            duration_seconds,
            created_at,
            distract_count,
        }
    }

    /// Category label used for grouping; blank labels fall into [`OTHER_CATEGORY`].
    pub fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            OTHER_CATEGORY
        } else {
            trimmed
        }
    }
}

/// Task category selected before a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Study,
    Work,
    Project,
    Exam,
    Personal,
    /// Free-form label outside the built-in set.
    Custom(String),
}

impl Category {
    /// The built-in categories, in picker order.
    pub const BUILT_IN: [Category; 5] = [
        Category::Study,
        Category::Work,
        Category::Project,
        Category::Exam,
        Category::Personal,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Study => "Study",
            Category::Work => "Work",
            Category::Project => "Project",
            Category::Exam => "Exam",
            Category::Personal => "Personal",
            Category::Custom(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let category = match trimmed.to_ascii_lowercase().as_str() {
            "study" => Category::Study,
            "work" => Category::Work,
            "project" => Category::Project,
            "exam" => Category::Exam,
            "personal" => Category::Personal,
            _ => Category::Custom(trimmed.to_string()),
        };
        Ok(category)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from(raw.as_str()))
    }
}
