//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Itinerary item category (matches backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Flight,
    Transportation,
    Hotel,
    Meal,
    #[default]
    Activity,
    Shopping,
    Note,
    Other,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 8] = [
        ItemCategory::Flight,
        ItemCategory::Transportation,
        ItemCategory::Hotel,
        ItemCategory::Meal,
        ItemCategory::Activity,
        ItemCategory::Shopping,
        ItemCategory::Note,
        ItemCategory::Other,
    ];

    /// Wire name, also used as the `<option>` value
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Flight => "flight",
            ItemCategory::Transportation => "transportation",
            ItemCategory::Hotel => "hotel",
            ItemCategory::Meal => "meal",
            ItemCategory::Activity => "activity",
            ItemCategory::Shopping => "shopping",
            ItemCategory::Note => "note",
            ItemCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Flight => "Flight",
            ItemCategory::Transportation => "Transportation",
            ItemCategory::Hotel => "Hotel",
            ItemCategory::Meal => "Meal",
            ItemCategory::Activity => "Activity",
            ItemCategory::Shopping => "Shopping",
            ItemCategory::Note => "Note",
            ItemCategory::Other => "Other",
        }
    }

    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .unwrap_or(ItemCategory::Other)
    }
}

/// Itinerary item (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub category: ItemCategory,
    pub icon: String,
    pub color: String,
    pub title: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    pub label: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Trip with its generated days (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub days: Vec<Day>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl TripStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Upcoming => "Upcoming",
            TripStatus::Ongoing => "Ongoing",
            TripStatus::Completed => "Completed",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TripStatus::Upcoming => "status-badge upcoming",
            TripStatus::Ongoing => "status-badge ongoing",
            TripStatus::Completed => "status-badge completed",
        }
    }
}

impl Trip {
    pub fn item_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    pub fn status(&self, today: NaiveDate) -> TripStatus {
        if today > self.end_date {
            TripStatus::Completed
        } else if today >= self.start_date {
            TripStatus::Ongoing
        } else {
            TripStatus::Upcoming
        }
    }
}

/// Trip form payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: String,
}

/// New item payload; icon and color fall back to the category's defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub category: ItemCategory,
    pub title: String,
    pub details: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub category: Option<ItemCategory>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPatch {
    pub label: Option<String>,
}

/// Where a dragged item was released (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropPoint {
    OnItem(String),
    OnDay(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateChangePreview {
    pub days_removed: usize,
    pub items_removed: usize,
}

/// Board rules reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSettings {
    pub max_items_per_day: usize,
    pub require_non_empty_day: bool,
    pub warning_dismiss_ms: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            max_items_per_day: 6,
            require_non_empty_day: false,
            warning_dismiss_ms: 3000,
        }
    }
}

/// Backend error (mirrors `DomainError`), plus failures on this side of the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandError {
    NotFound { entity: String, id: String },
    InvalidInput(String),
    DayFull { day_id: String, capacity: usize },
    LastItem { day_id: String },
    NotReady,
    Storage(String),
    Internal(String),
    /// Serialization or IPC failure before reaching the backend's own errors
    Bridge(String),
}

impl CommandError {
    /// Validation problems shown as transient warnings
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            CommandError::InvalidInput(_) | CommandError::DayFull { .. } | CommandError::LastItem { .. }
        )
    }

    pub fn is_missing_trip(&self) -> bool {
        matches!(self, CommandError::NotFound { entity, .. } if entity == "Trip")
    }

    pub fn message(&self) -> String {
        match self {
            CommandError::NotFound { entity, id } => format!("{} '{}' not found", entity, id),
            CommandError::InvalidInput(msg) => msg.clone(),
            CommandError::DayFull { capacity, .. } => {
                format!("A day can hold at most {} items", capacity)
            }
            CommandError::LastItem { .. } => "Each day must have at least one itinerary card.".to_string(),
            CommandError::NotReady => "Trips are still loading".to_string(),
            CommandError::Storage(msg) => format!("Could not save: {}", msg),
            CommandError::Internal(msg) | CommandError::Bridge(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_backend_error_shapes() {
        let full: CommandError =
            serde_json::from_str(r#"{"DayFull":{"day_id":"day-2","capacity":6}}"#).unwrap();
        assert!(full.is_warning());
        assert_eq!(full.message(), "A day can hold at most 6 items");

        let missing: CommandError =
            serde_json::from_str(r#"{"NotFound":{"entity":"Trip","id":"t1"}}"#).unwrap();
        assert!(missing.is_missing_trip());
        assert!(!missing.is_warning());

        let not_ready: CommandError = serde_json::from_str(r#""NotReady""#).unwrap();
        assert_eq!(not_ready, CommandError::NotReady);
    }

    #[test]
    fn test_drop_point_wire_format() {
        let json = serde_json::to_string(&DropPoint::OnDay("day-3".into())).unwrap();
        assert_eq!(json, r#"{"kind":"on_day","id":"day-3"}"#);
    }

    #[test]
    fn test_trip_status() {
        let trip = Trip {
            id: "t1".into(),
            title: "Tokyo".into(),
            start_date: date("2025-05-18"),
            end_date: date("2025-05-20"),
            image_url: String::new(),
            days: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        assert_eq!(trip.status(date("2025-05-01")), TripStatus::Upcoming);
        assert_eq!(trip.status(date("2025-05-20")), TripStatus::Ongoing);
        assert_eq!(trip.status(date("2025-05-21")), TripStatus::Completed);
    }

    #[test]
    fn test_category_values() {
        for category in ItemCategory::ALL {
            assert_eq!(ItemCategory::from_value(category.as_str()), category);
        }
        assert_eq!(ItemCategory::from_value("bogus"), ItemCategory::Other);
    }
}
