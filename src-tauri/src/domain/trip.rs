//! Trip, Day and Item Entities
//!
//! A trip spans an inclusive date range; each day of the range owns an
//! ordered list of itinerary items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Longest range a trip may span
pub const MAX_TRIP_DAYS: i64 = 366;

/// Itinerary item category
///
/// Written as its lowercase name. Reading is lenient so rows saved with older
/// or hand-edited category names still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
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
    #[cfg(test)]
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

    /// Unknown names become `Other`
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight" => ItemCategory::Flight,
            "transportation" | "transport" | "train" => ItemCategory::Transportation,
            "hotel" => ItemCategory::Hotel,
            "meal" | "restaurant" | "food" => ItemCategory::Meal,
            "activity" => ItemCategory::Activity,
            "shopping" => ItemCategory::Shopping,
            "note" => ItemCategory::Note,
            _ => ItemCategory::Other,
        }
    }

    /// Default (icon, color) pair for cards of this category
    pub fn default_style(&self) -> (&'static str, &'static str) {
        match self {
            ItemCategory::Flight => ("plane-departure", "blue"),
            ItemCategory::Transportation => ("train", "sky"),
            ItemCategory::Hotel => ("bed", "pink"),
            ItemCategory::Meal => ("utensils", "orange"),
            ItemCategory::Activity => ("map-marker", "green"),
            ItemCategory::Shopping => ("shopping-bag", "purple"),
            ItemCategory::Note => ("sticky-note", "yellow"),
            ItemCategory::Other => ("map-marker", "gray"),
        }
    }
}

impl From<String> for ItemCategory {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

/// A single itinerary entry
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

impl Item {
    /// Build an item from a validated draft, filling in the category's style
    pub fn from_draft(id: String, draft: ItemDraft) -> Self {
        let (icon, color) = draft.category.default_style();
        Self {
            id,
            category: draft.category,
            icon: draft.icon.unwrap_or_else(|| icon.to_string()),
            color: draft.color.unwrap_or_else(|| color.to_string()),
            title: draft.title.trim().to_string(),
            details: draft.details,
        }
    }

    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(category) = patch.category {
            // Restyle only if the card still wears the old category's defaults
            let (old_icon, old_color) = self.category.default_style();
            let (new_icon, new_color) = category.default_style();
            if self.icon == old_icon {
                self.icon = new_icon.to_string();
            }
            if self.color == old_color {
                self.color = new_color.to_string();
            }
            self.category = category;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
    }
}

/// One calendar date within a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// Positional id, `day-<n>`
    pub id: String,
    /// Display label, `Day <n>`
    pub label: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Day {
    /// `ordinal` is 1-based
    pub fn new(ordinal: usize, date: NaiveDate) -> Self {
        Self {
            id: day_id(ordinal),
            label: day_label(ordinal),
            date,
            items: Vec::new(),
        }
    }

    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }
}

pub fn day_id(ordinal: usize) -> String {
    format!("day-{}", ordinal)
}

pub fn day_label(ordinal: usize) -> String {
    format!("Day {}", ordinal)
}

/// A user-owned trip
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

impl Trip {
    pub fn day_mut(&mut self, day_id: &str) -> DomainResult<&mut Day> {
        self.days
            .iter_mut()
            .find(|d| d.id == day_id)
            .ok_or_else(|| DomainError::not_found("Day", day_id))
    }

    #[cfg(test)]
    pub fn item_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    /// Days cover every date of the range once, ascending, ids positional
    #[cfg(test)]
    pub fn days_consistent(&self) -> bool {
        let expected = (self.end_date - self.start_date).num_days() + 1;
        if self.days.len() as i64 != expected {
            return false;
        }
        self.days.iter().enumerate().all(|(i, day)| {
            day.date == self.start_date + chrono::Duration::days(i as i64) && day.id == day_id(i + 1)
        })
    }
}

impl Entity for Trip {
    type Id = String;
    const KIND: &'static str = "Trip";

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Form payload for creating or editing a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub image_url: String,
}

impl TripDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::invalid("Trip title is required"));
        }
        if self.start_date > self.end_date {
            return Err(DomainError::invalid("Start date must not be after end date"));
        }
        if (self.end_date - self.start_date).num_days() + 1 > MAX_TRIP_DAYS {
            return Err(DomainError::invalid(format!("A trip can span at most {} days", MAX_TRIP_DAYS)));
        }
        Ok(())
    }
}

/// Form payload for a new item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub category: ItemCategory,
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ItemDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::invalid("Item title is required"));
        }
        Ok(())
    }
}

/// Partial item update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub category: Option<ItemCategory>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
}

impl ItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err(DomainError::invalid("Item title is required"));
        }
        Ok(())
    }
}

/// Partial day update; only the label is editable, ids and dates are derived
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPatch {
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(title: &str, start: &str, end: &str) -> TripDraft {
        TripDraft {
            title: title.to_string(),
            start_date: date(start),
            end_date: date(end),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(ItemCategory::parse_lenient("Restaurant"), ItemCategory::Meal);
        assert_eq!(ItemCategory::parse_lenient("HOTEL"), ItemCategory::Hotel);
        assert_eq!(ItemCategory::parse_lenient("spaceship"), ItemCategory::Other);
        for category in ItemCategory::ALL {
            assert_eq!(ItemCategory::parse_lenient(category.as_str()), category);
        }
    }

    #[test]
    fn test_stored_item_with_legacy_category() {
        let item: Item = serde_json::from_str(
            r#"{"id":"i1","category":"Restaurant","icon":"utensils","color":"orange","title":"Dinner"}"#,
        )
        .unwrap();
        assert_eq!(item.category, ItemCategory::Meal);
        assert_eq!(serde_json::to_value(item.category).unwrap(), "meal");
    }

    #[test]
    fn test_item_from_draft_uses_category_style() {
        let item = Item::from_draft(
            "i1".into(),
            ItemDraft {
                category: ItemCategory::Hotel,
                title: "  Check-in ".into(),
                details: String::new(),
                icon: None,
                color: None,
            },
        );
        assert_eq!(item.icon, "bed");
        assert_eq!(item.color, "pink");
        assert_eq!(item.title, "Check-in");
    }

    #[test]
    fn test_patch_restyles_default_styled_item() {
        let mut item = Item::from_draft(
            "i1".into(),
            ItemDraft {
                category: ItemCategory::Activity,
                title: "Walk".into(),
                details: String::new(),
                icon: None,
                color: Some("teal".into()),
            },
        );
        item.apply(ItemPatch {
            category: Some(ItemCategory::Meal),
            ..Default::default()
        });
        assert_eq!(item.icon, "utensils");
        // Custom colour survives the category change
        assert_eq!(item.color, "teal");
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft("Tokyo", "2025-05-18", "2025-05-25").validate().is_ok());
        assert!(draft("Tokyo", "2025-05-18", "2025-05-18").validate().is_ok());
        assert!(draft("  ", "2025-05-18", "2025-05-25").validate().is_err());
        assert!(draft("Tokyo", "2025-05-26", "2025-05-25").validate().is_err());
        assert!(draft("Year", "2025-01-01", "2026-06-01").validate().is_err());
    }

    #[test]
    fn test_day_serializes_date_as_iso() {
        let day = Day::new(3, date("2025-06-12"));
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["id"], "day-3");
        assert_eq!(json["label"], "Day 3");
        assert_eq!(json["date"], "2025-06-12");
    }
}
