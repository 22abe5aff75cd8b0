//! Board helpers
//!
//! Formatting and drag-target translation shared by the views. Kept free of
//! signals so they can be tested natively.

use chrono::{Datelike, Duration, NaiveDate};
use leptos_dragdrop::DropTarget;

use crate::models::{BoardSettings, Day, DropPoint, Trip};

pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Local calendar date from the browser clock
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT).ok()
}

pub fn input_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

/// "Jun 10 - Jun 12, 2025", with both years when they differ
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

/// "Tue, Jun 10"
pub fn format_day_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

pub fn trip_length_label(trip: &Trip) -> String {
    let days = (trip.end_date - trip.start_date).num_days() + 1;
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

pub fn capacity_label(day: &Day, settings: &BoardSettings) -> String {
    format!("{}/{}", day.items.len(), settings.max_items_per_day)
}

pub fn is_day_full(day: &Day, settings: &BoardSettings) -> bool {
    day.items.len() >= settings.max_items_per_day
}

/// Dates that would extend the trip by one day on either side; `None` past
/// the end of the calendar
pub fn extension_dates(trip: &Trip) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let one_day = Duration::days(1);
    (
        trip.start_date.checked_sub_signed(one_day),
        trip.end_date.checked_add_signed(one_day),
    )
}

/// Translate a gesture target into the backend's drop point
pub fn drop_point(target: &DropTarget) -> DropPoint {
    match target {
        DropTarget::Item(id) => DropPoint::OnItem(id.clone()),
        DropTarget::Container(id) => DropPoint::OnDay(id.clone()),
    }
}

/// Text for the confirmation shown before a range change drops content
pub fn narrowing_warning(days_removed: usize, items_removed: usize) -> Option<String> {
    if items_removed == 0 {
        return None;
    }
    let days = if days_removed == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days_removed)
    };
    let items = if items_removed == 1 {
        "1 itinerary item".to_string()
    } else {
        format!("{} itinerary items", items_removed)
    };
    Some(format!("The new dates drop {} holding {}. Save again to confirm.", days, items))
}
