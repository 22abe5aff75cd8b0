//! Day Generation
//!
//! Derives a trip's day sequence from its date range and carries existing
//! items over when the range changes. Day ids are positional; content is
//! matched by calendar date.

use chrono::NaiveDate;

use super::trip::{day_id, day_label, Day};

/// One empty day per calendar date of `[start, end]`.
/// `start > end` yields an empty sequence; callers validate ranges.
pub fn generate_days(start: NaiveDate, end: NaiveDate) -> Vec<Day> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .enumerate()
        .map(|(i, date)| Day::new(i + 1, date))
        .collect()
}

/// Merge `existing` content onto a freshly generated sequence.
///
/// A generated day whose date exists in `existing` takes that day's items
/// under the generated id and label. Existing days outside the new range are
/// discarded together with their items.
pub fn reconcile_days(existing: &[Day], generated: Vec<Day>) -> Vec<Day> {
    generated
        .into_iter()
        .map(|fresh| match existing.iter().find(|old| old.date == fresh.date) {
            Some(old) => Day {
                id: fresh.id,
                label: fresh.label,
                date: fresh.date,
                items: old.items.clone(),
            },
            None => fresh,
        })
        .collect()
}

pub fn regenerate_days(existing: &[Day], start: NaiveDate, end: NaiveDate) -> Vec<Day> {
    reconcile_days(existing, generate_days(start, end))
}

/// Existing days a regeneration to `[start, end]` would throw away
pub fn dropped_days(existing: &[Day], start: NaiveDate, end: NaiveDate) -> Vec<&Day> {
    existing
        .iter()
        .filter(|day| day.date < start || day.date > end)
        .collect()
}

/// Re-derive ids and labels from position, keeping dates and items
pub fn renumber(days: &mut [Day]) {
    for (i, day) in days.iter_mut().enumerate() {
        day.id = day_id(i + 1);
        day.label = day_label(i + 1);
    }
}
