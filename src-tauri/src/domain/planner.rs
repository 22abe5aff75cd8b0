//! Planner - the trip collection and its reducers
//!
//! Each mutation validates first and either applies completely or returns an
//! error with the collection untouched. Persistence is the caller's concern.

use chrono::{Duration, NaiveDate};

use super::day_plan::{generate_days, regenerate_days, renumber};
use super::entity::{DomainError, DomainResult};
use super::relocation::{apply_relocation, move_between_days, plan_drop, reorder_within_day, DropPoint, RelocationPolicy};
use super::trip::{Day, DayPatch, Item, ItemDraft, ItemPatch, Trip, TripDraft, MAX_TRIP_DAYS};

#[derive(Debug, Clone, Default)]
pub struct Planner {
    trips: Vec<Trip>,
    policy: RelocationPolicy,
}

impl Planner {
    pub fn new(policy: RelocationPolicy) -> Self {
        Self {
            trips: Vec::new(),
            policy,
        }
    }

    /// Load a persisted collection. Trips stored without days get them generated.
    pub fn with_trips(trips: Vec<Trip>, policy: RelocationPolicy) -> Self {
        let mut planner = Self { trips, policy };
        for trip in planner.trips.iter_mut().filter(|t| t.days.is_empty()) {
            trip.days = generate_days(trip.start_date, trip.end_date);
        }
        planner.sort();
        planner
    }

    pub fn policy(&self) -> &RelocationPolicy {
        &self.policy
    }

    /// Ordered by start date
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trip(&self, id: &str) -> DomainResult<&Trip> {
        self.trips
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::not_found("Trip", id))
    }

    fn trip_mut(&mut self, id: &str) -> DomainResult<&mut Trip> {
        self.trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::not_found("Trip", id))
    }

    fn sort(&mut self) {
        self.trips
            .sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.title.cmp(&b.title)));
    }

    /// Set bookkeeping timestamps on a trip
    pub fn stamp(&mut self, id: &str, now_ms: i64) -> DomainResult<()> {
        let trip = self.trip_mut(id)?;
        if trip.created_at.is_none() {
            trip.created_at = Some(now_ms);
        }
        trip.updated_at = Some(now_ms);
        Ok(())
    }

    // ========================
    // Trips
    // ========================

    pub fn add_trip(&mut self, id: String, draft: TripDraft) -> DomainResult<&Trip> {
        draft.validate()?;
        if self.trips.iter().any(|t| t.id == id) {
            return Err(DomainError::invalid(format!("Trip '{}' already exists", id)));
        }
        let days = generate_days(draft.start_date, draft.end_date);
        self.trips.push(Trip {
            id: id.clone(),
            title: draft.title.trim().to_string(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            image_url: draft.image_url,
            days,
            created_at: None,
            updated_at: None,
        });
        self.sort();
        self.trip(&id)
    }

    /// Edit title, image and range. A range change regenerates the days,
    /// keeping items only for dates inside the new range.
    pub fn update_trip(&mut self, id: &str, draft: TripDraft) -> DomainResult<&Trip> {
        draft.validate()?;
        let trip = self.trip_mut(id)?;
        if draft.start_date != trip.start_date || draft.end_date != trip.end_date {
            trip.days = regenerate_days(&trip.days, draft.start_date, draft.end_date);
            trip.start_date = draft.start_date;
            trip.end_date = draft.end_date;
        }
        trip.title = draft.title.trim().to_string();
        trip.image_url = draft.image_url;
        self.sort();
        self.trip(id)
    }

    pub fn delete_trip(&mut self, id: &str) -> DomainResult<Trip> {
        let idx = self
            .trips
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| DomainError::not_found("Trip", id))?;
        Ok(self.trips.remove(idx))
    }

    // ========================
    // Days
    // ========================

    /// Extend the trip by one day on either side of its range
    pub fn add_day(&mut self, trip_id: &str, date: NaiveDate) -> DomainResult<&Trip> {
        let trip = self.trip_mut(trip_id)?;
        if (trip.end_date - trip.start_date).num_days() + 1 >= MAX_TRIP_DAYS {
            return Err(DomainError::invalid(format!("A trip can span at most {} days", MAX_TRIP_DAYS)));
        }
        let one_day = Duration::days(1);
        if Some(date) == trip.start_date.checked_sub_signed(one_day) {
            trip.days.insert(0, Day::new(1, date));
            trip.start_date = date;
        } else if Some(date) == trip.end_date.checked_add_signed(one_day) {
            trip.days.push(Day::new(trip.days.len() + 1, date));
            trip.end_date = date;
        } else {
            return Err(DomainError::invalid("New days must be adjacent to the trip's dates"));
        }
        renumber(&mut trip.days);
        self.sort();
        self.trip(trip_id)
    }

    pub fn update_day(&mut self, trip_id: &str, day_id: &str, patch: DayPatch) -> DomainResult<&Trip> {
        if matches!(&patch.label, Some(l) if l.trim().is_empty()) {
            return Err(DomainError::invalid("Day label is required"));
        }
        let day = self.trip_mut(trip_id)?.day_mut(day_id)?;
        if let Some(label) = patch.label {
            day.label = label.trim().to_string();
        }
        self.trip(trip_id)
    }

    /// Remove the first or last day, shrinking the range. Its items go with it.
    pub fn delete_day(&mut self, trip_id: &str, day_id: &str) -> DomainResult<&Trip> {
        let trip = self.trip_mut(trip_id)?;
        let idx = trip
            .days
            .iter()
            .position(|d| d.id == day_id)
            .ok_or_else(|| DomainError::not_found("Day", day_id))?;
        if trip.days.len() == 1 {
            return Err(DomainError::invalid("A trip needs at least one day"));
        }
        if idx != 0 && idx != trip.days.len() - 1 {
            return Err(DomainError::invalid("Only the first or last day can be removed"));
        }
        trip.days.remove(idx);
        renumber(&mut trip.days);
        if let (Some(first), Some(last)) = (trip.days.first(), trip.days.last()) {
            trip.start_date = first.date;
            trip.end_date = last.date;
        }
        self.sort();
        self.trip(trip_id)
    }

    // ========================
    // Items
    // ========================

    pub fn add_item(&mut self, trip_id: &str, day_id: &str, item_id: String, draft: ItemDraft) -> DomainResult<&Trip> {
        draft.validate()?;
        let policy = self.policy;
        let day = self.trip_mut(trip_id)?.day_mut(day_id)?;
        policy.check_capacity(day)?;
        day.items.push(Item::from_draft(item_id, draft));
        self.trip(trip_id)
    }

    pub fn update_item(&mut self, trip_id: &str, day_id: &str, item_id: &str, patch: ItemPatch) -> DomainResult<&Trip> {
        patch.validate()?;
        let day = self.trip_mut(trip_id)?.day_mut(day_id)?;
        let item = day
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DomainError::not_found("Item", item_id))?;
        item.apply(patch);
        self.trip(trip_id)
    }

    /// Patch an item and, when `to_day_id` names another day, append it there.
    /// Both steps succeed or neither is applied.
    pub fn edit_item(
        &mut self,
        trip_id: &str,
        day_id: &str,
        item_id: &str,
        patch: ItemPatch,
        to_day_id: Option<&str>,
    ) -> DomainResult<&Trip> {
        patch.validate()?;
        let policy = self.policy;
        let trip = self.trip_mut(trip_id)?;
        let mut days = trip.days.clone();

        let src = days
            .iter_mut()
            .find(|d| d.id == day_id)
            .ok_or_else(|| DomainError::not_found("Day", day_id))?;
        src.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DomainError::not_found("Item", item_id))?
            .apply(patch);

        if let Some(dest) = to_day_id.filter(|dest| *dest != day_id) {
            move_between_days(&mut days, day_id, dest, item_id, usize::MAX, &policy)?;
        }
        trip.days = days;
        self.trip(trip_id)
    }

    pub fn delete_item(&mut self, trip_id: &str, day_id: &str, item_id: &str) -> DomainResult<&Trip> {
        let policy = self.policy;
        let day = self.trip_mut(trip_id)?.day_mut(day_id)?;
        let idx = day
            .position_of(item_id)
            .ok_or_else(|| DomainError::not_found("Item", item_id))?;
        policy.check_removal(day)?;
        day.items.remove(idx);
        self.trip(trip_id)
    }

    pub fn reorder_item(&mut self, trip_id: &str, day_id: &str, item_id: &str, index: usize) -> DomainResult<&Trip> {
        let day = self.trip_mut(trip_id)?.day_mut(day_id)?;
        reorder_within_day(&mut day.items, item_id, index)?;
        self.trip(trip_id)
    }

    pub fn move_item(
        &mut self,
        trip_id: &str,
        from_day_id: &str,
        to_day_id: &str,
        item_id: &str,
        index: usize,
    ) -> DomainResult<&Trip> {
        let policy = self.policy;
        let trip = self.trip_mut(trip_id)?;
        move_between_days(&mut trip.days, from_day_id, to_day_id, item_id, index, &policy)?;
        self.trip(trip_id)
    }

    /// Resolve and apply a drop gesture. Returns whether anything changed.
    pub fn drop_item(&mut self, trip_id: &str, item_id: &str, drop: &DropPoint) -> DomainResult<bool> {
        let policy = self.policy;
        let trip = self.trip_mut(trip_id)?;
        match plan_drop(&trip.days, item_id, drop) {
            Some(relocation) => {
                apply_relocation(&mut trip.days, &relocation, &policy)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::ItemCategory;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(title: &str, start: &str, end: &str) -> TripDraft {
        TripDraft {
            title: title.into(),
            start_date: date(start),
            end_date: date(end),
            image_url: "https://example.com/cover.jpg".into(),
        }
    }

    fn item_draft(title: &str) -> ItemDraft {
        ItemDraft {
            category: ItemCategory::Meal,
            title: title.into(),
            details: String::new(),
            icon: None,
            color: None,
        }
    }

    fn planner_with_trip() -> Planner {
        let mut planner = Planner::default();
        planner.add_trip("t1".into(), draft("Malaysia", "2025-12-12", "2025-12-14")).unwrap();
        planner
    }

    #[test]
    fn test_add_trip_generates_days() {
        let planner = planner_with_trip();
        let trip = planner.trip("t1").unwrap();
        assert_eq!(trip.days.len(), 3);
        assert!(trip.days_consistent());
    }

    #[test]
    fn test_add_trip_rejects_bad_range() {
        let mut planner = Planner::default();
        let err = planner.add_trip("t1".into(), draft("X", "2025-12-14", "2025-12-12")).unwrap_err();
        assert!(err.is_warning());
        assert!(planner.trips().is_empty());
    }

    #[test]
    fn test_trips_sorted_by_start_date() {
        let mut planner = planner_with_trip();
        planner.add_trip("t0".into(), draft("Tokyo", "2025-05-18", "2025-05-25")).unwrap();
        let order: Vec<&str> = planner.trips().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["t0", "t1"]);
    }

    #[test]
    fn test_update_trip_regenerates_and_keeps_overlap() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-2", "i1".into(), item_draft("Lunch")).unwrap();
        planner.add_item("t1", "day-1", "i0".into(), item_draft("Arrive")).unwrap();

        let trip = planner.update_trip("t1", draft("Malaysia", "2025-12-13", "2025-12-16")).unwrap();

        assert_eq!(trip.days.len(), 4);
        assert!(trip.days_consistent());
        assert_eq!(trip.days[0].items[0].id, "i1");
        assert_eq!(trip.item_count(), 1);
    }

    #[test]
    fn test_update_trip_same_dates_keeps_days() {
        let mut planner = planner_with_trip();
        planner.update_day("t1", "day-1", DayPatch { label: Some("Arrival".into()) }).unwrap();
        let trip = planner.update_trip("t1", draft("Renamed", "2025-12-12", "2025-12-14")).unwrap();
        assert_eq!(trip.title, "Renamed");
        assert_eq!(trip.days[0].label, "Arrival");
    }

    #[test]
    fn test_delete_trip() {
        let mut planner = planner_with_trip();
        assert_eq!(planner.delete_trip("t1").unwrap().id, "t1");
        assert!(matches!(planner.delete_trip("t1"), Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_add_item_capacity() {
        let mut planner = planner_with_trip();
        for i in 0..6 {
            planner.add_item("t1", "day-1", format!("i{}", i), item_draft("Stop")).unwrap();
        }
        let err = planner.add_item("t1", "day-1", "i6".into(), item_draft("One too many")).unwrap_err();
        assert!(matches!(err, DomainError::DayFull { capacity: 6, .. }));
        assert_eq!(planner.trip("t1").unwrap().days[0].items.len(), 6);
    }

    #[test]
    fn test_delete_item_respects_policy() {
        let strict = RelocationPolicy {
            require_non_empty_day: true,
            ..Default::default()
        };
        let mut planner = Planner::new(strict);
        planner.add_trip("t1".into(), draft("X", "2025-12-12", "2025-12-12")).unwrap();
        planner.add_item("t1", "day-1", "only".into(), item_draft("Only")).unwrap();

        let err = planner.delete_item("t1", "day-1", "only").unwrap_err();
        assert!(matches!(err, DomainError::LastItem { .. }));

        planner.add_item("t1", "day-1", "second".into(), item_draft("Second")).unwrap();
        planner.delete_item("t1", "day-1", "only").unwrap();
        assert_eq!(planner.trip("t1").unwrap().days[0].items[0].id, "second");
    }

    #[test]
    fn test_update_item() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-1", "i1".into(), item_draft("Lunch")).unwrap();
        let trip = planner
            .update_item(
                "t1",
                "day-1",
                "i1",
                ItemPatch {
                    details: Some("Jalan Alor".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(trip.days[0].items[0].details, "Jalan Alor");
        assert!(planner
            .update_item("t1", "day-1", "i1", ItemPatch { title: Some(" ".into()), ..Default::default() })
            .is_err());
    }

    #[test]
    fn test_move_and_drop() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-1", "a".into(), item_draft("A")).unwrap();
        planner.add_item("t1", "day-1", "b".into(), item_draft("B")).unwrap();
        planner.add_item("t1", "day-2", "c".into(), item_draft("C")).unwrap();

        planner.move_item("t1", "day-1", "day-2", "a", 0).unwrap();
        assert!(planner.drop_item("t1", "b", &DropPoint::OnItem("c".into())).unwrap());

        let trip = planner.trip("t1").unwrap();
        let day2: Vec<&str> = trip.days[1].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(day2, vec!["a", "b", "c"]);
        assert!(trip.days[0].items.is_empty());
        assert_eq!(trip.item_count(), 3);

        assert!(!planner.drop_item("t1", "c", &DropPoint::OnDay("day-2".into())).unwrap());
    }

    #[test]
    fn test_add_and_delete_edge_days() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-1", "a".into(), item_draft("A")).unwrap();

        let trip = planner.add_day("t1", date("2025-12-11")).unwrap();
        assert_eq!(trip.start_date, date("2025-12-11"));
        assert!(trip.days_consistent());
        assert_eq!(trip.days[1].items[0].id, "a");

        assert!(planner.add_day("t1", date("2025-12-20")).is_err());
        assert!(planner.delete_day("t1", "day-2").is_err());

        let trip = planner.delete_day("t1", "day-4").unwrap();
        assert_eq!(trip.end_date, date("2025-12-13"));
        assert!(trip.days_consistent());
    }

    #[test]
    fn test_edit_item_moves_to_end_of_other_day() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-1", "a".into(), item_draft("A")).unwrap();
        planner.add_item("t1", "day-2", "b".into(), item_draft("B")).unwrap();

        let patch = ItemPatch { title: Some("Renamed".into()), ..Default::default() };
        let trip = planner.edit_item("t1", "day-1", "a", patch, Some("day-2")).unwrap();

        assert!(trip.days[0].items.is_empty());
        let day2: Vec<(&str, &str)> = trip.days[1].items.iter().map(|i| (i.id.as_str(), i.title.as_str())).collect();
        assert_eq!(day2, vec![("b", "B"), ("a", "Renamed")]);
    }

    #[test]
    fn test_edit_item_into_full_day_changes_nothing() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-1", "a".into(), item_draft("A")).unwrap();
        for i in 0..6 {
            planner.add_item("t1", "day-2", format!("f{}", i), item_draft("Full")).unwrap();
        }
        let before = planner.trip("t1").unwrap().clone();

        let patch = ItemPatch { title: Some("Renamed".into()), ..Default::default() };
        let err = planner.edit_item("t1", "day-1", "a", patch, Some("day-2")).unwrap_err();

        assert!(matches!(err, DomainError::DayFull { capacity: 6, .. }));
        assert_eq!(planner.trip("t1").unwrap(), &before);
        assert_eq!(before.days[0].items[0].title, "A");
    }

    #[test]
    fn test_edit_item_same_day_keeps_position() {
        let mut planner = planner_with_trip();
        planner.add_item("t1", "day-1", "a".into(), item_draft("A")).unwrap();
        planner.add_item("t1", "day-1", "b".into(), item_draft("B")).unwrap();

        let patch = ItemPatch { details: Some("Window seat".into()), ..Default::default() };
        let trip = planner.edit_item("t1", "day-1", "a", patch, Some("day-1")).unwrap();

        assert_eq!(trip.days[0].items[0].id, "a");
        assert_eq!(trip.days[0].items[0].details, "Window seat");
    }

    #[test]
    fn test_add_day_at_calendar_edges() {
        let mut planner = Planner::default();
        planner
            .add_trip(
                "first".into(),
                TripDraft {
                    title: "Dawn".into(),
                    start_date: NaiveDate::MIN,
                    end_date: NaiveDate::MIN,
                    image_url: String::new(),
                },
            )
            .unwrap();
        planner
            .add_trip(
                "last".into(),
                TripDraft {
                    title: "Dusk".into(),
                    start_date: NaiveDate::MAX,
                    end_date: NaiveDate::MAX,
                    image_url: String::new(),
                },
            )
            .unwrap();

        assert!(planner.add_day("first", NaiveDate::MIN).unwrap_err().is_warning());
        assert!(planner.add_day("last", NaiveDate::MAX).unwrap_err().is_warning());

        let next = NaiveDate::MIN.succ_opt().unwrap();
        assert_eq!(planner.add_day("first", next).unwrap().end_date, next);
        let prev = NaiveDate::MAX.pred_opt().unwrap();
        assert_eq!(planner.add_day("last", prev).unwrap().start_date, prev);
    }

    #[test]
    fn test_with_trips_fills_missing_days() {
        let trip = Trip {
            id: "t9".into(),
            title: "Bare".into(),
            start_date: date("2025-01-01"),
            end_date: date("2025-01-02"),
            image_url: String::new(),
            days: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        let planner = Planner::with_trips(vec![trip], RelocationPolicy::default());
        assert_eq!(planner.trip("t9").unwrap().days.len(), 2);
    }
}
