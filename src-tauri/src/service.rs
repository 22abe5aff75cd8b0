//! Trip Service
//!
//! Owns the in-memory planner and the persistence adapter. A mutation runs
//! against a staged copy of the planner, the changed trip is persisted, and
//! only then does the staged copy replace the live one. A storage failure
//! therefore leaves memory exactly as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::{
    dropped_days, DayPatch, DomainError, DomainResult, DropPoint, ItemDraft, ItemPatch, Planner, RelocationPolicy,
    Trip, TripDraft,
};
use crate::repository::Repository;

/// What narrowing a trip's range would discard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateChangePreview {
    pub days_removed: usize,
    pub items_removed: usize,
}

pub struct TripService {
    /// `None` until hydrated from the repository
    planner: Mutex<Option<Planner>>,
    repo: Arc<dyn Repository<Trip>>,
    policy: RelocationPolicy,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn log_rejection(op: &str, trip_id: &str, err: &DomainError) {
    if err.is_warning() {
        warn!(op, trip_id, %err, "rejected");
    } else {
        error!(op, trip_id, %err, "failed");
    }
}

impl TripService {
    pub fn new(repo: Arc<dyn Repository<Trip>>, policy: RelocationPolicy) -> Self {
        Self {
            planner: Mutex::new(None),
            repo,
            policy,
        }
    }

    /// Load the persisted collection into memory. Safe to call again to re-sync.
    pub async fn hydrate(&self) -> DomainResult<usize> {
        let trips = self.repo.list().await?;
        let count = trips.len();
        *self.planner.lock().await = Some(Planner::with_trips(trips, self.policy));
        info!(count, "trips hydrated");
        Ok(count)
    }

    pub async fn is_hydrated(&self) -> bool {
        self.planner.lock().await.is_some()
    }

    pub async fn list_trips(&self) -> DomainResult<Vec<Trip>> {
        let guard = self.planner.lock().await;
        let planner = guard.as_ref().ok_or(DomainError::NotReady)?;
        Ok(planner.trips().to_vec())
    }

    pub async fn get_trip(&self, id: &str) -> DomainResult<Trip> {
        let guard = self.planner.lock().await;
        let planner = guard.as_ref().ok_or(DomainError::NotReady)?;
        planner.trip(id).cloned()
    }

    /// How much a range change would discard, so the UI can ask first
    pub async fn preview_date_change(&self, id: &str, start: NaiveDate, end: NaiveDate) -> DomainResult<DateChangePreview> {
        let guard = self.planner.lock().await;
        let planner = guard.as_ref().ok_or(DomainError::NotReady)?;
        let trip = planner.trip(id)?;
        let lost = dropped_days(&trip.days, start, end);
        Ok(DateChangePreview {
            days_removed: lost.len(),
            items_removed: lost.iter().map(|d| d.items.len()).sum(),
        })
    }

    pub async fn create_trip(&self, draft: TripDraft) -> DomainResult<Trip> {
        let mut guard = self.planner.lock().await;
        let current = guard.as_ref().ok_or(DomainError::NotReady)?;

        let id = new_id();
        let mut staged = current.clone();
        let result = match staged.add_trip(id.clone(), draft) {
            Ok(_) => staged.stamp(&id, now_ms()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log_rejection("create_trip", &id, &e);
            return Err(e);
        }

        let trip = staged.trip(&id)?.clone();
        if let Err(e) = self.repo.create(&trip).await {
            log_rejection("create_trip", &id, &e);
            return Err(e);
        }
        *guard = Some(staged);
        info!(trip_id = %id, title = %trip.title, days = trip.days.len(), "trip created");
        Ok(trip)
    }

    pub async fn delete_trip(&self, id: &str) -> DomainResult<()> {
        let mut guard = self.planner.lock().await;
        let current = guard.as_ref().ok_or(DomainError::NotReady)?;

        let mut staged = current.clone();
        staged.delete_trip(id)?;
        if let Err(e) = self.repo.delete(id.to_string()).await {
            log_rejection("delete_trip", id, &e);
            return Err(e);
        }
        *guard = Some(staged);
        info!(trip_id = %id, "trip deleted");
        Ok(())
    }

    /// Stage a reducer, persist the touched trip, then commit
    async fn mutate<F>(&self, op: &'static str, trip_id: &str, reducer: F) -> DomainResult<Trip>
    where
        F: FnOnce(&mut Planner) -> DomainResult<()> + Send,
    {
        let mut guard = self.planner.lock().await;
        let current = guard.as_ref().ok_or(DomainError::NotReady)?;

        let mut staged = current.clone();
        if let Err(e) = reducer(&mut staged).and_then(|_| staged.stamp(trip_id, now_ms())) {
            log_rejection(op, trip_id, &e);
            return Err(e);
        }

        let trip = staged.trip(trip_id)?.clone();
        if let Err(e) = self.repo.update(&trip).await {
            log_rejection(op, trip_id, &e);
            return Err(e);
        }
        *guard = Some(staged);
        debug!(op, trip_id, "committed");
        Ok(trip)
    }

    pub async fn update_trip(&self, id: &str, draft: TripDraft) -> DomainResult<Trip> {
        self.mutate("update_trip", id, |p| p.update_trip(id, draft).map(|_| ())).await
    }

    pub async fn add_day(&self, trip_id: &str, date: NaiveDate) -> DomainResult<Trip> {
        self.mutate("add_day", trip_id, |p| p.add_day(trip_id, date).map(|_| ())).await
    }

    pub async fn update_day(&self, trip_id: &str, day_id: &str, patch: DayPatch) -> DomainResult<Trip> {
        self.mutate("update_day", trip_id, |p| p.update_day(trip_id, day_id, patch).map(|_| ())).await
    }

    pub async fn delete_day(&self, trip_id: &str, day_id: &str) -> DomainResult<Trip> {
        self.mutate("delete_day", trip_id, |p| p.delete_day(trip_id, day_id).map(|_| ())).await
    }

    pub async fn add_item(&self, trip_id: &str, day_id: &str, draft: ItemDraft) -> DomainResult<Trip> {
        let item_id = new_id();
        self.mutate("add_item", trip_id, |p| p.add_item(trip_id, day_id, item_id, draft).map(|_| ())).await
    }

    pub async fn update_item(&self, trip_id: &str, day_id: &str, item_id: &str, patch: ItemPatch) -> DomainResult<Trip> {
        self.mutate("update_item", trip_id, |p| p.update_item(trip_id, day_id, item_id, patch).map(|_| ())).await
    }

    /// Patch an item and optionally send it to the end of another day, as one write
    pub async fn edit_item(
        &self,
        trip_id: &str,
        day_id: &str,
        item_id: &str,
        patch: ItemPatch,
        to_day_id: Option<&str>,
    ) -> DomainResult<Trip> {
        self.mutate("edit_item", trip_id, |p| {
            p.edit_item(trip_id, day_id, item_id, patch, to_day_id).map(|_| ())
        })
        .await
    }

    pub async fn delete_item(&self, trip_id: &str, day_id: &str, item_id: &str) -> DomainResult<Trip> {
        self.mutate("delete_item", trip_id, |p| p.delete_item(trip_id, day_id, item_id).map(|_| ())).await
    }

    pub async fn reorder_item(&self, trip_id: &str, day_id: &str, item_id: &str, index: usize) -> DomainResult<Trip> {
        self.mutate("reorder_item", trip_id, |p| p.reorder_item(trip_id, day_id, item_id, index).map(|_| ())).await
    }

    pub async fn move_item(
        &self,
        trip_id: &str,
        from_day_id: &str,
        to_day_id: &str,
        item_id: &str,
        index: usize,
    ) -> DomainResult<Trip> {
        self.mutate("move_item", trip_id, |p| {
            p.move_item(trip_id, from_day_id, to_day_id, item_id, index).map(|_| ())
        })
        .await
    }

    /// Apply a drag-and-drop release. A drop that changes nothing skips storage.
    pub async fn drop_item(&self, trip_id: &str, item_id: &str, drop: DropPoint) -> DomainResult<Trip> {
        {
            let guard = self.planner.lock().await;
            let planner = guard.as_ref().ok_or(DomainError::NotReady)?;
            let mut probe = planner.clone();
            if !probe.drop_item(trip_id, item_id, &drop).inspect_err(|e| log_rejection("drop_item", trip_id, e))? {
                return planner.trip(trip_id).cloned();
            }
        }
        self.mutate("drop_item", trip_id, |p| p.drop_item(trip_id, item_id, &drop).map(|_| ())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemCategory;
    use crate::repository::MemoryTripRepository;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(start: &str, end: &str) -> TripDraft {
        TripDraft {
            title: "Malaysia".into(),
            start_date: date(start),
            end_date: date(end),
            image_url: String::new(),
        }
    }

    fn item(title: &str) -> ItemDraft {
        ItemDraft {
            category: ItemCategory::Activity,
            title: title.into(),
            details: String::new(),
            icon: None,
            color: None,
        }
    }

    async fn hydrated_service() -> (TripService, Arc<MemoryTripRepository>) {
        let repo = Arc::new(MemoryTripRepository::new());
        let service = TripService::new(repo.clone(), RelocationPolicy::default());
        service.hydrate().await.unwrap();
        (service, repo)
    }

    #[tokio::test]
    async fn test_not_ready_before_hydration() {
        let service = TripService::new(Arc::new(MemoryTripRepository::new()), RelocationPolicy::default());
        assert_eq!(service.list_trips().await.unwrap_err(), DomainError::NotReady);
        assert!(!service.is_hydrated().await);
    }

    #[tokio::test]
    async fn test_create_persists_and_stamps() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-14")).await.unwrap();

        assert_eq!(trip.days.len(), 3);
        assert!(trip.created_at.is_some());
        let stored = repo.find_by_id(trip.id.clone()).await.unwrap().unwrap();
        assert_eq!(stored, trip);
    }

    #[tokio::test]
    async fn test_hydrate_loads_existing() {
        let (service, repo) = hydrated_service().await;
        service.create_trip(draft("2025-12-12", "2025-12-14")).await.unwrap();

        let fresh = TripService::new(repo, RelocationPolicy::default());
        assert_eq!(fresh.hydrate().await.unwrap(), 1);
        assert_eq!(fresh.list_trips().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_commit() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-14")).await.unwrap();

        repo.set_fail_writes(true);
        let err = service.add_item(&trip.id, "day-1", item("Lunch")).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(service.get_trip(&trip.id).await.unwrap().item_count(), 0);

        repo.set_fail_writes(false);
        service.add_item(&trip.id, "day-1", item("Lunch")).await.unwrap();
        assert_eq!(service.get_trip(&trip.id).await.unwrap().item_count(), 1);
    }

    #[tokio::test]
    async fn test_validation_never_reaches_storage() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-12")).await.unwrap();
        for i in 0..6 {
            service.add_item(&trip.id, "day-1", item(&format!("Stop {}", i))).await.unwrap();
        }

        // A failing store would turn this into a Storage error if it were reached
        repo.set_fail_writes(true);
        let err = service.add_item(&trip.id, "day-1", item("Seventh")).await.unwrap_err();
        assert!(matches!(err, DomainError::DayFull { .. }));
    }

    #[tokio::test]
    async fn test_drag_flow() {
        let (service, _repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-13")).await.unwrap();
        let trip = service.add_item(&trip.id, "day-1", item("A")).await.unwrap();
        let trip = service.add_item(&trip.id, "day-1", item("B")).await.unwrap();
        let a = trip.days[0].items[0].id.clone();

        let trip = service.drop_item(&trip.id, &a, DropPoint::OnDay("day-2".into())).await.unwrap();
        assert_eq!(trip.days[1].items[0].id, a);
        assert_eq!(trip.days[0].items.len(), 1);

        let b = trip.days[0].items[0].id.clone();
        let trip = service.move_item(&trip.id, "day-1", "day-2", &b, 0).await.unwrap();
        assert_eq!(trip.days[1].items[0].id, b);

        let trip = service.reorder_item(&trip.id, "day-2", &b, 1).await.unwrap();
        assert_eq!(trip.days[1].items[1].id, b);
    }

    #[tokio::test]
    async fn test_edit_into_full_day_keeps_item_and_storage() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-13")).await.unwrap();
        let trip = service.add_item(&trip.id, "day-1", item("Museum")).await.unwrap();
        let museum = trip.days[0].items[0].id.clone();
        for i in 0..6 {
            service.add_item(&trip.id, "day-2", item(&format!("Stop {}", i))).await.unwrap();
        }
        let before = service.get_trip(&trip.id).await.unwrap();

        let patch = ItemPatch {
            title: Some("Night museum".into()),
            ..Default::default()
        };
        let err = service
            .edit_item(&trip.id, "day-1", &museum, patch, Some("day-2"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DayFull { .. }));
        assert_eq!(service.get_trip(&trip.id).await.unwrap(), before);
        assert_eq!(repo.require(trip.id.clone()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_edit_and_move_in_one_write() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-13")).await.unwrap();
        let trip = service.add_item(&trip.id, "day-1", item("Museum")).await.unwrap();
        let museum = trip.days[0].items[0].id.clone();

        let patch = ItemPatch {
            title: Some("Night museum".into()),
            ..Default::default()
        };
        let trip = service
            .edit_item(&trip.id, "day-1", &museum, patch, Some("day-2"))
            .await
            .unwrap();

        assert!(trip.days[0].items.is_empty());
        assert_eq!(trip.days[1].items[0].title, "Night museum");
        assert_eq!(repo.require(trip.id.clone()).await.unwrap(), trip);
    }

    #[tokio::test]
    async fn test_noop_drop_skips_storage() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-12")).await.unwrap();
        let trip = service.add_item(&trip.id, "day-1", item("Only")).await.unwrap();
        let only = trip.days[0].items[0].id.clone();

        repo.set_fail_writes(true);
        let same = service.drop_item(&trip.id, &only, DropPoint::OnItem(only.clone())).await.unwrap();
        assert_eq!(same, trip);
    }

    #[tokio::test]
    async fn test_preview_and_narrow_range() {
        let (service, _repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-14")).await.unwrap();
        service.add_item(&trip.id, "day-3", item("Farewell")).await.unwrap();

        let preview = service
            .preview_date_change(&trip.id, date("2025-12-12"), date("2025-12-13"))
            .await
            .unwrap();
        assert_eq!(preview, DateChangePreview { days_removed: 1, items_removed: 1 });

        let trip = service.update_trip(&trip.id, draft("2025-12-12", "2025-12-13")).await.unwrap();
        assert_eq!(trip.days.len(), 2);
        assert_eq!(trip.item_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_trip() {
        let (service, repo) = hydrated_service().await;
        let trip = service.create_trip(draft("2025-12-12", "2025-12-14")).await.unwrap();
        service.delete_trip(&trip.id).await.unwrap();
        assert!(service.list_trips().await.unwrap().is_empty());
        assert!(repo.find_by_id(trip.id.clone()).await.unwrap().is_none());
        assert!(matches!(service.get_trip(&trip.id).await, Err(DomainError::NotFound { .. })));
    }
}
