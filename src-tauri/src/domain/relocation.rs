//! Item Relocation
//!
//! Reordering within a day and moving between days, with the day capacity
//! and (optional) non-empty day rules. Every operation checks all of its
//! preconditions before touching either day.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};
use super::trip::{Day, Item};

pub const DEFAULT_MAX_ITEMS_PER_DAY: usize = 6;

/// Limits applied to relocations and item removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationPolicy {
    pub max_items_per_day: usize,
    /// Refuse to take the last item out of a day
    pub require_non_empty_day: bool,
}

impl Default for RelocationPolicy {
    fn default() -> Self {
        Self {
            max_items_per_day: DEFAULT_MAX_ITEMS_PER_DAY,
            require_non_empty_day: false,
        }
    }
}

impl RelocationPolicy {
    pub fn check_capacity(&self, day: &Day) -> DomainResult<()> {
        if day.items.len() >= self.max_items_per_day {
            return Err(DomainError::DayFull {
                day_id: day.id.clone(),
                capacity: self.max_items_per_day,
            });
        }
        Ok(())
    }

    pub fn check_removal(&self, day: &Day) -> DomainResult<()> {
        if self.require_non_empty_day && day.items.len() == 1 {
            return Err(DomainError::LastItem { day_id: day.id.clone() });
        }
        Ok(())
    }
}

/// Where a dragged item was released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropPoint {
    /// On another item: take its place, pushing it back
    OnItem(String),
    /// On a day's free space: append
    OnDay(String),
}

/// A resolved relocation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relocation {
    Reorder {
        day_id: String,
        item_id: String,
        to_index: usize,
    },
    Move {
        from_day_id: String,
        to_day_id: String,
        item_id: String,
        to_index: usize,
    },
}

/// Move `item_id` to `target_index`, clamped to the end of the list
pub fn reorder_within_day(items: &mut Vec<Item>, item_id: &str, target_index: usize) -> DomainResult<()> {
    let from = items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| DomainError::not_found("Item", item_id))?;
    let to = target_index.min(items.len() - 1);
    if from == to {
        return Ok(());
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

fn day_index(days: &[Day], day_id: &str) -> DomainResult<usize> {
    days.iter()
        .position(|d| d.id == day_id)
        .ok_or_else(|| DomainError::not_found("Day", day_id))
}

/// Move an item from one day into another at `target_index` (clamped).
/// Same source and destination is a reorder and skips the capacity check.
pub fn move_between_days(
    days: &mut [Day],
    source_day_id: &str,
    dest_day_id: &str,
    item_id: &str,
    target_index: usize,
    policy: &RelocationPolicy,
) -> DomainResult<()> {
    let src = day_index(days, source_day_id)?;
    if source_day_id == dest_day_id {
        return reorder_within_day(&mut days[src].items, item_id, target_index);
    }
    let dst = day_index(days, dest_day_id)?;

    let from = days[src]
        .position_of(item_id)
        .ok_or_else(|| DomainError::not_found("Item", item_id))?;
    policy.check_capacity(&days[dst])?;
    policy.check_removal(&days[src])?;

    let item = days[src].items.remove(from);
    let dest_items = &mut days[dst].items;
    let to = target_index.min(dest_items.len());
    dest_items.insert(to, item);
    Ok(())
}

/// (day index, item index) of an item anywhere in the trip
pub fn locate(days: &[Day], item_id: &str) -> Option<(usize, usize)> {
    days.iter()
        .enumerate()
        .find_map(|(d, day)| day.position_of(item_id).map(|i| (d, i)))
}

/// Turn a drop gesture into a relocation. `None` means nothing to do:
/// dropped on itself, on an unknown target, or already in place.
pub fn plan_drop(days: &[Day], item_id: &str, drop: &DropPoint) -> Option<Relocation> {
    let (from_day, from_idx) = locate(days, item_id)?;
    match drop {
        DropPoint::OnItem(over_id) => {
            if over_id == item_id {
                return None;
            }
            let (to_day, to_idx) = locate(days, over_id)?;
            if from_day == to_day {
                Some(Relocation::Reorder {
                    day_id: days[from_day].id.clone(),
                    item_id: item_id.to_string(),
                    to_index: to_idx,
                })
            } else {
                Some(Relocation::Move {
                    from_day_id: days[from_day].id.clone(),
                    to_day_id: days[to_day].id.clone(),
                    item_id: item_id.to_string(),
                    to_index: to_idx,
                })
            }
        }
        DropPoint::OnDay(day_id) => {
            let to_day = days.iter().position(|d| &d.id == day_id)?;
            if from_day == to_day {
                let last = days[to_day].items.len() - 1;
                if from_idx == last {
                    return None;
                }
                Some(Relocation::Reorder {
                    day_id: day_id.clone(),
                    item_id: item_id.to_string(),
                    to_index: last,
                })
            } else {
                Some(Relocation::Move {
                    from_day_id: days[from_day].id.clone(),
                    to_day_id: day_id.clone(),
                    item_id: item_id.to_string(),
                    to_index: days[to_day].items.len(),
                })
            }
        }
    }
}

pub fn apply_relocation(days: &mut [Day], relocation: &Relocation, policy: &RelocationPolicy) -> DomainResult<()> {
    match relocation {
        Relocation::Reorder { day_id, item_id, to_index } => {
            let idx = day_index(days, day_id)?;
            reorder_within_day(&mut days[idx].items, item_id, *to_index)
        }
        Relocation::Move { from_day_id, to_day_id, item_id, to_index } => {
            move_between_days(days, from_day_id, to_day_id, item_id, *to_index, policy)
        }
    }
}
