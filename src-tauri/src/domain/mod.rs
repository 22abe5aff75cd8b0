//! Domain Layer
//!
//! Contains all domain entities, the trip reducers and the day/relocation rules.
//! This layer does no I/O.

mod entity;
mod trip;
mod day_plan;
mod relocation;
mod planner;

pub use entity::{Entity, DomainError, DomainResult};
pub use trip::{Trip, Day, Item, ItemCategory, TripDraft, ItemDraft, ItemPatch, DayPatch};
pub use day_plan::{generate_days, dropped_days};
pub use relocation::{RelocationPolicy, DropPoint, DEFAULT_MAX_ITEMS_PER_DAY};
pub use planner::Planner;
