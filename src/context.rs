//! Application Context
//!
//! Shared state provided via Leptos Context API.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

/// App-wide values provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Drag gesture state; created at the root so the global listeners outlive any board
    pub dnd: DndSignals,
    /// Date used for trip status badges
    pub today: NaiveDate,
}

impl AppContext {
    pub fn new(dnd: DndSignals, today: NaiveDate) -> Self {
        Self { dnd, today }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
