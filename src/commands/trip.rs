//! Trip Commands
//!
//! Frontend bindings for trip-level backend commands.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::JsValue;

use super::{call, to_args};
use crate::models::{CommandError, DateChangePreview, Trip, TripDraft};

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CreateTripArgs<'a> {
    draft: &'a TripDraft,
}

#[derive(Serialize)]
struct UpdateTripArgs<'a> {
    id: &'a str,
    draft: &'a TripDraft,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewArgs<'a> {
    id: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

pub async fn list_trips() -> Result<Vec<Trip>, CommandError> {
    call("list_trips", JsValue::NULL).await
}

pub async fn get_trip(id: &str) -> Result<Trip, CommandError> {
    call("get_trip", to_args(&IdArgs { id })?).await
}

pub async fn create_trip(draft: &TripDraft) -> Result<Trip, CommandError> {
    call("create_trip", to_args(&CreateTripArgs { draft })?).await
}

pub async fn update_trip(id: &str, draft: &TripDraft) -> Result<Trip, CommandError> {
    call("update_trip", to_args(&UpdateTripArgs { id, draft })?).await
}

pub async fn delete_trip(id: &str) -> Result<(), CommandError> {
    call("delete_trip", to_args(&IdArgs { id })?).await
}

/// Days and items a new date range would drop
pub async fn preview_date_change(id: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<DateChangePreview, CommandError> {
    call("preview_date_change", to_args(&PreviewArgs { id, start_date, end_date })?).await
}
