//! Day Commands

use chrono::NaiveDate;
use serde::Serialize;

use super::{call, to_args};
use crate::models::{CommandError, DayPatch, Trip};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddDayArgs<'a> {
    trip_id: &'a str,
    date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDayArgs<'a> {
    trip_id: &'a str,
    day_id: &'a str,
    patch: &'a DayPatch,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayArgs<'a> {
    trip_id: &'a str,
    day_id: &'a str,
}

pub async fn add_day(trip_id: &str, date: NaiveDate) -> Result<Trip, CommandError> {
    call("add_day", to_args(&AddDayArgs { trip_id, date })?).await
}

pub async fn update_day(trip_id: &str, day_id: &str, patch: &DayPatch) -> Result<Trip, CommandError> {
    call("update_day", to_args(&UpdateDayArgs { trip_id, day_id, patch })?).await
}

pub async fn delete_day(trip_id: &str, day_id: &str) -> Result<Trip, CommandError> {
    call("delete_day", to_args(&DayArgs { trip_id, day_id })?).await
}
