//! Item Commands
//!
//! Frontend bindings for itinerary item commands. Each returns the updated trip.

use serde::Serialize;

use super::{call, to_args};
use crate::models::{CommandError, DropPoint, ItemDraft, ItemPatch, Trip};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemArgs<'a> {
    trip_id: &'a str,
    day_id: &'a str,
    draft: &'a ItemDraft,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditItemArgs<'a> {
    trip_id: &'a str,
    day_id: &'a str,
    item_id: &'a str,
    patch: &'a ItemPatch,
    to_day_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemArgs<'a> {
    trip_id: &'a str,
    day_id: &'a str,
    item_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DropArgs<'a> {
    trip_id: &'a str,
    item_id: &'a str,
    drop: &'a DropPoint,
}

// ========================
// Item Commands
// ========================

pub async fn add_item(trip_id: &str, day_id: &str, draft: &ItemDraft) -> Result<Trip, CommandError> {
    call("add_item", to_args(&AddItemArgs { trip_id, day_id, draft })?).await
}

/// Patch an item and, with `to_day_id`, move it to the end of that day in the same write
pub async fn edit_item(
    trip_id: &str,
    day_id: &str,
    item_id: &str,
    patch: &ItemPatch,
    to_day_id: Option<&str>,
) -> Result<Trip, CommandError> {
    let args = EditItemArgs { trip_id, day_id, item_id, patch, to_day_id };
    call("edit_item", to_args(&args)?).await
}

pub async fn delete_item(trip_id: &str, day_id: &str, item_id: &str) -> Result<Trip, CommandError> {
    call("delete_item", to_args(&ItemArgs { trip_id, day_id, item_id })?).await
}

pub async fn drop_item(trip_id: &str, item_id: &str, drop: &DropPoint) -> Result<Trip, CommandError> {
    call("drop_item", to_args(&DropArgs { trip_id, item_id, drop })?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_args_wire_names() {
        let patch = ItemPatch::default();
        let args = EditItemArgs {
            trip_id: "t1",
            day_id: "day-1",
            item_id: "i1",
            patch: &patch,
            to_day_id: Some("day-2"),
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["tripId"], "t1");
        assert_eq!(json["toDayId"], "day-2");

        let stay = EditItemArgs { to_day_id: None, ..args };
        assert!(serde_json::to_value(&stay).unwrap()["toDayId"].is_null());
    }
}
