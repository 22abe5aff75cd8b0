//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod warning_banner;
mod trip_list;
mod trip_form;
mod itinerary_board;
mod day_column;
mod item_card;
mod item_form;
mod log_panel;

pub use delete_confirm_button::DeleteConfirmButton;
pub use warning_banner::{ErrorBanner, WarningBanner};
pub use trip_list::TripList;
pub use trip_form::{TripForm, TripFormMode};
pub use itinerary_board::ItineraryBoard;
pub use day_column::DayColumn;
pub use item_card::ItemCard;
pub use item_form::{ItemForm, ItemFormTarget};
pub use log_panel::LogPanel;
