//! Holidays table with plan assignment
//!
//! The assignment map and the per-option plan cache live in the local
//! state store, so they survive between runs even though the server only
//! keeps an append-only record of assignments.

mod app;
mod state;
mod view;

pub use app::HolidayListApp;
pub use state::{Modal, Msg};
