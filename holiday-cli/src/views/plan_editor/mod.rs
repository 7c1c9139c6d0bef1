//! Per-option plan list with single-entry and bulk spreadsheet creation

mod app;
mod state;
mod view;

pub use app::PlanEditorApp;
pub use state::Msg;
