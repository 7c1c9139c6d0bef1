//! Views over the holiday plans API
//!
//! Each view owns a `State`, changes it only in `update` in response to a
//! `Msg`, and is drawn by a pure `render` over that state.

pub mod holiday_list;
pub mod plan_editor;
pub mod resource;
pub mod table;

pub use holiday_list::HolidayListApp;
pub use plan_editor::PlanEditorApp;
pub use resource::Resource;
