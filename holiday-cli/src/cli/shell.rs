//! Route table and navigation bar

use std::fmt;

use crate::views::table::Table;

const BRAND: &str = "Holiday Plans";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Holiday List View
    Home,
    /// Holiday Plan Editor
    AddHoliday,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::AddHoliday];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::AddHoliday => "/add-holiday",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::AddHoliday => "Add Holiday",
        }
    }

    fn view_name(self) -> &'static str {
        match self {
            Route::Home => "Holiday List",
            Route::AddHoliday => "Holiday Plan Editor",
        }
    }

    /// Resolve a path, ignoring surrounding whitespace and a trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// `Holiday Plans | Home | Add Holiday`
pub fn render_nav() -> String {
    std::iter::once(BRAND)
        .chain(Route::ALL.iter().map(|r| r.title()))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_routes() -> String {
    let mut table = Table::new(["Path", "Title", "View"]);
    for route in Route::ALL {
        table.row([route.path(), route.title(), route.view_name()]);
    }
    table.render()
}
