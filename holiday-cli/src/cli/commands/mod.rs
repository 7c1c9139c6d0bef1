pub mod cache;
pub mod config;
pub mod holidays;
pub mod plans;

use colored::*;

use super::shell::{Route, render_nav};

/// Navigation bar followed by the active route's title
pub(crate) fn print_header(route: Route) {
    println!("{}", render_nav().bold());
    println!("{} {}", "»".dimmed(), route.title().cyan());
    println!();
}

/// Last line of a view rendered while its fetch is pending, on stderr
pub(crate) fn print_loading(rendered: &str) {
    if let Some(line) = rendered.lines().last() {
        eprintln!("{}", line.dimmed());
    }
}
