//! Interactive text menu. The loop reads whitespace-separated answers, runs one
//! store operation per menu choice, and prints a human-readable outcome before
//! showing the menu again.

mod app;
mod helpers;
mod input;
mod menu;

pub use app::Shell;
