//! Application layer - poll loop and console collaborators

pub mod console;
pub mod tracker;

pub use console::{ConsoleNotifier, ConsoleRenderer};
pub use tracker::{Notifier, Renderer, TrackerService};
