//! Terminal presentation: design tokens, capability detection and the
//! console reporter.

pub mod blocks;
pub mod context;
pub mod primitives;
pub mod reporter;
pub mod terminal;
pub mod theme;

pub use context::UiContext;
pub use reporter::ConsoleReporter;
