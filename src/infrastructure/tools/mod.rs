//! External tool lookup

mod which;

pub use which::WhichToolLocator;
