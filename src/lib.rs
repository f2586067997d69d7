pub mod acquisition;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod estimation;
pub mod sources;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::HeightError;
