pub mod backend_choice;
mod build_source;
mod driver_config;

pub use backend_choice::{BackendChoice, BackendKind, Mcp3008Parameters, SimulatedParameters};
pub use build_source::build_source;
pub use driver_config::DriverConfig;
