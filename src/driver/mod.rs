mod height_driver;
mod height_provider;

pub use height_driver::HeightDriver;
pub use height_provider::HeightProvider;
