mod wizard;

pub use wizard::prompt_config;
