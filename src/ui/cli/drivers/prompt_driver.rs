use anyhow::Result;

/// Terminal questions the config wizard asks.
///
/// Kept behind a trait so the wizard can be driven by a script in tests.
pub trait PromptDriver {
    /// Returns the index of the picked option.
    fn ask_select(&self, title: &str, help: &str, options: Vec<String>) -> Result<usize>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;
}
