use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::Result;
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Select, Text};

use crate::ui::cli::drivers::PromptDriver;

pub struct InquireDriver;

struct Indexed {
    index: usize,
    label: String,
}

impl Display for Indexed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Checks `x` against optional inclusive bounds.
fn check_range<T: PartialOrd + Display>(x: &T, min: Option<&T>, max: Option<&T>) -> Validation {
    match (min, max) {
        (Some(lo), Some(hi)) if x < lo || x > hi => {
            Validation::Invalid(format!("Must be between {lo} and {hi}").into())
        }
        (Some(lo), None) if x < lo => Validation::Invalid(format!("Must be ≥ {lo}").into()),
        (None, Some(hi)) if x > hi => Validation::Invalid(format!("Must be ≤ {hi}").into()),
        _ => Validation::Valid,
    }
}

fn ask_number<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: Clone + Display + PartialOrd + FromStr + Send + Sync + 'static,
{
    Ok(CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help)
        .with_error_message("Please type a valid number")
        .with_validator(move |x: &T| -> Result<Validation, CustomUserError> {
            Ok(check_range(x, min.as_ref(), max.as_ref()))
        })
        .prompt()?)
}

impl PromptDriver for InquireDriver {
    fn ask_select(&self, title: &str, help: &str, options: Vec<String>) -> Result<usize> {
        let items: Vec<Indexed> = options
            .into_iter()
            .enumerate()
            .map(|(index, label)| Indexed { index, label })
            .collect();
        let picked = Select::new(title, items).with_help_message(help).prompt()?;
        Ok(picked.index)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_number(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_number(title, help, default, min, max)
    }
}
