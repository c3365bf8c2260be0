//! Output formatting for CLI.

mod json;
mod text;

pub use json::{GenerateOutput, InspectOutput, JsonFormatter, VariantOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
