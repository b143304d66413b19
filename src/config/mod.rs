//! Configuration of the command-line tools.

pub mod match_demo;

pub use match_demo::{load_config, MatchDemoConfig, MatchDemoOutput, TemplateSpec};
