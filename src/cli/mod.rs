//! Command-line host: terminal player, content check, story dump

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::content::{Story, check};
use crate::input::KeyBindings;

pub mod play;
pub mod terminal;

/// Settings file for the terminal player
///
/// Engine settings sit at the top level, key bindings under `keys`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub keys: KeyBindings,
}

impl PlayConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid config '{}'", path.display()))
    }
}

/// Load a story file, or the built-in story when no path is given
pub fn load_story(path: Option<&Path>) -> anyhow::Result<Story> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read story '{}'", path.display()))?;
            Story::from_json(&json).with_context(|| format!("cannot load '{}'", path.display()))
        }
        None => Ok(Story::default()),
    }
}

/// Check a story file and print the report. Returns whether it is valid.
pub fn run_check(json: &str) -> anyhow::Result<bool> {
    let story: Story = serde_json::from_str(json).context("story is not valid JSON")?;
    let report = check::check(&story);

    for error in &report.errors {
        println!("error: {error}");
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    println!(
        "{} intro, {} dialogue steps, {} scroll blocks: {} errors, {} warnings",
        story.intro.len(),
        story.dialogue.len(),
        story.scroll.len(),
        report.errors.len(),
        report.warnings.len()
    );
    Ok(report.is_valid())
}

/// The built-in story as JSON, a starting point for authoring
pub fn dump() -> anyhow::Result<String> {
    Story::default().to_json()
}
