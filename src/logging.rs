//! Debug logging for story sessions
//!
//! Engine code logs through the `log` facade with one target per
//! category. `DebugLogger` is the stderr backend used by the binary.

use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Environment variable that turns debug output on
pub const DEBUG_ENV: &str = "HEREAFTER_DEBUG";

pub const ENGINE: &str = "hereafter::engine";
pub const FLOW: &str = "hereafter::flow";
pub const TIMER: &str = "hereafter::timer";
pub const ANIMATION: &str = "hereafter::anim";
pub const INPUT: &str = "hereafter::input";

/// Debug log category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugCategory {
    /// Rendering and state changes
    Engine,
    /// Section transitions and interludes
    Flow,
    /// Timer arming, cancellation and firing
    Timer,
    /// Fades and their completions
    Animation,
    /// Triggers and commands
    Input,
}

impl DebugCategory {
    pub fn target(&self) -> &'static str {
        match self {
            DebugCategory::Engine => ENGINE,
            DebugCategory::Flow => FLOW,
            DebugCategory::Timer => TIMER,
            DebugCategory::Animation => ANIMATION,
            DebugCategory::Input => INPUT,
        }
    }

    fn of_target(target: &str) -> Option<Self> {
        [
            DebugCategory::Engine,
            DebugCategory::Flow,
            DebugCategory::Timer,
            DebugCategory::Animation,
            DebugCategory::Input,
        ]
        .into_iter()
        .find(|c| c.target() == target)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable debug logging
    pub enabled: bool,
    /// Minimum log level
    pub level: LevelFilter,
    /// Enabled categories
    pub categories: HashSet<DebugCategory>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let mut categories = HashSet::new();
        categories.insert(DebugCategory::Engine);
        categories.insert(DebugCategory::Flow);
        categories.insert(DebugCategory::Timer);

        Self {
            enabled: std::env::var(DEBUG_ENV).is_ok(),
            level: LevelFilter::Debug,
            categories,
        }
    }
}

impl DebugConfig {
    /// Everything, down to trace
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Trace,
            categories: [
                DebugCategory::Engine,
                DebugCategory::Flow,
                DebugCategory::Timer,
                DebugCategory::Animation,
                DebugCategory::Input,
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// Stderr backend for the `log` facade
#[derive(Debug)]
pub struct DebugLogger {
    config: DebugConfig,
}

impl DebugLogger {
    pub fn new(config: DebugConfig) -> Self {
        Self { config }
    }

    /// Install as the global logger. Warnings and errors from any target
    /// always pass; debug categories are filtered.
    pub fn install(config: DebugConfig) -> Result<(), log::SetLoggerError> {
        let level = if config.enabled {
            config.level
        } else {
            LevelFilter::Warn
        };
        log::set_boxed_logger(Box::new(Self::new(config)))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() <= log::Level::Warn {
            return true;
        }
        if !self.config.enabled || metadata.level() > self.config.level {
            return false;
        }
        match DebugCategory::of_target(metadata.target()) {
            Some(category) => self.config.categories.contains(&category),
            None => false,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let category = DebugCategory::of_target(record.target())
            .map(|c| format!("{c:?}"))
            .unwrap_or_else(|| record.target().to_string());
        eprintln!("[{}] {:10} {}", record.level(), category, record.args());
    }

    fn flush(&self) {}
}
