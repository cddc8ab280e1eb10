// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::loader::Column;
use crate::loader::ColumnMapping;
use crate::study::flip::AdvanceMode;
use crate::types::direction::Direction;

/// The name of the config file looked up next to the word list.
pub const CONFIG_FILE_NAME: &str = "vocabdeck.toml";

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FLIP_DURATION_MS: u64 = 600;
/// Slack added on top of the flip duration before a transition is forced.
const TIMEOUT_SLACK_MS: u64 = 400;

/// The on-disk representation. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    page_size: Option<usize>,
    front_column: Option<String>,
    back_column: Option<String>,
    advance: Option<AdvanceMode>,
    flip_duration_ms: Option<u64>,
    transition_timeout_ms: Option<u64>,
    port: Option<u16>,
    direction: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of words per day.
    pub page_size: usize,
    pub columns: ColumnMapping,
    pub advance: AdvanceMode,
    /// Duration of the CSS flip animation.
    pub flip_duration: Duration,
    /// Hard deadline after which a pending transition is committed even if
    /// the browser never reported the end of the animation.
    pub transition_timeout: Duration,
    pub port: u16,
    /// Direction at startup.
    pub direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            columns: ColumnMapping::default(),
            advance: AdvanceMode::default(),
            flip_duration: Duration::from_millis(DEFAULT_FLIP_DURATION_MS),
            transition_timeout: Duration::from_millis(DEFAULT_FLIP_DURATION_MS + TIMEOUT_SLACK_MS),
            port: DEFAULT_PORT,
            direction: Direction::default(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicitly given path must exist. Otherwise `fallback` is read if
    /// it exists, and the defaults are used if it does not.
    pub fn load(explicit: Option<&Path>, fallback: &Path) -> Fallible<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                path
            }
            None => {
                if !fallback.exists() {
                    log::debug!("No config file, using defaults.");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        log::debug!("Loading config from {}", path.display());
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Fallible<Self> {
        let defaults = Self::default();
        let page_size = file.page_size.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return fail("page_size must be at least 1.");
        }
        let columns = ColumnMapping {
            front: match file.front_column {
                Some(name) => Column::Name(name),
                None => defaults.columns.front,
            },
            back: match file.back_column {
                Some(name) => Column::Name(name),
                None => defaults.columns.back,
            },
        };
        let flip_ms = file.flip_duration_ms.unwrap_or(DEFAULT_FLIP_DURATION_MS);
        let timeout_ms = file
            .transition_timeout_ms
            .unwrap_or(flip_ms + TIMEOUT_SLACK_MS);
        if timeout_ms < flip_ms {
            return fail("transition_timeout_ms must not be shorter than flip_duration_ms.");
        }
        Ok(Self {
            page_size,
            columns,
            advance: file.advance.unwrap_or(defaults.advance),
            flip_duration: Duration::from_millis(flip_ms),
            transition_timeout: Duration::from_millis(timeout_ms),
            port: file.port.unwrap_or(defaults.port),
            direction: file.direction.unwrap_or(defaults.direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_config_is_default() -> Fallible<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_full_config() -> Fallible<()> {
        let config = Config::parse(
            r#"
            page_size = 50
            front_column = "German"
            back_column = "English"
            advance = "immediate"
            flip_duration_ms = 300
            transition_timeout_ms = 1000
            port = 9123
            direction = "back-to-front"
            "#,
        )?;
        assert_eq!(config.page_size, 50);
        assert_eq!(config.columns.front, Column::Name("German".to_string()));
        assert_eq!(config.columns.back, Column::Name("English".to_string()));
        assert_eq!(config.advance, AdvanceMode::Immediate);
        assert_eq!(config.flip_duration, Duration::from_millis(300));
        assert_eq!(config.transition_timeout, Duration::from_millis(1000));
        assert_eq!(config.port, 9123);
        assert_eq!(config.direction, Direction::BackToFront);
        Ok(())
    }

    #[test]
    fn test_timeout_follows_flip_duration() -> Fallible<()> {
        let config = Config::parse("flip_duration_ms = 1000")?;
        assert_eq!(config.transition_timeout, Duration::from_millis(1400));
        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("page_size = 0").is_err());
        assert!(Config::parse("flip_duration_ms = 500\ntransition_timeout_ms = 100").is_err());
        assert!(Config::parse("colour = \"blue\"").is_err());
        assert!(Config::parse("advance = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load() -> Fallible<()> {
        let dir = tempdir()?;
        let fallback = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(Config::load(None, &fallback)?, Config::default());

        write(&fallback, "page_size = 10")?;
        assert_eq!(Config::load(None, &fallback)?.page_size, 10);

        let missing = dir.path().join("missing.toml");
        assert!(Config::load(Some(&missing), &fallback).is_err());
        Ok(())
    }
}
