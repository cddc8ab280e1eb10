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

use std::env::current_dir;
use std::path::Path;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::config::Config;
use crate::error::Fallible;

/// The default word list name, looked up in the current directory.
pub const DEFAULT_WORD_LIST: &str = "words.csv";
/// The default database name, placed next to the word list.
pub const DEFAULT_STORE: &str = "vocabdeck.db";

/// The files a command works with.
pub struct Collection {
    /// The word list.
    pub source: PathBuf,
    /// The database holding the confusing words.
    pub store: PathBuf,
    pub config: Config,
}

impl Collection {
    pub fn new(
        file: Option<String>,
        config: Option<String>,
        store: Option<String>,
    ) -> Fallible<Self> {
        let source: PathBuf = match file {
            Some(file) => PathBuf::from(file),
            None => current_dir()?.join(DEFAULT_WORD_LIST),
        };
        let directory: PathBuf = source.parent().map(Path::to_path_buf).unwrap_or_default();
        let explicit_config: Option<PathBuf> = config.map(PathBuf::from);
        let config = Config::load(
            explicit_config.as_deref(),
            &directory.join(CONFIG_FILE_NAME),
        )?;
        let store: PathBuf = match store {
            Some(store) => PathBuf::from(store),
            None => directory.join(DEFAULT_STORE),
        };
        Ok(Self {
            source,
            store,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_next_to_word_list() -> Fallible<()> {
        let dir = tempdir()?;
        let source = dir.path().join("list.csv");
        write(dir.path().join(CONFIG_FILE_NAME), "page_size = 20")?;
        let coll = Collection::new(Some(source.display().to_string()), None, None)?;
        assert_eq!(coll.source, source);
        assert_eq!(coll.store, dir.path().join(DEFAULT_STORE));
        assert_eq!(coll.config.page_size, 20);
        Ok(())
    }

    #[test]
    fn test_explicit_paths() -> Fallible<()> {
        let dir = tempdir()?;
        let config = dir.path().join("other.toml");
        write(&config, "port = 9000")?;
        let store = dir.path().join("other.db");
        let coll = Collection::new(
            Some(dir.path().join("list.csv").display().to_string()),
            Some(config.display().to_string()),
            Some(store.display().to_string()),
        )?;
        assert_eq!(coll.store, store);
        assert_eq!(coll.config.port, 9000);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_config() {
        let result = Collection::new(
            Some("./words.csv".to_string()),
            Some("./derpherp.toml".to_string()),
            None,
        );
        assert!(result.is_err());
    }
}
