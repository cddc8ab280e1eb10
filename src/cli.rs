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

use clap::Parser;

use crate::cmd::check::check_word_list;
use crate::cmd::stats::print_stats;
use crate::cmd::study::server::StudyOptions;
use crate::cmd::study::server::start_server;
use crate::collection::Collection;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study a word list in the browser.
    Study {
        /// Path to the word list. Defaults to `words.csv` in the current directory.
        file: Option<String>,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
        /// Path to the database holding the confusing words.
        #[arg(long)]
        store: Option<String>,
        /// Port to listen on.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Check that a word list can be loaded.
    Check {
        /// Path to the word list.
        file: Option<String>,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
    },
    /// Print statistics about a word list as JSON.
    Stats {
        /// Path to the word list.
        file: Option<String>,
        /// Path to the config file.
        #[arg(long)]
        config: Option<String>,
        /// Path to the database holding the confusing words.
        #[arg(long)]
        store: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study {
            file,
            config,
            store,
            port,
            no_open,
        } => {
            let mut coll = Collection::new(file, config, store)?;
            if let Some(port) = port {
                coll.config.port = port;
            }
            let options = StudyOptions {
                source: coll.source,
                store: coll.store,
                config: coll.config,
                open_browser: !no_open,
            };
            start_server(options).await
        }
        Command::Check { file, config } => {
            let coll = Collection::new(file, config, None)?;
            check_word_list(&coll).await
        }
        Command::Stats {
            file,
            config,
            store,
        } => {
            let coll = Collection::new(file, config, store)?;
            print_stats(&coll).await
        }
    }
}
