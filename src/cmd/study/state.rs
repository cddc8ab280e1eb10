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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::config::Config;
use crate::study::session::StudySession;

#[derive(Clone)]
pub struct ServerState {
    /// Path to the word list, re-read on reload.
    pub source: PathBuf,
    pub config: Config,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

pub struct MutableState {
    pub session: StudySession,
    /// Why the word list could not be loaded. While set, every page shows
    /// the error instead of the session.
    pub load_error: Option<String>,
}
