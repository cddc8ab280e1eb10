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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::cmd::study::get::get_handler;
use crate::cmd::study::post::post_handler;
use crate::cmd::study::state::MutableState;
use crate::cmd::study::state::ServerState;
use crate::config::Config;
use crate::confusing::ConfusingSet;
use crate::error::Fallible;
use crate::loader::load_words;
use crate::shuffle::ShuffleCache;
use crate::study::session::StudySession;

pub struct StudyOptions {
    /// Path to the word list.
    pub source: PathBuf,
    /// Path to the database holding the confusing words.
    pub store: PathBuf,
    pub config: Config,
    /// Open the browser once the server is up.
    pub open_browser: bool,
}

pub async fn start_server(options: StudyOptions) -> Fallible<()> {
    let StudyOptions {
        source,
        store,
        config,
        open_browser,
    } = options;

    let (words, load_error) = match load_words(&source, &config.columns).await {
        Ok(list) => (list.words, None),
        Err(e) => {
            log::error!("{e}");
            (Vec::new(), Some(e.message().to_string()))
        }
    };
    let confusing = ConfusingSet::open(&store);
    let session = StudySession::new(words, confusing, ShuffleCache::new(), &config);
    log::debug!(
        "{} words in {} days, {} confusing.",
        session.word_count(),
        session.day_count(),
        session.confusing().len()
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let port = config.port;
    let state = ServerState {
        source,
        config,
        mutable: Arc::new(Mutex::new(MutableState {
            session,
            load_error,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    // Start the server.
    log::info!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = shutdown_rx => {}
                _ = ctrl_c() => {}
            }
        })
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
