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

use std::time::Instant;

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::html;
use serde::Deserialize;
use tokio::time::sleep_until;

use crate::cmd::study::state::ServerState;
use crate::cmd::study::template::page_template;
use crate::error::Fallible;
use crate::error::fail;
use crate::loader::load_words;
use crate::study::flip::Advance;

#[derive(Debug, Deserialize)]
enum Action {
    Prev,
    Next,
    Flip,
    Settle,
    ToggleView,
    ToggleDirection,
    ToggleConfusingMode,
    ChangeDay,
    Reveal,
    RevealAll,
    AddConfusing,
    RemoveConfusing,
    Reshuffle,
    Reload,
    Shutdown,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    day: Option<usize>,
    index: Option<usize>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Response {
    let result = match form.action {
        Action::Shutdown => {
            shutdown(&state);
            let body = html! {
                div.fatal {
                    h1 { "Session ended" }
                    p { "You can close this tab." }
                }
            };
            return Html(page_template(body).into_string()).into_response();
        }
        Action::Reload => reload(&state).await,
        _ => action_handler(&state, form),
    };
    if let Err(e) = result {
        log::error!("error: {e}");
    }
    Redirect::to("/").into_response()
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let now = Instant::now();
    let session = &mut mutable.session;
    session.tick(now);
    match form.action {
        Action::Prev => {
            let advance = session.prev(now);
            schedule_timeout(state, advance);
        }
        Action::Next => {
            let advance = session.next(now);
            schedule_timeout(state, advance);
        }
        Action::Flip => {
            session.flip();
        }
        Action::Settle => {
            session.settle();
        }
        Action::ToggleView => session.toggle_view_mode(),
        Action::ToggleDirection => session.toggle_direction(),
        Action::ToggleConfusingMode => session.toggle_confusing_mode(),
        Action::ChangeDay => match form.day {
            Some(day) => {
                session.change_day(day);
            }
            None => return fail("day change without a day."),
        },
        Action::Reveal => match form.index {
            Some(index) => session.toggle_reveal(index),
            None => return fail("reveal without an index."),
        },
        Action::RevealAll => session.toggle_reveal_all(),
        Action::AddConfusing => {
            let index = form.index.unwrap_or(session.current_index());
            session.add_to_confusing(index);
        }
        Action::RemoveConfusing => {
            let index = form.index.unwrap_or(session.current_index());
            session.remove_from_confusing(index);
        }
        Action::Reshuffle => session.reshuffle(),
        Action::Reload | Action::Shutdown => {}
    }
    Ok(())
}

/// Re-read the word list from disk.
async fn reload(state: &ServerState) -> Fallible<()> {
    let result = load_words(&state.source, &state.config.columns).await;
    let mut mutable = state.mutable.lock().unwrap();
    match result {
        Ok(list) => {
            log::info!("Reloaded {} words.", list.words.len());
            mutable.session.reload_corpus(list.words);
            mutable.load_error = None;
            Ok(())
        }
        Err(e) => {
            mutable.load_error = Some(e.message().to_string());
            Err(e)
        }
    }
}

/// Make sure a started transition is committed by its deadline even if the
/// browser never reports the end of the animation.
fn schedule_timeout(state: &ServerState, advance: Advance) {
    if let Advance::Started { deadline } = advance {
        let mutable = state.mutable.clone();
        tokio::spawn(async move {
            sleep_until(tokio::time::Instant::from_std(deadline)).await;
            let mut mutable = mutable.lock().unwrap();
            mutable.session.tick(Instant::now());
        });
    }
}

fn shutdown(state: &ServerState) {
    log::debug!("Shutting down");
    if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
        let _ = tx.send(());
    }
}
