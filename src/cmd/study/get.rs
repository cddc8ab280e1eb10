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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::study::state::ServerState;
use crate::cmd::study::template::page_template;
use crate::config::Config;
use crate::study::session::StudySession;
use crate::types::direction::Direction;
use crate::types::view_mode::ViewMode;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    mutable.session.tick(Instant::now());
    let body = match &mutable.load_error {
        Some(message) => render_load_error(message),
        None => {
            let session = &mutable.session;
            if session.is_ready() {
                render_session(session, &state.config)
            } else {
                render_idle()
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_load_error(message: &str) -> Markup {
    html! {
        div.fatal {
            h1 { "Could not load the word list" }
            p.message { (message) }
            form action="/" method="post" {
                input id="reload" type="submit" name="action" value="Reload" title="Read the word list again.";
            }
        }
    }
}

fn render_idle() -> Markup {
    html! {
        div.fatal {
            h1 { "The word list is empty" }
            p { "Add some rows to the file and reload." }
            form action="/" method="post" {
                input id="reload" type="submit" name="action" value="Reload";
            }
        }
    }
}

fn render_session(session: &StudySession, config: &Config) -> Markup {
    let content = match session.view_mode() {
        ViewMode::Card => render_card_view(session, config),
        ViewMode::List => render_list_view(session),
    };
    html! {
        div.root data-view=(session.view_mode().as_str()) data-direction=(session.direction().as_str()) {
            (render_toolbar(session))
            (content)
        }
    }
}

fn render_toolbar(session: &StudySession) -> Markup {
    let confusing_only = session.show_confusing_only();
    let direction = match session.direction() {
        Direction::FrontToBack => "Front → Back",
        Direction::BackToFront => "Back → Front",
    };
    let view = match session.view_mode() {
        ViewMode::Card => "List view",
        ViewMode::List => "Card view",
    };
    let confusing = if confusing_only {
        "All words".to_string()
    } else {
        format!("Confusing ({})", session.confusing().len())
    };
    html! {
        div.toolbar {
            form #day-form action="/" method="post" {
                select #day name="day" disabled[confusing_only] {
                    @for day in 1..=session.day_count() {
                        option value=(day) selected[day == session.current_day()] {
                            "Day " (day)
                        }
                    }
                }
                button #change-day type="submit" name="action" value="ChangeDay" disabled[confusing_only] { "Go" }
            }
            form action="/" method="post" {
                button #toggle-direction type="submit" name="action" value="ToggleDirection" { (direction) }
                button #toggle-view type="submit" name="action" value="ToggleView" { (view) }
                button #toggle-confusing type="submit" name="action" value="ToggleConfusingMode" { (confusing) }
                @if !session.confusing().is_persistent() {
                    span.warning title="The confusing words could not be saved and will be lost when the server stops." { "Not saved" }
                }
                button #reshuffle type="submit" name="action" value="Reshuffle" disabled[confusing_only] { "Reshuffle" }
                button #reload type="submit" name="action" value="Reload" { "Reload" }
                button #shutdown type="submit" name="action" value="Shutdown" { "Quit" }
            }
        }
    }
}

fn render_card_view(session: &StudySession, config: &Config) -> Markup {
    let len = session.active_set().len();
    let Some(word) = session.current_word() else {
        return html! {
            div.card-container {
                p.empty { (empty_message(session)) }
            }
        };
    };
    let direction = session.direction();
    let index = session.current_index();
    let pending = session.pending_index().is_some();
    // A pending advance that still has to rotate is rendered front face up;
    // the script starts the rotation and reports when it is done. A card
    // already showing its back stays flipped and is settled at once.
    let flipped = session.flipped() && !session.needs_rotation();
    let style = format!("--flip-duration: {}ms;", config.flip_duration.as_millis());
    let timeout_ms = config.transition_timeout.as_millis().to_string();
    let progress = format!("{} / {}", index + 1, len);
    let is_confusing = session.current_is_confusing();
    html! {
        div.card-container {
            div #card .card .flipped[flipped] style=(style)
                data-pending=(if pending { "true" } else { "false" })
                data-timeout-ms=(timeout_ms) {
                div.face.front { (word.prompt(direction)) }
                div.face.back { (word.answer(direction)) }
            }
            div.progress { (progress) }
        }
        div.controls {
            form action="/" method="post" {
                input type="hidden" name="index" value=(index);
                input #prev type="submit" name="action" value="Prev" disabled[!session.can_prev()] title="Previous word. Shortcut: left arrow.";
                input #flip type="submit" name="action" value="Flip" disabled[pending] title="Flip the card. Shortcut: space.";
                input #next type="submit" name="action" value="Next" disabled[!session.can_next()] title="Next word. Shortcut: right arrow.";
                div.spacer {}
                @if is_confusing {
                    button #confusing type="submit" name="action" value="RemoveConfusing" title="Remove from the confusing words." { "Not confusing" }
                } @else {
                    button #confusing type="submit" name="action" value="AddConfusing" title="Add to the confusing words." { "Confusing" }
                }
            }
        }
    }
}

fn empty_message(session: &StudySession) -> &'static str {
    if session.show_confusing_only() && session.confusing().is_empty() {
        "No confusing words yet. Flag a word as confusing to review it here."
    } else {
        "No words in this set."
    }
}

fn render_list_view(session: &StudySession) -> Markup {
    let direction = session.direction();
    let words = session.active_set();
    if words.is_empty() {
        return html! {
            div.list {
                p.empty { (empty_message(session)) }
            }
        };
    }
    let reveal_all_label = if session.reveal_all() {
        "Hide all"
    } else {
        "Reveal all"
    };
    html! {
        div.list {
            form action="/" method="post" {
                button #reveal-all type="submit" name="action" value="RevealAll" { (reveal_all_label) }
            }
            table {
                tbody {
                    @for (index, word) in words.iter().enumerate() {
                        tr.current[index == session.current_index()] {
                            td.number { (index + 1) }
                            td.prompt { (word.prompt(direction)) }
                            td.answer {
                                @if session.is_revealed(index) {
                                    (word.answer(direction))
                                } @else {
                                    span.hidden { "•••" }
                                }
                            }
                            td.actions {
                                form action="/" method="post" {
                                    input type="hidden" name="index" value=(index);
                                    button type="submit" name="action" value="Reveal" {
                                        @if session.is_revealed(index) { "Hide" } @else { "Show" }
                                    }
                                    @if session.confusing().contains(word) {
                                        button type="submit" name="action" value="RemoveConfusing" { "Not confusing" }
                                    } @else {
                                        button type="submit" name="action" value="AddConfusing" { "Confusing" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
