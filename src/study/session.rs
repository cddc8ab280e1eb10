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

//! Study session state.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::config::Config;
use crate::confusing::ConfusingSet;
use crate::days::day_count;
use crate::shuffle::ShuffleCache;
use crate::study::flip::Advance;
use crate::study::flip::FlipController;
use crate::study::flip::Step;
use crate::types::corpus_hash::CorpusHash;
use crate::types::direction::Direction;
use crate::types::view_mode::ViewMode;
use crate::types::word::WordRecord;

/// Everything the user is doing right now: which day, which word, how it
/// is shown.
///
/// All mutation goes through methods on this struct. Out of range requests
/// are ignored rather than reported, so the UI can render the matching
/// controls as disabled.
pub struct StudySession {
    page_size: usize,
    words: Vec<WordRecord>,
    corpus_hash: CorpusHash,
    cache: ShuffleCache,
    confusing: ConfusingSet,
    current_day: usize,
    view_mode: ViewMode,
    direction: Direction,
    show_confusing_only: bool,
    flip: FlipController,
    /// List view rows whose answer is shown, by position in the active set.
    revealed: BTreeSet<usize>,
    reveal_all: bool,
}

/// Pick the words currently being studied.
pub fn resolve_active_set<'a>(
    show_confusing_only: bool,
    view_mode: ViewMode,
    cache: &'a ShuffleCache,
    confusing: &'a [WordRecord],
) -> &'a [WordRecord] {
    if show_confusing_only {
        confusing
    } else {
        match view_mode {
            ViewMode::Card => cache.shuffled(),
            ViewMode::List => cache.ordered(),
        }
    }
}

impl StudySession {
    pub fn new(
        words: Vec<WordRecord>,
        confusing: ConfusingSet,
        cache: ShuffleCache,
        config: &Config,
    ) -> Self {
        let corpus_hash = CorpusHash::of(&words);
        let mut session = Self {
            page_size: config.page_size,
            words,
            corpus_hash,
            cache,
            confusing,
            current_day: 1,
            view_mode: ViewMode::default(),
            direction: config.direction,
            show_confusing_only: false,
            flip: FlipController::new(config.advance, config.transition_timeout),
            revealed: BTreeSet::new(),
            reveal_all: false,
        };
        session.refresh_cache();
        session
    }

    /// False until a non-empty word list has been loaded.
    pub fn is_ready(&self) -> bool {
        !self.words.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn day_count(&self) -> usize {
        day_count(self.words.len(), self.page_size)
    }

    pub fn current_day(&self) -> usize {
        self.current_day
    }

    pub fn current_index(&self) -> usize {
        self.flip.current_index()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn show_confusing_only(&self) -> bool {
        self.show_confusing_only
    }

    pub fn flipped(&self) -> bool {
        self.flip.flipped()
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.flip.pending_index()
    }

    pub fn is_transitioning(&self) -> bool {
        self.flip.is_transitioning()
    }

    pub fn needs_rotation(&self) -> bool {
        self.flip.needs_rotation()
    }

    pub fn confusing(&self) -> &ConfusingSet {
        &self.confusing
    }

    pub fn active_set(&self) -> &[WordRecord] {
        resolve_active_set(
            self.show_confusing_only,
            self.view_mode,
            &self.cache,
            self.confusing.records(),
        )
    }

    pub fn current_word(&self) -> Option<&WordRecord> {
        self.active_set().get(self.current_index())
    }

    pub fn can_prev(&self) -> bool {
        self.can_step(Step::Backward)
    }

    pub fn can_next(&self) -> bool {
        self.can_step(Step::Forward)
    }

    fn can_step(&self, step: Step) -> bool {
        let len = self.active_set().len();
        !self.is_transitioning() && self.flip.target(step, len).is_some()
    }

    /// Switch to another day. Ignored in confusing mode and for days that
    /// don't exist.
    pub fn change_day(&mut self, day: usize) -> bool {
        if self.show_confusing_only {
            log::debug!("Ignoring day change in confusing mode.");
            return false;
        }
        if day == 0 || day > self.day_count() {
            log::debug!("Ignoring change to non-existent day {day}.");
            return false;
        }
        self.current_day = day;
        self.refresh_cache();
        self.restart();
        true
    }

    pub fn toggle_confusing_mode(&mut self) {
        self.show_confusing_only = !self.show_confusing_only;
        self.restart();
    }

    /// Switch between card and list view. The position is shared between
    /// the two views.
    pub fn toggle_view_mode(&mut self) {
        // Nothing animates in list view, so don't leave an advance hanging.
        self.flip.complete_transition();
        self.view_mode = self.view_mode.toggled();
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    pub fn next(&mut self, now: Instant) -> Advance {
        let len = self.active_set().len();
        self.flip.request_advance(Step::Forward, len, now)
    }

    pub fn prev(&mut self, now: Instant) -> Advance {
        let len = self.active_set().len();
        self.flip.request_advance(Step::Backward, len, now)
    }

    /// The browser finished the flip animation.
    pub fn settle(&mut self) -> bool {
        self.flip.complete_transition()
    }

    /// Commit a transition whose deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.flip.tick(now)
    }

    pub fn flip(&mut self) -> bool {
        self.flip.flip()
    }

    /// Show or hide the answer of one list row.
    pub fn toggle_reveal(&mut self, index: usize) {
        if index >= self.active_set().len() {
            return;
        }
        if !self.revealed.remove(&index) {
            self.revealed.insert(index);
        }
    }

    /// Show or hide every answer in the list, forgetting per-row choices.
    pub fn toggle_reveal_all(&mut self) {
        self.reveal_all = !self.reveal_all;
        self.revealed.clear();
    }

    pub fn reveal_all(&self) -> bool {
        self.reveal_all
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveal_all || self.revealed.contains(&index)
    }

    /// Flag the word at `index` in the active set as confusing.
    pub fn add_to_confusing(&mut self, index: usize) -> bool {
        match self.active_set().get(index).cloned() {
            Some(word) => self.confusing.add(word),
            None => false,
        }
    }

    /// Unflag the word at `index` in the active set.
    pub fn remove_from_confusing(&mut self, index: usize) -> bool {
        let position = match self.active_set().get(index) {
            Some(word) => self.confusing.position(word),
            None => None,
        };
        match position {
            Some(position) => self.remove_confusing(position),
            None => false,
        }
    }

    /// Remove the confusing word at `index`. When the confusing set is being
    /// studied the position is clamped so it stays within the smaller set.
    pub fn remove_confusing(&mut self, index: usize) -> bool {
        if self.confusing.remove(index).is_none() {
            return false;
        }
        if self.show_confusing_only {
            let len = self.confusing.len();
            let current = self.current_index();
            let clamped = if current >= len {
                len.saturating_sub(1)
            } else {
                current
            };
            self.flip.reset_to(clamped);
            self.revealed.clear();
        }
        true
    }

    pub fn current_is_confusing(&self) -> bool {
        match self.current_word() {
            Some(word) => self.confusing.contains(word),
            None => false,
        }
    }

    /// Replace the corpus. The day is kept if it still exists. The day is
    /// always shuffled again, even when the content is unchanged.
    pub fn reload_corpus(&mut self, words: Vec<WordRecord>) {
        self.corpus_hash = CorpusHash::of(&words);
        self.words = words;
        let days = self.day_count().max(1);
        if self.current_day > days {
            self.current_day = days;
        }
        self.cache.invalidate();
        self.refresh_cache();
        self.restart();
    }

    /// Draw a new shuffled order for the current day.
    pub fn reshuffle(&mut self) {
        self.cache.invalidate();
        self.refresh_cache();
        if !self.show_confusing_only {
            self.restart();
        }
    }

    fn refresh_cache(&mut self) {
        self.cache.refresh(
            &self.words,
            self.corpus_hash,
            self.current_day,
            self.page_size,
        );
    }

    /// Back to the first word, front face up.
    fn restart(&mut self) {
        self.flip.reset_to(0);
        self.revealed.clear();
    }
}
