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

//! Gating index changes on the end of the flip animation.
//!
//! When the user advances, the card is first rotated to its back face and
//! only then replaced by the next word, so the back of the old card is never
//! swapped out while it is still visible. The controller moves between two
//! states:
//!
//! - `Settled`: nothing in flight, `flipped` is whatever the user last chose.
//! - `Transitioning`: an advance is pending. It commits when the browser
//!   reports the end of the animation, or when the deadline passes,
//!   whichever comes first.

use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;

/// How `next`/`prev` take effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvanceMode {
    /// Wait for the flip animation before changing the word.
    #[default]
    Gated,
    /// Change the word at once.
    Immediate,
}

/// Which way to move through the active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlipState {
    Settled { flipped: bool },
    Transitioning {
        pending_index: usize,
        deadline: Instant,
        /// The back face was already showing when the advance was requested.
        from_flipped: bool,
    },
}

/// The outcome of an advance request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Out of range, or another transition is in flight.
    Rejected,
    /// The index changed.
    Committed,
    /// A transition started; it must be completed before the index changes.
    Started { deadline: Instant },
}

pub struct FlipController {
    mode: AdvanceMode,
    timeout: Duration,
    current_index: usize,
    state: FlipState,
}

impl FlipController {
    pub fn new(mode: AdvanceMode, timeout: Duration) -> Self {
        Self {
            mode,
            timeout,
            current_index: 0,
            state: FlipState::Settled { flipped: false },
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn flipped(&self) -> bool {
        match self.state {
            FlipState::Settled { flipped } => flipped,
            FlipState::Transitioning { .. } => true,
        }
    }

    pub fn pending_index(&self) -> Option<usize> {
        match self.state {
            FlipState::Settled { .. } => None,
            FlipState::Transitioning { pending_index, .. } => Some(pending_index),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, FlipState::Transitioning { .. })
    }

    /// Whether the pending advance still has to rotate the card. False when
    /// the back face was already up, so there is nothing to wait for.
    pub fn needs_rotation(&self) -> bool {
        match self.state {
            FlipState::Settled { .. } => false,
            FlipState::Transitioning { from_flipped, .. } => !from_flipped,
        }
    }

    /// The index the request would move to, if it is within `0..len`.
    pub fn target(&self, step: Step, len: usize) -> Option<usize> {
        let target = match step {
            Step::Forward => self.current_index.checked_add(1)?,
            Step::Backward => self.current_index.checked_sub(1)?,
        };
        if target < len { Some(target) } else { None }
    }

    /// Ask to move one word forward or backward in a set of `len` words.
    pub fn request_advance(&mut self, step: Step, len: usize, now: Instant) -> Advance {
        if self.is_transitioning() {
            log::debug!("Ignoring advance: a transition is already in flight.");
            return Advance::Rejected;
        }
        let Some(target) = self.target(step, len) else {
            return Advance::Rejected;
        };
        match self.mode {
            AdvanceMode::Immediate => {
                self.current_index = target;
                self.state = FlipState::Settled { flipped: false };
                Advance::Committed
            }
            AdvanceMode::Gated => {
                let deadline = now + self.timeout;
                self.state = FlipState::Transitioning {
                    pending_index: target,
                    deadline,
                    from_flipped: self.flipped(),
                };
                Advance::Started { deadline }
            }
        }
    }

    /// The flip animation finished. Returns true if a pending advance was
    /// committed.
    pub fn complete_transition(&mut self) -> bool {
        match self.state {
            FlipState::Settled { .. } => false,
            FlipState::Transitioning { pending_index, .. } => {
                self.current_index = pending_index;
                self.state = FlipState::Settled { flipped: false };
                true
            }
        }
    }

    /// Force-complete a transition whose deadline has passed. Returns true
    /// if one was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            FlipState::Transitioning { deadline, .. } if now >= deadline => {
                log::warn!("Flip animation did not report completion, committing anyway.");
                self.complete_transition()
            }
            _ => false,
        }
    }

    /// Manual flip. Has no effect while the card is rotating for an advance.
    pub fn flip(&mut self) -> bool {
        match self.state {
            FlipState::Settled { flipped } => {
                self.state = FlipState::Settled { flipped: !flipped };
                true
            }
            FlipState::Transitioning { .. } => false,
        }
    }

    /// Drop any pending transition and show the front face.
    pub fn cancel(&mut self) {
        self.state = FlipState::Settled { flipped: false };
    }

    /// Jump to `index`, dropping any pending transition.
    pub fn reset_to(&mut self, index: usize) {
        self.current_index = index;
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(1000);

    fn gated() -> FlipController {
        FlipController::new(AdvanceMode::Gated, TIMEOUT)
    }

    #[test]
    fn test_advance_from_back_face_needs_no_rotation() {
        let mut flip = gated();
        let now = Instant::now();
        flip.request_advance(Step::Forward, 3, now);
        assert!(flip.needs_rotation());
        flip.complete_transition();

        flip.flip();
        flip.request_advance(Step::Forward, 3, now);
        assert!(flip.is_transitioning());
        assert!(!flip.needs_rotation());
        assert!(flip.complete_transition());
        assert_eq!(flip.current_index(), 2);
        assert!(!flip.flipped());
        assert!(!flip.needs_rotation());
    }

    #[test]
    fn test_advance_waits_for_completion() {
        let mut flip = gated();
        let now = Instant::now();
        let result = flip.request_advance(Step::Forward, 3, now);
        assert_eq!(
            result,
            Advance::Started {
                deadline: now + TIMEOUT
            }
        );
        assert_eq!(flip.current_index(), 0);
        assert!(flip.flipped());
        assert_eq!(flip.pending_index(), Some(1));

        assert!(flip.complete_transition());
        assert_eq!(flip.current_index(), 1);
        assert!(!flip.flipped());
        assert_eq!(flip.pending_index(), None);
    }

    #[test]
    fn test_second_request_is_rejected() {
        let mut flip = gated();
        let now = Instant::now();
        flip.request_advance(Step::Forward, 5, now);
        assert_eq!(
            flip.request_advance(Step::Forward, 5, now),
            Advance::Rejected
        );
        assert_eq!(
            flip.request_advance(Step::Backward, 5, now),
            Advance::Rejected
        );
        assert_eq!(flip.pending_index(), Some(1));
        assert!(flip.complete_transition());
        // Exactly one advance was applied.
        assert_eq!(flip.current_index(), 1);
        assert!(!flip.complete_transition());
        assert_eq!(flip.current_index(), 1);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut flip = gated();
        let now = Instant::now();
        assert_eq!(flip.request_advance(Step::Backward, 3, now), Advance::Rejected);
        flip.reset_to(2);
        assert_eq!(flip.request_advance(Step::Forward, 3, now), Advance::Rejected);
        assert_eq!(flip.pending_index(), None);
        assert!(!flip.flipped());
        assert_eq!(flip.request_advance(Step::Forward, 0, now), Advance::Rejected);
    }

    #[test]
    fn test_backward() {
        let mut flip = gated();
        flip.reset_to(2);
        flip.request_advance(Step::Backward, 3, Instant::now());
        flip.complete_transition();
        assert_eq!(flip.current_index(), 1);
    }

    #[test]
    fn test_timeout_forces_completion() {
        let mut flip = gated();
        let now = Instant::now();
        flip.request_advance(Step::Forward, 3, now);
        assert!(!flip.tick(now + Duration::from_millis(999)));
        assert!(flip.is_transitioning());
        assert!(flip.tick(now + TIMEOUT));
        assert_eq!(flip.current_index(), 1);
        assert!(!flip.flipped());
        assert!(!flip.tick(now + TIMEOUT * 2));
    }

    #[test]
    fn test_immediate_mode() {
        let mut flip = FlipController::new(AdvanceMode::Immediate, TIMEOUT);
        flip.flip();
        assert_eq!(
            flip.request_advance(Step::Forward, 3, Instant::now()),
            Advance::Committed
        );
        assert_eq!(flip.current_index(), 1);
        assert!(!flip.flipped());
        assert!(!flip.is_transitioning());
    }

    #[test]
    fn test_manual_flip() {
        let mut flip = gated();
        assert!(flip.flip());
        assert!(flip.flipped());
        assert!(flip.flip());
        assert!(!flip.flipped());
        assert_eq!(flip.pending_index(), None);
    }

    #[test]
    fn test_manual_flip_ignored_while_transitioning() {
        let mut flip = gated();
        flip.request_advance(Step::Forward, 3, Instant::now());
        assert!(!flip.flip());
        assert!(flip.flipped());
        assert_eq!(flip.pending_index(), Some(1));
    }

    #[test]
    fn test_advance_from_flipped_card() {
        let mut flip = gated();
        flip.flip();
        flip.request_advance(Step::Forward, 3, Instant::now());
        flip.complete_transition();
        assert!(!flip.flipped());
        assert_eq!(flip.current_index(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut flip = gated();
        flip.request_advance(Step::Forward, 3, Instant::now());
        flip.cancel();
        assert_eq!(flip.pending_index(), None);
        assert_eq!(flip.current_index(), 0);
        assert!(!flip.complete_transition());
    }
}
