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

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::days::day_slice;
use crate::types::corpus_hash::CorpusHash;
use crate::types::word::WordRecord;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct CacheKey {
    corpus: CorpusHash,
    day: usize,
    page_size: usize,
}

/// Holds the ordered and shuffled words of the active day.
///
/// The shuffled order is computed once per (corpus, day) and reused until
/// one of them changes, so that leaving the card view and coming back shows
/// the same order.
pub struct ShuffleCache {
    rng: StdRng,
    key: Option<CacheKey>,
    ordered: Vec<WordRecord>,
    shuffled: Vec<WordRecord>,
}

impl ShuffleCache {
    /// A cache seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A cache with a fixed seed, for reproducible orders.
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            key: None,
            ordered: Vec::new(),
            shuffled: Vec::new(),
        }
    }

    /// Make sure the cache holds the given day of the given corpus. Returns
    /// true if the day had to be (re)computed.
    pub fn refresh(
        &mut self,
        words: &[WordRecord],
        corpus: CorpusHash,
        day: usize,
        page_size: usize,
    ) -> bool {
        let key = CacheKey {
            corpus,
            day,
            page_size,
        };
        if self.key == Some(key) {
            return false;
        }
        self.ordered = day_slice(words, day, page_size).to_vec();
        self.shuffled = self.ordered.clone();
        self.shuffled.shuffle(&mut self.rng);
        self.key = Some(key);
        log::debug!("Shuffled {} words for day {day}.", self.shuffled.len());
        true
    }

    /// Forget the cached day. The next `refresh` reshuffles.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// The day's words in file order.
    pub fn ordered(&self) -> &[WordRecord] {
        &self.ordered
    }

    /// The day's words in shuffled order.
    pub fn shuffled(&self) -> &[WordRecord] {
        &self.shuffled
    }
}

impl Default for ShuffleCache {
    fn default() -> Self {
        Self::new()
    }
}
