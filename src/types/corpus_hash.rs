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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

use crate::types::word::WordRecord;

/// A fingerprint of a corpus' content. Two corpora with the same words in
/// the same order have the same hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CorpusHash {
    inner: blake3::Hash,
}

impl CorpusHash {
    pub fn of(words: &[WordRecord]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(words.len() as u64).to_le_bytes());
        for word in words {
            // Length prefixes keep ("ab", "c") and ("a", "bc") apart.
            hasher.update(&(word.front.len() as u64).to_le_bytes());
            hasher.update(word.front.as_bytes());
            hasher.update(&(word.back.len() as u64).to_le_bytes());
            hasher.update(word.back.as_bytes());
        }
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }
}

impl Display for CorpusHash {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for CorpusHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}
