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

use serde::Deserialize;
use serde::Serialize;

use crate::types::direction::Direction;

/// One vocabulary entry: a term in the front language and its counterpart
/// in the back language.
///
/// Equality is structural: two records are the same word if both fields
/// match exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordRecord {
    pub front: String,
    pub back: String,
}

impl WordRecord {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// The side shown first in the given direction.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::FrontToBack => &self.front,
            Direction::BackToFront => &self.back,
        }
    }

    /// The side hidden until the card is flipped.
    pub fn answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::FrontToBack => &self.back,
            Direction::BackToFront => &self.front,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_and_answer() {
        let word = WordRecord::new("der Hund", "the dog");
        assert_eq!(word.prompt(Direction::FrontToBack), "der Hund");
        assert_eq!(word.answer(Direction::FrontToBack), "the dog");
        assert_eq!(word.prompt(Direction::BackToFront), "the dog");
        assert_eq!(word.answer(Direction::BackToFront), "der Hund");
    }

    #[test]
    fn test_json_shape() {
        let word = WordRecord::new("a", "b");
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, r#"{"front":"a","back":"b"}"#);
    }
}
