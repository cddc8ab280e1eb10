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

use crate::error::ErrorReport;
use crate::error::fail;

/// Which side of a word is the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    #[default]
    FrontToBack,
    BackToFront,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::FrontToBack => Direction::BackToFront,
            Direction::BackToFront => Direction::FrontToBack,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Direction::FrontToBack => "front-to-back",
            Direction::BackToFront => "back-to-front",
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "front-to-back" => Ok(Direction::FrontToBack),
            "back-to-front" => Ok(Direction::BackToFront),
            _ => fail(format!("Invalid direction: {}", value)),
        }
    }
}
