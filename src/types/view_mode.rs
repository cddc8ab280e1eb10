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

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One card at a time, in shuffled order.
    #[default]
    Card,
    /// The whole set as a table, in file order.
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Card => ViewMode::List,
            ViewMode::List => ViewMode::Card,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViewMode::Card => "card",
            ViewMode::List => "list",
        }
    }
}
