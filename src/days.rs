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

//! Splitting the corpus into days.

use crate::types::word::WordRecord;

/// The number of days needed to cover `len` words.
pub fn day_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The words studied on a given day. Days are numbered from 1. Days
/// outside `1..=day_count` are empty.
pub fn day_slice(words: &[WordRecord], day: usize, page_size: usize) -> &[WordRecord] {
    if day == 0 || page_size == 0 {
        return &[];
    }
    let start = (day - 1).saturating_mul(page_size);
    if start >= words.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(words.len());
    &words[start..end]
}
