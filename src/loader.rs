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

use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use csv::StringRecord;
use csv::Trim;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::word::WordRecord;

/// Delimiters we recognize, in order of preference when counts tie.
const DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

const BYTE_ORDER_MARK: &[u8] = b"\xef\xbb\xbf";

/// A reference to a column in the word list.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Zero-based position.
    Index(usize),
    /// Header name, compared after trimming.
    Name(String),
}

/// Which columns hold the front and back of each word.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub front: Column,
    pub back: Column,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            front: Column::Index(0),
            back: Column::Index(1),
        }
    }
}

/// The result of parsing a word list.
#[derive(Debug)]
pub struct WordList {
    pub words: Vec<WordRecord>,
    /// Rows that could not be parsed and were dropped.
    pub skipped_rows: usize,
}

/// Read and parse the word list at `path`.
pub async fn load_words(path: &Path, mapping: &ColumnMapping) -> Fallible<WordList> {
    if !path.exists() {
        return fail(format!("word list {} does not exist.", path.display()));
    }
    log::debug!("Loading word list from {}", path.display());
    let start = Instant::now();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => return fail(format!("failed to read {}: {e}", path.display())),
    };
    let list = parse_words(&bytes, mapping)?;
    let duration = start.elapsed().as_millis();
    log::debug!(
        "Loaded {} words ({} rows skipped) in {duration}ms.",
        list.words.len(),
        list.skipped_rows
    );
    Ok(list)
}

/// Parse tabular text with a header row into word records. Rows that are
/// not valid UTF-8 are skipped like any other malformed row.
pub fn parse_words(input: impl AsRef<[u8]>, mapping: &ColumnMapping) -> Fallible<WordList> {
    let input = input.as_ref();
    let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
    let delimiter = detect_delimiter(input);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);
    let headers: StringRecord = reader.headers()?.clone();
    let front = resolve_column(&mapping.front, &headers)?;
    let back = resolve_column(&mapping.back, &headers)?;

    let mut words = Vec::new();
    let mut skipped_rows = 0;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping malformed row: {e}");
                skipped_rows += 1;
                continue;
            }
        };
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let word = WordRecord::new(
            record.get(front).unwrap_or(""),
            record.get(back).unwrap_or(""),
        );
        words.push(word);
    }
    Ok(WordList {
        words,
        skipped_rows,
    })
}

/// Guess the delimiter from the header line: whichever candidate occurs
/// most often. Falls back to a comma.
pub fn detect_delimiter(input: &[u8]) -> u8 {
    let header = input
        .split(|b| *b == b'\n')
        .find(|line| !line.iter().all(u8::is_ascii_whitespace))
        .unwrap_or(&[]);
    let mut best = DELIMITERS[0];
    let mut best_count = 0;
    for delimiter in DELIMITERS {
        let count = header.iter().filter(|b| **b == delimiter).count();
        if count > best_count {
            best = delimiter;
            best_count = count;
        }
    }
    best
}

fn resolve_column(column: &Column, headers: &StringRecord) -> Fallible<usize> {
    match column {
        Column::Index(index) => Ok(*index),
        Column::Name(name) => match headers.iter().position(|h| h == name.trim()) {
            Some(index) => Ok(index),
            None => fail(format!("column '{name}' not found in the header row.")),
        },
    }
}
