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

use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Fallible;

/// Write a two-column word list with a header row.
pub fn write_word_list(dir: &Path, words: &[(&str, &str)]) -> Fallible<PathBuf> {
    let mut content = String::from("front,back\n");
    for (front, back) in words {
        content.push_str(&format!("{front},{back}\n"));
    }
    let path = dir.join("words.csv");
    write(&path, content)?;
    Ok(path)
}

/// Write a word list of `n` generated words.
pub fn write_numbered_word_list(dir: &Path, n: usize) -> Fallible<PathBuf> {
    let words: Vec<(String, String)> = (0..n)
        .map(|i| (format!("front{i}"), format!("back{i}")))
        .collect();
    let words: Vec<(&str, &str)> = words
        .iter()
        .map(|(f, b)| (f.as_str(), b.as_str()))
        .collect();
    write_word_list(dir, &words)
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_write_word_list() -> Fallible<()> {
        let dir = tempdir()?;
        let path = write_word_list(dir.path(), &[("a", "b")])?;
        assert_eq!(read_to_string(path)?, "front,back\na,b\n");
        Ok(())
    }
}
