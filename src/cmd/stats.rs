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

use serde::Serialize;

use crate::collection::Collection;
use crate::confusing::ConfusingSet;
use crate::days::day_count;
use crate::error::Fallible;
use crate::loader::load_words;
use crate::types::corpus_hash::CorpusHash;

pub async fn print_stats(coll: &Collection) -> Fallible<()> {
    let stats = get_stats(coll).await?;
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    word_count: usize,
    skipped_row_count: usize,
    page_size: usize,
    day_count: usize,
    confusing_count: usize,
    corpus_hash: CorpusHash,
}

async fn get_stats(coll: &Collection) -> Fallible<Stats> {
    let list = load_words(&coll.source, &coll.config.columns).await?;
    // Don't create a store just to count what's in it.
    let confusing_count = if coll.store.exists() {
        ConfusingSet::open(&coll.store).len()
    } else {
        0
    };
    let page_size = coll.config.page_size;
    Ok(Stats {
        word_count: list.words.len(),
        skipped_row_count: list.skipped_rows,
        page_size,
        day_count: day_count(list.words.len(), page_size),
        confusing_count,
        corpus_hash: CorpusHash::of(&list.words),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::helper::write_numbered_word_list;
    use crate::types::word::WordRecord;

    #[tokio::test]
    async fn test_stats() -> Fallible<()> {
        let dir = tempdir()?;
        let source = write_numbered_word_list(dir.path(), 250)?;
        let coll = Collection::new(Some(source.display().to_string()), None, None)?;
        {
            let mut confusing = ConfusingSet::open(&coll.store);
            confusing.add(WordRecord::new("front1", "back1"));
        }
        let stats = get_stats(&coll).await?;
        assert_eq!(stats.word_count, 250);
        assert_eq!(stats.day_count, 3);
        assert_eq!(stats.confusing_count, 1);

        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["wordCount"], 250);
        assert_eq!(json["pageSize"], 100);
        assert_eq!(json["corpusHash"].as_str().map(str::len), Some(64));
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_without_store() -> Fallible<()> {
        let dir = tempdir()?;
        let source = write_numbered_word_list(dir.path(), 10)?;
        let coll = Collection::new(Some(source.display().to_string()), None, None)?;
        let stats = get_stats(&coll).await?;
        assert_eq!(stats.confusing_count, 0);
        assert!(!coll.store.exists());
        Ok(())
    }
}
