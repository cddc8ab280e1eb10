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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::loader::load_words;

pub async fn check_word_list(coll: &Collection) -> Fallible<()> {
    let _ = load_words(&coll.source, &coll.config.columns).await?;
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::helper::write_word_list;

    #[tokio::test]
    async fn test_non_existent_file() {
        let coll = Collection::new(Some("./derpherp.csv".to_string()), None, None).unwrap();
        assert!(check_word_list(&coll).await.is_err());
    }

    #[tokio::test]
    async fn test_word_list() -> Fallible<()> {
        let dir = tempdir()?;
        let source = write_word_list(dir.path(), &[("Hund", "dog")])?;
        let coll = Collection::new(Some(source.display().to_string()), None, None)?;
        assert!(check_word_list(&coll).await.is_ok());
        Ok(())
    }
}
