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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;

/// A durable key-value store backed by SQLite.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &Path) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Read the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from kv where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let sql = "insert into kv (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        tx.execute(sql, (key, value))?;
        tx.commit()?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_missing() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::new(&dir.path().join("test.db"))?;
        assert_eq!(db.get("nothing")?, None);
        Ok(())
    }

    #[test]
    fn test_set_overwrites() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("test.db"))?;
        db.set("k", "one")?;
        db.set("k", "two")?;
        assert_eq!(db.get("k")?, Some("two".to_string()));
        Ok(())
    }

    #[test]
    fn test_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.db");
        {
            let mut db = Database::new(&path)?;
            db.set("k", "v")?;
        }
        let db = Database::new(&path)?;
        assert_eq!(db.get("k")?, Some("v".to_string()));
        Ok(())
    }
}
