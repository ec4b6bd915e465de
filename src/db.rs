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
use rusqlite::Transaction;

use crate::error::Context;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// A SQLite database in which each collection is a table of card documents.
///
/// Table names are derived from collection names by [`table_name`], so any
/// string is a valid collection name.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(database_path: &Path) -> Fallible<Self> {
        let step = format!("cannot open database {}", database_path.display());
        let conn = Connection::open(database_path).context(ErrorKind::StoreConnection, &step)?;
        // Opening is lazy: make sure the file really is a database.
        conn.query_row("select count(*) from sqlite_master;", [], |row| {
            row.get::<_, i64>(0)
        })
        .context(ErrorKind::StoreConnection, &step)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn transaction(&mut self) -> Fallible<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    #[cfg(test)]
    pub fn collection_exists(&self, name: &str) -> Fallible<bool> {
        Ok(probe_collection(&self.conn, name)?)
    }

    /// The names of all collections, sorted.
    #[cfg(test)]
    pub fn collections(&self) -> Fallible<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("select name from sqlite_master where type = 'table';")?;
        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        let mut names: Vec<String> = tables
            .iter()
            .filter_map(|table| collection_name(table))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Return the number of documents in a collection.
    #[cfg(test)]
    pub fn count(&self, name: &str) -> Fallible<usize> {
        Ok(count_documents(&self.conn, name)?)
    }

    /// Return a collection's documents in insertion order.
    #[cfg(test)]
    pub fn documents(&self, name: &str) -> Fallible<Vec<serde_json::Value>> {
        let sql = format!(
            "select document from {} order by position;",
            quote_table(name)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let document: String = row.get(0)?;
            documents.push(serde_json::from_str(&document)?);
        }
        Ok(documents)
    }
}

pub fn probe_collection(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let sql = "select count(*) from sqlite_master where type = 'table' and name = ?;";
    let count: i64 = conn.query_row(sql, [table_name(name)], |row| row.get(0))?;
    Ok(count > 0)
}

pub fn count_documents(conn: &Connection, name: &str) -> rusqlite::Result<usize> {
    let sql = format!("select count(*) from {};", quote_table(name));
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Move a collection to the backup name, replacing any earlier backup.
pub fn backup_collection(tx: &Transaction, name: &str, backup: &str) -> rusqlite::Result<()> {
    let sql = format!(
        "drop table if exists {backup}; alter table {name} rename to {backup};",
        name = quote_table(name),
        backup = quote_table(backup),
    );
    tx.execute_batch(&sql)
}

pub fn create_collection(tx: &Transaction, name: &str) -> rusqlite::Result<()> {
    let sql = format!(
        "create table {} (
            position integer primary key,
            card_id text not null unique,
            audio_ref text not null,
            card_index integer not null,
            imported_at text not null,
            document text not null
        );",
        quote_table(name)
    );
    tx.execute_batch(&sql)
}

/// Write the cards into a collection, returning how many rows were written.
///
/// A card whose ID is already in the collection is skipped, so the count can
/// fall short of `cards.len()`.
pub fn insert_documents(
    tx: &Transaction,
    name: &str,
    cards: &[Card],
    imported_at: Timestamp,
) -> Fallible<usize> {
    let sql = format!(
        "insert or ignore into {} (card_id, audio_ref, card_index, imported_at, document) values (?, ?, ?, ?, ?);",
        quote_table(name)
    );
    let mut stmt = tx.prepare(&sql)?;
    let mut inserted = 0;
    for card in cards {
        let document = serde_json::to_string(card)?;
        inserted += stmt.execute((
            card.id(),
            card.audio_ref(),
            card.index() as i64,
            imported_at,
            document,
        ))?;
    }
    Ok(inserted)
}

const TABLE_PREFIX: &str = "collection_";

/// The table holding a collection: a fixed prefix and the hex-encoded UTF-8
/// bytes of the name.
///
/// SQLite compares table names case-insensitively and reserves the `sqlite_`
/// prefix, so names cannot be used as they are. Distinct names always give
/// distinct tables.
pub fn table_name(collection: &str) -> String {
    let mut table = String::from(TABLE_PREFIX);
    for byte in collection.bytes() {
        table.push_str(&format!("{byte:02x}"));
    }
    table
}

/// The collection a table holds, if it is a collection table.
#[cfg(test)]
fn collection_name(table: &str) -> Option<String> {
    let hex = table.strip_prefix(TABLE_PREFIX)?;
    if hex.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

fn quote_table(collection: &str) -> String {
    format!("\"{}\"", table_name(collection))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                let mut text = BTreeMap::new();
                text.insert("ru".to_string(), format!("<p>ru {i}</p>"));
                text.insert("en".to_string(), format!("<p>en {i}</p>"));
                Card::new(format!("{:02}", i + 1), i, text)
            })
            .collect()
    }

    #[test]
    fn test_open_creates_file() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let path = directory.join("flashcards.db");
        let db = Database::open(&path)?;
        assert!(db.collections()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_open_in_missing_directory() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let path = directory.join("nope").join("flashcards.db");
        let err = Database::open(&path).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::StoreConnection);
        Ok(())
    }

    #[test]
    fn test_open_not_a_database() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let path = directory.join("flashcards.db");
        std::fs::write(&path, "this is not a sqlite file, just some text that is long enough")?;
        let err = Database::open(&path).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::StoreConnection);
        Ok(())
    }

    #[test]
    fn test_insert_and_read() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        let tx = db.transaction()?;
        create_collection(&tx, "russian")?;
        let inserted = insert_documents(&tx, "russian", &cards(3), Timestamp::now())?;
        tx.commit()?;
        assert_eq!(inserted, 3);
        assert!(db.collection_exists("russian")?);
        assert_eq!(db.count("russian")?, 3);
        let documents = db.documents("russian")?;
        assert_eq!(documents[0]["id"], "01");
        assert_eq!(documents[0]["audioRef"], "01.mp3");
        assert_eq!(documents[2]["index"], 2);
        assert_eq!(documents[2]["en"], "<p>en 2</p>");
        Ok(())
    }

    #[test]
    fn test_backup_replaces_previous_backup() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        let tx = db.transaction()?;
        create_collection(&tx, "russian_bkk")?;
        insert_documents(&tx, "russian_bkk", &cards(5), Timestamp::now())?;
        create_collection(&tx, "russian")?;
        insert_documents(&tx, "russian", &cards(2), Timestamp::now())?;
        backup_collection(&tx, "russian", "russian_bkk")?;
        tx.commit()?;
        assert!(!db.collection_exists("russian")?);
        assert_eq!(db.count("russian_bkk")?, 2);
        Ok(())
    }

    #[test]
    fn test_awkward_names() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        let name = "my \"phrases\"; drop table x";
        let tx = db.transaction()?;
        create_collection(&tx, name)?;
        insert_documents(&tx, name, &cards(1), Timestamp::now())?;
        tx.commit()?;
        assert_eq!(db.collections()?, vec![name.to_string()]);
        assert_eq!(db.count(name)?, 1);
        Ok(())
    }

    #[test]
    fn test_names_differing_in_case() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        let tx = db.transaction()?;
        create_collection(&tx, "Russian")?;
        assert!(!probe_collection(&tx, "russian")?);
        create_collection(&tx, "russian")?;
        insert_documents(&tx, "russian", &cards(2), Timestamp::now())?;
        tx.commit()?;
        assert_eq!(db.collections()?, vec!["Russian", "russian"]);
        assert_eq!(db.count("Russian")?, 0);
        assert_eq!(db.count("russian")?, 2);
        Ok(())
    }

    #[test]
    fn test_reserved_prefix() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        let tx = db.transaction()?;
        create_collection(&tx, "sqlite_phrases")?;
        insert_documents(&tx, "sqlite_phrases", &cards(1), Timestamp::now())?;
        tx.commit()?;
        assert_eq!(db.collections()?, vec!["sqlite_phrases"]);
        Ok(())
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("ru"), "collection_7275");
        assert_eq!(table_name(""), "collection_");
        assert_eq!(collection_name("collection_7275"), Some("ru".to_string()));
        assert_eq!(collection_name("collection_727"), None);
        assert_eq!(collection_name("phrases"), None);
        let name = "Фразы \"1\"";
        assert_eq!(collection_name(&table_name(name)), Some(name.to_string()));
    }

    #[test]
    fn test_duplicate_ids_skipped() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        let mut batch = cards(2);
        batch.extend(cards(1));
        let tx = db.transaction()?;
        create_collection(&tx, "russian")?;
        let inserted = insert_documents(&tx, "russian", &batch, Timestamp::now())?;
        tx.commit()?;
        assert_eq!(inserted, 2);
        assert_eq!(db.count("russian")?, 2);
        Ok(())
    }

    #[test]
    fn test_rollback_on_drop() -> Fallible<()> {
        let mut db = Database::open_in_memory()?;
        {
            let tx = db.transaction()?;
            create_collection(&tx, "russian")?;
        }
        assert!(!db.collection_exists("russian")?);
        Ok(())
    }
}
