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

use crate::db::Database;
use crate::db::backup_collection;
use crate::db::count_documents;
use crate::db::create_collection;
use crate::db::insert_documents;
use crate::db::probe_collection;
use crate::error::Context;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;
use crate::error::fail_with;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

/// The outcome of a successful import.
#[derive(Debug, PartialEq)]
pub struct ImportReport {
    pub collection: String,
    pub inserted: usize,
    /// The name the previous collection was moved to, if there was one.
    pub backup: Option<String>,
}

/// Replace a collection's contents with the deck.
///
/// An existing collection is renamed to `<collection><backup_suffix>`,
/// replacing any older backup, and a fresh collection receives every card.
/// All steps run in one transaction: if any of them fails, the database is
/// left as it was. The backup is never deleted.
pub fn import_deck(
    db: &mut Database,
    collection: &str,
    backup_suffix: &str,
    deck: Deck,
) -> Fallible<ImportReport> {
    if collection.is_empty() {
        return fail("the collection name is empty.");
    }
    let expected = deck.len();
    let backup_name = format!("{collection}{backup_suffix}");

    let tx = db.transaction()?;

    let exists = probe_collection(&tx, collection)
        .context(ErrorKind::Other, "checking for existing collection")?;

    let backup = if exists {
        log::debug!("Moving collection '{collection}' to '{backup_name}'.");
        backup_collection(&tx, collection, &backup_name)
            .context(ErrorKind::Backup, &format!("backing up '{collection}'"))?;
        Some(backup_name)
    } else {
        log::debug!("Collection '{collection}' does not exist yet, nothing to back up.");
        None
    };

    log::debug!("Creating collection '{collection}'.");
    create_collection(&tx, collection)
        .context(ErrorKind::Other, &format!("creating '{collection}'"))?;

    let imported_at = Timestamp::now();
    log::debug!("Inserting {expected} cards at {imported_at}.");
    let inserted = insert_documents(&tx, collection, deck.cards(), imported_at)?;
    check_insert_count(expected, inserted)?;
    // The collection is new, so it must hold exactly what was just written.
    let stored = count_documents(&tx, collection)?;
    check_insert_count(expected, stored)?;

    tx.commit()?;
    log::info!("Inserted {inserted} documents into '{collection}'.");
    Ok(ImportReport {
        collection: collection.to_string(),
        inserted,
        backup,
    })
}

fn check_insert_count(expected: usize, inserted: usize) -> Fallible<()> {
    if expected == inserted {
        Ok(())
    } else {
        fail_with(
            ErrorKind::InsertCountMismatch { expected, inserted },
            format!("expected to insert {expected} documents, but {inserted} were written."),
        )
    }
}
