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
use std::path::PathBuf;

use crate::cmd::load_deck;
use crate::config::Config;
use crate::db::Database;
use crate::error::Context;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::import::ImportReport;
use crate::import::import_deck;

pub struct ImportRequest {
    /// The deck file.
    pub file: PathBuf,
    /// Overrides the configured database name.
    pub database: Option<String>,
    /// Defaults to the name of the deck file's directory.
    pub collection: Option<String>,
    /// An explicit configuration file.
    pub config: Option<PathBuf>,
}

/// What the user is asked to approve before the store is touched.
pub struct Confirmation<'a> {
    pub entries: usize,
    pub database: &'a Path,
    pub collection: &'a str,
}

/// Parse, validate and import a deck file.
///
/// Returns `None` if the user declined the import.
pub fn import_file(
    request: ImportRequest,
    confirm: impl FnOnce(&Confirmation) -> Fallible<bool>,
) -> Fallible<Option<ImportReport>> {
    let file: PathBuf = request.file.canonicalize().context(
        ErrorKind::SourceAccess,
        &format!("cannot find {}", request.file.display()),
    )?;
    let mut config = Config::discover(request.config.as_deref(), &file)?;
    if let Some(database) = request.database {
        config.store.database = database;
    }
    let collection: String = match request.collection {
        Some(collection) => collection,
        None => parent_folder_name(&file)?,
    };

    let deck = load_deck(&file, &config)?;
    println!("Number of entries: {}", deck.len());

    let database_path = config.store.database_path();
    let confirmation = Confirmation {
        entries: deck.len(),
        database: &database_path,
        collection: &collection,
    };
    if !confirm(&confirmation)? {
        println!("Import cancelled.");
        return Ok(None);
    }

    let mut db = Database::open(&database_path)?;
    log::debug!("Connected to {}", database_path.display());
    let report = import_deck(&mut db, &collection, &config.store.backup_suffix, deck)?;
    println!(
        "Inserted {} documents into {}.",
        report.inserted, report.collection
    );
    if let Some(backup) = &report.backup {
        println!("The previous contents are in {backup}.");
    }
    Ok(Some(report))
}

/// The name of the directory containing the file, which names the collection
/// by convention: `/path/to/russian/phrases.txt` goes into `russian`.
fn parent_folder_name(file: &Path) -> Fallible<String> {
    match file
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
    {
        Some(name) => Ok(name.to_string()),
        None => fail_with(
            ErrorKind::SourceAccess,
            format!(
                "cannot derive a collection name from {}; pass one explicitly.",
                file.display()
            ),
        ),
    }
}
