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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Context;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::types::language::LanguageSet;

/// The name of the configuration file looked up beside a deck file.
pub const CONFIG_FILE_NAME: &str = "phrasedeck.toml";

const DEFAULT_SENTINEL: &str = "#phrases";
const DEFAULT_DATABASE: &str = "flashcards";
const DEFAULT_BACKUP_SUFFIX: &str = "_bkk";

/// Settings for a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The line every deck file must start with.
    pub sentinel: String,
    pub languages: LanguageSet,
    pub store: StoreConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// The directory holding the database files.
    pub directory: PathBuf,
    /// The database name, without extension.
    pub database: String,
    /// Appended to a collection's name to form its backup's name.
    pub backup_suffix: String,
}

impl StoreConfig {
    pub fn database_path(&self) -> PathBuf {
        self.directory.join(format!("{}.db", self.database))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            languages: LanguageSet::default(),
            store: StoreConfig {
                directory: PathBuf::from("."),
                database: DEFAULT_DATABASE.to_string(),
                backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            },
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    sentinel: Option<String>,
    languages: RawLanguages,
    store: RawStore,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawLanguages {
    target: Option<String>,
    interface: Option<String>,
    additional: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawStore {
    directory: Option<PathBuf>,
    database: Option<String>,
    backup_suffix: Option<String>,
}

impl Config {
    /// Parse a TOML configuration. Missing keys take their default values.
    pub fn parse(text: &str) -> Fallible<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::from_raw(raw)
    }

    pub fn load(path: &Path) -> Fallible<Self> {
        log::debug!("Loading configuration from {}", path.display());
        let text = read_to_string(path).context(
            ErrorKind::Config,
            &format!("cannot read {}", path.display()),
        )?;
        Self::parse(&text)
    }

    /// Use the explicit path if one is given, otherwise a configuration file
    /// beside the deck, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, deck_path: &Path) -> Fallible<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(parent) = deck_path.parent() {
            let path = parent.join(CONFIG_FILE_NAME);
            if path.is_file() {
                return Self::load(&path);
            }
        }
        log::debug!("Using default configuration.");
        Ok(Self::default())
    }

    fn from_raw(raw: RawConfig) -> Fallible<Self> {
        let defaults = Self::default();
        let languages = {
            let RawLanguages {
                target,
                interface,
                additional,
            } = raw.languages;
            if target.is_none() && interface.is_none() && additional.is_none() {
                defaults.languages
            } else {
                let target = target.unwrap_or_else(|| defaults.languages.target().to_string());
                let interface =
                    interface.unwrap_or_else(|| defaults.languages.interface().to_string());
                LanguageSet::new(target, interface, &additional.unwrap_or_default())?
            }
        };
        let sentinel = raw.sentinel.unwrap_or(defaults.sentinel);
        if sentinel.trim().is_empty() {
            return fail_with(ErrorKind::Config, "the sentinel must not be blank.");
        }
        let store = StoreConfig {
            directory: raw.store.directory.unwrap_or(defaults.store.directory),
            database: raw.store.database.unwrap_or(defaults.store.database),
            backup_suffix: raw.store.backup_suffix.unwrap_or(defaults.store.backup_suffix),
        };
        if store.database.is_empty() {
            return fail_with(ErrorKind::Config, "the database name must not be empty.");
        }
        if store.backup_suffix.is_empty() {
            return fail_with(ErrorKind::Config, "the backup suffix must not be empty.");
        }
        Ok(Self {
            sentinel: sentinel.trim().to_string(),
            languages,
            store,
        })
    }
}
