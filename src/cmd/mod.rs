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

pub mod check;
pub mod export;
pub mod import;

use std::fs::read_to_string;
use std::path::Path;

use crate::config::Config;
use crate::error::Context;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::parser::parse_deck;
use crate::types::deck::Deck;

/// Read a deck file's contents.
pub fn read_source(path: &Path) -> Fallible<String> {
    if !path.is_file() {
        return fail_with(
            ErrorKind::SourceAccess,
            format!("{} does not exist or is not a file.", path.display()),
        );
    }
    read_to_string(path).context(
        ErrorKind::SourceAccess,
        &format!("cannot read {}", path.display()),
    )
}

pub fn load_deck(path: &Path, config: &Config) -> Fallible<Deck> {
    log::debug!("Loading deck from {}", path.display());
    let content = read_source(path)?;
    parse_deck(&content, config)
}
