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

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::language::LanguageSet;

const AUDIO_EXTENSION: &str = "mp3";

/// One phrase card, serialized in the shape it is stored in.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The card number from the source file.
    id: String,
    /// The name of the audio file for this card.
    audio_ref: String,
    /// The position of the card's block in the source file.
    index: usize,
    /// Formatted text, keyed by language code.
    #[serde(flatten)]
    text: BTreeMap<String, String>,
}

impl Card {
    pub fn new(id: impl Into<String>, index: usize, text: BTreeMap<String, String>) -> Self {
        let id: String = id.into();
        let audio_ref = audio_ref_for(&id);
        Self {
            id,
            audio_ref,
            index,
            text,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn audio_ref(&self) -> &str {
        &self.audio_ref
    }

    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub fn text(&self, code: &str) -> Option<&str> {
        self.text.get(code).map(String::as_str)
    }

    /// Whether the card has text in both the target and interface language.
    pub fn is_complete(&self, languages: &LanguageSet) -> bool {
        self.text.contains_key(languages.target()) && self.text.contains_key(languages.interface())
    }
}

pub fn audio_ref_for(id: &str) -> String {
    format!("{id}.{AUDIO_EXTENSION}")
}
