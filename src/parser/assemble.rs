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

use crate::parser::classifier::Chunk;
use crate::parser::format::to_html;
use crate::types::card::Card;
use crate::types::language::LanguageSet;

/// A card under construction.
#[derive(Debug)]
pub struct CardBuilder {
    index: usize,
    id: Option<String>,
    text: BTreeMap<String, String>,
}

impl CardBuilder {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            id: None,
            text: BTreeMap::new(),
        }
    }

    /// Fold one chunk into the card.
    pub fn apply(mut self, chunk: Chunk<'_>, languages: &LanguageSet) -> Self {
        match chunk {
            Chunk::NumericTag { id, text } => {
                self.id = Some(id.to_string());
                // Text on the numbered line is in the target language.
                if let Some(text) = text {
                    self.set(languages.target(), text);
                }
            }
            Chunk::CodeTag { code, text } => {
                if let Some(text) = text {
                    self.set(code, text);
                }
            }
            Chunk::PlainText(text) => {
                // Untagged lines fill the target language first, then the
                // interface language. Any further untagged lines overwrite
                // the interface language.
                if self.text.contains_key(languages.target()) {
                    self.set(languages.interface(), text);
                } else {
                    self.set(languages.target(), text);
                }
            }
        }
        self
    }

    fn set(&mut self, code: &str, text: &str) {
        self.text.insert(code.to_string(), to_html(text));
    }

    /// Finish the card. Cards that never got a number are discarded.
    pub fn build(self) -> Option<Card> {
        let id = self.id?;
        Some(Card::new(id, self.index, self.text))
    }
}

pub fn assemble<'a>(
    index: usize,
    chunks: impl IntoIterator<Item = Chunk<'a>>,
    languages: &LanguageSet,
) -> Option<Card> {
    chunks
        .into_iter()
        .fold(CardBuilder::new(index), |builder, chunk| {
            builder.apply(chunk, languages)
        })
        .build()
}
