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

//! Parser for phrase deck files.
//!
//! A deck file looks like this:
//!
//! ```text
//! #phrases
//! 01
//! ru  Как вас зовут?
//! en  What is your f name?
//! fr  Quel est votre nom?
//!
//! 02  Меня зовут...
//! en  My name is...
//!
//! 03  Извините
//!     Excuse f me | to get attention
//! ```
//!
//! Each number starts a new card and names its audio file. Text on the same
//! line as the number is in the target language. A line starting with a
//! recognized language code holds that language's text. An untagged line is
//! target language text if the card has none yet, and interface language text
//! otherwise.

mod assemble;
mod classifier;
mod format;
mod tokenizer;

use std::time::Instant;

use crate::config::Config;
use crate::error::Fallible;
use crate::parser::assemble::assemble;
use crate::parser::classifier::classify;
use crate::parser::tokenizer::tokenize;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::language::LanguageSet;
use crate::validate::validate_deck;

/// Parse every numbered card in the file, complete or not.
pub fn parse_cards(content: &str, languages: &LanguageSet) -> Vec<Card> {
    let tokens = tokenize(content);
    log::debug!(
        "Found {} card blocks after {} preamble line(s).",
        tokens.blocks.len(),
        tokens.preamble.len()
    );
    tokens
        .blocks
        .into_iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let chunks = block.lines.into_iter().map(|line| classify(line, languages));
            assemble(index, chunks, languages)
        })
        .collect()
}

/// Parse and validate a deck file.
pub fn parse_deck(content: &str, config: &Config) -> Fallible<Deck> {
    log::debug!(
        "Parsing deck with languages {}...",
        config.languages.codes().join(", ")
    );
    let start = Instant::now();
    let cards = parse_cards(content, &config.languages);
    let duration = start.elapsed().as_millis();
    log::debug!("Parsed {} cards in {duration}ms.", cards.len());
    let deck = validate_deck(content, &config.sentinel, cards, &config.languages)?;
    log::debug!("Deck has {} usable cards.", deck.len());
    Ok(deck)
}
