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

use std::collections::HashMap;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::language::LanguageSet;

/// The smallest number of usable cards a deck may have.
pub const MIN_CARDS: usize = 2;

const EXCERPT_LINES: usize = 3;
const EXCERPT_CHARS: usize = 120;

/// Turn the parsed cards of a file into a deck, or explain why the file is
/// unusable.
pub fn validate_deck(
    content: &str,
    sentinel: &str,
    cards: Vec<Card>,
    languages: &LanguageSet,
) -> Fallible<Deck> {
    check_preamble(content, sentinel)?;

    let cards: Vec<Card> = cards
        .into_iter()
        .filter(|card| {
            let complete = card.is_complete(languages);
            if !complete {
                log::debug!(
                    "Dropping card {} (index {}): it needs both {} and {} text.",
                    card.id(),
                    card.index(),
                    languages.target(),
                    languages.interface()
                );
            }
            complete
        })
        .collect();

    if cards.len() < MIN_CARDS {
        return fail_with(
            ErrorKind::InsufficientData,
            format!(
                "found {} usable card(s), at least {MIN_CARDS} are needed.",
                cards.len()
            ),
        );
    }

    let duplicates = duplicate_ids(&cards);
    if !duplicates.is_empty() {
        let message = format!("duplicate card IDs: {}.", duplicates.join(", "));
        return fail_with(ErrorKind::DuplicateId { ids: duplicates }, message);
    }

    Ok(Deck::new(cards))
}

/// The file must open with the sentinel, followed by a numbered line.
fn check_preamble(content: &str, sentinel: &str) -> Fallible<()> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let first = lines.next().map(str::trim);
    let second = lines.next().map(str::trim_start);
    let valid = first == Some(sentinel)
        && second.is_some_and(|line| line.starts_with(|c: char| c.is_ascii_digit()));
    if valid {
        Ok(())
    } else {
        fail_with(
            ErrorKind::Format,
            format!(
                "not a recognized deck format: expected '{sentinel}' followed by a numbered entry, found:\n{}",
                excerpt(content)
            ),
        )
    }
}

fn excerpt(content: &str) -> String {
    let text: String = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(EXCERPT_LINES)
        .collect::<Vec<_>>()
        .join("\n");
    if text.chars().count() > EXCERPT_CHARS {
        let cut: String = text.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        text
    }
}

/// Every ID that appears more than once, in order of first appearance.
fn duplicate_ids(cards: &[Card]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.id()).or_default() += 1;
    }
    let mut duplicates: Vec<String> = Vec::new();
    for card in cards {
        let id = card.id();
        if counts[id] > 1 && !duplicates.iter().any(|d| d == id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}
