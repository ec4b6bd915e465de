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

use crate::cmd::load_deck;
use crate::config::Config;
use crate::error::Fallible;
use crate::types::deck::Deck;

/// Print the records that an import of this file would write.
pub fn export_deck(file: &Path, config: Option<&Path>) -> Fallible<()> {
    let config = Config::discover(config, file)?;
    let deck = load_deck(file, &config)?;
    println!("{}", export_json(&deck)?);
    Ok(())
}

fn export_json(deck: &Deck) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(deck.cards())?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_export_fixture() -> Fallible<()> {
        let deck = load_deck(&PathBuf::from("./test/phrases.txt"), &Config::default())?;
        let json: serde_json::Value = serde_json::from_str(&export_json(&deck)?)?;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(
            records[3],
            serde_json::json!({
                "id": "04",
                "audioRef": "04.mp3",
                "index": 3,
                "ru": "<p>Как тебя зовут?</p>",
                "en": "<p>What is your<sup>(informal)</sup> name?</p>",
            })
        );
        Ok(())
    }
}
