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

pub fn check_deck(file: &Path, config: Option<&Path>) -> Fallible<()> {
    let config = Config::discover(config, file)?;
    let deck = load_deck(file, &config)?;
    println!("ok ({} cards)", deck.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;
    use std::path::PathBuf;

    use super::check_deck;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_non_existent_file() {
        assert!(check_deck(&PathBuf::from("./derpherp.txt"), None).is_err());
    }

    #[test]
    fn test_fixture() {
        assert!(check_deck(&PathBuf::from("./test/phrases.txt"), None).is_ok());
    }

    #[test]
    fn test_wrong_format() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let file = directory.join("notes.txt");
        write(&file, "Shopping list\n3 apples\n2 pears\n")?;
        assert!(check_deck(&file, None).is_err());
        Ok(())
    }

    #[test]
    fn test_config_beside_deck() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let file = directory.join("phrases.txt");
        write(&file, "#deck\n1 Hallo\nHello\n2 Danke\nThanks\n")?;
        assert!(check_deck(&file, None).is_err());
        write(
            directory.join("phrasedeck.toml"),
            "sentinel = \"#deck\"\n[languages]\ntarget = \"de\"\n",
        )?;
        check_deck(&file, None)?;
        Ok(())
    }
}
