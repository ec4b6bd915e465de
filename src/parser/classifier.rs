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

use crate::types::language::LanguageSet;

/// One line of a card block, classified by its leading token.
#[derive(Debug, PartialEq)]
pub enum Chunk<'a> {
    /// A card number, optionally followed by target language text.
    NumericTag { id: &'a str, text: Option<&'a str> },
    /// A recognized language code, optionally followed by text.
    CodeTag { code: &'a str, text: Option<&'a str> },
    /// A line with no recognized tag.
    PlainText(&'a str),
}

pub fn classify<'a>(line: &'a str, languages: &LanguageSet) -> Chunk<'a> {
    let line = line.trim();
    let (token, rest) = match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim_start()),
        None => (line, ""),
    };
    let text = if rest.is_empty() { None } else { Some(rest) };
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        Chunk::NumericTag { id: token, text }
    } else if languages.recognize(token).is_some() {
        Chunk::CodeTag { code: token, text }
    } else {
        Chunk::PlainText(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_with_text() {
        let languages = LanguageSet::default();
        assert_eq!(
            classify("02  Меня зовут...", &languages),
            Chunk::NumericTag {
                id: "02",
                text: Some("Меня зовут...")
            }
        );
    }

    #[test]
    fn test_numeric_alone() {
        let languages = LanguageSet::default();
        assert_eq!(
            classify("  05  ", &languages),
            Chunk::NumericTag {
                id: "05",
                text: None
            }
        );
    }

    #[test]
    fn test_code_tag() {
        let languages = LanguageSet::default();
        assert_eq!(
            classify("fr\tJe m'appelle...", &languages),
            Chunk::CodeTag {
                code: "fr",
                text: Some("Je m'appelle...")
            }
        );
        assert_eq!(
            classify("en", &languages),
            Chunk::CodeTag {
                code: "en",
                text: None
            }
        );
    }

    #[test]
    fn test_plain_text() {
        let languages = LanguageSet::default();
        assert_eq!(
            classify("    Excuse f me", &languages),
            Chunk::PlainText("Excuse f me")
        );
        // A code only counts when it is a whole token.
        assert_eq!(
            classify("enough is enough", &languages),
            Chunk::PlainText("enough is enough")
        );
        // Unrecognized codes are just text.
        assert_eq!(classify("de  Hallo", &languages), Chunk::PlainText("de  Hallo"));
        // Digits embedded in a sentence are not a tag.
        assert_eq!(
            classify("I have 2 cats", &languages),
            Chunk::PlainText("I have 2 cats")
        );
    }
}
