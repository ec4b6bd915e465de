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

/// A deck file split into its preamble and its numbered blocks.
#[derive(Debug, PartialEq)]
pub struct Tokens<'a> {
    /// Non-blank lines before the first numbered line.
    pub preamble: Vec<&'a str>,
    /// One entry per card, in file order.
    pub blocks: Vec<Block<'a>>,
}

/// The non-blank lines of one card, starting with its numbered line.
#[derive(Debug, PartialEq)]
pub struct Block<'a> {
    pub lines: Vec<&'a str>,
}

pub fn tokenize(content: &str) -> Tokens<'_> {
    let mut preamble = Vec::new();
    let mut blocks: Vec<Block<'_>> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if is_block_boundary(line) {
            blocks.push(Block { lines: vec![line] });
        } else if let Some(block) = blocks.last_mut() {
            block.lines.push(line);
        } else {
            preamble.push(line);
        }
    }
    Tokens { preamble, blocks }
}

/// Does this line start a new card? That is, after optional indentation,
/// does it start with digits followed by whitespace or the end of the line?
pub fn is_block_boundary(line: &str) -> bool {
    let line = line.trim_start();
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < line.len() && (rest.is_empty() || rest.starts_with(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary() {
        assert!(is_block_boundary("01"));
        assert!(is_block_boundary("01  Меня зовут..."));
        assert!(is_block_boundary("   7\tseven"));
        assert!(!is_block_boundary("1.5 litres"));
        assert!(!is_block_boundary("01abc"));
        assert!(!is_block_boundary("en  My name is..."));
        assert!(!is_block_boundary(""));
    }

    #[test]
    fn test_blocks() {
        let content = "\n\n#phrases\n01\nru  Как вас зовут?\n\n\n02  Меня зовут...\n   \nen  My name is...\n";
        let tokens = tokenize(content);
        assert_eq!(tokens.preamble, vec!["#phrases"]);
        assert_eq!(
            tokens.blocks,
            vec![
                Block {
                    lines: vec!["01", "ru  Как вас зовут?"]
                },
                Block {
                    lines: vec!["02  Меня зовут...", "en  My name is..."]
                },
            ]
        );
    }

    #[test]
    fn test_indented_continuation() {
        let tokens = tokenize("03  Извините\n    Excuse f me\n04  Как тебя зовут?");
        assert!(tokens.preamble.is_empty());
        assert_eq!(tokens.blocks.len(), 2);
        assert_eq!(tokens.blocks[0].lines, vec!["03  Извините", "    Excuse f me"]);
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("  \n\n \t\n");
        assert!(tokens.preamble.is_empty());
        assert!(tokens.blocks.is_empty());
    }
}
