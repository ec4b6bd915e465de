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

use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;

use crate::cmd::check::check_deck;
use crate::cmd::export::export_deck;
use crate::cmd::import::Confirmation;
use crate::cmd::import::ImportRequest;
use crate::cmd::import::import_file;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Import a deck file, replacing the collection's previous contents.
    Import {
        /// Path to the deck file.
        file: String,
        /// Name of the database to import into.
        #[arg(long)]
        db: Option<String>,
        /// Name of the collection. Defaults to the file's directory name.
        #[arg(long)]
        collection: Option<String>,
        /// Path to a configuration file.
        #[arg(long)]
        config: Option<String>,
        /// Import without asking for confirmation.
        #[arg(long, short)]
        yes: bool,
    },
    /// Check that a deck file is valid.
    Check {
        /// Path to the deck file.
        file: String,
        /// Path to a configuration file.
        #[arg(long)]
        config: Option<String>,
    },
    /// Print the records a deck file would import, as JSON.
    Export {
        /// Path to the deck file.
        file: String,
        /// Path to a configuration file.
        #[arg(long)]
        config: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Import {
            file,
            db,
            collection,
            config,
            yes,
        } => {
            let request = ImportRequest {
                file: PathBuf::from(strip_quotes(&file)),
                database: db.as_deref().map(strip_quotes).map(str::to_string),
                collection: collection.as_deref().map(strip_quotes).map(str::to_string),
                config: config.as_deref().map(strip_quotes).map(PathBuf::from),
            };
            let confirm = |confirmation: &Confirmation| {
                if yes {
                    Ok(true)
                } else {
                    ask(confirmation)
                }
            };
            import_file(request, confirm)?;
            Ok(())
        }
        Command::Check { file, config } => {
            let config = config.as_deref().map(strip_quotes).map(PathBuf::from);
            check_deck(&PathBuf::from(strip_quotes(&file)), config.as_deref())
        }
        Command::Export { file, config } => {
            let config = config.as_deref().map(strip_quotes).map(PathBuf::from);
            export_deck(&PathBuf::from(strip_quotes(&file)), config.as_deref())
        }
    }
}

fn ask(confirmation: &Confirmation) -> Fallible<bool> {
    print!(
        "Replace collection '{}' in {} with {} entries? [y/N] ",
        confirmation.collection,
        confirmation.database.display(),
        confirmation.entries
    );
    stdout().flush()?;
    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Remove matching pairs of quotes around an argument, as left behind by
/// dragging a file into a terminal.
fn strip_quotes(arg: &str) -> &str {
    let mut arg = arg;
    loop {
        let mut chars = arg.chars();
        match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) if first == last && matches!(first, '\'' | '"' | '`') => {
                arg = &arg[1..arg.len() - 1];
            }
            _ => return arg,
        }
    }
}
