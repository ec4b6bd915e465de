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

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;

/// Record keys that a language code may not shadow in the output document.
pub const RESERVED_KEYS: [&str; 3] = ["id", "audioRef", "index"];

/// The closed set of language codes recognized during one run.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageSet {
    /// The language being taught.
    target: String,
    /// The language used to explain the target language.
    interface: String,
    /// Every recognized code, target first, interface second, no duplicates.
    codes: Vec<String>,
}

impl LanguageSet {
    pub fn new(
        target: impl Into<String>,
        interface: impl Into<String>,
        additional: &[String],
    ) -> Fallible<Self> {
        let target: String = target.into();
        let interface: String = interface.into();
        if target == interface {
            return fail_with(
                ErrorKind::Config,
                format!("target and interface language are both '{target}'."),
            );
        }
        let mut codes: Vec<String> = Vec::new();
        for code in [&target, &interface].into_iter().chain(additional.iter()) {
            validate_code(code)?;
            if !codes.contains(code) {
                codes.push(code.clone());
            }
        }
        Ok(Self {
            target,
            interface,
            codes,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Look up a token, returning the canonical code if it is recognized.
    pub fn recognize(&self, token: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|code| code.as_str() == token)
            .map(String::as_str)
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self {
            target: "ru".to_string(),
            interface: "en".to_string(),
            codes: vec!["ru".to_string(), "en".to_string(), "fr".to_string()],
        }
    }
}

fn validate_code(code: &str) -> Fallible<()> {
    if code.is_empty() {
        return fail_with(ErrorKind::Config, "empty language code.");
    }
    if code.chars().any(char::is_whitespace) {
        return fail_with(
            ErrorKind::Config,
            format!("language code '{code}' contains whitespace."),
        );
    }
    // A numeric code would be indistinguishable from a card number.
    if code.chars().all(|c| c.is_ascii_digit()) {
        return fail_with(
            ErrorKind::Config,
            format!("language code '{code}' is numeric."),
        );
    }
    if RESERVED_KEYS.contains(&code) {
        return fail_with(
            ErrorKind::Config,
            format!("language code '{code}' clashes with a record field."),
        );
    }
    Ok(())
}
