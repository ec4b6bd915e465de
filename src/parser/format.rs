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

const FORMAL_MARKER: &str = " f ";
const FORMAL_HTML: &str = "<sup>(formal)</sup> ";
const INFORMAL_MARKER: &str = " inf ";
const INFORMAL_HTML: &str = "<sup>(informal)</sup> ";
const PRECISION_SEPARATOR: char = '|';

/// Render a fragment of card text as an HTML paragraph.
///
/// The first ` f ` and ` inf ` become formality annotations, and anything
/// after a `|` is rendered as a precision gloss. The input must be raw text:
/// formatting already-rendered output is not supported.
pub fn to_html(fragment: &str) -> String {
    let text = fragment
        .trim()
        .replacen(FORMAL_MARKER, FORMAL_HTML, 1)
        .replacen(INFORMAL_MARKER, INFORMAL_HTML, 1);
    let text = match text.split_once(PRECISION_SEPARATOR) {
        Some((main, precision)) => format!(
            "{}<span class=\"precision\">{}</span>",
            main.trim(),
            precision.trim()
        ),
        None => text,
    };
    format!("<p>{text}</p>")
}
