//! Prompt construction for occasion extraction

use chrono::{Datelike, NaiveDate};

/// Build the user prompt for `text`, anchored to `today`'s year.
pub fn build_prompt(text: &str, today: NaiveDate) -> String {
    let year = today.year();
    // JSON-encode the sentence so quotes in user text cannot break the prompt
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""));

    format!(
        r#"Extract the person name, occasion type, and date from the following text.
Return the result as a JSON object with keys: "person", "occasion_type", "date".
You may also include "person_relationship" (e.g. "friend", "mother"), "notes", and "confidence" (a number between 0.0 and 1.0).

The date should be in YYYY-MM-DD format. If no year is provided, use the current year ({year}).
If the text doesn't contain clear occasion information, return null.

Examples:
- "Bahar birthday is on 04/04" -> {{"person": "Bahar", "occasion_type": "birthday", "date": "{year}-04-04"}}
- "Mom's anniversary on Dec 15th" -> {{"person": "Mom", "occasion_type": "anniversary", "date": "{year}-12-15"}}
- "John graduation ceremony June 20, 2024" -> {{"person": "John", "occasion_type": "graduation", "date": "2024-06-20"}}

Text to analyze: {quoted}

Return only the JSON object, no additional text."#
    )
}
