//! Server-rendered HTML for the htmx front end
//!
//! Everything a user typed passes through [`escape`] before it is written
//! into markup.

use chrono::Local;
use vibekeeper_domain::Occasion;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text";
pub const EXTRACTION_HELP_MESSAGE: &str = "Sorry, I couldn't extract occasion information from \
     that text. Please try again with something like 'John's birthday is on March 15th'";

const INDEX_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>VibeKeeper - Occasion Tracker</title>
    <script src="https://unpkg.com/htmx.org@1.9.12"></script>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50">
    <main class="max-w-2xl mx-auto p-6">
        <h1 class="text-3xl font-bold mb-6 text-center text-blue-600">VibeKeeper</h1>
        <p class="text-center text-gray-600 mb-8">Track important occasions with natural language</p>

        <form hx-post="/add_occasion" hx-target="#occasions-list" hx-swap="afterbegin"
              hx-on::after-request="if (event.detail.successful) this.reset()">
            <div class="mb-4">
                <label for="occasion_text" class="block text-sm font-medium text-gray-700 mb-2">Tell me about an occasion:</label>
                <input type="text" id="occasion_text" name="occasion_text"
                       placeholder="e.g., 'Bahar birthday is on 04/04'"
                       class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500">
            </div>
            <button type="submit"
                    class="w-full bg-blue-600 text-white py-2 px-4 rounded-md hover:bg-blue-700">Add Occasion</button>
        </form>

        <div class="mt-6 mb-2">
            <input type="text" name="search" placeholder="Search occasions..."
                   class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500"
                   hx-post="/search" hx-target="#occasions-list" hx-trigger="keyup changed delay:300ms">
        </div>

        <div id="occasions-list" class="mt-8" hx-get="/occasions" hx-trigger="load"></div>
    </main>
</body>
</html>
"##;

/// The full index page
pub fn index_page() -> &'static str {
    INDEX_PAGE
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Upper-case every letter that follows a non-letter, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut previous_is_letter = false;
    text.chars()
        .map(|ch| {
            let mapped = if previous_is_letter {
                ch.to_lowercase().collect::<String>()
            } else {
                ch.to_uppercase().collect::<String>()
            };
            previous_is_letter = ch.is_alphabetic();
            mapped
        })
        .collect()
}

pub fn occasion_card(occasion: &Occasion) -> String {
    let added = occasion.created_at.with_timezone(&Local);

    format!(
        concat!(
            r#"<div class="bg-white border border-gray-200 rounded-lg shadow-sm mb-4 hover:shadow-md transition-shadow">"#,
            r#"<div class="p-4">"#,
            r#"<h3 class="text-lg font-semibold text-gray-800">{person}'s {kind}</h3>"#,
            r#"<p class="text-gray-600">Date: {date}</p>"#,
            r#"<p class="text-sm text-gray-500">Added: {added}</p>"#,
            r#"<small class="text-xs text-gray-400 italic">Original: &quot;{raw}&quot;</small>"#,
            "</div></div>"
        ),
        person = escape(&occasion.person),
        kind = escape(&title_case(&occasion.occasion_type)),
        date = occasion.occasion_date.format("%B %d, %Y"),
        added = added.format("%m/%d/%Y at %I:%M %p"),
        raw = escape(&occasion.raw_input),
    )
}

/// Cards in the given order, wrapped in the list container
pub fn occasion_list(occasions: &[Occasion]) -> String {
    let mut html = String::from(r#"<div class="space-y-4">"#);
    for occasion in occasions {
        html.push_str(&occasion_card(occasion));
    }
    html.push_str("</div>");
    html
}

/// A short error paragraph
pub fn error_message(message: &str) -> String {
    format!(r#"<p class="text-red-500 p-4 bg-red-50 rounded-lg mb-4">{}</p>"#, escape(message))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use vibekeeper_domain::OccasionStatus;

    use super::*;

    fn sample(person: &str, raw_input: &str) -> Occasion {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Occasion {
            id: 7,
            owner_id: 1,
            person: person.to_string(),
            occasion_type: "wedding anniversary".to_string(),
            occasion_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            person_relationship: None,
            notes: None,
            confidence_score: Some(0.8),
            status: OccasionStatus::Active,
            raw_input: raw_input.to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape("Bahar"), "Bahar");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("birthday"), "Birthday");
        assert_eq!(title_case("WEDDING anniversary"), "Wedding Anniversary");
        assert_eq!(title_case("new-year"), "New-Year");
    }

    #[test]
    fn test_card_layout() {
        let card = occasion_card(&sample("Mom", "Mom's anniversary is June 5th"));

        assert!(card.contains("Mom's Wedding Anniversary"));
        assert!(card.contains("Date: June 05, 2025"));
        assert!(card.contains("Added: "));
        assert!(card.contains("Original: &quot;Mom&#x27;s anniversary is June 5th&quot;"));
    }

    #[test]
    fn test_card_escapes_user_text() {
        let card = occasion_card(&sample("<b>Eve</b>", "<img src=x onerror=alert(1)>"));

        assert!(!card.contains("<b>Eve</b>"));
        assert!(!card.contains("<img"));
        assert!(card.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    }

    #[test]
    fn test_list_keeps_order() {
        let html = occasion_list(&[sample("Ann", "a"), sample("Bob", "b")]);

        assert!(html.starts_with(r#"<div class="space-y-4">"#));
        assert!(html.find("Ann").unwrap() < html.find("Bob").unwrap());
        assert_eq!(occasion_list(&[]), r#"<div class="space-y-4"></div>"#);
    }
}
