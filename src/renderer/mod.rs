use std::fmt::Write;

use crate::types::haiku::Haiku;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Garden Haikus</title>
    <link href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css" rel="stylesheet">
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;700&display=swap" rel="stylesheet">
    <style>
        body { font-family: 'Inter', sans-serif; background-color: #f0fdf4; color: #166534; }
        .haiku-card { background-color: #dcfce7; border: 1px solid #a7f3d0; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
        .haiku-card p { white-space: pre-wrap; }
    </style>
</head>
<body class="p-8">
    <div class="max-w-4xl mx-auto">
        <h1 class="text-4xl font-bold text-center mb-8 text-green-800">Garden Haikus 🌿</h1>
        <div class="space-y-6">
"#;

const PAGE_TAIL: &str = r#"        </div>
    </div>
</body>
</html>
"#;

pub const EMPTY_MESSAGE: &str =
    "No haikus generated yet. Please wait for the next hourly sensor reading.";

/// Renders the haiku history page. Expects `haikus` newest first.
pub fn render_haikus_page(haikus: &[Haiku]) -> String {
    let mut html = String::from(PAGE_HEAD);

    if haikus.is_empty() {
        let _ = writeln!(
            html,
            r#"            <p class="text-center text-xl text-gray-500">{EMPTY_MESSAGE}</p>"#
        );
    }

    for haiku in haikus {
        let _ = write!(
            html,
            r#"            <div class="haiku-card p-6 rounded-lg">
                <p class="text-lg font-medium text-green-700 mb-2">{text}</p>
                <p class="text-sm text-green-600">
                    <span class="font-semibold">Generated At:</span> {date}<br>
                    <span class="font-semibold">Moisture:</span> {moisture} |
                    <span class="font-semibold">Illumination:</span> {illumination} |
                    <span class="font-semibold">Temperature:</span> {temperature} |
                    <span class="font-semibold">pH:</span> {ph}
                </p>
            </div>
"#,
            text = escape_html(&haiku.text),
            date = haiku.date.format(TIMESTAMP_FORMAT),
            moisture = haiku.moisture,
            illumination = haiku.illumination,
            temperature = haiku.temperature,
            ph = haiku.ph,
        );
    }

    html.push_str(PAGE_TAIL);
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn haiku(text: &str) -> Haiku {
        Haiku {
            id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 17, 6, 30, 0).unwrap(),
            text: text.to_string(),
            moisture: 550,
            temperature: 25,
            illumination: 700,
            ph: 7,
        }
    }

    #[test]
    fn empty_history_shows_placeholder() {
        let html = render_haikus_page(&[]);
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn entries_show_text_timestamp_and_metrics() {
        let html = render_haikus_page(&[haiku("morning dew\nsettles")]);

        assert!(html.contains("morning dew\nsettles"));
        assert!(html.contains("2024-05-17 06:30:00"));
        assert!(html.contains("Moisture:</span> 550"));
        assert!(html.contains("Illumination:</span> 700"));
        assert!(html.contains("Temperature:</span> 25"));
        assert!(html.contains("pH:</span> 7"));
        assert!(!html.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn entries_keep_the_given_order() {
        let html = render_haikus_page(&[haiku("newer"), haiku("older")]);
        assert!(html.find("newer").unwrap() < html.find("older").unwrap());
    }

    #[test]
    fn haiku_text_is_escaped() {
        let html = render_haikus_page(&[haiku("<script>alert('x')</script> & co")]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }
}
