//! Text formatting and cleaning utilities
//!
//! Episode descriptions arrive from the catalog API as HTML fragments with
//! entity-encoded punctuation. These helpers produce the plain-text form used
//! both for storage and for card excerpts, plus the slug and duration
//! formatting shared by the episode normalizer.

/// Fixed table of named HTML entities decoded during cleaning.
///
/// Applied in order; anything outside this table is left as-is.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&hellip;", "\u{2026}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
];

/// Clean an episode description coming from the catalog API.
///
/// Strips HTML tags, decodes the fixed entity table, normalizes line endings,
/// collapses 3+ consecutive newlines down to 2, collapses runs of spaces and
/// tabs to a single space, and trims the result.
pub fn clean_description(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }

    let mut formatted = strip_html_tags(description);

    for (entity, replacement) in HTML_ENTITIES {
        if formatted.contains(entity) {
            formatted = formatted.replace(entity, replacement);
        }
    }

    formatted = formatted.replace("\r\n", "\n").replace('\r', "\n");

    while formatted.contains("\n\n\n") {
        formatted = formatted.replace("\n\n\n", "\n\n");
    }

    collapse_spaces(&formatted).trim().to_string()
}

/// Remove everything between `<` and the next `>`.
fn strip_html_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

/// Collapse runs of spaces and tabs to a single space, leaving newlines alone.
fn collapse_spaces(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;

    for ch in input.chars() {
        if ch == ' ' || ch == '\t' {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }

    out
}

/// Truncate text to `max_length` characters, appending an ellipsis.
///
/// The cut is a hard character cut (no word-boundary search); trailing
/// whitespace at the cut point is trimmed before the ellipsis is appended.
/// Text already within the limit is returned unchanged.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_length).collect();
    format!("{}...", cut.trim_end())
}

/// Create a card excerpt from a raw description: clean, then truncate.
pub fn create_excerpt(description: &str, max_length: usize) -> String {
    truncate_text(&clean_description(description), max_length)
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases, drops everything except word characters / whitespace / hyphens,
/// turns whitespace runs into single hyphens, collapses repeated hyphens, and
/// trims leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(filtered.len());
    let mut last_hyphen = false;

    for ch in filtered.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
        } else {
            slug.push(ch);
            last_hyphen = false;
        }
    }

    slug.trim_matches('-').to_string()
}

/// Format a duration in milliseconds as `m:ss` for display.
pub fn format_duration_ms(duration_ms: i64) -> String {
    let duration_ms = duration_ms.max(0);
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}
