use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9 \-]+").expect("slug character class is a valid regex"));

static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +").expect("space run pattern is a valid regex"));

/// Derives a URL-safe slug from a post title.
///
/// Lower-cases the title, drops everything outside `[a-z0-9 -]`, then turns each
/// run of spaces into a single hyphen. Hyphens survive so an already-normalized
/// slug maps to itself. A title with no usable characters yields `""`.
pub fn normalize_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED_CHARS.replace_all(&lowered, "");
    SPACE_RUNS.replace_all(&stripped, "-").into_owned()
}
