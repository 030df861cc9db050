//! Pure string transforms applied to client-supplied names

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::AppError;

pub const MAX_FILENAME_LENGTH: usize = 255;

/// Name used when nothing usable survives sanitization.
pub const FALLBACK_FILENAME: &str = "file";

/// Reduce a client-declared filename to a safe base name.
///
/// Directory components (either separator style) are dropped, every character
/// outside `[A-Za-z0-9._-]` becomes `_` and the result is capped at
/// [`MAX_FILENAME_LENGTH`], cutting the stem so the extension survives. Names that end up empty or made only of dots fall
/// back to [`FALLBACK_FILENAME`], so the result is always non-empty and can
/// never step out of a directory.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = cap_length(sanitized);

    if sanitized.chars().all(|c| c == '.') {
        return FALLBACK_FILENAME.to_string();
    }

    sanitized
}

// Input is ASCII at this point, so byte offsets are char boundaries.
fn cap_length(mut name: String) -> String {
    if name.len() <= MAX_FILENAME_LENGTH {
        return name;
    }

    match file_extension(&name).map(str::len) {
        Some(ext_len) if ext_len + 1 < MAX_FILENAME_LENGTH => {
            let ext_start = name.len() - ext_len - 1;
            let stem_len = MAX_FILENAME_LENGTH - ext_len - 1;
            name.replace_range(stem_len..ext_start, "");
        }
        _ => name.truncate(MAX_FILENAME_LENGTH),
    }
    name
}

/// Extension of `filename` without the dot, if it has one.
pub fn file_extension(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
}

fn slug_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z\d]+").expect("static slug regex"))
}

/// Lowercase `s` and collapse every run of characters outside `[a-z0-9]` into `-`.
pub fn slugify(s: &str) -> Result<String, AppError> {
    if s.is_empty() {
        return Err(AppError::InvalidInput("empty string not permitted".to_string()));
    }

    let lowered = s.to_lowercase();
    let slug = slug_separator()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();

    if slug.is_empty() {
        return Err(AppError::InvalidInput(
            "after removing characters, slug is zero length".to_string(),
        ));
    }

    Ok(slug)
}
