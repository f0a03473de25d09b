//! Identifier sanitizing for raw project names.

use indexmap::IndexSet;

/// Characters that may not appear in a generated identifier.
const INVALID_CHARS: &[char] = &[
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '-', '=', '^', '~', '\\', '|', '[', '{',
    '@', '`', ']', '}', ':', '*', ';', '+', '/', '?', '.', '>', ',', '<',
];

/// Remove every denylisted character from `raw`.
///
/// Never fails; the result is empty when `raw` held only denylisted
/// characters.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| !INVALID_CHARS.contains(c)).collect()
}

/// Sanitize each raw name and de-duplicate, keeping first occurrences.
///
/// Names that sanitize to an empty string cannot become enum members and
/// are dropped with a warning.
pub fn sanitize_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names = IndexSet::new();
    for name in raw {
        let name = name.as_ref();
        let clean = sanitize(name);
        if clean.is_empty() {
            tracing::warn!(raw = %name, "Skipping name with no identifier characters");
            continue;
        }
        names.insert(clean);
    }
    names.into_iter().collect()
}
