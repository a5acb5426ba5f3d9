use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static FILENAME_SEPARATORS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[\s/]+").ok());

/// Returns the first non-empty candidate, or an empty string.
#[must_use]
pub fn coalesce<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Folds a word into its comparison token: canonical decomposition,
/// combining marks dropped, lower-cased.
#[must_use]
pub fn normalize_token(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Builds the file-name stem for a word: lower-cased, runs of whitespace and
/// slashes collapsed into one underscore.
#[must_use]
pub fn sanitize_filename(word: &str) -> String {
    let lowered = word.trim().to_lowercase();
    let collapsed = match FILENAME_SEPARATORS.as_ref() {
        Some(re) => re.replace_all(&lowered, " ").into_owned(),
        None => lowered.split_whitespace().collect::<Vec<_>>().join(" "),
    };
    collapsed.trim().replace(' ', "_")
}

/// Removes the `*` syllable separators some sources embed in headwords.
#[must_use]
pub fn strip_syllable_marks(form: &str) -> String {
    form.replace('*', "")
}

/// Pushes `value` unless it is empty or already present.
pub fn push_unique(target: &mut Vec<String>, value: String) {
    if !value.is_empty() && !target.contains(&value) {
        target.push(value);
    }
}
