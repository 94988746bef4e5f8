//! Ordered-subsequence name search used by the flag pickers.

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];

/// Case-insensitive ordered-subsequence match.
///
/// Whitespace is removed from `query`, a trailing image extension is removed from `candidate`,
/// then every query character must appear in the candidate in the same relative order, not
/// necessarily contiguous. An empty query matches everything.
pub fn ordered_match(query: &str, candidate: &str) -> bool {
    let name = candidate.to_lowercase();
    let name = strip_image_extension(&name);

    let mut rest = name.chars();
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .all(|q| rest.any(|n| n == q))
}

/// Names matching `query`, each paired with its index in the unfiltered `names`.
pub fn filter_names<'a, S: AsRef<str>>(query: &str, names: &'a [S]) -> Vec<(usize, &'a str)> {
    names
        .iter()
        .map(|n| n.as_ref())
        .enumerate()
        .filter(|(_, name)| ordered_match(query, name))
        .collect()
}

fn strip_image_extension(name: &str) -> &str {
    IMAGE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

#[cfg(test)]
#[path = "../tests/unit/search.rs"]
mod tests;
