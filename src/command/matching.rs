//! Case-insensitive text matching shared by routing and completion.

/// Unicode-aware case-insensitive equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive `starts_with`.
pub fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    let mut rest = candidate.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| rest.next() == Some(p))
}

/// Keep candidates starting with `token`, preserving their order.
///
/// An empty or absent token keeps everything.
pub fn filter_partial<I>(token: Option<&str>, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    match token {
        None | Some("") => candidates.into_iter().collect(),
        Some(token) => candidates
            .into_iter()
            .filter(|candidate| starts_with_ignore_case(candidate, token))
            .collect(),
    }
}
