//! Integration name normalisation
//!
//! Every integration lives in a directory named after its slug. The mapping
//! is a pure function of the input so the same display name always resolves
//! to the same directory.

/// Separator placed between alphanumeric runs
pub const SEPARATOR: char = '-';

/// Slug used when the input contains no alphanumeric characters
pub const FALLBACK_SLUG: &str = "integration";

/// Maximum number of characters kept when a name is derived from a prompt
pub const DERIVED_NAME_MAX_CHARS: usize = 40;

/// Converts free-form text into a filesystem-safe integration identifier.
///
/// Alphanumeric characters are lowercased and kept, every other character
/// becomes a separator, runs of separators collapse to one and separators at
/// either end are trimmed. An empty result becomes [`FALLBACK_SLUG`].
///
/// # Examples
/// ```
/// use integra::core::slugify;
///
/// assert_eq!(slugify("My API! v2"), "my-api-v2");
/// assert_eq!(slugify("---"), "integration");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            // Lowercasing may expand into combining marks; only keep what is still alphanumeric
            slug.extend(ch.to_lowercase().filter(|c| c.is_alphanumeric()));
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Derives an integration name from a generation prompt.
///
/// The prompt is slugified and cut to [`DERIVED_NAME_MAX_CHARS`] characters,
/// then normalised again so the cut never leaves a dangling separator.
pub fn derive_name(prompt: &str) -> String {
    let truncated: String = slugify(prompt)
        .chars()
        .take(DERIVED_NAME_MAX_CHARS)
        .collect();
    slugify(&truncated)
}
