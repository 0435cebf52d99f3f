use gallery_logging::gallery_debug;
use url::Url;

/// Resolves `candidate` against `base`, returning the absolute URL.
///
/// Resolution never fails: a candidate that cannot be resolved is returned
/// unchanged so one bad attribute only degrades its own entry.
pub fn resolve(candidate: &str, base: &str) -> String {
    let base = Url::parse(base).ok();
    resolve_with(candidate, base.as_ref())
}

/// Same as [`resolve`] with an already-parsed base, for resolving many
/// candidates from one page.
pub fn resolve_with(candidate: &str, base: Option<&Url>) -> String {
    match try_resolve(candidate, base) {
        Some(url) => url.into(),
        None => {
            gallery_debug!(
                "Could not resolve {:?} against {:?}; keeping it verbatim",
                candidate,
                base.map(Url::as_str)
            );
            candidate.to_string()
        }
    }
}

fn try_resolve(candidate: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = candidate.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() || has_invalid_scheme(trimmed) {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base?.join(trimmed).ok()
}

/// True when the text before the first `:` looks like an attempted scheme
/// (nothing path-like precedes it) but is not a valid one.
fn has_invalid_scheme(candidate: &str) -> bool {
    let Some(end) = candidate.find([':', '/', '?', '#']) else {
        return false;
    };
    if !candidate[end..].starts_with(':') {
        return false;
    }
    let scheme = &candidate[..end];
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    !valid
}

#[cfg(test)]
mod tests {
    use super::resolve;

    const BASE: &str = "https://site.com/dir/page";

    #[test]
    fn relative_path_resolves_against_directory() {
        assert_eq!(resolve("images/x.png", BASE), "https://site.com/dir/images/x.png");
    }

    #[test]
    fn root_relative_and_protocol_relative() {
        assert_eq!(resolve("/img/a.gif", BASE), "https://site.com/img/a.gif");
        assert_eq!(
            resolve("//cdn.site.com/a.webp", BASE),
            "https://cdn.site.com/a.webp"
        );
    }

    #[test]
    fn absolute_candidate_is_kept_absolute() {
        assert_eq!(
            resolve("https://other.com/pic.jpg", BASE),
            "https://other.com/pic.jpg"
        );
    }

    #[test]
    fn malformed_candidate_is_returned_unchanged() {
        assert_eq!(resolve("not a url at all::", BASE), "not a url at all::");
    }

    #[test]
    fn unusable_base_keeps_relative_candidate() {
        assert_eq!(resolve("images/x.png", "not a base"), "images/x.png");
        assert_eq!(
            resolve("https://other.com/pic.jpg", "not a base"),
            "https://other.com/pic.jpg"
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(resolve("  x.png\n", BASE), "https://site.com/dir/x.png");
    }
}
