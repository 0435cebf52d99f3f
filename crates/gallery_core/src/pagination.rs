//! Page-number URL rewriting for sites that paginate content across URLs.
//!
//! Recognized shapes, in priority order:
//! - `page=<digits>` anywhere in the URL (usually the query string)
//! - `/page-<digits>` path segment
//! - `/page/<digits>/` path segment
//!
//! `p=<digits>` is understood when reading a page number but never produced.

use std::sync::LazyLock;

use regex::Regex;

static QUERY_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpage=(\d+)").expect("valid page query pattern"));
static DASH_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/page-(\d+)").expect("valid page-dash pattern"));
static SLASH_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/page/(\d+)(?:/|$|[?#])").expect("valid page-slash pattern"));
static SHORT_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bp=(\d+)").expect("valid short page pattern"));

/// Returns the URL addressing `page` of the listing `url` belongs to.
///
/// Rewriting an already-paginated URL to its own page number returns it unchanged.
/// A `page` of 0 is treated as 1.
pub fn rewrite_for_page(url: &str, page: u32) -> String {
    let page = page.max(1);

    for pattern in [&*QUERY_PAGE, &*DASH_PAGE, &*SLASH_PAGE] {
        if let Some(rewritten) = replace_page_digits(pattern, url, page) {
            return rewritten;
        }
    }

    if url.ends_with('/') {
        format!("{url}page-{page}")
    } else {
        format!("{url}/page-{page}")
    }
}

/// Reads the page number encoded in `url`, defaulting to 1.
pub fn extract_page_number(url: &str) -> u32 {
    [&*QUERY_PAGE, &*DASH_PAGE, &*SLASH_PAGE, &*SHORT_PAGE]
        .into_iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}

fn replace_page_digits(pattern: &Regex, url: &str, page: u32) -> Option<String> {
    let digits = pattern.captures(url)?.get(1)?;
    let mut rewritten = String::with_capacity(url.len() + 4);
    rewritten.push_str(&url[..digits.start()]);
    rewritten.push_str(&page.to_string());
    rewritten.push_str(&url[digits.end()..]);
    Some(rewritten)
}

#[cfg(test)]
mod tests {
    use super::{extract_page_number, rewrite_for_page};

    #[test]
    fn query_token_digits_are_replaced() {
        assert_eq!(
            rewrite_for_page("https://s.com/list?page=2", 5),
            "https://s.com/list?page=5"
        );
        assert_eq!(
            rewrite_for_page("https://s.com/list?sort=new&page=12&view=grid", 3),
            "https://s.com/list?sort=new&page=3&view=grid"
        );
    }

    #[test]
    fn dash_segment_keeps_trailing_slash() {
        assert_eq!(
            rewrite_for_page("https://s.com/cat/page-2/", 5),
            "https://s.com/cat/page-5/"
        );
        assert_eq!(
            rewrite_for_page("https://s.com/cat/page-2", 5),
            "https://s.com/cat/page-5"
        );
    }

    #[test]
    fn slash_segment_digits_are_replaced() {
        assert_eq!(
            rewrite_for_page("https://s.com/blog/page/4/", 9),
            "https://s.com/blog/page/9/"
        );
    }

    #[test]
    fn query_token_wins_over_path_segment() {
        assert_eq!(
            rewrite_for_page("https://s.com/page-2/?page=7", 8),
            "https://s.com/page-2/?page=8"
        );
    }

    #[test]
    fn unpaginated_url_gets_a_dash_segment() {
        assert_eq!(rewrite_for_page("https://s.com/cat", 3), "https://s.com/cat/page-3");
        assert_eq!(rewrite_for_page("https://s.com/cat/", 3), "https://s.com/cat/page-3");
    }

    #[test]
    fn rewrite_is_idempotent_for_same_page() {
        let once = rewrite_for_page("https://s.com/cat", 4);
        assert_eq!(rewrite_for_page(&once, 4), once);
    }

    #[test]
    fn longer_words_ending_in_page_are_not_tokens() {
        assert_eq!(extract_page_number("https://s.com/list?perpage=50"), 1);
    }

    #[test]
    fn page_number_defaults_to_one() {
        assert_eq!(extract_page_number("https://s.com/gallery"), 1);
        assert_eq!(extract_page_number("https://s.com/list?page=0"), 1);
        assert_eq!(extract_page_number("https://s.com/list?page=99999999999"), 1);
    }

    #[test]
    fn short_form_is_read() {
        assert_eq!(extract_page_number("https://s.com/forum?t=10&p=6"), 6);
    }

    #[test]
    fn extracted_number_round_trips_through_rewrite() {
        let bases = [
            "https://s.com/cat",
            "https://s.com/cat/",
            "https://s.com/list?page=2",
            "https://s.com/cat/page-2/",
            "https://s.com/blog/page/3/",
            "https://s.com/forum?p=4",
        ];
        for base in bases {
            for n in [1, 2, 7, 150] {
                assert_eq!(extract_page_number(&rewrite_for_page(base, n)), n, "{base} -> {n}");
            }
        }
    }
}
