//! `Link` header pagination.

/// Page number of the `rel="next"` entry in a `Link` header.
///
/// GitHub Link headers look like:
/// `<https://api.github.com/repositories/123/commits?per_page=100&page=2>; rel="next", <...&page=3>; rel="last"`
///
/// Returns `None` on the last page or when the header cannot be read.
pub fn next_page_from_link(link_header: &str) -> Option<u32> {
    link_header.split(',').find_map(|entry| {
        let mut url = None;
        let mut is_next = false;

        for segment in entry.split(';').map(str::trim) {
            if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(inner);
            } else if let Some(rel) = segment.strip_prefix("rel=") {
                is_next = rel.trim_matches('"') == "next";
            }
        }

        if is_next { url.and_then(page_param) } else { None }
    })
}

/// The `page` query parameter of a URL.
fn page_param(url: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_with_next_and_last() {
        let header = r#"<https://api.github.com/repositories/1/commits?per_page=100&page=2>; rel="next", <https://api.github.com/repositories/1/commits?per_page=100&page=7>; rel="last""#;
        assert_eq!(next_page_from_link(header), Some(2));
    }

    #[test]
    fn test_next_page_absent_on_last_page() {
        let header = r#"<https://api.github.com/repositories/1/pulls?state=open&per_page=100&page=1>; rel="first", <https://api.github.com/repositories/1/pulls?state=open&per_page=100&page=6>; rel="prev""#;
        assert_eq!(next_page_from_link(header), None);
    }

    #[test]
    fn test_next_page_ignores_per_page() {
        // `per_page=` must not be mistaken for `page=`.
        let header = r#"<https://api.github.com/x?per_page=100>; rel="next""#;
        assert_eq!(next_page_from_link(header), None);
    }

    #[test]
    fn test_next_page_empty_and_garbage() {
        assert_eq!(next_page_from_link(""), None);
        assert_eq!(next_page_from_link("not a link header"), None);
    }
}
