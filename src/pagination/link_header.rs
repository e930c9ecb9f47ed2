//! RFC 5988 Link header parsing
//!
//! Format: `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`

use super::types::Links;

/// Parse a Link header and extract the `next` and `last` URLs.
///
/// Parsing is tolerant: unknown rels are ignored and entries without an
/// angle-bracketed URL or without a rel contribute nothing. When a rel
/// appears more than once the last occurrence wins.
pub fn parse_link_header(header: &str) -> Links {
    let mut links = Links::default();
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };
        let url = after[..end].trim();
        let tail = &after[end + 1..];

        // This entry's params run until the next link target
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = &tail[..params_end];
        rest = &tail[params_end..];

        if url.is_empty() {
            continue;
        }

        for rel in rel_values(params) {
            if rel.eq_ignore_ascii_case("next") {
                links.next = Some(url.to_string());
            } else if rel.eq_ignore_ascii_case("last") {
                links.last = Some(url.to_string());
            }
        }
    }

    links
}

/// Every space-separated value of the `rel` params in one entry
fn rel_values(params: &str) -> Vec<&str> {
    params
        .split([';', ','])
        .filter_map(|segment| {
            let (name, value) = segment.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("rel")
                .then(|| value.trim().trim_matches('"').trim_matches('\''))
        })
        .flat_map(str::split_whitespace)
        .collect()
}
