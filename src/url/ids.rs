use url::Url;

/// Path segment that precedes a DOI in dataset URLs
const DOI_SEGMENT: &str = "doi";

/// Derives a dataset identifier from a dataset page URL
///
/// Dataset pages are addressed by DOI, e.g.
/// `/data/reaction/doi/10.1021/jacsau.4c01276/start/0`. The identifier is the
/// DOI (`10.1021/jacsau.4c01276`); trailing pagination segments are dropped.
/// URLs without a DOI segment fall back to the path remainder after
/// `dataset_prefix`, and finally to the whole path.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crd_scraper::url::dataset_id_from_url;
///
/// let url = Url::parse("https://example.com/data/reaction/doi/10.1021/jacsau.4c01276/start/0").unwrap();
/// assert_eq!(dataset_id_from_url(&url, "/data/reaction/doi/"), "10.1021/jacsau.4c01276");
/// ```
pub fn dataset_id_from_url(url: &Url, dataset_prefix: &str) -> String {
    if let Some(doi) = doi_from_path(url) {
        return doi;
    }

    let path = url.path();
    if let Some(rest) = path.strip_prefix(dataset_prefix) {
        let rest = rest.trim_matches('/');
        if !rest.is_empty() {
            return rest.to_string();
        }
    }

    path.to_string()
}

fn doi_from_path(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let position = segments.iter().position(|s| *s == DOI_SEGMENT)?;

    match &segments[position + 1..] {
        [prefix, suffix, ..] => Some(format!("{prefix}/{suffix}")),
        [prefix] => Some(prefix.to_string()),
        [] => None,
    }
}

/// Derives a record identifier from a record page URL
///
/// The identifier is the URL path, verbatim (e.g. `/id/1234`).
pub fn record_id_from_url(url: &Url) -> String {
    url.path().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/data/reaction/doi/";

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_doi_with_pagination() {
        let u = url("https://kmt.example.org/data/reaction/doi/10.1021/jacsau.4c01276/start/0");
        assert_eq!(dataset_id_from_url(&u, PREFIX), "10.1021/jacsau.4c01276");
    }

    #[test]
    fn test_doi_without_pagination() {
        let u = url("https://kmt.example.org/data/reaction/doi/10.1039/d3sc01234a");
        assert_eq!(dataset_id_from_url(&u, PREFIX), "10.1039/d3sc01234a");
    }

    #[test]
    fn test_doi_single_segment() {
        let u = url("https://kmt.example.org/data/reaction/doi/10.1039/");
        assert_eq!(dataset_id_from_url(&u, PREFIX), "10.1039");
    }

    #[test]
    fn test_prefix_fallback() {
        let u = url("https://kmt.example.org/datasets/suzuki-2024/");
        assert_eq!(dataset_id_from_url(&u, "/datasets/"), "suzuki-2024");
    }

    #[test]
    fn test_path_fallback() {
        let u = url("https://kmt.example.org/other/place");
        assert_eq!(dataset_id_from_url(&u, PREFIX), "/other/place");
    }

    #[test]
    fn test_record_id_is_path() {
        let u = url("https://kmt.example.org/id/1234?tab=smiles");
        assert_eq!(record_id_from_url(&u), "/id/1234");
    }
}
