use serde_json::Value;
use tracing::debug;

use super::FetchError;

const DEFAULT_ENDPOINT: &str = "https://ja.wikipedia.org/w/api.php";

/// Upper bound on disambiguation retries for one article. Disambiguation
/// pages can link to further disambiguation pages; the walk must terminate.
const MAX_TITLE_HOPS: usize = 4;

/// MediaWiki API client for the Japanese-language Wikipedia.
pub struct WikipediaSource {
    endpoint: String,
}

/// What one title resolves to.
enum PageLookup {
    Content(String),
    Disambiguation(Vec<String>),
    Missing,
}

impl WikipediaSource {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the client at a different `api.php` (test servers, mirrors).
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    fn api_get(&self, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let mut request = ureq::get(self.endpoint.as_str()).query("format", "json");
        for (key, value) in params {
            request = request.query(key, value);
        }
        let body = request
            .call()
            .map_err(|e| FetchError::Http(format!("{}: {e}", self.endpoint)))?
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Http(format!("{}: {e}", self.endpoint)))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Api(format!("response JSON: {e}")))
    }

    /// Random main-namespace article titles. The API caps one request at
    /// 500 titles.
    pub fn random_titles(&self, count: usize) -> Result<Vec<String>, FetchError> {
        let limit = count.to_string();
        let json = self.api_get(&[
            ("action", "query"),
            ("list", "random"),
            ("rnnamespace", "0"),
            ("rnlimit", &limit),
        ])?;
        Ok(parse_random_titles(&json))
    }

    /// Resolve a title to article prose, following redirects and retrying
    /// disambiguation pages with the longest alternative title. Missing
    /// pages and exhausted retries yield `None` rather than an error.
    pub fn article_text(&self, title: &str) -> Result<Option<String>, FetchError> {
        let mut title = title.to_string();
        for _ in 0..MAX_TITLE_HOPS {
            match self.query_page(&title)? {
                PageLookup::Content(text) => return Ok(Some(text)),
                PageLookup::Missing => {
                    debug!(%title, "page missing");
                    return Ok(None);
                }
                PageLookup::Disambiguation(options) => match longest_alternative(&title, options) {
                    Some(next) => {
                        debug!(from = %title, to = %next, "retrying disambiguation");
                        title = next;
                    }
                    None => return Ok(None),
                },
            }
        }
        debug!(%title, "disambiguation hop limit reached");
        Ok(None)
    }

    fn query_page(&self, title: &str) -> Result<PageLookup, FetchError> {
        let json = self.api_get(&[
            ("action", "query"),
            ("prop", "extracts|pageprops|links"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("ppprop", "disambiguation"),
            ("plnamespace", "0"),
            ("pllimit", "max"),
            ("titles", title),
        ])?;
        parse_page_lookup(&json)
    }
}

impl Default for WikipediaSource {
    fn default() -> Self {
        Self::new()
    }
}

/// The longest option that differs from the current title; the original
/// query is excluded so a disambiguation page can never resolve to itself.
fn longest_alternative(current: &str, options: Vec<String>) -> Option<String> {
    options
        .into_iter()
        .filter(|o| o != current)
        .max_by_key(|o| o.chars().count())
}

fn parse_random_titles(json: &Value) -> Vec<String> {
    let Some(entries) = json["query"]["random"].as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry["title"].as_str())
        .map(str::to_string)
        .collect()
}

fn parse_page_lookup(json: &Value) -> Result<PageLookup, FetchError> {
    let pages = json["query"]["pages"]
        .as_object()
        .ok_or_else(|| FetchError::Api("query.pages missing".to_string()))?;
    let Some(page) = pages.values().next() else {
        return Ok(PageLookup::Missing);
    };
    if page.get("missing").is_some() {
        return Ok(PageLookup::Missing);
    }
    if page["pageprops"].get("disambiguation").is_some() {
        let options = page["links"]
            .as_array()
            .map(|links| {
                links
                    .iter()
                    .filter_map(|link| link["title"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        return Ok(PageLookup::Disambiguation(options));
    }
    let extract = page["extract"].as_str().unwrap_or_default();
    Ok(PageLookup::Content(extract.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_random_titles_from_api_json() {
        let json: Value = serde_json::from_str(
            r#"{"query": {"random": [
                {"id": 1, "title": "東京"},
                {"id": 2, "title": "大阪"},
                {"id": 3}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(parse_random_titles(&json), vec!["東京", "大阪"]);
    }

    #[test]
    fn parse_content_page() {
        let json: Value = serde_json::from_str(
            r#"{"query": {"pages": {"42": {"title": "東京", "extract": "東京は日本の首都。"}}}}"#,
        )
        .unwrap();
        match parse_page_lookup(&json).unwrap() {
            PageLookup::Content(text) => assert_eq!(text, "東京は日本の首都。"),
            _ => panic!("expected content"),
        }
    }

    #[test]
    fn parse_missing_page() {
        let json: Value = serde_json::from_str(
            r#"{"query": {"pages": {"-1": {"title": "存在しない", "missing": ""}}}}"#,
        )
        .unwrap();
        assert!(matches!(
            parse_page_lookup(&json).unwrap(),
            PageLookup::Missing
        ));
    }

    #[test]
    fn parse_disambiguation_page() {
        let json: Value = serde_json::from_str(
            r#"{"query": {"pages": {"7": {
                "title": "あ",
                "pageprops": {"disambiguation": ""},
                "links": [{"title": "あ (仮名)"}, {"title": "あ (放送局)"}]
            }}}}"#,
        )
        .unwrap();
        match parse_page_lookup(&json).unwrap() {
            PageLookup::Disambiguation(options) => {
                assert_eq!(options, vec!["あ (仮名)", "あ (放送局)"]);
            }
            _ => panic!("expected disambiguation"),
        }
    }

    #[test]
    fn longest_alternative_excludes_current_title() {
        let options = vec!["川".to_string(), "川 (曖昧さ回避)".to_string()];
        assert_eq!(
            longest_alternative("川", options),
            Some("川 (曖昧さ回避)".to_string())
        );
        assert_eq!(longest_alternative("川", vec!["川".to_string()]), None);
        assert_eq!(longest_alternative("川", Vec::new()), None);
    }

    #[test]
    fn malformed_response_is_api_error() {
        let json: Value = serde_json::from_str(r#"{"batchcomplete": ""}"#).unwrap();
        assert!(matches!(
            parse_page_lookup(&json),
            Err(FetchError::Api(_))
        ));
    }
}
