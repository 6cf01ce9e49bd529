//! HTTP response type for the JSS API client.

use std::collections::HashMap;

/// Longest server detail kept in an error message, in characters.
pub const MAX_ERROR_DETAIL_LEN: usize = 256;

/// A response returned by a [`Transport`](crate::clients::Transport).
///
/// Header names are stored lowercased, each with every value received.
///
/// # Example
///
/// ```rust
/// use jss_api::clients::HttpResponse;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(201, HashMap::new(), "<policy><id>9</id></policy>");
/// assert!(response.is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response, normalising header names to lowercase.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(key, values)| (key.to_lowercase(), values))
            .collect();
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Extracts a readable detail from the body for error messages.
    ///
    /// JSS error pages are HTML; tags are removed, whitespace is collapsed
    /// and the result is cut at [`MAX_ERROR_DETAIL_LEN`] characters.
    #[must_use]
    pub fn error_detail(&self) -> String {
        let mut text = String::with_capacity(self.body.len());
        let mut in_tag = false;
        for c in self.body.chars() {
            match c {
                '<' => {
                    in_tag = true;
                    text.push(' ');
                }
                '>' if in_tag => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= MAX_ERROR_DETAIL_LEN {
            return collapsed;
        }
        let mut truncated: String = collapsed.chars().take(MAX_ERROR_DETAIL_LEN).collect();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        assert!(response(200, "").is_ok());
        assert!(response(201, "").is_ok());
        assert!(response(299, "").is_ok());
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        assert!(!response(199, "").is_ok());
        assert!(!response(401, "").is_ok());
        assert!(!response(404, "").is_ok());
        assert!(!response(500, "").is_ok());
    }

    #[test]
    fn test_new_lowercases_header_names() {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            vec!["text/xml;charset=UTF-8".to_string()],
        );
        let response = HttpResponse::new(200, headers, "");

        assert_eq!(
            response.headers.get("content-type"),
            Some(&vec!["text/xml;charset=UTF-8".to_string()])
        );
        assert!(!response.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_error_detail_strips_html() {
        let body = "<html>\n<head><title>Status page</title></head>\n<body>\n\
                    <p>Conflict</p>\n<p>Error: Duplicate name</p>\n</body>\n</html>";
        assert_eq!(
            response(409, body).error_detail(),
            "Status page Conflict Error: Duplicate name"
        );
    }

    #[test]
    fn test_error_detail_is_bounded() {
        let body = "x".repeat(MAX_ERROR_DETAIL_LEN * 2);
        let detail = response(500, &body).error_detail();
        assert_eq!(detail.chars().count(), MAX_ERROR_DETAIL_LEN + 3);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn test_error_detail_of_empty_body() {
        assert_eq!(response(404, "").error_detail(), "");
    }
}
