//! Decoding of URL query strings and urlencoded form bodies
//!
//! Parameters are decoded into ordered `key=value` pairs rather than structs,
//! so a repeated key never invalidates the whole query string.

use axum::{
    extract::{FromRequest, Query, Request},
    http::Uri,
    Form,
};

/// Decoded `key=value` pairs in their original order
pub type Pairs = Vec<(String, String)>;

/// Pairs of the URL query string, empty when absent or malformed
pub fn url_pairs(uri: &Uri) -> Pairs {
    Query::<Pairs>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

/// Pairs of an urlencoded request body, empty when the body is not a form
pub async fn form_pairs(request: Request) -> Pairs {
    Form::<Pairs>::from_request(request, &())
        .await
        .map(|Form(pairs)| pairs)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;

    #[test]
    fn test_url_pairs_keep_repeated_keys() {
        let uri: Uri = "/api/query?query=SELECT%201&format=csv&format=json"
            .parse()
            .unwrap();
        assert_eq!(
            url_pairs(&uri),
            vec![
                ("query".to_string(), "SELECT 1".to_string()),
                ("format".to_string(), "csv".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn test_url_without_query_string() {
        let uri: Uri = "/api/tables".parse().unwrap();
        assert!(url_pairs(&uri).is_empty());
    }

    #[tokio::test]
    async fn test_form_pairs() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/query")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("query=SELECT+1&query=SELECT+2"))
            .unwrap();
        let pairs = form_pairs(request).await;
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("query".to_string(), "SELECT 1".to_string()));
    }

    #[tokio::test]
    async fn test_non_form_body_has_no_pairs() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"query\": \"SELECT 1\"}"))
            .unwrap();
        assert!(form_pairs(request).await.is_empty());
    }
}
