use crate::error::Error;
use hyper::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{borrow::Cow, collections::HashMap, time::Duration};

#[derive(Debug, Clone)]
pub struct RequestData {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl RequestData {
    pub fn new<S: Into<String>>(method: Method, path: S) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sends `body` serialized as JSON, marking it as such unless a content type is already set.
    pub fn with_json(mut self, body: &Value) -> Self {
        if !self
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("content-type"))
        {
            self.headers.insert(String::from("content-type"), String::from("application/json"));
        }
        self.body = Some(body.to_string());
        self
    }

    /// Sends `body` untouched. Useful for payloads that are deliberately not valid JSON.
    pub fn with_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
        mut self,
        headers: I,
    ) -> Self {
        self.headers.extend(
            headers
                .into_iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseData {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl ResponseData {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Deserializes the body. Only this call can fail on a non-JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::ResponseParseError)
    }

    pub fn json_value(&self) -> Result<Value, Error> {
        self.json()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestData, ResponseData};
    use crate::error::Error;
    use hyper::Method;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_json_body_sets_content_type_once() {
        let request = RequestData::new(Method::POST, "/api/users")
            .with_header("Content-Type", "application/vnd.api+json")
            .with_json(&json!({"name": "morpheus"}));

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"morpheus"}"#));

        let request = RequestData::new(Method::POST, "/api/users").with_json(&json!({}));
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_non_json_body_only_fails_when_parsed() {
        let mut response = ResponseData::new(200);
        response.body = b"<html>maintenance</html>".to_vec();
        response.headers = vec![(String::from("content-type"), String::from("text/html"))]
            .into_iter()
            .collect::<HashMap<_, _>>();

        assert_eq!(response.text(), "<html>maintenance</html>");
        assert_eq!(response.header("Content-Type"), Some("text/html"));
        assert!(matches!(
            response.json_value(),
            Err(Error::ResponseParseError(_))
        ));
    }

    #[test]
    fn test_status_classes() {
        assert!(ResponseData::new(201).is_success());
        assert!(ResponseData::new(404).is_client_error());
        assert!(ResponseData::new(503).is_server_error());
        assert!(!ResponseData::new(302).is_success());
    }
}
