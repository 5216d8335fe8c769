use crate::error::Error;
use hyper::{
    header::{HeaderName, HeaderValue},
    HeaderMap,
};
use std::collections::HashMap;

/// Flattens a response header map. Repeated headers are joined with `", "`, values that are not
/// visible ASCII are skipped.
pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();

    for (name, value) in header_map {
        let value = match value.to_str() {
            Ok(value) => value,
            Err(_) => continue,
        };

        headers
            .entry(String::from(name.as_str()))
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| String::from(value));
    }

    headers
}

pub fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.insert(header_name, header_value);
    }

    Ok(())
}

/// Layers header maps on top of each other. Names compare case-insensitively and later layers win.
pub fn merge_headers<'a, I, H>(layers: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = H>,
    H: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut merged = HashMap::new();

    for layer in layers {
        for (name, value) in layer {
            merged.insert(name.to_lowercase(), value.clone());
        }
    }

    merged
}

pub fn join_url(base_url: &str, path: &str) -> String {
    let base_url = base_url.trim_end_matches('/');

    if path.is_empty() || path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}
