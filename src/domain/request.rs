//! Request Context
//!
//! Transport-neutral view of an inbound request: peer address, request
//! line, multi-valued headers and form parameters.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Normalize a header name to canonical MIME form (`x-real-ip` -> `X-Real-Ip`).
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// An inbound request as seen by the resolution core.
#[derive(Debug, Clone)]
pub struct RequestContext {
    remote_addr: String,
    proto: String,
    method: String,
    uri: String,
    headers: BTreeMap<String, Vec<String>>,
    query: Option<String>,
    form_body: Option<Vec<u8>>,
    form: OnceLock<BTreeMap<String, Vec<String>>>,
}

impl RequestContext {
    /// Create a request from its transport peer address (`host:port`).
    pub fn new(remote_addr: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            proto: "HTTP/1.1".to_string(),
            method: "GET".to_string(),
            uri: "/".to_string(),
            headers: BTreeMap::new(),
            query: None,
            form_body: None,
            form: OnceLock::new(),
        }
    }

    pub fn with_proto(mut self, proto: impl Into<String>) -> Self {
        self.proto = proto.into();
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the request URI; its query part becomes the query string.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.query = uri.split_once('?').map(|(_, q)| q.to_string());
        self.uri = uri;
        self
    }

    /// Append one header value; repeated names accumulate values in order.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(canonical_header_name(name))
            .or_default()
            .push(value.into());
        self
    }

    /// Attach an `application/x-www-form-urlencoded` body.
    pub fn with_form_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.form_body = Some(body.into());
        self
    }

    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    pub fn proto(&self) -> &str {
        &self.proto
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// All values of a header, matched case-insensitively.
    pub fn header_values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&canonical_header_name(name))
            .map(Vec::as_slice)
    }

    /// Headers keyed by canonical name.
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// Form parameters: body values first, then query values.
    ///
    /// Parsed on first access only.
    pub fn form(&self) -> &BTreeMap<String, Vec<String>> {
        self.form.get_or_init(|| {
            let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
            let sources = [
                self.form_body.as_deref(),
                self.query.as_deref().map(str::as_bytes),
            ];
            for source in sources.into_iter().flatten() {
                for (k, v) in url::form_urlencoded::parse(source) {
                    params.entry(k.into_owned()).or_default().push(v.into_owned());
                }
            }
            params
        })
    }

    /// Whether form parameters have already been parsed.
    pub fn form_parsed(&self) -> bool {
        self.form.get().is_some()
    }
}
