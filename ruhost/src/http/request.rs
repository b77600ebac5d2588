//! HTTP request representation and wire parsing.

use std::io::{BufRead, Read};

use indexmap::IndexMap;

use rulang_eval::Value;
use rulang_par::ast::HttpMethod;

use crate::error::{HostError, Result};
use crate::json::json_to_value;

/// A request as seen by the dispatcher, wire details already shed.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path component only, query string removed.
    pub path: String,
    pub query: IndexMap<String, String>,
    /// Header names lowercased.
    pub headers: IndexMap<String, String>,
    /// Decoded body: JSON when it parses, raw string otherwise, Null when
    /// absent.
    pub body: Value,
}

impl HttpRequest {
    /// Creates a request from a method and a target that may carry a
    /// query string (`/users/7?full=1`).
    pub fn new(method: HttpMethod, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, raw)) => (path.to_string(), parse_query(raw)),
            None => (target.to_string(), IndexMap::new()),
        };
        Self {
            method,
            path,
            query,
            headers: IndexMap::new(),
            body: Value::Null,
        }
    }

    /// Adds a header, lowercasing the name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    /// Sets the decoded body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Builds the `req` object a handler sees, with the route parameters
    /// the router extracted.
    pub fn value(&self, params: &IndexMap<String, String>) -> Value {
        let to_string_object = |map: &IndexMap<String, String>| {
            Value::object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            )
        };

        Value::object(vec![
            (
                "method".to_string(),
                Value::String(self.method.as_str().to_string()),
            ),
            ("path".to_string(), Value::String(self.path.clone())),
            ("params".to_string(), to_string_object(params)),
            ("query".to_string(), to_string_object(&self.query)),
            ("headers".to_string(), to_string_object(&self.headers)),
            ("body".to_string(), self.body.clone()),
        ])
    }
}

/// Reads one HTTP/1.1 request from `reader`.
///
/// Supports the five methods the language declares endpoints for, headers,
/// and a `Content-Length` body. A JSON body decodes into structured
/// values; anything else arrives as a string.
pub fn read_request(reader: &mut impl BufRead) -> Result<HttpRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut parts = request_line.split_whitespace();
    let method_name = parts
        .next()
        .ok_or_else(|| HostError::Http("empty request line".to_string()))?;
    let target = parts
        .next()
        .ok_or_else(|| HostError::Http("request line without target".to_string()))?;

    let method = HttpMethod::from_name(method_name)
        .ok_or_else(|| HostError::Http(format!("unsupported method {}", method_name)))?;

    let mut request = HttpRequest::new(method, target);

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_lowercase();
            let value = value.trim().to_string();
            if name == "content-length" {
                content_length = value
                    .parse()
                    .map_err(|_| HostError::Http("bad content-length".to_string()))?;
            }
            request.headers.insert(name, value);
        }
    }

    if content_length > 0 {
        let mut buffer = vec![0u8; content_length];
        reader.read_exact(&mut buffer)?;
        let text = String::from_utf8_lossy(&buffer).to_string();
        request.body = match serde_json::from_str(&text) {
            Ok(json) => json_to_value(&json),
            Err(_) => Value::String(text),
        };
    }

    Ok(request)
}

/// Decodes a query string (`a=1&b=two+words`).
pub fn parse_query(raw: &str) -> IndexMap<String, String> {
    let mut query = IndexMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        query.insert(percent_decode(key), percent_decode(value));
    }
    query
}

/// Decodes `%XX` escapes and `+` as space.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                decoded.push(b' ');
                index += 1;
            },
            b'%' => match hex_pair(bytes.get(index + 1), bytes.get(index + 2)) {
                Some(byte) => {
                    decoded.push(byte);
                    index += 3;
                },
                None => {
                    decoded.push(b'%');
                    index += 1;
                },
            },
            byte => {
                decoded.push(byte);
                index += 1;
            },
        }
    }
    String::from_utf8_lossy(&decoded).to_string()
}

fn hex_pair(high: Option<&u8>, low: Option<&u8>) -> Option<u8> {
    let high = (*high? as char).to_digit(16)?;
    let low = (*low? as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}
