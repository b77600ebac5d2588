//! Response state and the `res` value handlers drive.
//!
//! One [`ResponseState`] cell lives per dispatch. The `res` object bound
//! into the handler scope is a set of natives over that cell; `status`
//! and `header` hand back a fresh `res` over the same cell, which is what
//! makes `res.status(401).json(...)` chain.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use indexmap::IndexMap;

use rulang_eval::{Flow, NativeFn, Value};
use rulang_util::RuntimeError;

use crate::json::value_to_json;

/// Response body as accumulated by the handler.
#[derive(Clone, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Text(String),
}

/// Mutable response state shared by the `res` natives.
pub struct ResponseState {
    pub status: u16,
    pub headers: IndexMap<String, String>,
    pub body: Body,
    /// Set once a body-producing operation ran.
    pub sent: bool,
}

impl Default for ResponseState {
    fn default() -> Self {
        Self {
            status: 200,
            headers: IndexMap::new(),
            body: Body::Empty,
            sent: false,
        }
    }
}

impl ResponseState {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Encodes the accumulated state into a wire-ready response.
    pub fn finish(&self) -> HttpResponse {
        let body = match &self.body {
            Body::Empty => String::new(),
            Body::Json(value) => serde_json::to_string(&value_to_json(value))
                .unwrap_or_else(|_| "null".to_string()),
            Body::Text(text) => text.clone(),
        };
        HttpResponse {
            status: self.status,
            headers: self.headers.clone(),
            body,
        }
    }
}

/// Builds the `res` object over a shared response cell.
pub fn res_value(state: &Rc<RefCell<ResponseState>>) -> Value {
    Value::object(vec![
        ("json".to_string(), json_native(state)),
        ("text".to_string(), text_native(state)),
        ("status".to_string(), status_native(state)),
        ("header".to_string(), header_native(state)),
        ("redirect".to_string(), redirect_native(state)),
    ])
}

fn json_native(state: &Rc<RefCell<ResponseState>>) -> Value {
    let state = state.clone();
    Value::Native(NativeFn::new("res.json", move |args| {
        let value = args.first().cloned().unwrap_or(Value::Null);
        let mut state = state.borrow_mut();
        state.body = Body::Json(value);
        state
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        state.sent = true;
        Ok(Value::Null)
    }))
}

fn text_native(state: &Rc<RefCell<ResponseState>>) -> Value {
    let state = state.clone();
    Value::Native(NativeFn::new("res.text", move |args| {
        let text = match args {
            [Value::String(text)] => text.clone(),
            [other] => {
                return Err(type_error(format!(
                    "text expects a string, got {}",
                    other.type_name()
                )))
            },
            _ => return Err(type_error("text expects exactly one string")),
        };
        let mut state = state.borrow_mut();
        state.body = Body::Text(text);
        state
            .headers
            .insert("content-type".to_string(), "text/plain".to_string());
        state.sent = true;
        Ok(Value::Null)
    }))
}

fn status_native(state: &Rc<RefCell<ResponseState>>) -> Value {
    let state = state.clone();
    Value::Native(NativeFn::new("res.status", move |args| {
        let status = match args {
            [Value::Number(status)] => *status,
            _ => return Err(type_error("status expects a number")),
        };
        state.borrow_mut().status = status as u16;
        Ok(res_value(&state))
    }))
}

fn header_native(state: &Rc<RefCell<ResponseState>>) -> Value {
    let state = state.clone();
    Value::Native(NativeFn::new("res.header", move |args| {
        let (name, value) = match args {
            [Value::String(name), value] => (name.clone(), value.stringify()),
            _ => return Err(type_error("header expects (name, value)")),
        };
        state.borrow_mut().headers.insert(name.to_lowercase(), value);
        Ok(res_value(&state))
    }))
}

fn redirect_native(state: &Rc<RefCell<ResponseState>>) -> Value {
    let state = state.clone();
    Value::Native(NativeFn::new("res.redirect", move |args| {
        let url = match args {
            [Value::String(url)] => url.clone(),
            _ => return Err(type_error("redirect expects a url string")),
        };
        let mut state = state.borrow_mut();
        state.status = 302;
        state.headers.insert("location".to_string(), url);
        state.sent = true;
        Ok(Value::Null)
    }))
}

fn type_error(message: impl Into<String>) -> Flow {
    RuntimeError::type_error(message).into()
}

/// A finished response, ready for the wire or for test inspection.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: IndexMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Builds a JSON error response, used by the dispatcher for 404/500.
    pub fn json_error(status: u16, message: &str) -> Self {
        let mut headers = IndexMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            status,
            headers,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    /// Writes the response in HTTP/1.1 wire format.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        for (name, value) in &self.headers {
            write!(writer, "{}: {}\r\n", name, value)?;
        }
        write!(writer, "content-length: {}\r\n\r\n", self.body.len())?;
        writer.write_all(self.body.as_bytes())?;
        writer.flush()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
