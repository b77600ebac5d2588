//! Sequential HTTP server loop.
//!
//! One connection at a time: the evaluator is single-threaded and must
//! not be entered re-entrantly, and requests inside a handler execute in
//! one logical thread. Parse failures answer 400 instead of killing the
//! loop.

use std::io::BufReader;
use std::net::{TcpListener, TcpStream};

use tracing::{debug, info, warn};

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::request::read_request;
use crate::http::response::HttpResponse;

/// Binds `port` on localhost and serves requests until the process ends.
pub fn serve(dispatcher: &Dispatcher, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port))?;
    info!(port, "listening on http://127.0.0.1:{}", port);

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(err) = handle_connection(dispatcher, stream) {
                    warn!(error = %err, "connection failed");
                }
            },
            Err(err) => warn!(error = %err, "accept failed"),
        }
    }
    Ok(())
}

fn handle_connection(dispatcher: &Dispatcher, stream: TcpStream) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut stream = stream;

    let response = match read_request(&mut reader) {
        Ok(request) => {
            debug!(method = %request.method, path = %request.path, "request");
            dispatcher.dispatch(&request)
        },
        Err(err) => HttpResponse::json_error(400, &err.to_string()),
    };

    response.write_to(&mut stream)?;
    Ok(())
}
