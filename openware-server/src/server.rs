// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Accept loop. Each connection is served on its own thread and closed after
//! one response.

use std::{
    io::BufReader,
    net::{TcpListener, TcpStream},
    sync::Arc,
    thread,
};

use openware::Bridge;
use tracing::{debug, warn};

use crate::{
    error::{Result, ServerError},
    http::{Request, Response},
    routes::route,
};

/// Serves connections from `listener` until accepting fails permanently.
pub fn serve<B>(listener: TcpListener, bridge: Arc<B>) -> Result<()>
where
    B: Bridge + Send + Sync + 'static,
{
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let bridge = Arc::clone(&bridge);
                thread::spawn(move || {
                    if let Err(err) = handle_connection(&*bridge, &stream) {
                        warn!("Connection error: {err}");
                    }
                });
            }
            Err(err) => warn!("Accept error: {err}"),
        }
    }
    Ok(())
}

fn handle_connection(bridge: &impl Bridge, stream: &TcpStream) -> Result<()> {
    let mut reader = BufReader::new(stream);
    let response = match Request::read_from(&mut reader) {
        Ok(request) => {
            debug!("{} {}", request.method, request.path);
            route(bridge, &request)?
        }
        Err(ServerError::MalformedRequest(message)) => {
            Response::json(400, &serde_json::json!({ "error": message }))?
        }
        Err(err) => return Err(err),
    };

    let mut writer = stream;
    response.write_to(&mut writer)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        io::{Read, Write},
    };

    use openware::{CallBridge, LibraryResolver};
    use tempfile::TempDir;

    use super::*;

    fn request(addr: std::net::SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(raw.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn serves_requests_over_tcp() {
        let root = TempDir::new().unwrap();
        let bridge = Arc::new(CallBridge::new(
            LibraryResolver::new(root.path()),
            HashMap::<String, String>::new(),
        ));
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || serve(listener, bridge));

        let health = request(addr, "GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert!(health.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(health.ends_with("{\"status\":\"ok\"}"));

        let garbage = request(addr, "\r\n");
        assert!(garbage.starts_with("HTTP/1.1 400 Bad Request\r\n"));

        let missing = request(addr, "GET /sum?a=1&b=2 HTTP/1.1\r\n\r\n");
        assert!(missing.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(missing.contains("OPENWARE_API_LIB"));
    }
}
