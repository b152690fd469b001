// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Just enough HTTP/1.1 to serve one JSON response per connection.

use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use serde::Serialize;

use crate::error::{Result, ServerError};

/// A parsed request line. Headers are read and discarded; bodies are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Query parameters, percent-decoded with `+` as space. The first
    /// occurrence of a name wins and empty values are dropped.
    pub query: HashMap<String, String>,
}

impl Request {
    /// Reads the request line and skips the headers.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self> {
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        let request = Self::parse_request_line(&request_line)?;

        loop {
            let mut header = String::new();
            if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
                break;
            }
        }

        Ok(request)
    }

    /// Parses `METHOD /path?query HTTP/x.y`.
    pub fn parse_request_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
            return Err(ServerError::MalformedRequest(format!(
                "invalid request line {:?}",
                line.trim_end()
            )));
        };

        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        Ok(Self {
            method: method.to_string(),
            path: path.to_string(),
            query: parse_query(query),
        })
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if name.is_empty() || value.is_empty() {
            continue;
        }
        params
            .entry(name.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// A JSON response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn json(status: u16, body: &impl Serialize) -> Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_string(body)?,
        })
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\n\
             Content-Type: application/json; charset=utf-8\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            self.status,
            reason_phrase(self.status),
            self.body.len()
        )?;
        writer.write_all(self.body.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    }
}
