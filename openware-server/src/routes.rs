// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Maps request paths to JSON responses.
//!
//! Integer validation happens here, before the bridge is called. Every bridge
//! error is answered with `400` and the error's message.

use openware::Bridge;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::Result,
    http::{Request, Response},
};

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize)]
struct Version {
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    native: Option<String>,
}

#[derive(Serialize)]
struct Sum {
    a: i32,
    b: i32,
    result: i32,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error(status: u16, message: impl Into<String>) -> Result<Response> {
    Response::json(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}

pub fn route(bridge: &impl Bridge, request: &Request) -> Result<Response> {
    if request.method != "GET" {
        return error(405, "method not allowed");
    }

    match request.path.as_str() {
        "/health" => Response::json(200, &Health { status: "ok" }),
        "/version" => {
            let native = bridge
                .version()
                .inspect_err(|err| debug!("Native version unavailable: {err}"))
                .ok();
            Response::json(
                200,
                &Version {
                    version: env!("CARGO_PKG_VERSION"),
                    native,
                },
            )
        }
        "/sum" => sum(bridge, request),
        _ => error(404, "not found"),
    }
}

fn sum(bridge: &impl Bridge, request: &Request) -> Result<Response> {
    let operands = operand(request, "a").and_then(|a| Ok((a, operand(request, "b")?)));
    let (a, b) = match operands {
        Ok(operands) => operands,
        Err(message) => return error(400, message),
    };

    match bridge.sum(a, b) {
        Ok(result) => Response::json(200, &Sum { a, b, result }),
        Err(err) => {
            warn!("Bridged sum failed: {err}");
            error(400, err.to_string())
        }
    }
}

/// Reads an integer query parameter. A missing parameter counts as `0`.
fn operand(request: &Request, name: &str) -> core::result::Result<i32, String> {
    match request.query.get(name) {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| format!("invalid integer for `{name}`: {raw:?} ({err})")),
    }
}
