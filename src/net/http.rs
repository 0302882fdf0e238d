//! Routing for the status endpoint.
//!
//! The HTTP server (`EspHttpServer` on target) owns framing and parsing.
//! This module only maps a request URI to a [`Reply`], so every route is
//! testable on the host.
//!
//! | Path       | GET                   |
//! |------------|-----------------------|
//! | `/status`  | 200, JSON status body |
//! | `/`        | 302 → `/status`       |
//! | anything   | 404                   |

use crate::app::presentation::StatusReport;

/// Path that serves the status body.
pub const STATUS_PATH: &str = "/status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Status,
    Root,
    NotFound,
}

/// Route a request URI.  The query string plays no part.
pub fn route(uri: &str) -> Route {
    let path = uri.split_once('?').map_or(uri, |(path, _)| path);
    match path {
        STATUS_PATH => Route::Status,
        "/" => Route::Root,
        _ => Route::NotFound,
    }
}

/// Everything the server needs to answer one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub location: Option<&'static str>,
    pub body: String,
}

impl Reply {
    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            location: None,
            body: body.into(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            302 => "Found",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }

    /// Response headers in the `(name, value)` form the server expects.
    pub fn headers(&self) -> heapless::Vec<(&'static str, &'static str), 2> {
        let mut headers = heapless::Vec::new();
        let _ = headers.push(("Content-Type", self.content_type));
        if let Some(location) = self.location {
            let _ = headers.push(("Location", location));
        }
        headers
    }
}

/// Answer a GET for `uri`.
///
/// `status` is only invoked when the status body is actually served.
pub fn respond(uri: &str, status: impl FnOnce() -> StatusReport) -> Reply {
    match route(uri) {
        Route::Status => match status().to_json() {
            Ok(body) => Reply {
                status: 200,
                content_type: "application/json",
                location: None,
                body,
            },
            Err(_) => Reply::text(500, "Internal Server Error"),
        },
        Route::Root => Reply {
            status: 302,
            content_type: "text/plain",
            location: Some(STATUS_PATH),
            body: String::new(),
        },
        Route::NotFound => Reply::text(404, "Not Found"),
    }
}
