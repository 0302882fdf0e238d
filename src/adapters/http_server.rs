//! Status HTTP server on the ESP-IDF `httpd` component.
//!
//! Registers GET handlers for `/status`, `/` and a wildcard fallback.  All
//! three answer through [`StatusBoard::serve`], so routing stays in
//! [`net::http`](crate::net::http) and the handlers only copy the reply
//! onto the connection.  Handlers run on the httpd task and never touch
//! the controller; they read the snapshot the tick loop publishes.
//!
//! Request parsing, framing and 405/400 answers for other methods or
//! malformed requests are left to `httpd`.

use embedded_svc::http::Method;
use embedded_svc::io::Write;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use log::{info, warn};

use crate::error::CommsError;
use crate::net::board::StatusBoard;
use crate::net::http::STATUS_PATH;

/// Stack for each httpd worker; JSON rendering fits comfortably.
const HANDLER_STACK_BYTES: usize = 8 * 1024;

/// Keeps the server alive; dropping it stops `httpd`.
pub struct StatusHttpServer {
    _server: EspHttpServer<'static>,
    port: u16,
}

impl StatusHttpServer {
    pub fn start(board: &StatusBoard, port: u16) -> Result<Self, CommsError> {
        let conf = Configuration {
            http_port: port,
            stack_size: HANDLER_STACK_BYTES,
            uri_match_wildcard: true,
            ..Default::default()
        };
        let mut server = EspHttpServer::new(&conf).map_err(|e| {
            warn!("HTTP: server start failed ({})", e);
            CommsError::ServerStartFailed
        })?;

        // Registration order is match order: the wildcard goes last.
        for uri in [STATUS_PATH, "/", "/*"] {
            let board = board.clone();
            server
                .fn_handler::<anyhow::Error, _>(uri, Method::Get, move |req| {
                    let reply = board.serve(req.uri());
                    req.into_response(reply.status, Some(reply.reason()), &reply.headers())?
                        .write_all(reply.body.as_bytes())?;
                    Ok(())
                })
                .map_err(|e| {
                    warn!("HTTP: cannot register {} ({})", uri, e);
                    CommsError::ServerStartFailed
                })?;
        }

        info!("HTTP: serving {} on port {}", STATUS_PATH, port);
        Ok(Self {
            _server: server,
            port,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
