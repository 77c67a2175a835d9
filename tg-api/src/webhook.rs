//! Inbound webhook updates.
//!
//! [`decode_update`] turns a raw request body into JSON without validating
//! its shape. [`WebhookServer`] is a minimal HTTP listener that applies it to
//! every POST and forwards the decoded updates on a channel.

use std::convert::Infallible;
use std::net::SocketAddr;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use tg_core::constants;
use tg_core::error::{TgError, TgResult};

/// Decode a raw webhook request body. The payload is returned verbatim.
pub fn decode_update(body: &[u8]) -> TgResult<serde_json::Value> {
    serde_json::from_slice(body).map_err(|e| TgError::Decode(format!("invalid webhook body: {e}")))
}

/// HTTP listener receiving updates pushed by Telegram.
pub struct WebhookServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    body_limit: usize,
}

impl WebhookServer {
    /// Bind the listener. Use port 0 to pick a free port.
    pub async fn bind(addr: SocketAddr) -> TgResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
            body_limit: constants::MAX_WEBHOOK_BODY_BYTES,
        })
    }

    /// Largest accepted request body; bigger ones are answered with 413.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` turns true or its sender is dropped.
    pub async fn run(
        self,
        updates: mpsc::Sender<serde_json::Value>,
        mut shutdown: watch::Receiver<bool>,
    ) -> TgResult<()> {
        info!("webhook listener on http://{}", self.local_addr);
        let body_limit = self.body_limit;

        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, remote)) => {
                            debug!("webhook connection from {remote}");
                            let updates = updates.clone();
                            tokio::spawn(async move {
                                let svc = service_fn(move |req| {
                                    let updates = updates.clone();
                                    async move { handle_request(req, updates, body_limit).await }
                                });
                                if let Err(e) = http1::Builder::new()
                                    .serve_connection(hyper_util::rt::TokioIo::new(stream), svc)
                                    .await
                                {
                                    debug!("webhook connection error: {e}");
                                }
                            });
                        }
                        Err(e) => warn!("webhook accept error: {e}"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("webhook listener shutting down");
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

async fn handle_request(
    req: Request<Incoming>,
    updates: mpsc::Sender<serde_json::Value>,
    body_limit: usize,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if req.method() != Method::POST {
        return Ok(reply(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"));
    }

    let body = match Limited::new(req.into_body(), body_limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            warn!("webhook body over {body_limit} bytes rejected");
            return Ok(reply(StatusCode::PAYLOAD_TOO_LARGE, "body too large"));
        }
        Err(e) => {
            debug!("failed to read webhook body: {e}");
            return Ok(reply(StatusCode::BAD_REQUEST, "unreadable body"));
        }
    };

    let update = match decode_update(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("{e}");
            return Ok(reply(StatusCode::BAD_REQUEST, "invalid json"));
        }
    };

    if updates.send(update).await.is_err() {
        return Ok(reply(StatusCode::SERVICE_UNAVAILABLE, "receiver closed"));
    }
    Ok(reply(StatusCode::OK, "ok"))
}

fn reply(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
}
