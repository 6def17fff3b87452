//! HTTP transport seam.
//!
//! Client-side (hydrate): `fetch` via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Server-side (SSR): stub that fails every call, since the API is only
//! reachable from the browser.

use std::future::Future;

use super::envelope::{RequestEnvelope, ResponseEnvelope};
use super::error::TransportError;

/// Sends one envelope and reports the raw outcome.
///
/// Implementations must not interpret status codes; a 4xx/5xx response is a
/// successful exchange at this level.
pub trait Transport {
    fn send(&self, request: RequestEnvelope) -> impl Future<Output = Result<ResponseEnvelope, TransportError>>;
}

/// Browser `fetch` transport with a fixed per-call ceiling.
#[derive(Clone, Copy, Debug)]
pub struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
impl Transport for FetchTransport {
    fn send(&self, request: RequestEnvelope) -> impl Future<Output = Result<ResponseEnvelope, TransportError>> {
        let timeout_ms = self.timeout_ms;
        async move {
            #[cfg(feature = "hydrate")]
            {
                use futures::future::{Either, select};

                let exchange = Box::pin(fetch(request));
                let timeout = Box::pin(gloo_timers::future::TimeoutFuture::new(timeout_ms));
                match select(exchange, timeout).await {
                    Either::Left((result, _)) => result,
                    Either::Right(((), _)) => Err(TransportError::Timeout(timeout_ms)),
                }
            }
            #[cfg(not(feature = "hydrate"))]
            {
                Err(TransportError::Network("not available on server".to_owned()))
            }
        }
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: RequestEnvelope) -> Result<ResponseEnvelope, TransportError> {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};

    use super::envelope::Method;

    let network = |e: gloo_net::Error| TransportError::Network(e.to_string());

    let method = match request.method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(&request.url).method(method);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let built = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(network)?;

    let resp = built.send().await.map_err(network)?;
    let status = resp.status();
    let body = resp.text().await.map_err(network)?;
    Ok(ResponseEnvelope { status, body })
}
