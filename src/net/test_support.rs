//! Fakes shared by the networking tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use super::envelope::{RequestEnvelope, ResponseEnvelope};
use super::error::TransportError;
use super::interceptor::Redirector;
use super::transport::Transport;

/// Records every request and replays queued outcomes in order.
///
/// Once the queue is empty every call answers `200 null`.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub requests: Rc<RefCell<Vec<RequestEnvelope>>>,
    outcomes: Rc<RefCell<VecDeque<Result<ResponseEnvelope, TransportError>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.outcomes
            .borrow_mut()
            .push_back(Ok(ResponseEnvelope::new(status, body)));
        self
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.outcomes.borrow_mut().push_back(Err(err));
        self
    }

    pub fn last_request(&self) -> Option<RequestEnvelope> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: RequestEnvelope) -> impl Future<Output = Result<ResponseEnvelope, TransportError>> {
        self.requests.borrow_mut().push(request);
        let outcome = self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ResponseEnvelope::new(200, "null")));
        async move { outcome }
    }
}

/// In-memory location that records every redirect it is asked to make.
///
/// Like `window.location`, the current path stays put after a redirect; call
/// `arrive` to simulate the new page loading.
#[derive(Clone, Default)]
pub struct FakeRedirector {
    pub current: Rc<RefCell<String>>,
    pub issued: Rc<RefCell<Vec<String>>>,
}

impl FakeRedirector {
    pub fn at(path: &str) -> Self {
        let redirector = Self::default();
        *redirector.current.borrow_mut() = path.to_owned();
        redirector
    }

    pub fn issued(&self) -> Vec<String> {
        self.issued.borrow().clone()
    }

    pub fn arrive(&self, path: &str) {
        *self.current.borrow_mut() = path.to_owned();
    }
}

impl Redirector for FakeRedirector {
    fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.issued.borrow_mut().push(path.to_owned());
    }
}
