//! In-memory transport and observer used by unit tests.

use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use url::Url;

use crate::address::LightningAddress;
use crate::error::ResolveError;
use crate::hooks::{ResolveContext, ResolveObserver};
use crate::outcome::ResolvedInvoice;
use crate::resolver::ServiceMetadata;
use crate::transport::{BoxFuture, LnurlTransport, TransportError, TransportResponse};

type FailureFn = Arc<dyn Fn() -> TransportError + Send + Sync>;

#[derive(Clone)]
enum Reply {
    Response(u16, Vec<u8>),
    Failure(FailureFn),
}

enum Matcher {
    Exact(String),
    Prefix(String),
}

impl Matcher {
    fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(expected) => url == expected,
            Self::Prefix(prefix) => url.starts_with(prefix.as_str()),
        }
    }
}

struct Route {
    matcher: Matcher,
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

/// Route table keyed by URL. Unmatched requests get a `404`.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, matcher: Matcher, reply: Reply, gate: Option<Arc<Notify>>) -> Self {
        self.routes.push(Route {
            matcher,
            reply,
            gate,
        });
        self
    }

    pub fn with_response(self, url: &str, status: u16, body: &str) -> Self {
        let reply = Reply::Response(status, body.as_bytes().to_vec());
        self.route(Matcher::Exact(url.to_owned()), reply, None)
    }

    pub fn with_response_prefix(self, prefix: &str, status: u16, body: &str) -> Self {
        let reply = Reply::Response(status, body.as_bytes().to_vec());
        self.route(Matcher::Prefix(prefix.to_owned()), reply, None)
    }

    pub fn with_json(self, url: &str, body: &serde_json::Value) -> Self {
        self.with_response(url, 200, &body.to_string())
    }

    pub fn with_json_prefix(self, prefix: &str, body: &serde_json::Value) -> Self {
        self.with_response_prefix(prefix, 200, &body.to_string())
    }

    /// Responds only after `gate` is notified.
    pub fn with_gated_json(self, url: &str, body: &serde_json::Value, gate: Arc<Notify>) -> Self {
        let reply = Reply::Response(200, body.to_string().into_bytes());
        self.route(Matcher::Exact(url.to_owned()), reply, Some(gate))
    }

    pub fn with_failure(
        self,
        url: &str,
        failure: impl Fn() -> TransportError + Send + Sync + 'static,
    ) -> Self {
        let reply = Reply::Failure(Arc::new(failure));
        self.route(Matcher::Exact(url.to_owned()), reply, None)
    }

    pub fn with_failure_prefix(
        self,
        prefix: &str,
        failure: impl Fn() -> TransportError + Send + Sync + 'static,
    ) -> Self {
        let reply = Reply::Failure(Arc::new(failure));
        self.route(Matcher::Prefix(prefix.to_owned()), reply, None)
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl LnurlTransport for MockTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        let url = url.as_str().to_owned();
        self.requests.lock().unwrap().push(url.clone());
        let route = self.routes.iter().find(|r| r.matcher.matches(&url));
        let reply = route.map(|r| r.reply.clone());
        let gate = route.and_then(|r| r.gate.clone());

        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            match reply {
                Some(Reply::Response(status, body)) => Ok(TransportResponse::new(status, body)),
                Some(Reply::Failure(failure)) => Err(failure()),
                None => Ok(TransportResponse::new(404, "not found")),
            }
        })
    }
}

/// Records every observer callback as a short string.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ResolveObserver for RecordingObserver {
    fn on_start(&self, _ctx: &ResolveContext<'_>) {
        self.push("start".to_owned());
    }

    fn on_metadata(&self, _address: &LightningAddress, _metadata: &ServiceMetadata) {
        self.push("metadata".to_owned());
    }

    fn on_resolved(&self, _ctx: &ResolveContext<'_>, invoice: &ResolvedInvoice) {
        self.push(format!("resolved:{invoice}"));
    }

    fn on_failed(&self, _ctx: &ResolveContext<'_>, error: &ResolveError) {
        self.push(format!("failed:{}:{error}", error.kind()));
    }
}
