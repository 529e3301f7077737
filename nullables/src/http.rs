//! Nullable HTTP backend: scripted responses, recorded requests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use dompet_transport::{HttpBackend, HttpRequest, HttpResponse, Method, TransportError};
use serde::Serialize;
use serde_json::json;
use tokio::sync::oneshot;

type Outcome = Result<HttpResponse, TransportError>;

enum Scripted {
    Ready(Outcome),
    Deferred(oneshot::Receiver<Outcome>),
}

/// A test backend that answers from a per-route script.
///
/// Responses are queued per `(method, path)`; the query string is not part
/// of the route. Each request pops the next scripted answer for its route.
/// A request with nothing scripted fails with [`TransportError::Network`].
pub struct NullHttp {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl NullHttp {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    /// Queue a raw response.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.push(
            method,
            path,
            Scripted::Ready(Ok(HttpResponse::new(status, body.to_string()))),
        );
    }

    /// Queue a 200 response wrapping `data` in a success envelope.
    pub fn respond_ok<T: Serialize>(&self, method: Method, path: &str, data: T) {
        self.respond(method, path, 200, success_envelope(data));
    }

    /// Queue an error response carrying `message` in its envelope.
    pub fn respond_error(&self, method: Method, path: &str, status: u16, message: &str) {
        self.respond(
            method,
            path,
            status,
            json!({ "status": 102, "message": message, "data": null }),
        );
    }

    /// Queue a transport-level failure (no HTTP response at all).
    pub fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.push(method, path, Scripted::Ready(Err(error)));
    }

    /// Queue a response that is held back until the returned handle completes.
    pub fn defer(&self, method: Method, path: &str) -> DeferredResponse {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Deferred(rx));
        DeferredResponse { sender: tx }
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for one route.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    /// Scripted answers not yet consumed, across all routes.
    pub fn pending_scripts(&self) -> usize {
        self.routes.lock().unwrap().values().map(VecDeque::len).sum()
    }
}

impl Default for NullHttp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpBackend for NullHttp {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);
        let next = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Scripted::Ready(outcome)) => outcome,
            Some(Scripted::Deferred(rx)) => rx.await.unwrap_or_else(|_| {
                Err(TransportError::Network("deferred response dropped".into()))
            }),
            None => Err(TransportError::Network(format!(
                "no scripted response for {} {}",
                key.0, key.1
            ))),
        }
    }
}

/// Completes one held-back response.
pub struct DeferredResponse {
    sender: oneshot::Sender<Outcome>,
}

impl DeferredResponse {
    pub fn ok<T: Serialize>(self, data: T) {
        let _ = self.sender.send(Ok(HttpResponse::new(
            200,
            success_envelope(data).to_string(),
        )));
    }

    pub fn error(self, status: u16, message: &str) {
        let body = json!({ "status": 102, "message": message, "data": null });
        let _ = self
            .sender
            .send(Ok(HttpResponse::new(status, body.to_string())));
    }

    pub fn fail(self, error: TransportError) {
        let _ = self.sender.send(Err(error));
    }
}

fn success_envelope<T: Serialize>(data: T) -> serde_json::Value {
    json!({ "status": 0, "message": "Sukses", "data": data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_in_script_order_and_records() {
        let http = NullHttp::new();
        http.respond_ok(Method::Get, "/balance", json!({ "balance": 1 }));
        http.respond_ok(Method::Get, "/balance", json!({ "balance": 2 }));

        let first = http.execute(HttpRequest::get("/balance")).await.unwrap();
        let second = http.execute(HttpRequest::get("/balance")).await.unwrap();
        assert!(String::from_utf8(first.body).unwrap().contains("\"balance\":1"));
        assert!(String::from_utf8(second.body).unwrap().contains("\"balance\":2"));
        assert_eq!(http.count(Method::Get, "/balance"), 2);
        assert_eq!(http.pending_scripts(), 0);
    }

    #[tokio::test]
    async fn unscripted_route_is_network_error() {
        let http = NullHttp::new();
        let err = http.execute(HttpRequest::get("/profile")).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn deferred_waits_for_completion() {
        let http = std::sync::Arc::new(NullHttp::new());
        let held = http.defer(Method::Get, "/banner");
        let task = {
            let http = http.clone();
            tokio::spawn(async move { http.execute(HttpRequest::get("/banner")).await })
        };
        tokio::task::yield_now().await;
        held.ok(json!([]));
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.status, 200);
    }
}
