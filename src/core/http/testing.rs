//! Test doubles for the HTTP layer

use futures::channel::oneshot;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};
use crate::core::auth::navigation::testing::RecordingNavigator;
use crate::core::auth::{MemoryStorage, RefreshPolicy, SessionService, TokenStore};
use crate::core::config::ClientConfig;

enum Reply {
    Response(ApiResponse),
    Failure(String),
}

/// Scripted transport: replies are queued per (method, path) and consumed in order
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    hanging: Mutex<Vec<String>>,
}

impl MockTransport {
    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.push(
            method,
            path,
            Reply::Response(ApiResponse::new(status, body.to_string())),
        );
    }

    pub(crate) fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Reply::Failure(message.to_string()));
    }

    /// Hold requests to `path` until the returned sender fires (or is dropped)
    pub(crate) fn gate(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    /// Requests to `path` never complete
    pub(crate) fn hang(&self, path: &str) {
        self.hanging.lock().unwrap().push(path.to_string());
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let hangs = self.hanging.lock().unwrap().contains(&request.path);
        if hangs {
            futures::future::pending::<()>().await;
        }

        let gate = self.gates.lock().unwrap().remove(&request.path);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&(request.method, request.path.clone()))
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(TransportError(message)),
            None => Ok(ApiResponse::new(
                404,
                r#"{"statusCode":404,"message":"No scripted reply"}"#,
            )),
        }
    }
}

/// Session over in-memory storage and a scripted transport
pub(crate) fn test_session(
    policy: RefreshPolicy,
) -> (
    SessionService<MemoryStorage, MockTransport>,
    Arc<RecordingNavigator>,
) {
    let navigator = Arc::new(RecordingNavigator::default());
    let session = SessionService::new(
        ClientConfig::new("http://api.test").with_refresh_policy(policy),
        TokenStore::new(MemoryStorage::new()),
        MockTransport::default(),
        navigator.clone(),
    );
    (session, navigator)
}
