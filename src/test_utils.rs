// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-memory cluster gateway and a mock HTTP service for kube clients.

use crate::error::{ReplicatorError, Result};
use crate::kubernetes::{ClusterGateway, EventStream};
use crate::types::ResourceEvent;
use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use http::{Request, Response};
use k8s_openapi::api::core::v1::{Namespace, Secret};
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::Client;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

pub type NamespaceEvents = mpsc::UnboundedSender<Result<ResourceEvent<Namespace>>>;
pub type SecretEvents = mpsc::UnboundedSender<Result<ResourceEvent<Secret>>>;

/// A gateway call as recorded by [`FakeGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNamespaces,
    WatchNamespaces,
    ListSecrets { namespace: String },
    WatchSecrets { namespace: String },
    CreateSecret { namespace: String, name: String },
    UpdateSecret { namespace: String, name: String },
    DeleteSecret { namespace: String, name: String },
}

impl Call {
    fn write_target(&self) -> Option<&str> {
        match self {
            Call::CreateSecret { namespace, .. }
            | Call::UpdateSecret { namespace, .. }
            | Call::DeleteSecret { namespace, .. } => Some(namespace.as_str()),
            _ => None,
        }
    }
}

/// In-memory cluster. Watches are scripted: each `*_watch()` call queues one
/// stream, handed out in order to successive watch requests. Opening a watch
/// with nothing queued fails.
#[derive(Default)]
pub struct FakeGateway {
    namespaces: Mutex<Vec<String>>,
    secrets: Mutex<Vec<Secret>>,
    failing: HashSet<String>,
    namespace_list_fails: AtomicBool,
    namespace_watches: Mutex<VecDeque<mpsc::UnboundedReceiver<Result<ResourceEvent<Namespace>>>>>,
    secret_watches: Mutex<VecDeque<mpsc::UnboundedReceiver<Result<ResourceEvent<Secret>>>>>,
    calls: Mutex<Vec<Call>>,
    written: Mutex<Vec<Secret>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespaces(self, names: &[&str]) -> Self {
        *self.namespaces.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Secrets returned by `list_secrets`, whatever namespace is asked for
    pub fn with_secrets(self, secrets: Vec<Secret>) -> Self {
        *self.secrets.lock().unwrap() = secrets;
        self
    }

    /// Make every write into `namespace` fail
    pub fn failing_in(mut self, namespace: &str) -> Self {
        self.failing.insert(namespace.to_string());
        self
    }

    pub fn add_namespace(&self, name: &str) {
        self.namespaces.lock().unwrap().push(name.to_string());
    }

    pub fn remove_namespace(&self, name: &str) {
        self.namespaces.lock().unwrap().retain(|n| n != name);
    }

    pub fn set_namespace_list_fails(&self, fails: bool) {
        self.namespace_list_fails.store(fails, Ordering::SeqCst);
    }

    pub fn namespace_watch(&self) -> NamespaceEvents {
        let (tx, rx) = mpsc::unbounded();
        self.namespace_watches.lock().unwrap().push_back(rx);
        tx
    }

    pub fn secret_watch(&self) -> SecretEvents {
        let (tx, rx) = mpsc::unbounded();
        self.secret_watches.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    /// Namespaces targeted by create/update/delete calls, in call order
    pub fn write_targets(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.write_target().map(str::to_string))
            .collect()
    }

    /// Secrets passed to create/update calls
    pub fn written_secrets(&self) -> Vec<Secret> {
        self.written.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write(&self, call: Call, namespace: &str) -> Result<()> {
        self.record(call);
        if self.failing.contains(namespace) {
            return Err(api_error(500, &format!("injected failure in {}", namespace)));
        }
        Ok(())
    }
}

#[async_trait]
impl ClusterGateway for FakeGateway {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        self.record(Call::ListNamespaces);
        if self.namespace_list_fails.load(Ordering::SeqCst) {
            return Err(api_error(500, "namespace list unavailable"));
        }
        Ok(self
            .namespaces
            .lock()
            .unwrap()
            .iter()
            .map(|n| make_namespace(n))
            .collect())
    }

    async fn watch_namespaces(&self) -> Result<EventStream<Namespace>> {
        self.record(Call::WatchNamespaces);
        self.namespace_watches
            .lock()
            .unwrap()
            .pop_front()
            .map(|rx| rx.boxed())
            .ok_or_else(|| api_error(503, "no namespace watch scripted"))
    }

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        self.record(Call::ListSecrets {
            namespace: namespace.to_string(),
        });
        Ok(self.secrets.lock().unwrap().clone())
    }

    async fn watch_secrets(&self, namespace: &str) -> Result<EventStream<Secret>> {
        self.record(Call::WatchSecrets {
            namespace: namespace.to_string(),
        });
        self.secret_watches
            .lock()
            .unwrap()
            .pop_front()
            .map(|rx| rx.boxed())
            .ok_or_else(|| api_error(503, "no secret watch scripted"))
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        self.written.lock().unwrap().push(secret.clone());
        self.write(
            Call::CreateSecret {
                namespace: namespace.to_string(),
                name: secret.metadata.name.clone().unwrap_or_default(),
            },
            namespace,
        )
    }

    async fn update_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        self.written.lock().unwrap().push(secret.clone());
        self.write(
            Call::UpdateSecret {
                namespace: namespace.to_string(),
                name: secret.metadata.name.clone().unwrap_or_default(),
            },
            namespace,
        )
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<()> {
        self.write(
            Call::DeleteSecret {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            namespace,
        )
    }
}

/// Build an API error as the server would return it
pub fn api_error(code: u16, message: &str) -> ReplicatorError {
    ReplicatorError::KubeError(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: "InternalError".to_string(),
        code,
    }))
}

pub fn make_namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn make_secret(name: &str, namespace: &str, type_: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            "password".to_string(),
            ByteString("secret123".as_bytes().to_vec()),
        )])),
        type_: Some(type_.to_string()),
        ..Default::default()
    }
}

/// A mock HTTP service that returns predefined responses based on request paths.
/// Watch requests (`?watch=true`) are matched separately from plain GETs.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Serve a watch on `path`; `body` holds newline-separated watch events
    pub fn on_watch(self, path: &str, body: &str) -> Self {
        self.on("WATCH", path, 200, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let is_watch = req
            .uri()
            .query()
            .is_some_and(|q| q.split('&').any(|p| p == "watch=true"));
        let method = if is_watch {
            "WATCH".to_string()
        } else {
            req.method().to_string()
        };
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("resource", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": format!("uid-{}", name)
        }
    })
    .to_string()
}

pub fn namespace_list_json(names: &[&str]) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|n| serde_json::from_str(&namespace_json(n)).unwrap())
        .collect();
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NamespaceList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

pub fn secret_json(name: &str, namespace: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace
        },
        "type": "Opaque",
        "data": { "password": "c2VjcmV0MTIz" }
    })
    .to_string()
}

/// One line of a watch response
pub fn watch_event_json(event_type: &str, object_json: &str) -> String {
    let object: serde_json::Value = serde_json::from_str(object_json).unwrap();
    serde_json::json!({ "type": event_type, "object": object }).to_string()
}

pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
