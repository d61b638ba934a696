use axum::{Json, Router, routing::post};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Throw-away JSON-RPC endpoint answering each method with a canned reply.
///
/// A reply is the `result`/`error` part of the response; `jsonrpc` and `id`
/// are filled in from the request. Unknown methods get a `-32601` error.
pub struct MockRpcServer {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl MockRpcServer {
    pub async fn start(replies: HashMap<&'static str, Value>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let replies = Arc::new(replies);

        let mock_app = Router::new().route(
            "/",
            post({
                let requests = requests.clone();
                move |Json(request): Json<Value>| {
                    let requests = requests.clone();
                    let replies = replies.clone();
                    async move {
                        requests.lock().unwrap().push(request.clone());

                        let method = request["method"].as_str().unwrap_or_default();
                        let mut reply = replies.get(method).cloned().unwrap_or_else(|| {
                            json!({"error": {"code": -32601, "message": "Method not found"}})
                        });

                        reply["jsonrpc"] = json!("2.0");
                        reply["id"] = request["id"].clone();

                        Json(reply)
                    }
                }
            }),
        );

        Self::serve(mock_app, requests).await
    }

    /// Answers every call with `body` verbatim.
    pub async fn raw(body: &'static str) -> Self {
        let mock_app = Router::new().route("/", post(move || async move { body }));

        Self::serve(mock_app, Arc::new(Mutex::new(Vec::new()))).await
    }

    async fn serve(mock_app: Router, requests: Arc<Mutex<Vec<Value>>>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{addr}/");

        tokio::spawn(async move {
            axum::serve(listener, mock_app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Self { url, requests }
    }

    pub fn unreachable() -> String {
        "http://127.0.0.1:1/".to_string()
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}
