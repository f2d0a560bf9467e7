use crate::api::ChatClient;
use crate::app::App;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Drives one request to resolution: POST to the backend, append the reply
/// (or its user-facing error text), typing indicator off. The matching
/// `App::submit` already switched the indicator on. The lock is only held
/// around state updates, never across the network await, so the UI keeps
/// animating while the request runs.
pub async fn deliver_reply(app: Arc<Mutex<App>>, client: ChatClient, text: String) {
    {
        let mut guard = app.lock().await;
        guard.logs.add(format!("Sending request: \"{}\"", snippet(&text)));
    }

    let result = client.request_reply(&text).await;

    {
        let mut guard = app.lock().await;
        guard.finish_request();
        guard.apply_reply(result);
    }
}

fn snippet(text: &str) -> String {
    const MAX: usize = 80;
    if text.chars().count() > MAX {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
