//! HTTP API client with background task.

use fitquest_core::{PlanRequest, WeeklyPlan};
use reqwest::Client;
use tokio::sync::mpsc;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Requests to the background task.
#[derive(Debug)]
pub enum Request {
    LoadPlan(PlanRequest),
}

/// Responses from the background task.
#[derive(Debug)]
pub enum Response {
    Plan(Result<WeeklyPlan, String>),
}

pub struct ApiClient {
    pub tx: mpsc::Sender<Request>,
    pub rx: mpsc::Receiver<Response>,
}

impl ApiClient {
    pub fn new() -> color_eyre::Result<Self> {
        let base_url = std::env::var("FITQUEST_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let client = Client::builder().build()?;

        let (req_tx, req_rx) = mpsc::channel(16);
        let (resp_tx, resp_rx) = mpsc::channel(16);

        tokio::spawn(run_worker(client, base_url, req_rx, resp_tx));

        Ok(Self {
            tx: req_tx,
            rx: resp_rx,
        })
    }

    pub fn send(&self, req: Request) {
        let _ = self.tx.try_send(req);
    }
}

async fn run_worker(
    client: Client,
    base_url: String,
    mut rx: mpsc::Receiver<Request>,
    tx: mpsc::Sender<Response>,
) {
    while let Some(req) = rx.recv().await {
        let resp = handle_request(&client, &base_url, req).await;
        if tx.send(resp).await.is_err() {
            break;
        }
    }
}

async fn handle_request(client: &Client, base_url: &str, req: Request) -> Response {
    match req {
        Request::LoadPlan(request) => {
            let result = client
                .post(format!("{base_url}/api/plans/weekly"))
                .json(&request)
                .send()
                .await
                .and_then(|r| r.error_for_status());

            match result {
                Ok(r) => Response::Plan(r.json().await.map_err(|e| e.to_string())),
                Err(e) => Response::Plan(Err(e.to_string())),
            }
        }
    }
}
