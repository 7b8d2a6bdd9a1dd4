use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::api::client::{ApiRequest, ApiResponse, Transport};
use crate::error::ServiceResult;

/// In-memory transport: records every request and replays canned responses
/// in order. Once the queue is drained it answers `200` with an empty body.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub(crate) fn with_responses(responses: Vec<ApiResponse>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        })
    }

    pub(crate) fn with_json(bodies: Vec<Value>) -> Arc<Self> {
        Self::with_responses(
            bodies
                .into_iter()
                .map(|body| ApiResponse {
                    status: 200,
                    body: body.to_string(),
                })
                .collect(),
        )
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &ApiRequest) -> ServiceResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or(ApiResponse {
            status: 200,
            body: String::new(),
        }))
    }
}
