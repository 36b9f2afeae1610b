/*!
 * Mock split delegates for testing the delegation tier
 */

use std::sync::Mutex;

use subalign::alignment::matcher::{DelegationRequest, SplitDelegate};
use subalign::ProviderError;

/// Delegate that answers with a fixed response and records every request
pub struct RecordingDelegate {
    response: Result<String, ProviderError>,
    requests: Mutex<Vec<DelegationRequest>>,
}

impl RecordingDelegate {
    /// Delegate that succeeds with `response`
    pub fn answering(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delegate that fails with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<DelegationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl SplitDelegate for RecordingDelegate {
    fn split(&self, request: &DelegationRequest) -> Result<String, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.response.clone()
    }
}

/// Delegate that labels each of the given segments as `Sentence k:`
pub fn labelled_response(segments: &[&str]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, s)| format!("Sentence {}: {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}
