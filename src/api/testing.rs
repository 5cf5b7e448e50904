//! Scripted HTTP sender for unit tests

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, HttpSender, Transport, TransportConfig};
use crate::error::{MoneyLoverError, MoneyLoverResult};

#[derive(Default)]
struct Script {
    responses: VecDeque<MoneyLoverResult<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

/// Replays queued responses in order and records every request
#[derive(Clone, Default)]
pub struct FakeSender {
    script: Arc<Mutex<Script>>,
}

impl FakeSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, body: Value) {
        self.respond(200, &body.to_string());
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script.lock().unwrap().responses.push_back(Ok(HttpResponse {
            status,
            headers: vec![("content-type".into(), "application/json".into())],
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Err(MoneyLoverError::Transport {
                url: String::new(),
                message: message.to_string(),
            }));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    /// Transport with default settings backed by this fake
    pub fn transport(&self) -> Transport {
        Transport::with_sender(self.clone(), &TransportConfig::default())
    }
}

impl HttpSender for FakeSender {
    fn post(&self, request: &HttpRequest) -> MoneyLoverResult<HttpResponse> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(request.clone());
        match script.responses.pop_front() {
            Some(Err(MoneyLoverError::Transport { message, .. })) => {
                Err(MoneyLoverError::Transport {
                    url: request.url.clone(),
                    message,
                })
            }
            Some(other) => other,
            None => panic!("unexpected request to {}", request.url),
        }
    }
}

/// In-memory sink for payload dumps
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
