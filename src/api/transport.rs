//! HTTP transport
//!
//! Every call the client makes is a POST whose response is JSON. The
//! transport serializes the body (JSON or form), attaches the fixed
//! User-Agent plus caller headers, and decodes the reply into whatever shape
//! the caller asks for.
//!
//! The actual HTTP exchange sits behind [`HttpSender`], implemented for the
//! blocking `reqwest` client by [`ReqwestSender`].

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{MoneyLoverError, MoneyLoverResult};

/// User-Agent sent with every request
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.14; rv:66.0) Gecko/20100101 Firefox/66.0";

/// Content type of JSON bodies
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Content type of form bodies
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An outgoing POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Target URL
    pub url: String,
    /// Headers in the order they are sent
    pub headers: Vec<(String, String)>,
    /// Encoded body
    pub body: String,
}

impl HttpRequest {
    /// Look up a header by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decode a form-encoded body into its fields
    pub fn form_fields(&self) -> MoneyLoverResult<Vec<(String, String)>> {
        serde_urlencoded::from_str(&self.body)
            .map_err(|e| MoneyLoverError::Validation(format!("Body is not form-encoded: {}", e)))
    }
}

/// A received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// A 200 response with the given body and no headers
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP POST exchange
pub trait HttpSender {
    /// Send the request and return the raw response
    ///
    /// Fails with [`MoneyLoverError::Transport`] when no response arrives.
    fn post(&self, request: &HttpRequest) -> MoneyLoverResult<HttpResponse>;
}

/// [`HttpSender`] backed by a blocking `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::blocking::Client,
}

impl ReqwestSender {
    /// Create a sender whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> MoneyLoverResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MoneyLoverError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpSender for ReqwestSender {
    fn post(&self, request: &HttpRequest) -> MoneyLoverResult<HttpResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let transport_error = |e: reqwest::Error| MoneyLoverError::Transport {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let response = builder
            .body(request.body.clone())
            .send()
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();
        let body = response.text().map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Dump full requests and responses to the debug sink
    pub debug_payload: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            debug_payload: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Sends requests and decodes JSON responses
pub struct Transport {
    sender: Box<dyn HttpSender + Send + Sync>,
    debug_payload: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Transport {
    /// Create a transport backed by `reqwest`
    pub fn new(config: &TransportConfig) -> MoneyLoverResult<Self> {
        let sender = ReqwestSender::new(config.timeout)?;
        Ok(Self::with_sender(sender, config))
    }

    /// Create a transport with a custom sender
    pub fn with_sender(
        sender: impl HttpSender + Send + Sync + 'static,
        config: &TransportConfig,
    ) -> Self {
        Self {
            sender: Box::new(sender),
            debug_payload: config.debug_payload,
            sink: Mutex::new(Box::new(io::stderr())),
        }
    }

    /// Write payload dumps somewhere other than stderr
    pub fn with_debug_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Mutex::new(Box::new(sink));
        self
    }

    /// Check whether payload dumping is on
    pub fn debug_payload(&self) -> bool {
        self.debug_payload
    }

    /// POST `data` as JSON and decode the response
    pub fn post_json<B, T>(
        &self,
        url: &str,
        data: &B,
        headers: &[(&str, &str)],
    ) -> MoneyLoverResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(data)?;
        self.send(url, body, headers, CONTENT_TYPE_JSON)
    }

    /// POST `fields` form-encoded and decode the response
    pub fn post_form<T>(
        &self,
        url: &str,
        fields: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> MoneyLoverResult<T>
    where
        T: DeserializeOwned,
    {
        let body = serde_urlencoded::to_string(fields)
            .map_err(|e| MoneyLoverError::Validation(format!("Failed to encode form: {}", e)))?;
        self.send(url, body, headers, CONTENT_TYPE_FORM)
    }

    /// POST an encoded body and decode the JSON response into `T`
    pub fn send<T>(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
        content_type: &str,
    ) -> MoneyLoverResult<T>
    where
        T: DeserializeOwned,
    {
        let mut all_headers = vec![
            ("Content-Type".to_string(), content_type.to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        all_headers.extend(headers.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let request = HttpRequest {
            url: url.to_string(),
            headers: all_headers,
            body,
        };

        debug!("POST {} ({} bytes)", url, request.body.len());
        if self.debug_payload {
            self.dump(&DumpRequest(&request));
        }

        let response = self.sender.post(&request)?;

        debug!("{} responded with {}", url, response.status);
        if self.debug_payload {
            self.dump(&DumpResponse(&response));
        }

        match serde_json::from_str(&response.body) {
            Ok(decoded) => Ok(decoded),
            Err(e) if !response.is_success() => Err(MoneyLoverError::Transport {
                url: url.to_string(),
                message: format!("HTTP {}: {}", response.status, e),
            }),
            Err(e) => Err(MoneyLoverError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn dump(&self, payload: &dyn fmt::Display) {
        if let Ok(mut sink) = self.sink.lock() {
            // Payload dumps are best-effort
            let _ = writeln!(sink, "{}", payload);
            let _ = sink.flush();
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("debug_payload", &self.debug_payload)
            .finish_non_exhaustive()
    }
}

struct DumpRequest<'a>(&'a HttpRequest);

impl fmt::Display for DumpRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "POST {} HTTP/1.1", self.0.url)?;
        for (name, value) in &self.0.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.0.body)
    }
}

struct DumpResponse<'a>(&'a HttpResponse);

impl fmt::Display for DumpResponse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HTTP/1.1 {}", self.0.status)?;
        for (name, value) in &self.0.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.0.body)
    }
}
