//! Local stand-in for the MoneyLover web and oauth hosts
//!
//! Serves both hosts from one `tiny_http` server on an ephemeral port and
//! records every request it receives.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

pub const EMAIL: &str = "someone@example.com";
pub const PASSWORD: &str = "hunter2";
pub const CLIENT_ID: &str = "abc123";
pub const REQUEST_TOKEN: &str = "req-tok";
pub const LOGIN_REFRESH_TOKEN: &str = "ref-1";
pub const ROTATED_REFRESH_TOKEN: &str = "ref-2";
pub const ACCESS_TOKEN: &str = "jwt-fresh";

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn form(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(&self.body).unwrap()
    }
}

/// Fake MoneyLover service running on a background thread
pub struct FakeMoneyLover {
    server: Arc<Server>,
    url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeMoneyLover {
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("failed to bind fake server"));
        let addr = server.server_addr().to_ip().expect("fake server has no IP address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = Arc::clone(&server);
        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for mut request in worker.incoming_requests() {
                let recorded = record(&mut request);
                let (status, body) = route(request.method(), &recorded);
                log.lock().unwrap().push(recorded);
                let _ = request.respond(json_response(status, body));
            }
        });

        Self {
            server,
            url: format!("http://{}", addr),
            requests,
        }
    }

    /// Base URL serving both hosts
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    pub fn last(&self, path: &str) -> Recorded {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.path == path)
            .unwrap_or_else(|| panic!("no request to {}", path))
    }

    /// `config.json` contents pointing both hosts here
    pub fn settings_json(&self) -> String {
        json!({"web_url": self.url, "oauth_url": self.url, "timeout_secs": 5}).to_string()
    }
}

impl Drop for FakeMoneyLover {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

fn record(request: &mut Request) -> Recorded {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    Recorded {
        path: request.url().to_string(),
        headers: request
            .headers()
            .iter()
            .map(|h| (h.field.to_string(), h.value.to_string()))
            .collect(),
        body,
    }
}

fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(body.into_bytes())
        .with_header(Header::from_bytes("Content-Type", "application/json").unwrap())
        .with_status_code(StatusCode(status))
}

fn expired() -> Value {
    json!({"e": "717", "message": "token_device_not_found"})
}

fn route(method: &Method, req: &Recorded) -> (u16, String) {
    if method != &Method::Post {
        return (405, "method not allowed".into());
    }

    let body = match req.path.as_str() {
        "/api/user/login-url" => json!({
            "error": 0,
            "msg": "",
            "data": {
                "request_token": REQUEST_TOKEN,
                "login_url": format!("https://web.moneylover.me/login?client={}&lang=en", CLIENT_ID)
            }
        }),

        "/token" => {
            let credentials: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            let bearer = format!("Bearer {}", REQUEST_TOKEN);
            let trusted = req.header("Authorization") == Some(bearer.as_str())
                && req.header("Client") == Some(CLIENT_ID);
            if !trusted {
                json!({"status": false, "code": "401", "message": "bad_request_token"})
            } else if credentials["email"] == EMAIL && credentials["password"] == PASSWORD {
                json!({
                    "status": true,
                    "access_token": "jwt-login",
                    "refresh_token": LOGIN_REFRESH_TOKEN
                })
            } else {
                json!({"status": false, "code": 205, "message": "wrong_password"})
            }
        }

        "/refresh-token" => {
            let valid = [LOGIN_REFRESH_TOKEN, ROTATED_REFRESH_TOKEN]
                .iter()
                .any(|t| req.header("Authorization") == Some(format!("Bearer {}", t).as_str()));
            if valid && req.header("Client") == Some(CLIENT_ID) {
                json!({
                    "status": true,
                    "access_token": ACCESS_TOKEN,
                    "refresh_token": ROTATED_REFRESH_TOKEN
                })
            } else {
                json!({"status": false, "code": "717", "message": "token_device_not_found"})
            }
        }

        path if path.starts_with("/api/") => {
            let authorized = req
                .header("Authorization")
                .is_some_and(|v| v.starts_with("AuthJWT jwt-"));
            if !authorized {
                expired()
            } else {
                domain(path, req)
            }
        }

        _ => return (404, "not found".into()),
    };

    (200, body.to_string())
}

fn form_value(req: &Recorded, key: &str) -> Option<String> {
    req.form().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn domain(path: &str, req: &Recorded) -> Value {
    match path {
        "/api/user/info" => json!({
            "error": 0,
            "data": {
                "_id": "u1",
                "email": EMAIL,
                "deviceId": "dev-1",
                "icon_package": ["default"],
                "purchased": false,
                "client_setting": {"l": "en"}
            }
        }),

        "/api/wallet/list" => json!({
            "error": 0,
            "msg": "",
            "data": [
                {"_id": "w1", "name": "Cash", "currency_id": 7,
                 "listUser": [{"_id": "u1", "name": "Someone"}],
                 "balance": [{"THB": "1250.5"}]},
                {"_id": "w2", "name": "Travel", "currency_id": 1, "archived": true,
                 "balance": [{"USD": "-20"}, {"JPY": "3000"}]}
            ]
        }),

        "/api/category/list" => match form_value(req, "walletId").as_deref() {
            Some("w1") => json!({
                "error": 0,
                "data": [
                    {"_id": "c1", "name": "Food & Beverage", "type": 2, "account": "w1"},
                    {"_id": "c2", "name": "Salary", "type": 1, "account": "w1"},
                    {"_id": "c3", "name": "Cafe", "type": 2, "parent": {"_id": "c1"},
                     "account": "w1"}
                ]
            }),
            _ => json!({"error": 1, "msg": "wallet_not_found"}),
        },

        "/api/transaction/list" => json!({
            "error": 0,
            "data": {
                "transactions": [
                    {"_id": "t1", "note": "Lunch", "amount": 120.5,
                     "displayDate": "2024-03-05T00:00:00.000Z",
                     "account": {"_id": "w1", "name": "Cash", "currency_id": 7},
                     "category": {"_id": "c1", "name": "Food & Beverage", "type": 2}},
                    {"_id": "t2", "note": "", "amount": 30000,
                     "displayDate": "2024-03-01T00:00:00.000Z",
                     "account": {"_id": "w1", "name": "Cash", "currency_id": 7},
                     "category": {"_id": "c2", "name": "Salary", "type": 1},
                     "address": "{\"name\":\"Office\"}"}
                ]
            }
        }),

        "/api/transaction/add" => match form_value(req, "transInfo") {
            Some(info) => {
                let mut created: Value = serde_json::from_str(&info).unwrap_or(Value::Null);
                created["_id"] = json!("t-new");
                json!({"error": 0, "data": created})
            }
            None => json!({"error": 2, "msg": "missing_trans_info"}),
        },

        _ => json!({"error": 404, "msg": "unknown_endpoint"}),
    }
}
