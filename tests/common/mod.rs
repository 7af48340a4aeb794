#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use dienstplan::config::Config;
use http_body_util::BodyExt;
use std::path::PathBuf;
use tower::ServiceExt;

/// Drives the full router while carrying the session cookie between requests.
pub struct TestClient {
    pub app: Router,
    pub data_dir: PathBuf,
    cookie: Option<String>,
}

impl TestClient {
    pub async fn spawn() -> Self {
        let data_dir = std::env::temp_dir().join(format!("dienstplan-test-{}", uuid::Uuid::new_v4()));

        let mut config = Config::default();
        config.general.data_dir = data_dir.to_string_lossy().into_owned();

        let state = dienstplan::api::create_app_state_from_config(config, None)
            .await
            .expect("Failed to create app state");

        Self {
            app: dienstplan::api::router(state),
            data_dir,
            cookie: None,
        }
    }

    pub async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn json(&mut self, method: &str, uri: &str, body: serde_json::Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn web_login(&mut self, username: &str, password: &str) -> Response {
        self.post_form("/login", &format!("username={username}&password={password}"))
            .await
    }

    pub async fn api_login(&mut self, username: &str, password: &str) -> Response {
        self.json(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }

    pub fn document(&self, file: &str) -> serde_json::Value {
        serde_json::from_slice(&self.document_bytes(file)).unwrap()
    }

    pub fn document_bytes(&self, file: &str) -> Vec<u8> {
        std::fs::read(self.data_dir.join(file)).unwrap()
    }
}

impl Drop for TestClient {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn notice_messages(page: &serde_json::Value) -> Vec<String> {
    page["notices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap().to_string())
        .collect()
}

pub fn ids(collection: &serde_json::Value) -> Vec<u64> {
    collection
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}
