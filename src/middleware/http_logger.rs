use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;

const REDACTED: &str = "[REDACTED]";

/// JSON keys whose values never reach the logs. Student credentials are
/// included since they double as lookup secrets.
const SENSITIVE_FIELDS: [&str; 9] = [
    "password",
    "password_hash",
    "token",
    "access_token",
    "authorization",
    "secret",
    "jwt_secret",
    "id_card_number",
    "phone_number",
];

const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "set-cookie", "x-auth-token"];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/") || path.starts_with("/swagger-ui")
}

fn filter_sensitive_data(mut value: Value) -> Value {
    match &mut value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SENSITIVE_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    *field = filter_sensitive_data(field.take());
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                *item = filter_sensitive_data(item.take());
            }
        }
        _ => {}
    }
    value
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();

    for header_name in SENSITIVE_HEADERS {
        if let Ok(name) = header_name.parse::<http::HeaderName>() {
            if filtered_headers.contains_key(&name) {
                filtered_headers.insert(name, HeaderValue::from_static(REDACTED));
            }
        }
    }

    filtered_headers
}

fn json_for_log(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(json) => filter_sensitive_data(json),
        Err(_) => Value::Object(serde_json::Map::new()),
    }
}

pub async fn http_logger(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if should_ignore_path(path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Uploaded result files are neither buffered twice nor logged
    let is_file_upload = req_headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let (req, req_body) = if is_file_upload {
        (req, Value::Object(serde_json::Map::new()))
    } else {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let req_body = json_for_log(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), req_body)
    };

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();

    let status = response.status();
    let res_headers = response.headers().clone();

    let should_log_body =
        method == Method::POST || method == Method::PUT || method == Method::PATCH;
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let json_body = json_for_log(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        json_body
    } else {
        Value::Object(serde_json::Map::new())
    };

    let filtered_req_headers = filter_sensitive_headers(&req_headers);
    let filtered_res_headers = filter_sensitive_headers(&res_headers);

    tracing::info!(
        method = ?method,
        uri = ?uri,
        path = %path,
        x_request_id = %x_request_id,
        version = ?version,
        req_headers = ?filtered_req_headers,
        req_body = %req_body,
        status = ?status,
        latency_ms = latency.as_millis(),
        res_headers = ?filtered_res_headers,
        res_body = %res_body,
        app_env = %APP_CONFIG.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_are_redacted_at_any_depth() {
        let body = json!({
            "roll_number": "2023001",
            "id_card_number": "ID001",
            "student": { "phone_number": "9876543210", "name": "Asha" },
            "users": [{ "password": "admin123" }]
        });

        let filtered = filter_sensitive_data(body);
        assert_eq!(filtered["roll_number"], "2023001");
        assert_eq!(filtered["id_card_number"], REDACTED);
        assert_eq!(filtered["student"]["phone_number"], REDACTED);
        assert_eq!(filtered["student"]["name"], "Asha");
        assert_eq!(filtered["users"][0]["password"], REDACTED);
    }

    #[test]
    fn test_authorization_header_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let filtered = filter_sensitive_headers(&headers);
        assert_eq!(filtered[header::AUTHORIZATION], REDACTED);
        assert_eq!(filtered[header::ACCEPT], "application/json");
    }
}
