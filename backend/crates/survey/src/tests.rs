//! Unit and router tests for the survey crate

#[cfg(test)]
mod support {
    use crate::domain::entities::StoredSurveyRecord;
    use crate::domain::repository::SurveyLog;
    use crate::domain::services::{RequestContext, process_submission};
    use crate::domain::validation::validate_submission;
    use crate::error::{SurveyError, SurveyResult};
    use crate::infra::InMemorySurveyLog;
    use crate::SubmissionIdPolicy;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use platform::clock::{Clock, FixedClock};
    use std::sync::Arc;

    /// 2024-05-01 22:15 UTC, 07:15 on 2024-05-02 in local time (UTC+9)
    pub fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 22, 15, 0).unwrap()
    }

    pub fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            fixed_instant(),
            FixedOffset::east_opt(9 * 3600).unwrap(),
        ))
    }

    pub fn record(email: &str, age: i64) -> StoredSurveyRecord {
        let submission =
            validate_submission(&serde_json::json!({"email": email, "age": age})).unwrap();
        let context = RequestContext {
            received_at: fixed_instant(),
            received_at_local: fixed_instant().fixed_offset(),
            ip: "198.51.100.4".to_string(),
        };
        process_submission(submission, context, SubmissionIdPolicy::Legacy)
    }

    /// Lets a test keep a handle on the log it hands to the router
    pub struct SharedLog(pub Arc<InMemorySurveyLog>);

    impl SurveyLog for SharedLog {
        async fn append(&self, record: &StoredSurveyRecord) -> SurveyResult<()> {
            self.0.append(record).await
        }
    }

    /// Always fails like a full disk
    pub struct FailingLog;

    impl SurveyLog for FailingLog {
        async fn append(&self, _record: &StoredSurveyRecord) -> SurveyResult<()> {
            Err(SurveyError::Storage(std::io::Error::from(
                std::io::ErrorKind::StorageFull,
            )))
        }
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SurveyConfig::default();
        assert_eq!(config.log_path, PathBuf::from("data/survey.ndjson"));
        assert_eq!(config.submission_id_policy, SubmissionIdPolicy::Legacy);
    }

    #[test]
    fn test_from_lookup_without_overrides() {
        let config = SurveyConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SurveyConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = SurveyConfig::from_lookup(lookup(&[
            (ENV_LOG_PATH, "/var/lib/survey/log.ndjson"),
            (ENV_SUBMISSION_ID_POLICY, "trust-client"),
        ]))
        .unwrap();

        assert_eq!(config.log_path, PathBuf::from("/var/lib/survey/log.ndjson"));
        assert_eq!(config.submission_id_policy, SubmissionIdPolicy::TrustClient);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = SurveyConfig::from_lookup(lookup(&[
            (ENV_LOG_PATH, "  "),
            (ENV_SUBMISSION_ID_POLICY, ""),
        ]))
        .unwrap();
        assert_eq!(config, SurveyConfig::default());
    }

    #[test]
    fn test_unknown_policy_is_an_error() {
        let err =
            SurveyConfig::from_lookup(lookup(&[(ENV_SUBMISSION_ID_POLICY, "random")])).unwrap_err();
        assert_eq!(err, UnknownPolicy("random".to_string()));
        assert!(err.to_string().contains("random"));
    }

    #[test]
    fn test_with_policy() {
        let config = SurveyConfig::default().with_policy(SubmissionIdPolicy::AlwaysDerive);
        assert_eq!(config.submission_id_policy, SubmissionIdPolicy::AlwaysDerive);
        assert_eq!(config.log_path, SurveyConfig::default().log_path);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::domain::validation::{Violation, ViolationKind};
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(SurveyError, StatusCode)> = vec![
            (SurveyError::InvalidJson, StatusCode::BAD_REQUEST),
            (
                SurveyError::Validation(vec![
                    Violation::new(ViolationKind::Missing, "Field required").at("email"),
                ]),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SurveyError::Storage(std::io::Error::from(std::io::ErrorKind::PermissionDenied)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SurveyError::InvalidJson.code(), "invalid_json");
        assert_eq!(SurveyError::Validation(vec![]).code(), "validation_error");
    }

    #[test]
    fn test_error_display() {
        assert!(SurveyError::InvalidJson.to_string().contains("JSON"));
        let err = SurveyError::Validation(vec![
            Violation::new(ViolationKind::Missing, "Field required").at("email"),
            Violation::new(ViolationKind::Missing, "Field required").at("age"),
        ]);
        assert_eq!(err.to_string(), "Validation failed for 2 field(s)");
    }
}

#[cfg(test)]
mod jsonl_tests {
    use super::support::record;
    use crate::domain::repository::SurveyLog;
    use crate::infra::JsonlSurveyLog;
    use platform::crypto::is_sha256_hex;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("survey.ndjson");

        let log = JsonlSurveyLog::open(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(log.path(), path.as_path());
        assert!(log.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.ndjson");
        let log = JsonlSurveyLog::open(&path).await.unwrap();

        let first = record("first@example.com", 21);
        let second = record("second@example.com", 65);
        log.append(&first).await.unwrap();
        log.append(&second).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(raw.ends_with('\n'));
        assert!(!raw.contains("first@example.com"));
        assert!(lines[0].starts_with(r#"{"email":""#));

        let line: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        let keys: Vec<&str> = line.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["email", "age", "submission_id", "received_at", "ip"] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(keys.len(), 5);
        assert!(is_sha256_hex(line["email"].as_str().unwrap()));
        assert_eq!(line["received_at"], "2024-05-01T22:15:00Z");

        assert_eq!(log.read_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_reopen_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.ndjson");

        {
            let log = JsonlSurveyLog::open(&path).await.unwrap();
            log.append(&record("a@example.com", 30)).await.unwrap();
        }
        let log = JsonlSurveyLog::open(&path).await.unwrap();
        log.append(&record("b@example.com", 31)).await.unwrap();

        assert_eq!(log.read_all().await.unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_keep_lines_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.ndjson");
        let log = Arc::new(JsonlSurveyLog::open(&path).await.unwrap());

        let mut tasks = Vec::new();
        for i in 0..50 {
            let log = Arc::clone(&log);
            tasks.push(tokio::spawn(async move {
                log.append(&record(&format!("user{i}@example.com"), 20 + i))
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let records = log.read_all().await.unwrap();
        assert_eq!(records.len(), 50);
        assert!(records.iter().all(|r| is_sha256_hex(r.email())));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::{FailingLog, SharedLog, fixed_clock};
    use crate::application::config::{SubmissionIdPolicy, SurveyConfig};
    use crate::error::INVALID_JSON_DETAIL;
    use crate::infra::{InMemorySurveyLog, JsonlSurveyLog};
    use crate::presentation::router::{survey_router, survey_router_generic};
    use axum::{
        Router,
        body::{Body, to_bytes},
        extract::ConnectInfo,
        http::{Method, Request, StatusCode, header},
    };
    use chrono::DateTime;
    use platform::clock::SystemClock;
    use platform::crypto::{is_sha256_hex, sha256_hex};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        app: Router,
        log: Arc<InMemorySurveyLog>,
    }

    fn build_app(policy: SubmissionIdPolicy) -> TestApp {
        let log = Arc::new(InMemorySurveyLog::new());
        let app = survey_router_generic(
            SharedLog(Arc::clone(&log)),
            fixed_clock(),
            SurveyConfig::default().with_policy(policy),
        );
        TestApp { app, log }
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40123)))
    }

    fn post_survey(content_type: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/v1/survey")
            .header(header::CONTENT_TYPE, content_type)
            .extension(peer())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_json(body: Value) -> Request<Body> {
        post_survey("application/json", &body.to_string())
    }

    fn get_ping() -> Request<Body> {
        Request::builder()
            .uri("/ping")
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_ping_reports_clock_time() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        let (status, body) = send(&test.app, get_ping()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "API is alive");
        assert_eq!(body["utc_time"], "2024-05-01T22:15:00.000000+00:00");
    }

    #[tokio::test]
    async fn test_ping_timestamps_do_not_go_backwards() {
        let app = survey_router_generic(
            InMemorySurveyLog::new(),
            Arc::new(SystemClock),
            SurveyConfig::default(),
        );

        let mut previous = None;
        for _ in 0..3 {
            let (status, body) = send(&app, get_ping()).await;
            assert_eq!(status, StatusCode::OK);
            let stamp = DateTime::parse_from_rfc3339(body["utc_time"].as_str().unwrap()).unwrap();
            assert_eq!(stamp.offset().local_minus_utc(), 0);
            if let Some(previous) = previous {
                assert!(stamp >= previous);
            }
            previous = Some(stamp);
        }
    }

    #[tokio::test]
    async fn test_submit_records_redacted_fields() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        let (status, body) =
            send(&test.app, post_json(json!({"email": "A@Test.com ", "age": 30}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"status": "ok"}));

        let records = test.log.records().await;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_ne!(record.email(), "a@test.com");
        assert_eq!(record.email(), sha256_hex("a@test.com"));
        assert_eq!(record.age(), sha256_hex("30"));
        assert!(is_sha256_hex(record.submission_id()));
        assert_eq!(record.ip(), "127.0.0.1");
        assert_eq!(record.received_at(), super::support::fixed_instant());
    }

    #[tokio::test]
    async fn test_legacy_id_uses_local_hour() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        let (status, _) = send(
            &test.app,
            post_json(json!({"email": "a@test.com", "age": 30, "submission_id": "mine"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let expected = sha256_hex(&format!("{}2024050207", sha256_hex("a@test.com")));
        assert_eq!(test.log.records().await[0].submission_id(), expected);
    }

    #[tokio::test]
    async fn test_same_email_same_hour_same_id() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        send(&test.app, post_json(json!({"email": "a@test.com", "age": 30}))).await;
        send(&test.app, post_json(json!({"email": " A@TEST.COM", "age": 44}))).await;

        let records = test.log.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].submission_id(), records[1].submission_id());
    }

    #[tokio::test]
    async fn test_trust_client_policy_keeps_client_id() {
        let test = build_app(SubmissionIdPolicy::TrustClient);

        send(
            &test.app,
            post_json(json!({"email": "a@test.com", "age": 30, "submission_id": "client-42"})),
        )
        .await;
        send(&test.app, post_json(json!({"email": "a@test.com", "age": 30}))).await;

        let records = test.log.records().await;
        assert_eq!(records[0].submission_id(), "client-42");
        assert_eq!(records[1].submission_id(), sha256_hex("a@test.com2024050122"));
    }

    #[tokio::test]
    async fn test_forwarded_for_is_recorded_verbatim() {
        let test = build_app(SubmissionIdPolicy::Legacy);
        let mut request = post_json(json!({"email": "a@test.com", "age": 30}));
        request
            .headers_mut()
            .insert("x-forwarded-for", "203.0.113.9, 10.0.0.2".parse().unwrap());

        send(&test.app, request).await;

        assert_eq!(test.log.records().await[0].ip(), "203.0.113.9, 10.0.0.2");
    }

    #[tokio::test]
    async fn test_unknown_peer_records_empty_ip() {
        let test = build_app(SubmissionIdPolicy::Legacy);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/survey")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@test.com","age":30}"#))
            .unwrap();

        let (status, _) = send(&test.app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(test.log.records().await[0].ip(), "");
    }

    #[tokio::test]
    async fn test_empty_object_is_422_naming_both_fields() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        let (status, body) = send(&test.app, post_json(json!({}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(
            body["detail"],
            json!([
                {"field": "email", "message": "Field required", "type": "missing"},
                {"field": "age", "message": "Field required", "type": "missing"}
            ])
        );
        assert!(test.log.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_age_is_never_201() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        let (status, body) = send(&test.app, post_json(json!({"email": "a@test.com"}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "age");
        assert!(test.log.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_is_400() {
        let test = build_app(SubmissionIdPolicy::Legacy);
        let expected = json!({"error": "invalid_json", "detail": INVALID_JSON_DETAIL});

        let cases = [
            post_survey("text/plain", "\"not json\""),
            post_survey("application/json", "not json"),
            post_survey("application/json", ""),
            post_survey("application/json", "null"),
        ];
        for request in cases {
            let (status, body) = send(&test.app, request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, expected);
        }
        assert!(test.log.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_json_non_object_is_422() {
        let test = build_app(SubmissionIdPolicy::Legacy);

        let (status, body) = send(&test.app, post_json(json!("not json"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "body");
        assert_eq!(body["detail"][0]["type"], "model_type");
    }

    #[tokio::test]
    async fn test_storage_failure_is_500_and_reports_nothing_internal() {
        let app = survey_router_generic(FailingLog, fixed_clock(), SurveyConfig::default());

        let (status, body) = send(&app, post_json(json!({"email": "a@test.com", "age": 30}))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert!(!body.to_string().contains("a@test.com"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_on_v1() {
        let test = build_app(SubmissionIdPolicy::Legacy);
        let mut request = post_json(json!({"email": "a@test.com", "age": 30}));
        request
            .headers_mut()
            .insert(header::ORIGIN, "http://localhost:8080".parse().unwrap());

        let response = test.app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_preflight_on_v1() {
        let test = build_app(SubmissionIdPolicy::Legacy);
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/v1/survey")
            .header(header::ORIGIN, "null")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = test.app.clone().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert!(test.log.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_ping_is_outside_cors_scope() {
        let test = build_app(SubmissionIdPolicy::Legacy);
        let request = Request::builder()
            .uri("/ping")
            .header(header::ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();

        let response = test.app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_file_backed_router_appends_a_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("survey.ndjson");
        let log = JsonlSurveyLog::open(&path).await.unwrap();
        let app = survey_router(
            log,
            SurveyConfig {
                log_path: path.clone(),
                ..SurveyConfig::default()
            },
        );

        let (status, _) = send(&app, post_json(json!({"email": "a@test.com", "age": 30}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 1);
        assert!(!raw.contains("a@test.com"));
        assert!(raw.contains(&sha256_hex("30")));
    }
}
