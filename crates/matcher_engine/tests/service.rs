use std::time::Duration;

use matcher_core::{FileHandle, MatchResult};
use matcher_engine::{FailureKind, ReqwestService, ResumeService, ServiceSettings, UploadReply};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestService {
    ReqwestService::new(ServiceSettings::with_base_address(server.uri())).expect("service")
}

fn resume(name: &str) -> FileHandle {
    FileHandle::new(name, format!("%PDF-1.4 {name}").into_bytes())
}

#[tokio::test]
async fn single_upload_posts_one_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resume/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains(r#"name="file"; filename="alice.pdf""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uploaded": "alice" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .upload_single(&resume("alice.pdf"))
        .await
        .expect("upload ok");

    assert_eq!(reply, UploadReply { message: None });
    server.verify().await;
}

#[tokio::test]
async fn batch_upload_repeats_files_field_per_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumes/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "3 resumes uploaded" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let files = vec![resume("a.pdf"), resume("b.pdf"), resume("c.pdf")];
    let reply = service_for(&server)
        .upload_batch(&files)
        .await
        .expect("upload ok");
    assert_eq!(reply.message.as_deref(), Some("3 resumes uploaded"));

    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert_eq!(body.matches(r#"name="files""#).count(), 3);
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        assert!(body.contains(&format!(r#"filename="{name}""#)), "{name} missing");
    }
}

#[tokio::test]
async fn match_posts_json_and_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/match"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "rust engineer", "top_k": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [
                { "resume_id": "r2", "score": 0.4 },
                { "resume_id": "r1", "score": 0.9 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let matches = service_for(&server)
        .match_job_description("rust engineer", 5)
        .await
        .expect("match ok");

    assert_eq!(
        matches,
        vec![
            MatchResult {
                resume_id: "r2".to_string(),
                raw_score: 0.4,
            },
            MatchResult {
                resume_id: "r1".to_string(),
                raw_score: 0.9,
            },
        ]
    );
}

#[tokio::test]
async fn absent_match_list_decodes_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/match"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": "bad input" })))
        .mount(&server)
        .await;

    let matches = service_for(&server)
        .match_job_description("anything", 5)
        .await
        .expect("json body is accepted regardless of status");
    assert!(matches.is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resume/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .upload_single(&resume("a.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(err.message.contains("500"));
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let service = ReqwestService::new(ServiceSettings::with_base_address(uri)).expect("service");
    let err = service
        .match_job_description("rust", 5)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn configured_timeout_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/match"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "matches": [] })),
        )
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ServiceSettings::with_base_address(server.uri())
    };
    let service = ReqwestService::new(settings).expect("service");
    let err = service.match_job_description("rust", 5).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn base_address_is_validated_and_trimmed() {
    let service =
        ReqwestService::new(ServiceSettings::with_base_address("http://localhost:8000/api/"))
            .expect("service");
    assert_eq!(service.base_address(), "http://localhost:8000/api");

    for bad in ["not a url", "ftp://example.com"] {
        let err = ReqwestService::new(ServiceSettings::with_base_address(bad)).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidAddress);
    }
}
