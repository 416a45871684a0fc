//! Integration tests for the HTTP generation client
//!
//! These tests verify:
//! - The multipart form posted to the decoration service
//! - Successful JSON replies decoded into results
//! - Error replies surfaced with the service's message or the status line
//!
//! Each test runs a local server that answers exactly one request.

use roomdecor::models::{ColorPreference, DecorationRequest, DesignStyle, ImageData, RoomType};
use roomdecor::services::{GenerationClient, GenerationError, HttpGenerationClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const SUCCESS_BODY: &str = r#"{
    "success": true,
    "originalImageAnalysis": "Analyzed Bedroom",
    "options": [
        {
            "id": "option-1",
            "designStyle": "Finnish",
            "imageBase64": "data:image/png;base64,AQID",
            "description": "Finnish design variation 1.",
            "addedElements": ["Birch wood accents"],
            "modifiedElements": ["Lighting arrangement"],
            "confidenceScore": 0.9
        },
        {
            "id": "option-2",
            "designStyle": "Finnish",
            "imageBase64": "AQID",
            "description": "Finnish design variation 2.",
            "addedElements": ["Minimalist lighting"],
            "confidenceScore": 0.95
        }
    ]
}"#;

fn request() -> DecorationRequest {
    DecorationRequest {
        image: ImageData::jpeg(b"fake-jpeg-bytes".to_vec()),
        design_style: DesignStyle::Finnish,
        room_type: Some(RoomType::Bedroom),
        color_preference: Some(ColorPreference::Warm),
        preserve_existing_furniture: false,
    }
}

/// Start a server that answers one request with `status_line` and `reply`.
///
/// Returns the endpoint URL and a handle yielding the raw request it received.
async fn serve_once(status_line: &'static str, reply: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let received = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            reply.len(),
            reply
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        received
    });

    (format!("http://{}/api/decorate", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let body_len = buf.len() - header_end - 4;

    match headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
    {
        Some(length) => body_len >= length.trim().parse::<usize>().unwrap(),
        // Chunked body
        None => buf.ends_with(b"0\r\n\r\n"),
    }
}

fn client(endpoint: &str) -> HttpGenerationClient {
    HttpGenerationClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_posts_multipart_form_fields() {
    let (endpoint, server) = serve_once("200 OK", SUCCESS_BODY).await;

    client(&endpoint).submit(Arc::new(request())).await.unwrap();
    let received = server.await.unwrap();

    let lowered = received.to_ascii_lowercase();
    assert!(received.starts_with("POST /api/decorate HTTP/1.1"));
    assert!(lowered.contains("content-type: multipart/form-data"));
    for field in [
        "image",
        "designStyle",
        "roomType",
        "colorPreference",
        "preserveExistingFurniture",
    ] {
        assert!(
            received.contains(&format!("name=\"{}\"", field)),
            "form is missing {}",
            field
        );
    }
    assert!(received.contains("fake-jpeg-bytes"));
    assert!(lowered.contains("content-type: image/jpeg"));
    assert!(received.contains("Finnish"));
    assert!(received.contains("Bedroom"));
    assert!(received.contains("Warm"));
    assert!(received.contains("false"));
}

#[tokio::test]
async fn test_success_reply_decoded() {
    let (endpoint, server) = serve_once("200 OK", SUCCESS_BODY).await;

    let results = client(&endpoint).submit(Arc::new(request())).await.unwrap();
    server.await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results.analysis(), "Analyzed Bedroom");
    assert_eq!(results.variants()[0].image.media_type(), "image/png");
    assert_eq!(results.variants()[1].image.bytes(), &[1u8, 2, 3]);
    assert_eq!(results.best().id, "option-2");
}

#[tokio::test]
async fn test_error_reply_keeps_service_message() {
    let (endpoint, server) = serve_once(
        "503 Service Unavailable",
        r#"{"success": false, "error": "service unavailable"}"#,
    )
    .await;

    let err = client(&endpoint)
        .submit(Arc::new(request()))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(err, GenerationError::Backend("service unavailable".to_string()));
    assert_eq!(err.to_string(), "service unavailable");
}

#[tokio::test]
async fn test_error_reply_without_message_reports_status() {
    let (endpoint, server) = serve_once("503 Service Unavailable", "upstream down").await;

    let err = client(&endpoint)
        .submit(Arc::new(request()))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(
        err,
        GenerationError::Backend("Service returned error: 503 Service Unavailable".to_string())
    );
}

#[tokio::test]
async fn test_unsuccessful_ok_reply_is_backend_error() {
    let (endpoint, server) =
        serve_once("200 OK", r#"{"success": false, "error": "no room detected"}"#).await;

    let err = client(&endpoint)
        .submit(Arc::new(request()))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(err, GenerationError::Backend("no room detected".to_string()));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api/decorate", addr))
        .submit(Arc::new(request()))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Transport(_)));
}
