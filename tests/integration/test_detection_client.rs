use super::helpers::{
    closed_endpoint, sample_photo, spawn_garbage_service, spawn_service,
};
use axum::http::StatusCode;
use image::DynamicImage;
use plate_client::{
    DetectionError, HttpPlateDetector, PlateDetector, domain::detection::entity::BoundingBox,
};

const FULL_SUCCESS: &str = r#"{"success":true,"plate_text":"ABC123","confidence":0.91,"bbox":{"x":10,"y":20,"w":100,"h":40},"detail":null}"#;

#[tokio::test]
async fn uploads_a_single_jpeg_part_named_file() {
    let service = spawn_service(StatusCode::OK, FULL_SUCCESS).await;

    service
        .detector()
        .detect(&sample_photo())
        .await
        .expect("detection should succeed");

    let uploads = service.uploads();
    assert_eq!(uploads.len(), 1);
    let upload = &uploads[0];
    assert!(
        upload.content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type {}",
        upload.content_type
    );
    assert_eq!(upload.parts.len(), 1);

    let part = &upload.parts[0];
    assert_eq!(part.name.as_deref(), Some("file"));
    assert_eq!(part.file_name.as_deref(), Some("photo.jpg"));
    assert_eq!(part.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(
        image::guess_format(&part.data).expect("uploaded bytes"),
        image::ImageFormat::Jpeg
    );
}

#[tokio::test]
async fn each_upload_uses_a_fresh_boundary() {
    let service = spawn_service(StatusCode::OK, FULL_SUCCESS).await;
    let detector = service.detector();

    detector.detect(&sample_photo()).await.expect("first call");
    detector.detect(&sample_photo()).await.expect("second call");

    let uploads = service.uploads();
    assert_eq!(uploads.len(), 2);
    assert_ne!(uploads[0].content_type, uploads[1].content_type);
}

#[tokio::test]
async fn decodes_successful_response() {
    let service = spawn_service(StatusCode::OK, FULL_SUCCESS).await;

    let result = service
        .detector()
        .detect(&sample_photo())
        .await
        .expect("detection should succeed");

    assert!(result.succeeded);
    assert_eq!(result.plate_text.as_deref(), Some("ABC123"));
    assert_eq!(result.confidence, Some(0.91));
    assert_eq!(
        result.bounding_box,
        Some(BoundingBox {
            x: 10,
            y: 20,
            width: 100,
            height: 40
        })
    );
    assert_eq!(result.detail_message, None);
}

#[tokio::test]
async fn encoding_failure_never_reaches_the_network() {
    let service = spawn_service(StatusCode::OK, FULL_SUCCESS).await;

    let err = service
        .detector()
        .detect(&DynamicImage::new_rgb8(0, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, DetectionError::Encoding(_)), "got {err:?}");
    assert!(service.uploads().is_empty());
}

#[tokio::test]
async fn not_found_with_detail_surfaces_detail() {
    let service = spawn_service(StatusCode::NOT_FOUND, r#"{"detail":"No plate found"}"#).await;

    let err = service.detector().detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::Service { status: 404, .. }), "got {err:?}");
    assert_eq!(err.to_string(), "No plate found");
}

#[tokio::test]
async fn server_error_with_unparsable_body_mentions_status() {
    let service = spawn_service(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").await;

    let err = service.detector().detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::Service { status: 500, .. }), "got {err:?}");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn empty_body_is_classified() {
    let service = spawn_service(StatusCode::OK, "").await;

    let err = service.detector().detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::EmptyResponse { status: 200 }), "got {err:?}");
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let service = spawn_service(StatusCode::OK, "<html>oops</html>").await;

    let err = service.detector().detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn success_body_without_success_flag_is_malformed() {
    let service = spawn_service(StatusCode::OK, r#"{"plate_text":"ABC123"}"#).await;

    let err = service.detector().detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::MalformedResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let detector = HttpPlateDetector::new(closed_endpoint().await, 80).expect("detector");

    let err = detector.detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn non_http_reply_is_a_protocol_error() {
    let detector = HttpPlateDetector::new(spawn_garbage_service().await, 80).expect("detector");

    let err = detector.detect(&sample_photo()).await.unwrap_err();

    assert!(matches!(err, DetectionError::Protocol(_)), "got {err:?}");
}
