//! Media upload integration tests against a local mock Bot API.

mod common;

use common::*;
use tg_api::{ChatId, InputMedia, MediaKind, SendMediaOptions};
use tg_core::error::TgError;

#[tokio::test]
async fn test_remote_photo_uploaded_with_extension() {
    let api = MockBotApi::start(OK_REPLY).await;
    api.add_file("cat", png_bytes());
    let dir = create_upload_dir();
    let client = api.client(dir.path());

    let options = SendMediaOptions::default().caption("a cat");
    let result = client
        .send_photo(42i64, api.file_url("cat").as_str(), &options)
        .await
        .unwrap();
    assert_eq!(result["ok"], true);

    let calls = api.api_calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, format!("/bot{TEST_KEY}/sendPhoto"));
    assert!(call
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("multipart/form-data")));

    let body = call.body_text();
    assert!(body.contains("name=\"chat_id\""));
    assert!(body.contains("name=\"photo\"; filename=\""));
    assert!(body.contains(".png\""));
    assert!(body.contains("image/png"));
    assert!(body.contains("a cat"));

    assert_eq!(entries(dir.path()), 0, "staged file must be removed");
}

#[tokio::test]
async fn test_staged_file_removed_on_malformed_reply() {
    let api = MockBotApi::start("<html>bad gateway</html>").await;
    api.add_file("cat", png_bytes());
    let dir = create_upload_dir();
    let client = api.client(dir.path());

    let err = client
        .send_photo(42i64, api.file_url("cat").as_str(), &SendMediaOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TgError::Decode(_)));
    assert_eq!(entries(dir.path()), 0);
}

#[tokio::test]
async fn test_remote_unknown_type_rejected_before_upload() {
    let api = MockBotApi::start(OK_REPLY).await;
    api.add_file("blob", unknown_bytes());
    let dir = create_upload_dir();
    let client = api.client(dir.path());

    for kind in [MediaKind::Photo, MediaKind::Audio, MediaKind::Sticker, MediaKind::Video] {
        let media = InputMedia::classify(&api.file_url("blob"));
        let err = client
            .send_media(kind, ChatId::Id(42), media, &SendMediaOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TgError::UnsupportedMediaType { .. }), "{kind}: {err}");
    }

    assert!(api.api_calls().is_empty());
    assert_eq!(entries(dir.path()), 0);
}

#[tokio::test]
async fn test_remote_document_accepts_unknown_type() {
    let api = MockBotApi::start(OK_REPLY).await;
    api.add_file("blob", unknown_bytes());
    let dir = create_upload_dir();
    let client = api.client(dir.path());

    client
        .send_document("@channel", api.file_url("blob").as_str(), &SendMediaOptions::default())
        .await
        .unwrap();

    let calls = api.api_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].path.ends_with("/sendDocument"));
    let body = calls[0].body_text();
    assert!(body.contains("name=\"document\""));
    assert!(body.contains("application/octet-stream"));
    assert!(body.contains("@channel"));
    assert_eq!(entries(dir.path()), 0);
}

#[tokio::test]
async fn test_failed_download_is_transport_error() {
    let api = MockBotApi::start(OK_REPLY).await;
    let dir = create_upload_dir();
    let client = api.client(dir.path());

    let err = client
        .send_video(42i64, api.file_url("missing").as_str(), &SendMediaOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(api.api_calls().is_empty());
    assert_eq!(entries(dir.path()), 0);
}

#[tokio::test]
async fn test_local_photo_uploaded_with_own_name() {
    let api = MockBotApi::start(OK_REPLY).await;
    let upload_dir = create_upload_dir();
    let media_dir = create_upload_dir();
    let path = media_dir.path().join("pic.png");
    std::fs::write(&path, png_bytes()).unwrap();
    let client = api.client(upload_dir.path());

    client
        .send_photo(7i64, path.clone(), &SendMediaOptions::default())
        .await
        .unwrap();

    let calls = api.api_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].body_text().contains("filename=\"pic.png\""));
    assert!(path.exists(), "local media is never deleted");
}

#[tokio::test]
async fn test_local_missing_file() {
    let api = MockBotApi::start(OK_REPLY).await;
    let dir = create_upload_dir();
    let client = api.client(dir.path());
    let missing = dir.path().join("nope.jpg");

    let err = client
        .send_photo(7i64, missing.to_str().unwrap(), &SendMediaOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TgError::LocalMediaNotFound(ref p) if *p == missing));
    assert!(api.api_calls().is_empty());
}

#[tokio::test]
async fn test_file_id_sent_without_upload() {
    let api = MockBotApi::start(OK_REPLY).await;
    let dir = create_upload_dir();
    let client = api.client(dir.path());

    client
        .send_sticker(9i64, InputMedia::file_id("CAADAgAD"), &SendMediaOptions::default().reply_to(3))
        .await
        .unwrap();

    let calls = api.api_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert!(calls[0].path.ends_with("/sendSticker"));
    assert_eq!(
        calls[0].query.as_deref(),
        Some("chat_id=9&sticker=CAADAgAD&reply_to_message_id=3")
    );
}
