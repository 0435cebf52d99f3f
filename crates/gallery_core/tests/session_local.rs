use std::sync::Once;

use gallery_core::{
    ErrorCategory, GallerySession, ImageExtension, Phase, SessionError, SessionMode,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

fn images(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("https://img.example.com/{i}.jpg"))
        .collect()
}

fn loaded(n: usize) -> GallerySession {
    let mut session = GallerySession::new(SessionMode::LocalWindow { window_size: 20 });
    let request = session.submit("https://site.example.com/gallery").unwrap();
    assert!(session.apply_extraction(request.request_id, Ok(images(n))));
    session
}

#[test]
fn reveal_window_grows_and_clamps() {
    init_logging();
    let mut session = loaded(45);
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.revealed(), 20);
    assert!(session.has_more());

    assert!(session.reveal_more());
    assert_eq!(session.revealed(), 40);
    assert!(session.reveal_more());
    assert_eq!(session.revealed(), 45);

    assert!(!session.has_more());
    assert!(!session.reveal_more());
    assert_eq!(session.revealed(), 45);
}

#[test]
fn small_result_reveals_everything_at_once() {
    init_logging();
    let session = loaded(7);
    assert_eq!(session.revealed(), 7);
    assert!(!session.has_more());
    assert!(!session.can_grow());
}

#[test]
fn submit_issues_request_for_trimmed_url() {
    init_logging();
    let mut session = GallerySession::new(SessionMode::local());
    let request = session.submit("  https://site.example.com/a  ").unwrap();
    assert_eq!(request.url, "https://site.example.com/a");
    assert_eq!(session.phase(), Phase::Loading);
    assert!(session.is_loading());
}

#[test]
fn blank_submit_is_an_input_error_without_request() {
    init_logging();
    let mut session = GallerySession::new(SessionMode::local());
    assert!(session.submit("   ").is_none());
    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(
        session.last_error().map(|err| err.category),
        Some(ErrorCategory::Input)
    );
    assert!(!session.is_loading());
}

#[test]
fn only_one_request_in_flight() {
    init_logging();
    let mut session = GallerySession::new(SessionMode::local());
    let first = session.submit("https://a.example.com").unwrap();
    assert!(session.submit("https://b.example.com").is_none());
    assert!(!session.reveal_more());
    assert!(session.fetch_next_page().is_none());
    assert!(session.grow().is_none());

    session.apply_extraction(first.request_id, Ok(images(3)));
    assert_eq!(session.target_url(), Some("https://a.example.com"));
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let mut session = GallerySession::new(SessionMode::local());
    let request = session.submit("https://a.example.com").unwrap();

    assert!(!session.apply_extraction(request.request_id + 10, Ok(images(5))));
    assert!(session.is_loading());
    assert_eq!(session.total(), 0);

    assert!(session.apply_extraction(request.request_id, Ok(images(5))));
    assert!(!session.apply_extraction(request.request_id, Ok(images(9))));
    assert_eq!(session.total(), 5);
}

#[test]
fn failed_refresh_keeps_last_good_images() {
    init_logging();
    let mut session = loaded(30);
    session.reveal_more();

    let request = session.submit("https://other.example.com").unwrap();
    session.apply_extraction(
        request.request_id,
        Err(SessionError::fetch("http status 503")),
    );

    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(session.total(), 30);
    assert_eq!(session.revealed(), 30);
    assert_eq!(session.target_url(), Some("https://site.example.com/gallery"));
    assert_eq!(
        session.last_error().map(|err| err.message.as_str()),
        Some("http status 503")
    );
}

#[test]
fn fresh_success_replaces_and_clears_error() {
    init_logging();
    let mut session = loaded(30);
    let failing = session.submit("https://other.example.com").unwrap();
    session.apply_extraction(failing.request_id, Err(SessionError::fetch("down")));

    let retry = session.submit("https://other.example.com").unwrap();
    session.apply_extraction(retry.request_id, Ok(vec!["https://o.example.com/x.png".into()]));

    assert_eq!(session.phase(), Phase::Ready);
    assert!(session.last_error().is_none());
    assert_eq!(session.all_images(), ["https://o.example.com/x.png".to_string()]);
}

#[test]
fn oversized_response_is_capped() {
    init_logging();
    let session = loaded(250);
    assert_eq!(session.total(), 200);
}

#[test]
fn filter_keeps_order_and_matches_case_insensitively() {
    init_logging();
    let mut session = GallerySession::new(SessionMode::local());
    let request = session.submit("https://site.example.com").unwrap();
    session.apply_extraction(
        request.request_id,
        Ok(vec!["a.jpg".into(), "b.png".into(), "c.JPG".into()]),
    );
    for ext in ImageExtension::ALL {
        session.set_filter(ext, ext == ImageExtension::Jpg);
    }

    assert_eq!(session.filtered_view(), vec!["a.jpg", "c.JPG"]);
}

#[test]
fn filtered_view_excludes_unrecognized_types() {
    init_logging();
    let mut session = GallerySession::new(SessionMode::local());
    let request = session.submit("https://site.example.com").unwrap();
    session.apply_extraction(
        request.request_id,
        Ok(vec![
            "https://site.example.com/pixel".into(),
            "https://site.example.com/photo.jpeg".into(),
            "https://site.example.com/logo.svg".into(),
        ]),
    );

    assert_eq!(session.filtered_view(), vec!["https://site.example.com/logo.svg"]);
}

#[test]
fn filter_only_looks_at_revealed_prefix() {
    init_logging();
    let mut session = loaded(45);
    assert_eq!(session.filtered_view().len(), 20);
    session.set_filter(ImageExtension::Jpg, false);
    assert!(session.filtered_view().is_empty());
    assert_eq!(session.revealed(), 20);
}
