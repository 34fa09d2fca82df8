mod common;

use common::{comment, init_tracing, story, MockHnApi};
use quiet_hn::hn_utils::{time, url};
use quiet_hn::resolver::{classify, is_story_link, to_story};
use quiet_hn::{HnApi, ItemRecord, ItemResolver, Resolution};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_display_host_strips_leading_www() {
    assert_eq!(url::display_host("https://www.example.com/a"), "example.com");
    assert_eq!(url::display_host("http://sub.example.com"), "sub.example.com");
    assert_eq!(url::display_host("https://www.www.example.com"), "www.example.com");
    assert_eq!(url::display_host("https://example.com:8443/x?y=1"), "example.com");
}

#[test]
fn test_display_host_is_empty_for_unparseable_urls() {
    assert_eq!(url::display_host(""), "");
    assert_eq!(url::display_host("not a url"), "");
    assert_eq!(url::display_host("example.com/relative"), "");
}

#[test]
fn test_safe_href_only_passes_web_links() {
    assert_eq!(url::safe_href("https://example.com/a?b=1"), "https://example.com/a?b=1");
    assert_eq!(url::safe_href("http://example.com"), "http://example.com");
    assert_eq!(url::safe_href("javascript:alert(document.cookie)"), "#");
    assert_eq!(url::safe_href("data:text/html,<b>hi</b>"), "#");
    assert_eq!(url::safe_href("example.com/relative"), "#");
    assert_eq!(url::safe_href(""), "#");
}

#[test]
fn test_story_link_classification() {
    assert!(is_story_link(&story(1, "https://example.com")));
    assert!(!is_story_link(&comment(2)));

    let ask_hn = ItemRecord {
        id: 3,
        kind: "story".to_string(),
        title: Some("Ask HN: anything".to_string()),
        ..Default::default()
    };
    assert!(!is_story_link(&ask_hn));

    let empty_url = ItemRecord {
        url: Some(String::new()),
        ..story(4, "")
    };
    assert!(!is_story_link(&empty_url));

    let job = ItemRecord {
        kind: "job".to_string(),
        ..story(5, "https://example.com/jobs")
    };
    assert!(!is_story_link(&job));
}

#[test]
fn test_unparseable_url_keeps_story_with_empty_host() {
    match classify(story(7, "::not-a-url::")) {
        Resolution::Story(story) => {
            assert_eq!(story.id(), 7);
            assert_eq!(story.host, "");
        }
        other => panic!("expected a story, got {:?}", other),
    }
}

#[test]
fn test_to_story_is_deterministic() {
    let item = story(9, "https://www.example.com/a");
    let first = to_story(item.clone());
    let second = to_story(item);

    assert_eq!(first, second);
    assert_eq!(first.host, "example.com");
}

#[test]
fn test_format_elapsed() {
    assert_eq!(time::format_elapsed(Duration::from_micros(250)), "250µs");
    assert_eq!(time::format_elapsed(Duration::from_micros(1_500)), "1.50ms");
    assert_eq!(time::format_elapsed(Duration::from_millis(2_250)), "2.25s");
}

#[tokio::test]
async fn test_resolver_outcomes() {
    init_tracing();

    let api = Arc::new(
        MockHnApi::new()
            .with_item(story(1, "https://www.example.com/a"), Duration::ZERO)
            .with_item(comment(2), Duration::ZERO)
            .with_failure(3, Duration::ZERO),
    );
    let dyn_api: Arc<dyn HnApi> = api.clone();
    let resolver = ItemResolver::new(dyn_api);

    match resolver.resolve(1).await {
        Resolution::Story(story) => assert_eq!(story.host, "example.com"),
        other => panic!("expected a story, got {:?}", other),
    }
    assert!(matches!(resolver.resolve(2).await, Resolution::NotAStory));
    assert!(matches!(resolver.resolve(3).await, Resolution::Failed(_)));

    // One request per resolution, no retries
    assert_eq!(api.item_calls(), 3);
}
