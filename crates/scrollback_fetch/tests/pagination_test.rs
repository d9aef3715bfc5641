//! Tests for single-resource pagination: channels and threads.

mod test_utils;

use test_utils::{MockSource, Request};
use scrollback_core::{
    ChannelId, ChannelRef, FetchEvent, FetcherConfig, FetcherConfigBuilder, MessageId, SkipReason,
    ThreadRef,
};
use scrollback_fetch::Fetcher;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio_stream::StreamExt;

fn fetcher_with_page_size(source: MockSource, page_size: u8) -> Fetcher<MockSource> {
    let config = FetcherConfigBuilder::default()
        .page_size(page_size)
        .build()
        .expect("valid config");
    Fetcher::new(source).with_config(config)
}

#[tokio::test]
async fn test_result_size_matches_history_for_any_split() {
    let cases: [(usize, u8); 7] = [(0, 100), (1, 100), (100, 100), (101, 100), (250, 100), (7, 3), (9, 3)];

    for (count, page_size) in cases {
        let source = MockSource::new().guild(1).text_channel(1, 10, count);
        let fetcher = fetcher_with_page_size(source, page_size);

        let messages = fetcher
            .fetch_channel(ChannelId(10), false)
            .await
            .expect("fetch succeeds");

        let distinct: HashSet<MessageId> = messages.ids().collect();
        assert_eq!(messages.len(), count, "count={count} page={page_size}");
        assert_eq!(distinct.len(), count);

        let expected_requests = count.div_ceil(page_size as usize) + 1;
        assert_eq!(
            fetcher.source().page_requests().len(),
            expected_requests,
            "count={count} page={page_size}"
        );
    }
}

#[tokio::test]
async fn test_cursor_is_last_id_of_previous_page() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 250);
    let fetcher = Fetcher::new(source);

    let pages: Arc<Mutex<Vec<Vec<MessageId>>>> = Arc::default();
    let seen = Arc::clone(&pages);
    let fetcher = fetcher.with_observer(move |event: &FetchEvent| {
        if let FetchEvent::Page { messages, .. } = event {
            seen.lock()
                .expect("pages lock")
                .push(messages.iter().map(|m| m.id).collect());
        }
    });

    fetcher
        .fetch_channel(ChannelId(10), false)
        .await
        .expect("fetch succeeds");

    let requests = fetcher.source().page_requests();
    let pages = pages.lock().expect("pages lock").clone();

    assert_eq!(requests[0].1, None);
    for k in 0..pages.len() - 1 {
        assert_eq!(requests[k + 1].1, pages[k].last().copied(), "request {}", k + 1);
    }
    let sizes: Vec<usize> = pages.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50, 0]);
}

#[tokio::test]
async fn test_page_requests_use_configured_limit() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 5);
    let fetcher = fetcher_with_page_size(source, 2);

    fetcher
        .fetch_channel(ChannelId(10), false)
        .await
        .expect("fetch succeeds");

    assert!(fetcher.source().requests().iter().all(|r| match r {
        Request::ListMessages { limit, .. } => *limit == 2,
        _ => true,
    }));
}

#[tokio::test]
async fn test_fetching_same_channel_twice_is_identical() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 130);
    let fetcher = Fetcher::new(source);

    let first = fetcher.fetch_channel(ChannelId(10), false).await.expect("first");
    let second = fetcher.fetch_channel(ChannelId(10), false).await.expect("second");

    assert_eq!(
        first.ids().collect::<Vec<_>>(),
        second.ids().collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_voice_channel_is_skipped_without_error() {
    let source = MockSource::new().guild(1).voice_channel(1, 20);
    let events: Arc<Mutex<Vec<FetchEvent>>> = Arc::default();
    let sink = Arc::clone(&events);
    let fetcher = Fetcher::new(source)
        .with_observer(move |event: &FetchEvent| sink.lock().expect("events").push(event.clone()));

    let messages = fetcher
        .fetch_channel(ChannelId(20), false)
        .await
        .expect("skip is not an error");

    assert!(messages.is_empty());
    assert!(fetcher.source().page_requests().is_empty());
    assert!(matches!(
        events.lock().expect("events").as_slice(),
        [FetchEvent::Skipped {
            reason: SkipReason::NotText(_),
            ..
        }]
    ));
}

#[tokio::test]
async fn test_unknown_channel_propagates_not_found() {
    let fetcher = Fetcher::new(MockSource::new());

    let err = fetcher
        .fetch_channel(ChannelId(404), false)
        .await
        .expect_err("missing channel");

    assert!(err.as_fetch().is_some_and(|e| e.is_not_found()));
    assert!(!fetcher.is_fetching());
}

#[tokio::test]
async fn test_channel_events_in_order() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 150);
    let fetcher = Fetcher::new(source);
    let stream = fetcher.subscribe();

    fetcher
        .fetch_channel(ChannelId(10), false)
        .await
        .expect("fetch succeeds");
    drop(fetcher);

    let names: Vec<&'static str> = stream.map(|e| e.name()).collect().await;
    assert_eq!(names, vec!["fetch_channel", "fetch", "fetch", "fetch"]);
}

#[tokio::test]
async fn test_fetching_flag_raised_only_during_fetch() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 250);
    let fetcher = Fetcher::new(source);
    assert!(!fetcher.is_fetching());

    let (result, during) = tokio::join!(fetcher.fetch_channel(ChannelId(10), false), async {
        tokio::task::yield_now().await;
        fetcher.is_fetching()
    });

    assert!(result.is_ok());
    assert!(during);
    assert!(!fetcher.is_fetching());
}

#[tokio::test]
async fn test_fetching_flag_cleared_after_page_failure() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 5).failing(10);
    let fetcher = Fetcher::new(source);

    assert!(fetcher.fetch_channel(ChannelId(10), false).await.is_err());
    assert!(!fetcher.is_fetching());
}

#[tokio::test]
async fn test_private_thread_without_permission_is_empty() {
    let source = MockSource::new()
        .guild(1)
        .text_channel(1, 10, 0)
        .thread(10, 11, 40, true);
    let thread = source.thread_info(10, 11);
    let fetcher = Fetcher::new(source);
    let stream = fetcher.subscribe();

    let messages = fetcher
        .fetch_thread(ThreadRef::Handle(thread))
        .await
        .expect("skip is not an error");
    drop(fetcher);

    assert!(messages.is_empty());
    let events: Vec<FetchEvent> = stream.collect().await;
    assert!(matches!(
        events.as_slice(),
        [FetchEvent::Skipped {
            reason: SkipReason::MissingPermission,
            ..
        }]
    ));
}

#[tokio::test]
async fn test_private_thread_with_permission_is_fully_fetched() {
    let source = MockSource::new()
        .guild(1)
        .text_channel(1, 10, 0)
        .thread(10, 11, 140, true)
        .with_manage_permission();
    let thread = source.thread_info(10, 11);
    let fetcher = Fetcher::new(source);

    let messages = fetcher
        .fetch_thread(ThreadRef::Handle(thread))
        .await
        .expect("fetch succeeds");

    assert_eq!(messages.len(), 140);
}

#[tokio::test]
async fn test_public_thread_does_not_check_permission() {
    let source = MockSource::new()
        .guild(1)
        .text_channel(1, 10, 0)
        .thread(10, 11, 3, false);
    let fetcher = Fetcher::new(source);

    let messages = fetcher
        .fetch_thread(ThreadRef::by_id(ChannelId(11), ChannelId(10)))
        .await
        .expect("fetch succeeds");

    assert_eq!(messages.len(), 3);
    assert!(
        !fetcher
            .source()
            .requests()
            .iter()
            .any(|r| matches!(r, Request::Permission(_)))
    );
}

#[tokio::test]
async fn test_thread_id_without_parent_is_misuse_before_any_request() {
    let source = MockSource::new().guild(1).text_channel(1, 10, 0).thread(10, 11, 3, false);
    let fetcher = Fetcher::new(source);

    let err = fetcher
        .fetch_thread(ThreadRef::Id {
            thread: ChannelId(11),
            parent: None,
        })
        .await
        .expect_err("parent is required");

    assert!(err.as_fetch().is_some_and(|e| e.is_misuse()));
    assert!(fetcher.source().requests().is_empty());
}

#[tokio::test]
async fn test_thread_under_voice_parent_is_skipped() {
    let source = MockSource::new().guild(1).voice_channel(1, 20);
    let fetcher = Fetcher::new(source);

    let messages = fetcher
        .fetch_thread(ThreadRef::by_id(ChannelId(21), ChannelRef::Id(ChannelId(20))))
        .await
        .expect("skip is not an error");

    assert!(messages.is_empty());
    assert!(fetcher.source().page_requests().is_empty());
}

#[tokio::test]
async fn test_thread_event_carries_resolved_parent() {
    let source = MockSource::new()
        .guild(1)
        .text_channel(1, 10, 0)
        .thread(10, 11, 1, false);
    let parent = source.channel_info(10);
    let fetcher = Fetcher::new(source);
    let stream = fetcher.subscribe();

    fetcher
        .fetch_thread(ThreadRef::by_id(ChannelId(11), ChannelId(10)))
        .await
        .expect("fetch succeeds");
    drop(fetcher);

    let events: Vec<FetchEvent> = stream.collect().await;
    match &events[0] {
        FetchEvent::Thread {
            thread,
            parent: Some(p),
        } => {
            assert_eq!(thread.id, ChannelId(11));
            assert_eq!(p, &parent);
        }
        other => panic!("unexpected first event: {other:?}"),
    }
}

#[tokio::test]
async fn test_thread_handle_resolves_parent_only_when_observed() {
    let source = MockSource::new()
        .guild(1)
        .text_channel(1, 10, 0)
        .thread(10, 11, 3, false);
    let thread = source.thread_info(10, 11);

    let headless = Fetcher::new(source);
    headless
        .fetch_thread(ThreadRef::Handle(thread.clone()))
        .await
        .expect("fetch succeeds");
    assert!(
        !headless
            .source()
            .requests()
            .contains(&Request::ResolveChannel(ChannelId(10)))
    );

    let source = MockSource::new()
        .guild(1)
        .text_channel(1, 10, 0)
        .thread(10, 11, 3, false);
    let parent = source.channel_info(10);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let observed = Fetcher::new(source).with_observer(move |event: &FetchEvent| {
        sink.lock().expect("events").push(event.clone())
    });

    let messages = observed
        .fetch_thread(ThreadRef::Handle(thread))
        .await
        .expect("fetch succeeds");

    assert_eq!(messages.len(), 3);
    let events = events.lock().expect("events");
    assert!(matches!(
        &events[0],
        FetchEvent::Thread { parent: Some(p), .. } if *p == parent
    ));
}

#[tokio::test]
async fn test_thread_handle_with_vanished_parent_still_fetches() {
    // Parent channel 10 is never registered, so it does not resolve.
    let source = MockSource::new().guild(1).thread(10, 11, 2, false);
    let thread = source.thread_info(10, 11);
    let fetcher = Fetcher::new(source);
    let stream = fetcher.subscribe();

    let messages = fetcher
        .fetch_thread(ThreadRef::Handle(thread))
        .await
        .expect("missing parent is not an error");
    drop(fetcher);

    assert_eq!(messages.len(), 2);
    let events: Vec<FetchEvent> = stream.collect().await;
    assert!(matches!(&events[0], FetchEvent::Thread { parent: None, .. }));
}

#[tokio::test]
async fn test_deserialized_page_size_drives_requests() {
    assert!(serde_json::from_str::<FetcherConfig>(r#"{"page_size": 0}"#).is_err());

    let config: FetcherConfig =
        serde_json::from_str(r#"{"page_size": 40}"#).expect("valid config");
    let source = MockSource::new().guild(1).text_channel(1, 10, 250);
    let fetcher = Fetcher::new(source).with_config(config);

    let messages = fetcher
        .fetch_channel(ChannelId(10), false)
        .await
        .expect("fetch succeeds");

    assert_eq!(messages.len(), 250);
    let limits: Vec<u8> = fetcher
        .source()
        .requests()
        .into_iter()
        .filter_map(|r| match r {
            Request::ListMessages { limit, .. } => Some(limit),
            _ => None,
        })
        .collect();
    assert_eq!(limits.len(), 8);
    assert!(limits.iter().all(|l| *l == 40));
}
