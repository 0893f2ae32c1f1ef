use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::WebViewBuilder;

use crate::controller::BridgeController;
use crate::events::{PageLoadState, WebViewEvent};
use crate::host::ScriptHost;
use crate::navigation::{self, NavigationDecision};

use super::ChannelWebView;

// =============================================================================
// NAVIGATION
// =============================================================================

/// Apply the navigation policy to `url` and record what happened.
///
/// Runs inside the wry navigation handler, where the web view itself is not
/// reachable, so a sentinel hit is queued for [`ChannelWebView::pump`].
pub fn record_navigation(
    events: &Mutex<Vec<WebViewEvent>>,
    url: String,
    sentinel_scheme: &str,
) -> NavigationDecision {
    let decision = navigation::decide(&url, sentinel_scheme);
    let event = match decision {
        NavigationDecision::Cancel => {
            debug!("sentinel navigation cancelled, message queued");
            WebViewEvent::MessageReady { url }
        }
        NavigationDecision::Allow => {
            debug!(url = %url, "navigation allowed");
            WebViewEvent::NavigationAllowed { url }
        }
    };
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
    decision
}

/// The `Fn(String) -> bool` closure wry expects, over [`record_navigation`].
///
/// Installed both as the navigation handler and as the new-window handler:
/// on macOS, sub-frame navigations only reach the latter.
pub fn navigation_handler(
    events: Arc<Mutex<Vec<WebViewEvent>>>,
    sentinel_scheme: String,
) -> impl Fn(String) -> bool + 'static {
    move |url| record_navigation(&events, url, &sentinel_scheme).allows()
}

// =============================================================================
// DRAIN
// =============================================================================

/// Take every recorded event and pop one queued message per sentinel
/// navigation. Returns how many pops were issued.
pub fn drain_events<H: ScriptHost>(
    events: &Mutex<Vec<WebViewEvent>>,
    controller: &BridgeController<H>,
) -> usize {
    let drained = match events.lock() {
        Ok(mut evts) => std::mem::take(&mut *evts),
        Err(_) => return 0,
    };

    let mut popped = 0;
    for event in drained {
        match event {
            WebViewEvent::MessageReady { .. } => {
                popped += 1;
                // Failures are logged and reported by the controller.
                let _ = controller.pop_queued_message();
            }
            WebViewEvent::PageLoad { state, .. } => debug!(?state, "channel page load"),
            WebViewEvent::NavigationAllowed { .. } => {}
        }
    }
    popped
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl ChannelWebView {
    pub(super) fn attach_navigation_handlers<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        sentinel_scheme: String,
    ) -> WebViewBuilder<'a> {
        builder
            .with_navigation_handler(navigation_handler(
                Arc::clone(&events),
                sentinel_scheme.clone(),
            ))
            .with_new_window_req_handler(navigation_handler(events, sentinel_scheme))
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, "page load");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::PageLoad { state, url });
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{page_string, FakeHost};
    use crate::controller::BridgeSettings;
    use crate::listener::tests::{Call, RecordingListener};

    #[test]
    fn sentinel_is_cancelled_and_queued() {
        let events = Mutex::new(Vec::new());
        let decision = record_navigation(&events, "js-frame://ready".into(), "js-frame");

        assert_eq!(decision, NavigationDecision::Cancel);
        assert!(!decision.allows());
        assert_eq!(
            *events.lock().unwrap(),
            vec![WebViewEvent::MessageReady {
                url: "js-frame://ready".into()
            }]
        );
    }

    #[test]
    fn page_navigation_is_allowed_and_recorded() {
        let events = Mutex::new(Vec::new());
        let url = "file:///app/assets/channel.html?token=t";
        let decision = record_navigation(&events, url.into(), "js-frame");

        assert!(decision.allows());
        assert_eq!(
            *events.lock().unwrap(),
            vec![WebViewEvent::NavigationAllowed { url: url.into() }]
        );
    }

    #[test]
    fn each_sentinel_queues_one_event() {
        let events = Mutex::new(Vec::new());
        for _ in 0..4 {
            record_navigation(&events, "js-frame:".into(), "js-frame");
        }
        let ready = events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, WebViewEvent::MessageReady { .. }))
            .count();
        assert_eq!(ready, 4);
    }

    #[test]
    fn handler_closure_cancels_sentinel_and_shares_sink() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let on_navigate = navigation_handler(Arc::clone(&events), "js-frame".into());
        let on_new_window = navigation_handler(Arc::clone(&events), "js-frame".into());

        assert!(!on_navigate("js-frame:".into()));
        assert!(!on_new_window("js-frame:".into()));
        assert!(on_new_window("https://example.com/".into()));

        let recorded = events.lock().unwrap().clone();
        assert_eq!(
            recorded,
            vec![
                WebViewEvent::MessageReady {
                    url: "js-frame:".into()
                },
                WebViewEvent::MessageReady {
                    url: "js-frame:".into()
                },
                WebViewEvent::NavigationAllowed {
                    url: "https://example.com/".into()
                },
            ]
        );
    }

    // -- Drain --

    #[test]
    fn drain_pops_once_per_sentinel_and_dispatches() {
        let host = FakeHost::replying(vec![
            page_string(r#"{"type":"onopen","payLoad":{}}"#),
            page_string(r#"{"type":"onclose","payLoad":{}}"#),
        ]);
        let controller = BridgeController::new(host, BridgeSettings::default());
        let listener = Arc::new(RecordingListener::default());
        controller.register_listener(&listener);

        let events = Mutex::new(vec![
            WebViewEvent::PageLoad {
                state: PageLoadState::Finished,
                url: "file:///channel.html".into(),
            },
            WebViewEvent::MessageReady {
                url: "js-frame:".into(),
            },
            WebViewEvent::NavigationAllowed {
                url: "https://example.com/".into(),
            },
            WebViewEvent::MessageReady {
                url: "js-frame:".into(),
            },
        ]);

        assert_eq!(drain_events(&events, &controller), 2);
        assert_eq!(
            *controller.host().scripts.borrow(),
            vec!["popQueuedMessage()", "popQueuedMessage()"]
        );
        assert_eq!(listener.calls(), vec![Call::Open, Call::Close]);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn drain_without_sentinels_evaluates_nothing() {
        let controller = BridgeController::new(FakeHost::default(), BridgeSettings::default());
        let events = Mutex::new(vec![
            WebViewEvent::NavigationAllowed {
                url: "about:blank".into(),
            },
            WebViewEvent::PageLoad {
                state: PageLoadState::Started,
                url: "about:blank".into(),
            },
        ]);

        assert_eq!(drain_events(&events, &controller), 0);
        assert!(controller.host().scripts.borrow().is_empty());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_pop_still_counts_and_reports() {
        let host = FakeHost {
            refuse: true,
            ..FakeHost::default()
        };
        let controller = BridgeController::new(host, BridgeSettings::default());
        let listener = Arc::new(RecordingListener::default());
        controller.register_listener(&listener);

        let events = Mutex::new(vec![WebViewEvent::MessageReady {
            url: "js-frame:".into(),
        }]);

        assert_eq!(drain_events(&events, &controller), 1);
        assert!(matches!(listener.calls().as_slice(), [Call::Failure(_)]));
    }
}
