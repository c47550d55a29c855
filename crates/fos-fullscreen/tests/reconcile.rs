//! Request stack and change/error signal reconciliation

mod common;

use common::{at, Page};
use fos_fullscreen::{Callbacks, FullscreenConfig, FullscreenError, HeadlessPlatform, Quirks, Signal};

// ============================================================================
// SINGLE SCOPE
// ============================================================================

#[test]
fn test_enter_then_exit() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let div = page.add(page.body(), "div");

    page.fs.request(Some(div), page.scope("A"));
    assert_eq!(page.fs.depth(), 1);
    assert!(page.entries().is_empty(), "nothing fires before the platform signal");

    page.fs.pump();
    assert_eq!(page.fs.element(), Some(div));
    assert_eq!(
        page.entries(),
        vec![at("global change", div), at("global enter", div), at("A enter", div)]
    );

    // Confirmation timer sees the element and stays quiet
    page.fs.advance(100);
    page.clear();

    page.fs.exit();
    page.fs.pump();
    assert_eq!(page.entries(), vec!["global change none", "A exit", "global exit"]);
    assert_eq!(page.fs.depth(), 0);
    assert_eq!(page.fs.element(), None);
}

#[test]
fn test_request_defaults_to_document_element() {
    let mut page = Page::new(HeadlessPlatform::moz());
    page.fs.request(None, Callbacks::new());
    page.fs.pump();

    assert_eq!(page.fs.element(), Some(page.html()));
    assert_eq!(page.fs.pending_elements(), vec![page.html()]);
}

#[test]
fn test_duplicate_change_signal_enters_once() {
    let mut page = Page::new(HeadlessPlatform::webkit().with_quirks(Quirks {
        duplicate_change: true,
        ..Quirks::default()
    }));
    let div = page.add(page.body(), "div");

    page.fs.request(Some(div), page.scope("A"));
    page.fs.pump();

    assert_eq!(page.count(&at("A enter", div)), 1);
    assert_eq!(page.count(&at("global enter", div)), 1);
    assert_eq!(page.count(&at("global change", div)), 2);
}

#[test]
fn test_redelivered_change_signal_enters_once() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let div = page.add(page.body(), "div");

    page.fs.request(Some(div), page.scope("A"));
    page.fs.handle_signal(Signal::document("fullscreenchange"));
    page.fs.handle_signal(Signal::document("fullscreenchange"));

    assert_eq!(page.count(&at("A enter", div)), 1);
}

#[test]
fn test_toggle() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let div = page.add(page.body(), "div");

    page.fs.toggle(Some(div), page.scope("A"));
    page.fs.pump();
    assert_eq!(page.fs.element(), Some(div));

    page.fs.toggle(Some(div), page.scope("unused"));
    page.fs.pump();
    assert_eq!(page.fs.element(), None);
    assert_eq!(page.count("A exit"), 1);
    assert_eq!(page.count("global exit"), 1);
    assert_eq!(page.fs.depth(), 0);
}

#[test]
fn test_exit_with_nothing_active() {
    let mut page = Page::new(HeadlessPlatform::standard());
    page.fs.exit();
    page.fs.pump();
    assert!(page.entries().is_empty());
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_local_error_before_global_error() {
    let mut page = Page::new(HeadlessPlatform::moz().with_quirks(Quirks {
        user_gesture: false,
        ..Quirks::default()
    }));

    page.fs.request(None, page.scope("A"));
    page.fs.pump();

    let global = format!("global error #{} not_allowed", page.html().index());
    assert_eq!(page.entries(), vec!["A error not_allowed".to_string(), global]);
    assert_eq!(page.fs.depth(), 0);

    // The confirmation timer finds the scope gone
    page.fs.advance(100);
    assert_eq!(page.count("A error not_allowed"), 1);
}

#[test]
fn test_synchronous_throw_is_not_enabled() {
    let mut page = Page::new(HeadlessPlatform::standard().with_quirks(Quirks {
        throw_on_request: true,
        ..Quirks::default()
    }));
    let div = page.add(page.body(), "div");

    page.fs.request(Some(div), page.scope("A"));
    assert_eq!(
        page.entries(),
        vec!["A error not_enabled".to_string(), format!("global error #{} not_enabled", div.index())]
    );
    assert_eq!(page.fs.depth(), 0);

    page.fs.advance(500);
    assert_eq!(page.entries().len(), 2);
}

#[test]
fn test_swallowed_request_is_not_allowed() {
    let mut page = Page::new(HeadlessPlatform::standard().with_quirks(Quirks {
        swallow_requests: true,
        ..Quirks::default()
    }));

    page.fs.request(None, page.scope("A"));
    page.fs.advance(99);
    assert!(page.entries().is_empty());
    assert_eq!(page.fs.next_timer_in(), Some(1));

    page.fs.advance(1);
    assert_eq!(page.count("A error not_allowed"), 1);
    assert_eq!(page.fs.depth(), 0);
}

#[test]
fn test_confirmation_delay_is_configurable() {
    let config = FullscreenConfig {
        confirm_delay_ms: 30,
        ..FullscreenConfig::default()
    };
    let mut page = Page::with_config(
        HeadlessPlatform::standard().with_quirks(Quirks {
            swallow_requests: true,
            ..Quirks::default()
        }),
        config,
    );

    page.fs.request(None, page.scope("A"));
    page.fs.advance(30);
    assert_eq!(page.count("A error not_allowed"), 1);
}

#[test]
fn test_no_capability_reports_not_supported() {
    let mut page = Page::new(HeadlessPlatform::unsupported());
    let x = page.add(page.body(), "div");

    page.fs.request(Some(x), page.scope("X"));
    assert_eq!(
        page.entries(),
        vec!["X error not_supported".to_string(), format!("global error #{} not_supported", x.index())]
    );
    assert_eq!(page.count("X enter"), 0);
    assert_eq!(page.count("X exit"), 0);
    assert_eq!(page.fs.depth(), 0);
}

#[test]
fn test_request_without_element_and_capability() {
    let mut page = Page::new(HeadlessPlatform::unsupported());
    page.fs.request(None, page.scope("A"));

    let global = format!("global error #{} not_supported", page.html().index());
    assert_eq!(page.entries(), vec!["A error not_supported".to_string(), global]);
    assert_eq!(page.fs.depth(), 0);
}

#[test]
fn test_error_signal_with_empty_stack_ignored() {
    let mut page = Page::new(HeadlessPlatform::standard());
    page.fs.handle_signal(Signal::document("fullscreenerror"));
    assert!(page.entries().is_empty());
}

#[test]
fn test_foreign_event_names_ignored() {
    let mut page = Page::new(HeadlessPlatform::standard());
    page.fs.request(None, page.scope("A"));
    page.fs.handle_signal(Signal::document("mozfullscreenerror"));
    page.fs.handle_signal(Signal::document("webkitfullscreenchange"));

    assert!(page.entries().is_empty());
    assert_eq!(page.fs.depth(), 1);
}

#[test]
fn test_error_callback_receives_typed_reason() {
    let mut page = Page::new(HeadlessPlatform::unsupported());
    let seen = std::rc::Rc::new(std::cell::Cell::new(None));
    let sink = seen.clone();

    page.fs.request(None, Callbacks::new().on_error(move |reason| sink.set(Some(reason))));
    assert_eq!(seen.get(), Some(FullscreenError::NotSupported));
}

// ============================================================================
// NESTED SCOPES
// ============================================================================

#[test]
fn test_nested_exit_collapses_inner_scope_only() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let outer = page.add(page.body(), "div");
    let inner = page.add(outer, "div");

    page.fs.request(Some(outer), page.scope("A"));
    page.fs.pump();
    page.fs.request(Some(inner), page.scope("B"));
    page.fs.pump();

    assert_eq!(page.fs.depth(), 2);
    assert_eq!(page.count(&at("B enter", inner)), 1);
    assert_eq!(page.count(&at("global enter", inner)), 0, "global enter only for the first scope");

    page.clear();
    page.fs.exit();
    page.fs.pump();

    // The outer element being active again means B closed, not that A entered
    assert_eq!(page.entries(), vec![at("global change", outer), "B exit".to_string()]);
    assert_eq!(page.fs.pending_elements(), vec![outer]);

    page.clear();
    page.fs.exit();
    page.fs.pump();
    assert_eq!(page.entries(), vec!["global change none", "A exit", "global exit"]);
    assert_eq!(page.fs.depth(), 0);
}

#[test]
fn test_full_collapse_exits_every_scope_once() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let outer = page.add(page.body(), "div");
    let inner = page.add(outer, "div");

    page.fs.request(Some(outer), page.scope("A"));
    page.fs.pump();
    page.fs.request(Some(inner), page.scope("B"));
    page.fs.pump();
    page.clear();

    page.fs.platform_mut().user_exit();
    page.fs.pump();

    assert_eq!(
        page.entries(),
        vec!["global change none", "B exit", "A exit", "global exit"]
    );
    assert_eq!(page.fs.depth(), 0);
}

#[test]
fn test_stack_depth_tracks_open_scopes() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let a = page.add(page.body(), "div");
    let b = page.add(a, "div");
    let c = page.add(b, "div");

    page.fs.request(Some(a), page.scope("A"));
    page.fs.pump();
    assert_eq!(page.fs.depth(), 1);

    page.fs.platform_mut().quirks_mut().throw_on_request = true;
    page.fs.request(Some(b), page.scope("B"));
    assert_eq!(page.fs.depth(), 1);

    page.fs.platform_mut().quirks_mut().throw_on_request = false;
    page.fs.request(Some(c), page.scope("C"));
    page.fs.pump();
    page.fs.advance(100);
    assert_eq!(page.fs.depth(), 2);

    page.fs.platform_mut().user_exit();
    page.fs.pump();
    assert_eq!(page.fs.depth(), 0);

    let opened = 3;
    let closed = page.count("A exit") + page.count("C exit") + page.count("B error not_enabled");
    assert_eq!(opened - closed, page.fs.depth());
}

#[test]
fn test_ignored_nested_request_errors_while_outer_active() {
    let mut page = Page::new(HeadlessPlatform::standard());
    let outer = page.add(page.body(), "div");
    let inner = page.add(outer, "div");

    page.fs.request(Some(outer), page.scope("A"));
    page.fs.pump();

    page.fs.platform_mut().quirks_mut().swallow_requests = true;
    page.fs.request(Some(inner), page.scope("B"));
    page.fs.advance(100);

    assert_eq!(page.count("B error not_allowed"), 1);
    assert_eq!(page.fs.pending_elements(), vec![outer]);
    assert_eq!(page.fs.element(), Some(outer));

    page.clear();
    page.fs.platform_mut().user_exit();
    page.fs.pump();
    assert_eq!(page.entries(), vec!["global change none", "A exit", "global exit"]);
    assert_eq!(page.count("B exit"), 0);
}

// ============================================================================
// CAPABILITY QUERIES
// ============================================================================

#[test]
fn test_enabled_reflects_platform() {
    assert!(Page::new(HeadlessPlatform::standard()).fs.enabled());
    assert!(!Page::new(HeadlessPlatform::unsupported()).fs.enabled());

    let disallowed = HeadlessPlatform::standard().with_quirks(Quirks {
        fullscreen_allowed: false,
        ..Quirks::default()
    });
    assert!(!Page::new(disallowed).fs.enabled());
}

#[test]
fn test_legacy_webkit_enabled_outside_frames() {
    assert!(Page::new(HeadlessPlatform::legacy_webkit()).fs.enabled());

    let framed = HeadlessPlatform::legacy_webkit().with_quirks(Quirks {
        embedded: true,
        ..Quirks::default()
    });
    assert!(!Page::new(framed).fs.enabled());
}

#[test]
fn test_keyboard_request_retried_without_flag() {
    let mut page = Page::new(HeadlessPlatform::legacy_webkit());
    let div = page.add(page.body(), "div");

    page.fs.request(Some(div), page.scope("A"));
    assert_eq!(page.fs.platform().request_calls(), 2);

    page.fs.pump();
    page.fs.advance(100);
    assert_eq!(page.count(&at("A enter", div)), 1);
    assert_eq!(page.count("A error not_allowed"), 0);
}

#[test]
fn test_keyboard_input_can_be_disabled() {
    let config = FullscreenConfig {
        allow_keyboard_input: false,
        ..FullscreenConfig::default()
    };
    let mut page = Page::with_config(HeadlessPlatform::legacy_webkit(), config);

    page.fs.request(None, page.scope("A"));
    assert_eq!(page.fs.platform().request_calls(), 1);
    page.fs.pump();
    assert_eq!(page.fs.element(), Some(page.html()));
}

#[test]
fn test_replaced_global_handler() {
    let mut page = Page::new(HeadlessPlatform::unsupported());
    let hits = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = hits.clone();
    page.fs
        .handlers_mut()
        .set_on_error(move |_, _| counter.set(counter.get() + 1));

    page.fs.request(None, page.scope("A"));
    assert_eq!(hits.get(), 1);
    assert!(!page.entries().iter().any(|e| e.starts_with("global error")));
}
