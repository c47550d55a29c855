//! Example: nested fullscreen requests on the headless platform
//!
//! Run with `RUST_LOG=debug` to see the reconciliation trace.

use fos_fullscreen::{Callbacks, FullscreenManager, HandlerRegistry, HeadlessPlatform};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let handlers = HandlerRegistry::new()
        .with_on_enter(|el| println!("fullscreen on: {el:?}"))
        .with_on_exit(|| println!("fullscreen off"))
        .with_on_error(|el, reason| println!("{el:?} failed: {reason}"));
    let mut fs = FullscreenManager::new(HeadlessPlatform::standard(), handlers);

    let body = fs.platform().document().body();
    let Ok(player) = fs.platform_mut().add_element(body, "div") else {
        return;
    };
    let Ok(caption) = fs.platform_mut().add_element(player, "div") else {
        return;
    };

    fs.request(
        Some(player),
        Callbacks::new()
            .on_enter(|el| println!("player entered as {el:?}"))
            .on_exit(|| println!("player closed")),
    );
    fs.pump();

    fs.request(
        Some(caption),
        Callbacks::new()
            .on_enter(|el| println!("caption entered as {el:?}"))
            .on_exit(|| println!("caption closed")),
    );
    fs.pump();
    println!("open scopes: {}", fs.depth());

    // Escape key: every scope closes at once
    fs.platform_mut().user_exit();
    fs.pump();
    println!("open scopes: {}", fs.depth());
}
