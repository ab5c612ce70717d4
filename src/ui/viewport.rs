//! Viewport width tracking for the table/card switch

use leptos::prelude::*;

use crate::core::layout::Layout;
#[cfg(not(feature = "ssr"))]
use crate::core::layout::WIDE_MEDIA_QUERY;

/// Viewport context shared by every list screen
#[derive(Clone, Copy)]
pub struct ViewportContext {
    pub layout: Memo<Layout>,
}

#[cfg(not(feature = "ssr"))]
fn detect_wide() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(WIDE_MEDIA_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(true)
}

/// Provide viewport context to the application
pub fn provide_viewport_context() -> ViewportContext {
    // Server and first client render both use the table layout
    let is_wide = RwSignal::new(true);
    let layout = Memo::new(move |_| Layout::from_wide(is_wide.get()));
    let ctx = ViewportContext { layout };

    // Follow the media query after hydration
    #[cfg(not(feature = "ssr"))]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        Effect::new(move |_| {
            is_wide.set(detect_wide());

            if let Some(window) = web_sys::window()
                && let Ok(Some(media_query)) = window.match_media(WIDE_MEDIA_QUERY)
            {
                let handler = Closure::<dyn Fn(web_sys::MediaQueryListEvent)>::new(
                    move |e: web_sys::MediaQueryListEvent| {
                        is_wide.set(e.matches());
                    },
                );

                let _ = media_query
                    .add_event_listener_with_callback("change", handler.as_ref().unchecked_ref());

                // Lives as long as the app
                handler.forget();
            }
        });
    }

    provide_context(ctx);
    ctx
}

/// Current layout for list screens
pub fn use_layout() -> Memo<Layout> {
    expect_context::<ViewportContext>().layout
}
