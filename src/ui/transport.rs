//! Browser transport on top of `gloo-net` (`fetch`).

use crate::core::error::TransportError;
use crate::core::http::{HttpRequest, HttpResponse, Transport};

/// Issues requests with `window.fetch`. Every request gets its own
/// `AbortController`; dropping the future aborts the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserTransport {
    timeout_ms: u32,
}

impl BrowserTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[cfg(not(feature = "ssr"))]
mod browser {
    use futures::future::{Either, select};
    use gloo_net::http::{Request, RequestBuilder};
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::JsValue;
    use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

    use super::*;
    use crate::core::http::{FilePart, HttpBody, Method};

    /// Aborts the underlying fetch unless the response was fully read.
    struct AbortOnDrop {
        controller: AbortController,
        done: bool,
    }

    impl Drop for AbortOnDrop {
        fn drop(&mut self) {
            if !self.done {
                self.controller.abort();
            }
        }
    }

    fn js_error(err: JsValue) -> TransportError {
        TransportError::Network(format!("{err:?}"))
    }

    fn network(err: gloo_net::Error) -> TransportError {
        TransportError::Network(err.to_string())
    }

    fn form_data(file: &FilePart) -> Result<FormData, TransportError> {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&bytes), &options)
            .map_err(js_error)?;

        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
            .map_err(js_error)?;
        Ok(form)
    }

    fn builder(request: &HttpRequest) -> RequestBuilder {
        let url = request.url.as_str();
        let builder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        };
        request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name, value))
    }

    async fn execute(request: HttpRequest, guard: &mut AbortOnDrop) -> Result<HttpResponse, TransportError> {
        let signal = guard.controller.signal();
        let builder = builder(&request).abort_signal(Some(&signal));

        let prepared = match &request.body {
            HttpBody::Empty => builder.build(),
            HttpBody::Json(text) => builder.body(JsValue::from_str(text)),
            HttpBody::Multipart(file) => builder.body(form_data(file)?),
        }
        .map_err(network)?;

        let response = prepared.send().await.map_err(network)?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.binary().await.map_err(network)?;
        guard.done = true;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }

    impl Transport for BrowserTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let controller = AbortController::new().map_err(js_error)?;
            let mut guard = AbortOnDrop {
                controller,
                done: false,
            };
            let url = request.url.clone();

            let fetch = Box::pin(execute(request, &mut guard));
            let timer = Box::pin(TimeoutFuture::new(self.timeout_ms));

            match select(fetch, timer).await {
                Either::Left((result, _)) => {
                    if let Err(err) = &result {
                        leptos::logging::warn!("request to {url} failed: {err}");
                    }
                    result
                }
                Either::Right(((), _)) => {
                    leptos::logging::warn!("request to {url} timed out");
                    Err(TransportError::Timeout)
                }
            }
        }
    }
}

#[cfg(feature = "ssr")]
impl Transport for BrowserTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network(
            "browser transport is unavailable during server rendering".to_string(),
        ))
    }
}
