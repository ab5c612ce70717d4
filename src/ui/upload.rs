//! File pickers, preview object URLs and browser downloads.

use leptos::prelude::*;

use crate::core::error::ApiError;
use crate::core::http::FilePart;
use crate::core::layout::PreviewSlot;

/// A `blob:` URL that is revoked when dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        #[cfg(not(feature = "ssr"))]
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}

/// Preview of the last picked file. The URL is released when another file
/// is picked, when cleared, or when the owning component unmounts.
#[derive(Clone, Copy)]
pub struct FilePreview(RwSignal<PreviewSlot<ObjectUrl>>);

impl FilePreview {
    pub fn url(&self) -> Option<String> {
        self.0.with(|slot| slot.get().map(|u| u.as_str().to_string()))
    }

    pub fn set(&self, url: ObjectUrl) {
        self.0.update(|slot| slot.replace(url));
    }

    pub fn clear(&self) {
        self.0.try_update(|slot| slot.clear());
    }
}

pub fn use_file_preview() -> FilePreview {
    let preview = FilePreview(RwSignal::new(PreviewSlot::new()));
    on_cleanup(move || preview.clear());
    preview
}

/// File chosen in an `<input type="file">`.
pub struct PickedFile {
    #[cfg(not(feature = "ssr"))]
    file: web_sys::File,
}

/// First file of the input that fired `ev`.
pub fn picked_file(ev: &leptos::ev::Event) -> Option<PickedFile> {
    #[cfg(not(feature = "ssr"))]
    {
        let input: web_sys::HtmlInputElement = event_target(ev);
        let file = input.files()?.get(0)?;
        Some(PickedFile { file })
    }
    #[cfg(feature = "ssr")]
    {
        let _ = ev;
        None
    }
}

impl PickedFile {
    pub fn name(&self) -> String {
        #[cfg(not(feature = "ssr"))]
        {
            self.file.name()
        }
        #[cfg(feature = "ssr")]
        {
            String::new()
        }
    }

    pub fn object_url(&self) -> Option<ObjectUrl> {
        #[cfg(not(feature = "ssr"))]
        {
            web_sys::Url::create_object_url_with_blob(&self.file)
                .ok()
                .map(ObjectUrl)
        }
        #[cfg(feature = "ssr")]
        {
            None
        }
    }

    /// Read the whole file into a multipart part. The field name is set by
    /// the endpoint.
    pub async fn read(self) -> Result<FilePart, ApiError> {
        #[cfg(not(feature = "ssr"))]
        {
            let buffer = wasm_bindgen_futures::JsFuture::from(self.file.array_buffer())
                .await
                .map_err(|e| ApiError::InvalidRequest(format!("Could not read file: {e:?}")))?;
            Ok(FilePart {
                field: String::new(),
                file_name: self.file.name(),
                mime_type: self.file.type_(),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            })
        }
        #[cfg(feature = "ssr")]
        {
            Err(ApiError::InvalidRequest(
                "File uploads are only available in the browser".to_string(),
            ))
        }
    }
}

/// Hand `bytes` to the browser as a download named `file_name`.
pub fn save_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), String> {
    #[cfg(not(feature = "ssr"))]
    {
        use wasm_bindgen::JsCast;

        let js_error = |e: wasm_bindgen::JsValue| format!("{e:?}");
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);
        let array = js_sys::Uint8Array::from(bytes);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&array), &options)
            .map_err(js_error)?;
        let url = ObjectUrl(web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "No document".to_string())?;
        let anchor = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Could not create link".to_string())?;
        anchor.set_href(url.as_str());
        anchor.set_download(file_name);
        anchor.click();

        // revoke once the browser has picked the download up
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(1_000).await;
            drop(url);
        });
        Ok(())
    }
    #[cfg(feature = "ssr")]
    {
        let _ = (bytes, file_name, mime_type);
        Err("Downloads are only available in the browser".to_string())
    }
}
