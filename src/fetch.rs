use crate::core::asset::{self, BufferSource};
use crate::core::{LoadError, LoadProgress, SceneMesh};
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_err(url: &str, e: JsValue) -> LoadError {
    LoadError::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", e),
    }
}

/// Absolute URL of `uri`, resolved against `base` (itself resolved against
/// the page location).
pub fn resolve_url(uri: &str, base: &str) -> Result<String, LoadError> {
    let page = web::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let base_abs = web::Url::new_with_base(base, &page).map_err(|e| fetch_err(base, e))?;
    let url = web::Url::new_with_base(uri, &base_abs.href()).map_err(|e| fetch_err(uri, e))?;
    Ok(url.href())
}

/// GET `url` into memory, streaming the body so progress can be reported.
pub async fn fetch_bytes(
    url: &str,
    mut on_progress: impl FnMut(LoadProgress),
) -> Result<Vec<u8>, LoadError> {
    let window = web::window().ok_or_else(|| fetch_err(url, JsValue::from_str("no window")))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .and_then(|v| v.dyn_into())
        .map_err(|e| fetch_err(url, e))?;
    if !resp.ok() {
        return Err(LoadError::Http {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|s| s.trim().parse::<u64>().ok());

    let Some(body) = resp.body() else {
        // No stream support: take the whole body at once.
        let buf = JsFuture::from(resp.array_buffer().map_err(|e| fetch_err(url, e))?)
            .await
            .map_err(|e| fetch_err(url, e))?;
        let bytes = Uint8Array::new(&buf).to_vec();
        on_progress(LoadProgress {
            loaded: bytes.len() as u64,
            total,
        });
        return Ok(bytes);
    };

    let reader: web::ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|e| fetch_err(url, e.into()))?;
    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| fetch_err(url, e))?;
        let done = Reflect::get(&chunk, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }
        let value = Reflect::get(&chunk, &JsValue::from_str("value")).map_err(|e| fetch_err(url, e))?;
        if let Ok(arr) = value.dyn_into::<Uint8Array>() {
            let start = bytes.len();
            bytes.resize(start + arr.length() as usize, 0);
            arr.copy_to(&mut bytes[start..]);
        }
        on_progress(LoadProgress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}

/// Fetch and parse a glTF/GLB file, pulling in any external buffers, and
/// flatten its scene into one mesh.
pub async fn load_scene(
    url: &str,
    on_progress: impl FnMut(LoadProgress),
) -> Result<SceneMesh, LoadError> {
    let bytes = fetch_bytes(url, on_progress).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;

    let mut buffers: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.document.buffers() {
        let data = match asset::buffer_source(&buffer)? {
            BufferSource::Blob => gltf.blob.clone().ok_or(LoadError::MissingBlob {
                index: buffer.index(),
            })?,
            BufferSource::Embedded(data) => data,
            BufferSource::External(uri) => {
                let abs = resolve_url(uri, url)?;
                log::info!("[viewer] fetching buffer {} from {}", buffer.index(), abs);
                fetch_bytes(&abs, |_| {}).await?
            }
        };
        asset::check_buffer(&buffer, &data)?;
        buffers.push(data);
    }
    asset::build_scene_mesh(&gltf.document, &buffers)
}
