use crate::scene::{parse_catalog, CatalogItem};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_response(url: &str) -> anyhow::Result<web::Response> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {} failed: {:?}", url, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} for {}", resp.status(), url);
    }
    Ok(resp)
}

/// Fetch and parse the whole catalog document.
pub async fn fetch_catalog(url: &str) -> anyhow::Result<Vec<CatalogItem>> {
    let resp = fetch_response(url).await?;
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("reading {} failed: {:?}", url, e))?;
    let text = text
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("{} body is not text", url))?;
    Ok(parse_catalog(&text)?)
}

/// Fetch an image and decode it into an `ImageBitmap` for GPU upload.
pub async fn fetch_bitmap(url: &str) -> anyhow::Result<web::ImageBitmap> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = fetch_response(url).await?;
    let blob = JsFuture::from(resp.blob().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("reading {} failed: {:?}", url, e))?;
    let blob: web::Blob = blob
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Blob: {:?}", e))?;
    let promise = window
        .create_image_bitmap_with_blob(&blob)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let bitmap = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("decoding {} failed: {:?}", url, e))?;
    bitmap
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not an ImageBitmap: {:?}", e))
}
