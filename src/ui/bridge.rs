/// Typed wrappers around the `popup.js` bridge to chrome.* APIs

use log::{debug, info};
use wasm_bindgen::prelude::*;

use crate::error::Result;
use crate::export::{ExportFormat, export_filename, render, today_iso};
use crate::link_data::Link;
use crate::scraper::{PagePayload, links_from_payload};
use crate::storage::{STORAGE_KEY, StorageData};
use crate::validator::Prober;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabAnchors() -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn checkLink(url: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> std::result::Result<(), JsValue>;

    fn downloadFile(content: &str, filename: &str, mime_type: &str);
}

async fn fetch_page_payload() -> Result<PagePayload> {
    let payload_js = getActiveTabAnchors().await?;
    let payload = serde_wasm_bindgen::from_value(payload_js)?;
    Ok(payload)
}

/// Scrape the active tab. An inaccessible tab yields no links.
pub async fn scrape_active_tab() -> (String, Vec<Link>) {
    links_from_payload(fetch_page_payload().await)
}

/// Probes through the extension service worker, which holds host permissions
pub struct ExtensionProber;

impl Prober for ExtensionProber {
    async fn probe(&self, href: &str) -> bool {
        match checkLink(href).await {
            Ok(ok) => ok.as_bool().unwrap_or(false),
            Err(e) => {
                debug!("Probe for {} failed: {:?}", href, e);
                false
            }
        }
    }
}

pub async fn load_storage() -> Result<StorageData> {
    let storage_js = getStorage(STORAGE_KEY).await?;

    if storage_js.is_null() || storage_js.is_undefined() {
        return Ok(StorageData::new());
    }

    let storage = serde_wasm_bindgen::from_value(storage_js)?;
    Ok(storage)
}

pub async fn save_storage(storage: &StorageData) -> Result<()> {
    let storage_js = serde_wasm_bindgen::to_value(storage)?;
    setStorage(STORAGE_KEY, storage_js).await?;
    Ok(())
}

/// Render `links` and hand the result to the browser as a file download
pub fn download_export(format: ExportFormat, links: &[Link]) {
    let date = today_iso();
    let content = render(format, links, &date);
    let filename = export_filename(format, &date);

    info!("Exporting {} links to {}", links.len(), filename);
    downloadFile(&content, &filename, format.mime_type());
}
