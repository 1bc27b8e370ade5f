//! `fetch` transport and page-level configuration.

use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wc_api_types::HttpMethod;
use wc_console::config::parse_route_manifest;
use wc_console::{ApiError, ConsoleConfig, RawResponse, Transport};
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::dom;

fn js_error(context: &str, err: JsValue) -> ApiError {
    ApiError::Transport(format!("{context}: {err:?}"))
}

/// Sends console requests through the browser's `fetch`.
#[derive(Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method.as_str());
        opts.set_mode(RequestMode::SameOrigin);

        let headers = Headers::new().map_err(|e| js_error("headers", e))?;
        if let Some(body) = body {
            headers
                .set("Content-Type", "application/json")
                .map_err(|e| js_error("headers", e))?;
            opts.set_body(&JsValue::from_str(&body.to_string()));
        }
        opts.set_headers(&headers);

        let request =
            Request::new_with_str_and_init(url, &opts).map_err(|e| js_error("request", e))?;
        let window = dom::window().map_err(|e| js_error("window", e))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch error", e))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Transport("response is not a Response".to_owned()))?;

        let text = JsFuture::from(resp.text().map_err(|e| js_error("text", e))?)
            .await
            .map_err(|e| js_error("text error", e))?;

        Ok(RawResponse {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// Console configuration for this page: same-origin backend plus the optional
/// `#console-routes` manifest.
pub fn page_config() -> ConsoleConfig {
    let mut config = ConsoleConfig::default();
    if let Ok(origin) = dom::window().and_then(|w| w.location().origin()) {
        config = config.with_base_url(origin);
    }

    if let Some(script) = dom::by_id("console-routes") {
        let text = script.text_content().unwrap_or_default();
        if !text.trim().is_empty() {
            match parse_route_manifest(&text) {
                Ok(routes) => config.routes = routes,
                Err(err) => gloo_console::warn!(format!("ignoring route manifest: {err:#}")),
            }
        }
    }
    config
}
