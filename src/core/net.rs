// src/core/net.rs
// One blocking GET against a MediaWiki `action=parse` endpoint.
// No retries; timeouts only so a dead connection ends the run.

use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT_FALLBACK_APP};
use crate::config::options::{ClientId, FetchOptions};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct Envelope {
    parse: Option<ParsePayload>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsePayload {
    #[serde(default)]
    title: Option<String>,
    text: Option<ParseText>,
}

#[derive(Debug, Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

/// `User-Agent: <app> (<email>)`, the form Wikimedia asks API clients to send.
pub fn user_agent(client: &ClientId) -> Result<String> {
    let email = client.email.trim();
    if !email.contains('@') {
        return Err(Error::InvalidArgument(format!(
            "contact email required in the User-Agent, got {email:?}"
        )));
    }
    let app = client.app.trim();
    let app = if app.is_empty() { USER_AGENT_FALLBACK_APP } else { app };
    Ok(format!("{app} ({email})"))
}

/// Fetch the rendered HTML of `opts.page`.
pub fn fetch_page_html(opts: &FetchOptions) -> Result<String> {
    let ua = user_agent(&opts.client)?;
    let page = crate::core::sanitize::page_title(&opts.page);
    if page.is_empty() {
        return Err(Error::InvalidArgument(s!("page title is empty")));
    }

    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .timeout_read(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build();

    info!("GET {} page={}", opts.api_url, page);
    let body = agent
        .get(&opts.api_url)
        .query("action", "parse")
        .query("page", &page)
        .query("format", "json")
        .query("prop", "text")
        .set("User-Agent", &ua)
        .call()?
        .into_string()?;
    debug!("response: {} bytes", body.len());

    extract_html(&body)
}

/// Pull `parse.text["*"]` out of an API response body.
pub fn extract_html(body: &str) -> Result<String> {
    let env: Envelope = serde_json::from_str(body)?;
    if let Some(err) = env.error {
        return Err(Error::Api { code: err.code, info: err.info });
    }
    let parse = env.parse.ok_or_else(|| Error::Envelope(s!("missing `parse` object")))?;
    if let Some(title) = &parse.title {
        debug!("parsed page title: {title}");
    }
    parse
        .text
        .map(|t| t.html)
        .ok_or_else(|| Error::Envelope(s!("missing `parse.text.*`")))
}

/// Saved input: an API envelope (starts with `{`) or raw HTML.
pub fn html_from_saved(contents: &str) -> Result<String> {
    if contents.trim_start().starts_with('{') {
        extract_html(contents)
    } else {
        Ok(contents.to_string())
    }
}
