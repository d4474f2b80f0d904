//! Job-posting page scraper.
//!
//! Only postings hosted on `wd<N>.myworkdayjobs.com` are accepted. The description is
//! read from the posting's description region; a missing region, a slow page or a
//! foreign URL are all failures.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::errors::AppError;

static POSTING_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z0-9-]+\.)*wd\d+\.myworkdayjobs\.com$").expect("valid host pattern"));

/// CSS selector of the region holding the job description.
pub const DESCRIPTION_SELECTOR: &str = r#"div[data-automation-id="jobPostingDescription"]"#;

const USER_AGENT: &str = concat!("tailor/", env!("CARGO_PKG_VERSION"));

/// Checks that `raw` is an http(s) URL on a job-posting host.
pub fn validate_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw).map_err(|e| AppError::SourceUrlInvalid(format!("{raw}: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::SourceUrlInvalid(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )));
    }

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !POSTING_HOST.is_match(&host) {
        return Err(AppError::SourceUrlInvalid(format!(
            "{raw}: not a myworkdayjobs.com posting"
        )));
    }

    Ok(url)
}

/// Fetches a posting and returns the text of its description region.
///
/// The whole page load must finish within `timeout`.
pub async fn scrape_job_description(raw_url: &str, timeout: Duration) -> Result<String, AppError> {
    let url = validate_url(raw_url)?;
    info!("Fetching job posting {url}");

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Scrape(format!("Failed to build HTTP client: {e}")))?;

    let response = client.get(url.clone()).send().await.map_err(|e| {
        if e.is_timeout() {
            AppError::Scrape(format!("{url} did not load within {timeout:?}"))
        } else {
            AppError::Scrape(format!("Failed to fetch {url}: {e}"))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Scrape(format!("{url} returned {status}")));
    }

    let html = response
        .text()
        .await
        .map_err(|e| AppError::Scrape(format!("Failed to read {url}: {e}")))?;
    debug!("Fetched {} bytes from {url}", html.len());

    let description = extract_description(&html)?;
    info!(
        "Job description captured: {}...",
        description.chars().take(200).collect::<String>()
    );
    Ok(description)
}

/// Visible text of the description region. Block elements start new lines; inline
/// elements stay within the surrounding sentence.
pub fn extract_description(html: &str) -> Result<String, AppError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(DESCRIPTION_SELECTOR)
        .map_err(|e| AppError::Scrape(format!("Invalid CSS selector: {e:?}")))?;

    let region = document
        .select(&selector)
        .next()
        .ok_or_else(|| AppError::Scrape("Job description element not found on the page".to_string()))?;

    let mut raw = String::new();
    collect_text(region, &mut raw);

    let text = raw
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(AppError::Scrape("Job description element is empty".to_string()));
    }
    Ok(text)
}

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "h1", "h2", "h3",
    "h4", "h5", "h6", "hr", "li", "ol", "p", "pre", "section", "table", "td", "th", "tr",
    "ul",
];

/// Appends the text under `element`, with a line break around every block element.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if matches!(name, "script" | "style" | "noscript") {
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
    if block {
        out.push('\n');
    }
}
