// src/github/discover.rs
// =============================================================================
// This module lists the documents of a GitHub directory.
//
// Strategy:
// - Download the HTML of the directory page (github.com/<o>/<r>/tree/<b>/<p>)
// - GitHub embeds the directory listing as JSON inside
//   <script type="application/json"> tags, under payload.tree.items
// - Keep the items whose name starts with the prefix and append each name
//   to the raw base URL
//
// Why not the GitHub API?
// - The API is rate limited hard without a token
// - One page load gives us the whole listing
//
// Any failure here is fatal for the run: without a list there is nothing to
// fetch.
// =============================================================================

use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::DiscoveryError;

// One entry of payload.tree.items. Only the name matters.
#[derive(Debug, Deserialize)]
struct TreeItem {
    name: String,
}

/// Lists the raw URLs of every file in the directory at `listing_url`
/// whose name starts with `prefix`, in the order GitHub lists them.
pub async fn discover_documents(
    client: &Client,
    listing_url: &str,
    raw_base_url: &str,
    prefix: &str,
) -> Result<Vec<String>, DiscoveryError> {
    let response = client.get(listing_url).send().await?;

    if !response.status().is_success() {
        return Err(DiscoveryError::Status {
            url: listing_url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let html = response.text().await?;
    let names = extract_file_names(&html, prefix)?;
    debug!(listing_url, matched = names.len(), "parsed listing page");

    let base = with_trailing_slash(raw_base_url);
    Ok(names
        .into_iter()
        .map(|name| format!("{}{}", base, name))
        .collect())
}

/// Pulls the matching file names out of a listing page.
///
/// Errors with `MissingPayload` when no script carries a file tree, with
/// `Json` when a script's content isn't JSON, and with `Shape` when a file
/// tree is there but its items don't look like files.
fn extract_file_names(html: &str, prefix: &str) -> Result<Vec<String>, DiscoveryError> {
    let document = Html::parse_document(html);
    // Constant selector, known to be valid
    let selector = Selector::parse(r#"script[type="application/json"]"#).unwrap();

    let mut found_tree = false;
    let mut names = Vec::new();

    for script in document.select(&selector) {
        let content: String = script.text().collect();
        let value: Value = serde_json::from_str(&content)?;

        // Most scripts are unrelated route or config data; anything without
        // an object at payload.tree is skipped.
        let items = value
            .get("payload")
            .and_then(Value::as_object)
            .and_then(|payload| payload.get("tree"))
            .and_then(Value::as_object)
            .and_then(|tree| tree.get("items"))
            .filter(|items| !items.is_null());

        if let Some(items) = items {
            let items: Vec<TreeItem> = serde_json::from_value(items.clone())
                .map_err(|e| DiscoveryError::Shape(e.to_string()))?;
            found_tree = true;
            names.extend(
                items
                    .into_iter()
                    .map(|item| item.name)
                    .filter(|name| name.starts_with(prefix)),
            );
        }
    }

    if !found_tree {
        return Err(DiscoveryError::MissingPayload);
    }

    Ok(names)
}

/// Derives the raw-content base URL from a GitHub tree URL.
///
/// Supported format:
///   https://github.com/<owner>/<repo>/tree/<branch>[/<path>...]
///
/// Example:
///   "https://github.com/rust-lang/book/tree/main/src"
///   -> "https://raw.githubusercontent.com/rust-lang/book/main/src/"
pub fn raw_base_from_listing(listing_url: &str) -> Result<String, DiscoveryError> {
    let invalid = || DiscoveryError::InvalidListingUrl(listing_url.to_string());

    let url = Url::parse(listing_url).map_err(|_| invalid())?;
    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(invalid()),
    }

    let parts: Vec<&str> = url
        .path_segments()
        .ok_or_else(invalid)?
        .filter(|s| !s.is_empty())
        .collect();

    // owner / repo / "tree" / branch / path...
    if parts.len() < 4 || parts[2] != "tree" {
        return Err(invalid());
    }

    let owner = parts[0];
    let repo = parts[1].trim_end_matches(".git");
    let rest = parts[3..].join("/");

    Ok(format!(
        "https://raw.githubusercontent.com/{}/{}/{}/",
        owner, repo, rest
    ))
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}
