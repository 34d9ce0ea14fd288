// Link checker: a HEAD request per remote entry, one at a time. A failing
// link is a result, not an error; the loop always runs to the end.

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::catalog::{Catalog, ImageEntry};
use crate::error::Result;

/// Something that can tell whether a URL answers, and with which status.
pub trait LinkProbe {
    fn probe(&self, url: &str) -> anyhow::Result<u16>;
}

/// Blocking reqwest client with a per-request timeout. Redirects are
/// followed on purpose: GitHub answers `blob/...?raw=true` with a 302 to
/// the raw host, and only the final status says whether the file exists.
/// This differs from a plain HEAD that reports the 302 itself; a 3xx only
/// reaches `check_entry` from a `LinkProbe` that does not follow redirects.
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gallery-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpProbe { client })
    }
}

impl LinkProbe for HttpProbe {
    fn probe(&self, url: &str) -> anyhow::Result<u16> {
        let res = self
            .client
            .head(url)
            .send()
            .with_context(|| format!("HEAD {url}"))?;
        Ok(res.status().as_u16())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// Answered 200.
    Found,
    /// Answered with anything else.
    Unexpected(u16),
    /// No answer: timeout, DNS, TLS, connection refused...
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub alt: String,
    pub url: String,
    pub status: LinkStatus,
}

impl LinkReport {
    pub fn is_ok(&self) -> bool {
        self.status == LinkStatus::Found
    }

    /// One line in the style of the interactive menu.
    pub fn render(&self) -> String {
        match &self.status {
            LinkStatus::Found => format!("✅ {}", self.alt),
            LinkStatus::Unexpected(code) => format!("❌ {} {}", code, self.alt),
            LinkStatus::Failed(err) => format!("❌ {} - Error: {}", self.alt, err),
        }
    }
}

pub fn check_entry(entry: &ImageEntry, probe: &dyn LinkProbe) -> LinkReport {
    let status = match probe.probe(&entry.url) {
        Ok(200) => LinkStatus::Found,
        Ok(code) => LinkStatus::Unexpected(code),
        Err(err) => LinkStatus::Failed(format!("{err:#}")),
    };
    match &status {
        LinkStatus::Found => debug!(url = %entry.url, "link ok"),
        other => warn!(url = %entry.url, status = ?other, "link failed"),
    }
    LinkReport {
        alt: entry.alt.clone(),
        url: entry.url.clone(),
        status,
    }
}

/// Probe every remote entry in catalog order. `on_report` sees each result
/// as soon as it is known; local paths are skipped without a check.
pub fn check_links<F>(catalog: &Catalog, probe: &dyn LinkProbe, mut on_report: F) -> Vec<LinkReport>
where
    F: FnMut(&LinkReport),
{
    catalog
        .remote_images()
        .map(|entry| {
            let report = check_entry(entry, probe);
            on_report(&report);
            report
        })
        .collect()
}
