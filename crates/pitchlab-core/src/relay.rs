//! Target-tab resolution and broadcast delivery.
//!
//! Chrome delivers a tab message to every frame in the tab; each frame
//! agent decides on its own whether to answer. [`fan_out`] models that for
//! in-process delivery, and [`Relay`] holds the selection policy used by
//! both the panel and the background worker.

use crate::constants::TARGET_URL_PATTERNS;
use crate::error::{PitchLabError, Result};
use crate::messages::{Request, Response};
use serde::Deserialize;
use url::Url;

/// The subset of `chrome.tabs.Tab` the relay reads.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Anything that can take a broadcast and optionally answer it.
pub trait Receiver {
    fn receive(&mut self, request: &Request) -> Option<Response>;
}

/// Deliver `request` to every receiver, collecting whatever replies come back.
pub fn fan_out<R: Receiver + ?Sized>(receivers: &mut [&mut R], request: &Request) -> Vec<Response> {
    receivers
        .iter_mut()
        .filter_map(|r| r.receive(request))
        .collect()
}

/// First reply wins; later receivers still see the request.
pub fn first_response<R: Receiver + ?Sized>(
    receivers: &mut [&mut R],
    request: &Request,
) -> Option<Response> {
    fan_out(receivers, request).into_iter().next()
}

#[derive(Clone, Debug)]
pub struct Relay {
    patterns: &'static [&'static str],
}

impl Default for Relay {
    fn default() -> Self {
        Self {
            patterns: TARGET_URL_PATTERNS,
        }
    }
}

impl Relay {
    pub fn new(patterns: &'static [&'static str]) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &'static [&'static str] {
        self.patterns
    }

    pub fn allows(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| match_pattern(p, url))
    }

    /// Pick the tab to drive: the last allow-listed tab in query order.
    ///
    /// Tabs reported without a URL are trusted, since the query itself was
    /// already filtered by the same patterns.
    pub fn select_target(&self, tabs: &[TabInfo]) -> Result<i32> {
        let tab = tabs
            .iter()
            .rev()
            .find(|t| t.url.as_deref().map_or(true, |u| self.allows(u)))
            .ok_or(PitchLabError::NoMatchingTab)?;
        tab.id.ok_or(PitchLabError::MissingTabId)
    }

    /// Background variant: a panel `SET_RATE` becomes an `APPLY_RATE` for
    /// the content script. Everything else is not ours to forward.
    pub fn forward(&self, incoming: &Request) -> Option<Request> {
        match *incoming {
            Request::SetRate { rate } if rate.is_finite() => Some(Request::ApplyRate { value: rate }),
            Request::SetRate { rate } => {
                log::warn!("[relay] {}", PitchLabError::InvalidRate(rate));
                None
            }
            _ => None,
        }
    }

    /// Fire-and-forget bookkeeping: failures only ever reach the log.
    pub fn report_delivery(&self, outcome: Result<Option<Response>>) {
        match outcome {
            Ok(Some(response)) => log::info!("[relay] response from tab: {:?}", response),
            Ok(None) => log::info!("[relay] delivered, no frame answered"),
            Err(e) => log::warn!("[relay] {}", e),
        }
    }
}

/// Chrome match patterns of the `scheme://host/path` form, with `*` for
/// any scheme, `*.` for a domain and its subdomains, and `*` in paths.
///
/// The URL goes through a real parser, so userinfo, query and fragment
/// text can never pose as the host.
pub fn match_pattern(pattern: &str, url: &str) -> bool {
    let Some((p_scheme, p_rest)) = pattern.split_once("://") else {
        return false;
    };
    let Some(slash) = p_rest.find('/') else {
        return false;
    };
    let (p_host, p_path) = p_rest.split_at(slash);
    let Ok(url) = Url::parse(url) else {
        return false;
    };
    let scheme_ok = match p_scheme {
        "*" => matches!(url.scheme(), "http" | "https"),
        s => s == url.scheme(),
    };
    let Some(u_host) = url.host_str() else {
        return false;
    };
    let host_ok = match p_host {
        "*" => true,
        h => match h.strip_prefix("*.") {
            Some(domain) => u_host == domain || u_host.ends_with(&format!(".{domain}")),
            None => u_host == h,
        },
    };
    let u_path = match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    };
    scheme_ok && host_ok && glob_match(p_path, &u_path)
}

fn glob_match(pattern: &str, text: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == text,
        Some((head, tail)) => {
            let Some(rest) = text.strip_prefix(head) else {
                return false;
            };
            (0..=rest.len())
                .filter(|&i| rest.is_char_boundary(i))
                .any(|i| glob_match(tail, &rest[i..]))
        }
    }
}
