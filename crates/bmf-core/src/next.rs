//! Redirects honouring a `next` parameter

use url::Url;

use crate::prelude::*;
use crate::urls::UrlRegistry;

/// Chooses a redirect target: `next` unless it points to a foreign host,
/// then `success_url`, then the reversed `fallback` route.
pub fn redirect_next(
	urls: &UrlRegistry,
	next: Option<&str>,
	host: Option<&str>,
	success_url: Option<&str>,
	fallback: &str,
) -> ClResult<String> {
	if let Some(next) = next.filter(|n| !n.is_empty()) {
		if is_same_host(next, host) {
			return Ok(next.to_string());
		}
		debug!("Ignoring redirect to foreign host: {}", next);
	}

	if let Some(success_url) = success_url.filter(|u| !u.is_empty()) {
		return Ok(success_url.to_string());
	}

	urls.reverse::<&str, &str>(fallback, [])
}

fn is_same_host(next: &str, host: Option<&str>) -> bool {
	let host = host.unwrap_or("localhost");
	let Ok(base) = Url::parse(&format!("http://{}/", host)) else {
		return false;
	};
	let Ok(target) = base.join(next) else {
		return false;
	};

	let authority = match (target.host_str(), target.port()) {
		(Some(h), Some(port)) => format!("{}:{}", h, port),
		(Some(h), None) => h.to_string(),
		(None, _) => return false,
	};
	let base_authority = match (base.host_str(), base.port()) {
		(Some(h), Some(port)) => format!("{}:{}", h, port),
		(Some(h), None) => h.to_string(),
		(None, _) => return false,
	};
	authority == base_authority
}


// vim: ts=4
