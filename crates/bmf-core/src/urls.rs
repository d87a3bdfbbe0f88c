//! Named routes and URL reversal
//!
//! Patterns use the same `{param}` placeholders as the axum routes they
//! describe, e.g. `/api/module/accounting/invoice/{pk}`.

use std::collections::HashMap;

use crate::prelude::*;

#[derive(Debug, Default)]
pub struct UrlRegistry {
	routes: HashMap<Box<str>, Box<str>>,
}

impl UrlRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, name: impl Into<Box<str>>, pattern: impl Into<Box<str>>) -> ClResult<()> {
		let name = name.into();
		if self.routes.contains_key(&name) {
			return Err(Error::ConfigError(format!("Route '{}' is already registered", name)));
		}
		self.routes.insert(name, pattern.into());
		Ok(())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.routes.contains_key(name)
	}

	/// Builds the URL of a named route. Every placeholder must be given and
	/// every given argument must be used.
	pub fn reverse<K, V>(&self, name: &str, kwargs: impl IntoIterator<Item = (K, V)>) -> ClResult<String>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let pattern = self
			.routes
			.get(name)
			.ok_or_else(|| Error::NoReverseMatch(format!("unknown route '{}'", name)))?;
		let kwargs: HashMap<String, String> = kwargs
			.into_iter()
			.map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
			.collect();

		let mut res = String::with_capacity(pattern.len());
		let mut used = 0;
		let mut rest: &str = pattern;
		while let Some(start) = rest.find('{') {
			res.push_str(&rest[..start]);
			let Some(end) = rest[start..].find('}') else {
				return Err(Error::NoReverseMatch(format!("malformed pattern of '{}'", name)));
			};
			let param = &rest[start + 1..start + end];
			let value = kwargs.get(param).ok_or_else(|| {
				Error::NoReverseMatch(format!("route '{}' needs argument '{}'", name, param))
			})?;
			res.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
			used += 1;
			rest = &rest[start + end + 1..];
		}
		res.push_str(rest);

		if used != kwargs.len() {
			return Err(Error::NoReverseMatch(format!("unexpected arguments for route '{}'", name)));
		}
		Ok(res)
	}
}


// vim: ts=4
