//! Object form submitted by the create, update and clone views

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ObjectForm {
	#[serde(default)]
	pub name: String,
	/// Object data as a JSON document
	pub data: Option<String>,
	/// Redirect target after a valid submission
	pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
	pub next: Option<String>,
}

/// Cleaned values of a valid form
#[derive(Debug, PartialEq)]
pub struct CleanedObject {
	pub name: String,
	pub data: Value,
}

impl ObjectForm {
	/// Validates the form. The error is the message shown to the user.
	pub fn clean(&self) -> Result<CleanedObject, String> {
		let name = self.name.trim();
		if name.is_empty() {
			return Err("name: This field is required.".into());
		}

		let data = match self.data.as_deref().map(str::trim) {
			None | Some("") => Value::Object(serde_json::Map::new()),
			Some(raw) => match serde_json::from_str::<Value>(raw) {
				Ok(data @ Value::Object(_)) => data,
				Ok(_) => return Err("data: Enter a JSON object.".into()),
				Err(_) => return Err("data: Enter valid JSON.".into()),
			},
		};

		Ok(CleanedObject { name: name.to_string(), data })
	}
}


// vim: ts=4
