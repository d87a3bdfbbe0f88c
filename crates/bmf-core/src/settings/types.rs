//! Settings types and definitions
//!
//! Feature crates register their setting definitions at startup. The registry
//! is then frozen together with the configured values (environment overrides),
//! and becomes read-only for the lifetime of the application.

use std::{collections::HashMap, fmt::Debug};

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> ClResult<()> + Send + Sync>;

/// Environment variable prefix for setting overrides
pub const ENV_PREFIX: &str = "BMF_";

/// Setting value types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
	Bool(bool),
	String(String),
}

impl SettingValue {
	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Bool(_) => "bool",
		}
	}

	/// Parse a raw (environment) string into a value of the same type as `like`
	pub fn parse_like(raw: &str, like: &SettingValue) -> ClResult<SettingValue> {
		match like {
			SettingValue::String(_) => Ok(SettingValue::String(raw.to_string())),
			SettingValue::Bool(_) => match raw.trim().to_ascii_lowercase().as_str() {
				"1" | "true" | "yes" | "on" => Ok(SettingValue::Bool(true)),
				"0" | "false" | "no" | "off" => Ok(SettingValue::Bool(false)),
				_ => Err(Error::ValidationError(format!("expected bool, got '{}'", raw))),
			},
		}
	}
}

/// Setting definition - defines metadata for each setting
pub struct SettingDefinition {
	/// Dot-separated key (e.g., "document.sendtype")
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Default value, also determines the type of the setting
	pub default: SettingValue,

	/// Optional validation function
	pub validator: Option<SettingValidator>,
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}

	/// Name of the environment variable overriding this setting
	pub fn env_name(&self) -> String {
		format!("{}{}", ENV_PREFIX, self.key.replace('.', "_").to_ascii_uppercase())
	}

	fn validate(&self, value: &SettingValue) -> ClResult<()> {
		if let Some(validator) = &self.validator {
			validator(value)?;
		}
		Ok(())
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<SettingValue>,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into(), description: None, default: None, validator: None }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (required)
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Set a validation function
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> ClResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> ClResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;
		let default = self
			.default
			.ok_or_else(|| Error::ConfigError(format!("Setting '{}' has no default", self.key)))?;

		Ok(SettingDefinition { key: self.key, description, default, validator: self.validator })
	}
}

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> ClResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		tracing::debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry, resolving every setting from the given variables
	/// (usually `std::env::vars()`) or its default
	pub fn freeze<I, K, V>(self, vars: I) -> ClResult<FrozenSettingsRegistry>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let vars: HashMap<String, String> = vars
			.into_iter()
			.filter(|(k, _)| k.as_ref().starts_with(ENV_PREFIX))
			.map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
			.collect();

		let mut values = HashMap::new();
		for def in self.definitions.values() {
			let value = match vars.get(&def.env_name()) {
				Some(raw) => {
					let value = SettingValue::parse_like(raw, &def.default)?;
					def.validate(&value)?;
					tracing::info!("Setting '{}' configured from {}", def.key, def.env_name());
					value
				}
				None => def.default.clone(),
			};
			values.insert(def.key.clone(), value);
		}

		tracing::info!("Freezing settings registry with {} definitions", self.definitions.len());
		Ok(FrozenSettingsRegistry { values })
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
#[derive(Debug)]
pub struct FrozenSettingsRegistry {
	values: HashMap<String, SettingValue>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, key: &str) -> Option<&SettingValue> {
		self.values.get(key)
	}

	pub fn get_str(&self, key: &str) -> ClResult<&str> {
		match self.get(key) {
			Some(SettingValue::String(s)) => Ok(s),
			Some(v) => Err(Error::ConfigError(format!(
				"Setting '{}' is {}, not string",
				key,
				v.type_name()
			))),
			None => Err(Error::ConfigError(format!("Unknown setting: {}", key))),
		}
	}

	pub fn get_bool(&self, key: &str) -> ClResult<bool> {
		match self.get(key) {
			Some(SettingValue::Bool(b)) => Ok(*b),
			Some(v) => {
				Err(Error::ConfigError(format!("Setting '{}' is {}, not bool", key, v.type_name())))
			}
			None => Err(Error::ConfigError(format!("Unknown setting: {}", key))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn registry() -> SettingsRegistry {
		let mut registry = SettingsRegistry::new();
		let _ = registry.register(
			SettingDefinition::builder("document.sendtype")
				.description("File sending strategy")
				.default(SettingValue::String("direct".into()))
				.build()
				.expect("valid definition"),
		);
		let _ = registry.register(
			SettingDefinition::builder("bmf.employee_required")
				.description("Require employee linkage")
				.default(SettingValue::Bool(false))
				.build()
				.expect("valid definition"),
		);
		registry
	}

	#[test]
	fn test_env_name() {
		let def = SettingDefinition::builder("document.sendtype")
			.description("x")
			.default(SettingValue::String("direct".into()))
			.build()
			.expect("valid definition");
		assert_eq!(def.env_name(), "BMF_DOCUMENT_SENDTYPE");
	}

	#[test]
	fn test_freeze_defaults() {
		let frozen = registry().freeze(Vec::<(String, String)>::new()).expect("frozen settings");
		assert_eq!(frozen.get_str("document.sendtype").ok(), Some("direct"));
		assert_eq!(frozen.get_bool("bmf.employee_required").ok(), Some(false));
	}

	#[test]
	fn test_freeze_overrides() {
		let vars = [("BMF_DOCUMENT_SENDTYPE", "xaccel"), ("BMF_BMF_EMPLOYEE_REQUIRED", "yes")];
		let frozen = registry().freeze(vars).expect("frozen settings");
		assert_eq!(frozen.get_str("document.sendtype").ok(), Some("xaccel"));
		assert_eq!(frozen.get_bool("bmf.employee_required").ok(), Some(true));
	}

	#[test]
	fn test_freeze_rejects_bad_type() {
		let vars = [("BMF_BMF_EMPLOYEE_REQUIRED", "maybe")];
		assert!(registry().freeze(vars).is_err());
	}

	#[test]
	fn test_duplicate_registration() {
		let mut registry = registry();
		let def = SettingDefinition::builder("document.sendtype")
			.description("again")
			.default(SettingValue::String("xaccel".into()))
			.build()
			.expect("valid definition");
		assert!(matches!(registry.register(def), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_default_required() {
		let res = SettingDefinition::builder("bmf.secret").description("no default").build();
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
