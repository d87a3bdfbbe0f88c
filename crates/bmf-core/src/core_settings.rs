//! Core BMF settings registration

use crate::prelude::*;
use crate::settings::{SettingDefinition, SettingValue, SettingsRegistry};

/// Register all core settings
pub fn register_settings(registry: &mut SettingsRegistry) -> ClResult<()> {
	registry.register(
		SettingDefinition::builder("bmf.default_language")
			.description("Language used when the request does not name one")
			.default(SettingValue::String("en".into()))
			.build()?,
	)?;

	// Users need a linked employee record to access the BMF
	registry.register(
		SettingDefinition::builder("bmf.employee_required")
			.description("Require an employee record for every BMF user")
			.default(SettingValue::Bool(false))
			.build()?,
	)?;

	Ok(())
}

// vim: ts=4
