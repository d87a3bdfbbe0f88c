//! Document settings registration

use bmf_core::settings::{SettingDefinition, SettingValue, SettingsRegistry};

use crate::prelude::*;
use crate::send::SendType;

pub const SENDTYPE: &str = "document.sendtype";

/// Register all document settings
pub fn register_settings(registry: &mut SettingsRegistry) -> ClResult<()> {
	registry.register(
		SettingDefinition::builder(SENDTYPE)
			.description("How downloads are sent: xaccel (nginx), xsendfile (apache, lighttpd) or direct")
			.default(SettingValue::String("direct".into()))
			.validator(|value| match value {
				SettingValue::String(s) => s.parse::<SendType>().map(|_| ()),
				_ => Err(Error::ValidationError("document.sendtype must be a string".into())),
			})
			.build()?,
	)?;

	Ok(())
}


// vim: ts=4
