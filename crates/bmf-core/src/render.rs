//! HTML rendering with Handlebars
//!
//! Module views render their HTML fragments through named templates. A
//! default template is registered for every module view; applications may
//! replace them before the app is built.

use handlebars::Handlebars;
use serde::Serialize;

use crate::prelude::*;

pub const TEMPLATE_LIST: &str = "module/list";
pub const TEMPLATE_DETAIL: &str = "module/detail";
pub const TEMPLATE_FORM: &str = "module/form";
pub const TEMPLATE_DELETE: &str = "module/delete";

const DEFAULT_LIST: &str = r#"<div class="bmf-list">
<h1>{{bmfmodule.verbose_name_plural}}</h1>
<ul>
{{#each objects}}<li data-pk="{{pk}}">{{name}}</li>
{{/each}}</ul>
</div>"#;

const DEFAULT_DETAIL: &str = r#"<div class="bmf-detail" data-pk="{{object.pk}}">
<h1>{{object.name}}</h1>
{{#if bmfworkflow.enabled}}<p class="bmf-state">{{bmfworkflow.state.name}}</p>
<ul class="bmf-transitions">
{{#each bmfworkflow.transitions}}<li data-key="{{key}}">{{name}}</li>
{{/each}}</ul>
{{/if}}</div>"#;

const DEFAULT_FORM: &str = r#"<form class="bmf-form" method="post" action="{{action}}">
<input type="text" name="name" value="{{object.name}}">
<button type="submit">{{submit}}</button>
</form>"#;

const DEFAULT_DELETE: &str = r#"<form class="bmf-delete" method="post" action="{{action}}">
<p>{{object.name}}</p>
<button type="submit">Delete</button>
</form>"#;

pub struct Renderer {
	handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for Renderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Renderer")
			.field("templates", &self.handlebars.get_templates().len())
			.finish()
	}
}

impl Renderer {
	/// Creates a renderer with the default module templates
	pub fn new() -> ClResult<Self> {
		let mut renderer = Self { handlebars: Handlebars::new() };
		renderer.register_template(TEMPLATE_LIST, DEFAULT_LIST)?;
		renderer.register_template(TEMPLATE_DETAIL, DEFAULT_DETAIL)?;
		renderer.register_template(TEMPLATE_FORM, DEFAULT_FORM)?;
		renderer.register_template(TEMPLATE_DELETE, DEFAULT_DELETE)?;
		Ok(renderer)
	}

	/// Registers or replaces a template
	pub fn register_template(&mut self, name: &str, template: &str) -> ClResult<()> {
		self.handlebars.register_template_string(name, template).map_err(|e| {
			Error::ConfigError(format!("Invalid template '{}': {}", name, e))
		})
	}

	pub fn render<T: Serialize>(&self, name: &str, context: &T) -> ClResult<String> {
		self.handlebars.render(name, context).map_err(|e| {
			warn!("Failed to render template {}: {}", name, e);
			Error::Internal(format!("template rendering failed: {}", e))
		})
	}
}


// vim: ts=4
