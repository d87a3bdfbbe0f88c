//! Categories group the registered modules in the user interface

use serde::Serialize;

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
	pub name: &'static str,
	pub slug: &'static str,
}

impl Category {
	pub const fn new(name: &'static str, slug: &'static str) -> Self {
		Self { name, slug }
	}
}

/// Site-wide category registry. Keeps registration order.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
	categories: Vec<Category>,
}

impl CategoryRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, category: Category) -> ClResult<()> {
		if self.get(category.slug).is_some() {
			return Err(Error::ConfigError(format!(
				"Category '{}' is already registered",
				category.slug
			)));
		}
		debug!("Registering category: {}", category.slug);
		self.categories.push(category);
		Ok(())
	}

	pub fn get(&self, slug: &str) -> Option<&Category> {
		self.categories.iter().find(|c| c.slug == slug)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Category> {
		self.categories.iter()
	}

	pub fn len(&self) -> usize {
		self.categories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_register_keeps_order() {
		let mut registry = CategoryRegistry::new();
		assert!(registry.register(Category::new("Customer", "customer")).is_ok());
		assert!(registry.register(Category::new("Employees", "employees")).is_ok());

		let slugs: Vec<_> = registry.iter().map(|c| c.slug).collect();
		assert_eq!(slugs, vec!["customer", "employees"]);
	}

	#[test]
	fn test_duplicate_slug() {
		let mut registry = CategoryRegistry::new();
		assert!(registry.register(Category::new("Customer", "customer")).is_ok());
		let res = registry.register(Category::new("Customers", "customer"));
		assert!(matches!(res, Err(Error::ConfigError(_))));
		assert_eq!(registry.len(), 1);
	}
}

// vim: ts=4
