//! Permission chains
//!
//! A view declares an ordered list of permission policies bound to a model.
//! Each policy appends its permission strings (`<app_label>.<action>_<model>`)
//! to the chain, and may gate the request on the current workflow state of the
//! object. The user must hold every accumulated permission.

use std::collections::HashMap;

use bmf_types::meta_adapter::User;

use crate::module::ModuleRegistry;
use crate::prelude::*;
use crate::workflow::WorkflowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermAction {
	View,
	Add,
	Change,
	Delete,
	Clone,
}

impl PermAction {
	pub const ALL: [PermAction; 5] =
		[PermAction::View, PermAction::Add, PermAction::Change, PermAction::Delete, PermAction::Clone];

	pub fn as_str(&self) -> &'static str {
		match self {
			PermAction::View => "view",
			PermAction::Add => "add",
			PermAction::Change => "change",
			PermAction::Delete => "delete",
			PermAction::Clone => "clone",
		}
	}
}

/// Resolved permission strings of every registered model
#[derive(Debug, Default)]
pub struct PermissionTable {
	perms: HashMap<(ModelId, PermAction), Box<str>>,
}

impl PermissionTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_modules(modules: &ModuleRegistry) -> Self {
		let mut table = Self::new();
		for module in modules.iter() {
			table.add_model(&module.model);
		}
		table
	}

	pub fn add_model(&mut self, model: &ModelId) {
		for action in PermAction::ALL {
			let perm = format!("{}.{}_{}", model.app_label, action.as_str(), model.model_name);
			self.perms.insert((model.clone(), action), perm.into());
		}
	}

	pub fn get(&self, model: &ModelId, action: PermAction) -> Option<&str> {
		self.perms.get(&(model.clone(), action)).map(AsRef::as_ref)
	}

	pub fn require(&self, model: &ModelId, action: PermAction) -> ClResult<&str> {
		self.get(model, action).ok_or_else(|| {
			Error::ConfigError(format!("No '{}' permission registered for {}", action.as_str(), model))
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPolicy {
	ModuleView,
	ModuleCreate,
	ModuleClone,
	ModuleUpdate,
	ModuleDelete,
}

impl PermissionPolicy {
	/// Actions appended by this policy, in order
	pub fn actions(&self) -> &'static [PermAction] {
		match self {
			PermissionPolicy::ModuleView => &[PermAction::View],
			PermissionPolicy::ModuleCreate => &[PermAction::Add, PermAction::View],
			PermissionPolicy::ModuleClone => &[PermAction::Clone, PermAction::View],
			PermissionPolicy::ModuleUpdate => &[PermAction::Change, PermAction::View],
			PermissionPolicy::ModuleDelete => &[PermAction::Delete, PermAction::View],
		}
	}

	/// Whether the policy depends on the workflow state of the object
	pub fn is_gated(&self) -> bool {
		matches!(self, PermissionPolicy::ModuleUpdate | PermissionPolicy::ModuleDelete)
	}

	fn gate(&self, state: &WorkflowState) -> bool {
		match self {
			PermissionPolicy::ModuleUpdate => state.update,
			PermissionPolicy::ModuleDelete => state.delete,
			_ => true,
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct PermissionChain {
	model: Option<ModelId>,
	policies: Vec<PermissionPolicy>,
	ajax_only: bool,
	permissions: Vec<Box<str>>,
}

impl PermissionChain {
	/// Chain without policies: only the login requirement applies
	pub fn base() -> Self {
		Self::default()
	}

	pub fn builder() -> PermissionChainBuilder {
		PermissionChainBuilder::default()
	}

	pub fn model(&self) -> Option<&ModelId> {
		self.model.as_ref()
	}

	pub fn policies(&self) -> &[PermissionPolicy] {
		&self.policies
	}

	pub fn ajax_only(&self) -> bool {
		self.ajax_only
	}

	/// Accumulated permission strings, in chain order. Duplicates are kept.
	pub fn get_permissions(&self) -> &[Box<str>] {
		&self.permissions
	}

	/// Whether `check_permissions` needs the workflow state of an object
	pub fn needs_object(&self) -> bool {
		self.policies.iter().any(PermissionPolicy::is_gated)
	}

	/// Request and object level checks. Runs before the permission strings
	/// are checked against the user.
	pub fn check_permissions(&self, is_ajax: bool, state: Option<&WorkflowState>) -> bool {
		if self.ajax_only && !is_ajax {
			return false;
		}
		self.policies.iter().filter(|p| p.is_gated()).all(|p| state.is_some_and(|s| p.gate(s)))
	}

	pub fn is_allowed(&self, user: &User, is_ajax: bool, state: Option<&WorkflowState>) -> bool {
		self.check_permissions(is_ajax, state) && user.has_perms(self.permissions.as_slice())
	}
}

#[derive(Debug, Default)]
pub struct PermissionChainBuilder {
	model: Option<ModelId>,
	policies: Vec<PermissionPolicy>,
	ajax_only: bool,
}

impl PermissionChainBuilder {
	pub fn model(mut self, model: ModelId) -> Self {
		self.model = Some(model);
		self
	}

	pub fn policy(mut self, policy: PermissionPolicy) -> Self {
		self.policies.push(policy);
		self
	}

	pub fn ajax_only(mut self, ajax_only: bool) -> Self {
		self.ajax_only = ajax_only;
		self
	}

	/// Resolves the permission strings of the chain from the table
	pub fn build(self, table: &PermissionTable) -> ClResult<PermissionChain> {
		let mut permissions = Vec::new();
		if !self.policies.is_empty() {
			let model = self.model.as_ref().ok_or_else(|| {
				Error::ConfigError("Permission chain has policies but no model".into())
			})?;
			for policy in &self.policies {
				for action in policy.actions() {
					permissions.push(Box::from(table.require(model, *action)?));
				}
			}
		}

		Ok(PermissionChain {
			model: self.model,
			policies: self.policies,
			ajax_only: self.ajax_only,
			permissions,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bmf_types::types::UserId;

	fn invoice() -> ModelId {
		ModelId::new("accounting", "invoice")
	}

	fn table() -> PermissionTable {
		let mut table = PermissionTable::new();
		table.add_model(&invoice());
		table
	}

	fn user(perms: &[&str]) -> User {
		User {
			user_id: UserId(7),
			username: "bob".into(),
			is_active: true,
			is_superuser: false,
			permissions: perms.iter().map(|p| Box::from(*p)).collect(),
			employee: Some(1),
		}
	}

	#[test]
	fn test_chain_accumulates_in_order() {
		let chain = PermissionChain::builder()
			.model(invoice())
			.policy(PermissionPolicy::ModuleView)
			.policy(PermissionPolicy::ModuleUpdate)
			.policy(PermissionPolicy::ModuleClone)
			.build(&table())
			.expect("valid chain");

		let perms: Vec<&str> = chain.get_permissions().iter().map(AsRef::as_ref).collect();
		assert_eq!(
			perms,
			vec![
				"accounting.view_invoice",
				"accounting.change_invoice",
				"accounting.view_invoice",
				"accounting.clone_invoice",
				"accounting.view_invoice",
			]
		);
	}

	#[test]
	fn test_base_chain_is_empty() {
		let chain = PermissionChain::base();
		assert!(chain.get_permissions().is_empty());
		assert!(chain.check_permissions(false, None));
		assert!(chain.is_allowed(&user(&[]), false, None));
	}

	#[test]
	fn test_missing_model_or_table_entry() {
		let res = PermissionChain::builder().policy(PermissionPolicy::ModuleView).build(&table());
		assert!(matches!(res, Err(Error::ConfigError(_))));

		let res = PermissionChain::builder()
			.model(ModelId::new("accounting", "payment"))
			.policy(PermissionPolicy::ModuleView)
			.build(&table());
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_workflow_gate_overrides_permissions() {
		let chain = PermissionChain::builder()
			.model(invoice())
			.policy(PermissionPolicy::ModuleUpdate)
			.build(&table())
			.expect("valid chain");
		let admin = User { is_superuser: true, ..user(&[]) };
		let open = WorkflowState::new("open", "Open");
		let paid = WorkflowState::new("paid", "Paid").update(false);

		assert!(chain.needs_object());
		assert!(chain.is_allowed(&admin, false, Some(&open)));
		assert!(!chain.is_allowed(&admin, false, Some(&paid)));
		assert!(!chain.is_allowed(&admin, false, None));

		let delete = PermissionChain::builder()
			.model(invoice())
			.policy(PermissionPolicy::ModuleDelete)
			.build(&table())
			.expect("valid chain");
		let locked = WorkflowState::new("locked", "Locked").delete(false);
		let editor = user(&["accounting.delete_invoice", "accounting.view_invoice"]);
		assert!(delete.is_allowed(&editor, false, Some(&open)));
		assert!(!delete.is_allowed(&editor, false, Some(&locked)));
	}

	#[test]
	fn test_ajax_only() {
		let chain = PermissionChain::builder()
			.model(invoice())
			.policy(PermissionPolicy::ModuleCreate)
			.ajax_only(true)
			.build(&table())
			.expect("valid chain");
		let editor = user(&["accounting.add_invoice", "accounting.view_invoice"]);
		assert!(chain.is_allowed(&editor, true, None));
		assert!(!chain.is_allowed(&editor, false, None));
		assert!(!chain.is_allowed(&user(&["accounting.view_invoice"]), true, None));
	}
}

// vim: ts=4
