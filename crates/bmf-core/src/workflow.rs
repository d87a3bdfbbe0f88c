//! Workflow definitions of BMF modules
//!
//! A workflow is a set of states and the transitions between them. The current
//! state of an object carries its own `update` and `delete` flags, which can
//! forbid an action even when the user holds the matching permission.

use serde::Serialize;

use bmf_types::meta_adapter::ModuleObject;

use crate::prelude::*;

pub const DEFAULT_STATE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
	pub key: Box<str>,
	pub name: Box<str>,
	pub update: bool,
	pub delete: bool,
}

impl WorkflowState {
	pub fn new(key: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
		Self { key: key.into(), name: name.into(), update: true, delete: true }
	}

	pub fn update(mut self, update: bool) -> Self {
		self.update = update;
		self
	}

	pub fn delete(mut self, delete: bool) -> Self {
		self.delete = delete;
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowTransition {
	pub key: Box<str>,
	pub name: Box<str>,
	pub sources: Vec<Box<str>>,
	pub target: Box<str>,
}

impl WorkflowTransition {
	pub fn new(
		key: impl Into<Box<str>>,
		name: impl Into<Box<str>>,
		sources: &[&str],
		target: impl Into<Box<str>>,
	) -> Self {
		Self {
			key: key.into(),
			name: name.into(),
			sources: sources.iter().map(|s| Box::from(*s)).collect(),
			target: target.into(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Workflow {
	states: Vec<WorkflowState>,
	transitions: Vec<WorkflowTransition>,
	initial: Box<str>,
}

impl Workflow {
	/// Creates a workflow. The first state is the initial state.
	pub fn new(states: Vec<WorkflowState>, transitions: Vec<WorkflowTransition>) -> ClResult<Self> {
		let initial = states
			.first()
			.map(|s| s.key.clone())
			.ok_or_else(|| Error::ConfigError("Workflow needs at least one state".into()))?;

		for transition in &transitions {
			let known = |key: &str| states.iter().any(|s| s.key.as_ref() == key);
			if !known(transition.target.as_ref())
				|| !transition.sources.iter().all(|s| known(s.as_ref()))
			{
				return Err(Error::ConfigError(format!(
					"Workflow transition '{}' refers to an unknown state",
					transition.key
				)));
			}
		}

		Ok(Self { states, transitions, initial })
	}

	/// A workflow is enabled if it has any transitions
	pub fn enabled(&self) -> bool {
		!self.transitions.is_empty()
	}

	pub fn initial(&self) -> &str {
		&self.initial
	}

	pub fn state(&self, key: &str) -> Option<&WorkflowState> {
		self.states.iter().find(|s| s.key.as_ref() == key)
	}

	pub fn states(&self) -> &[WorkflowState] {
		&self.states
	}

	/// Current state of an object. Objects without a state are in the initial state.
	pub fn current_state(&self, object: &ModuleObject) -> ClResult<&WorkflowState> {
		let key = object.state.as_deref().unwrap_or(&self.initial);
		self.state(key).ok_or_else(|| {
			Error::Internal(format!("Object {} of {} has unknown state '{}'", object.pk, object.model, key))
		})
	}

	/// Transitions available from the object's current state
	pub fn from_here(&self, object: &ModuleObject) -> Vec<&WorkflowTransition> {
		let key = object.state.as_deref().unwrap_or(&self.initial);
		self.transitions.iter().filter(|t| t.sources.iter().any(|s| s.as_ref() == key)).collect()
	}
}

impl Default for Workflow {
	/// Single state workflow which allows every action
	fn default() -> Self {
		Self {
			states: vec![WorkflowState::new(DEFAULT_STATE, "Default")],
			transitions: Vec::new(),
			initial: DEFAULT_STATE.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn invoice_workflow() -> Workflow {
		Workflow::new(
			vec![
				WorkflowState::new("draft", "Draft"),
				WorkflowState::new("open", "Open").delete(false),
				WorkflowState::new("paid", "Paid").update(false).delete(false),
			],
			vec![
				WorkflowTransition::new("open", "Open", &["draft"], "open"),
				WorkflowTransition::new("pay", "Pay", &["open"], "paid"),
				WorkflowTransition::new("reopen", "Reopen", &["open", "paid"], "draft"),
			],
		)
		.expect("valid workflow")
	}

	fn object(state: Option<&str>) -> ModuleObject {
		ModuleObject {
			pk: 1,
			model: ModelId::new("accounting", "invoice"),
			name: "INV-1".into(),
			state: state.map(Box::from),
			data: serde_json::Value::Null,
			created_at: Timestamp(0),
		}
	}

	#[test]
	fn test_current_state_defaults_to_initial() {
		let wf = invoice_workflow();
		let state = wf.current_state(&object(None)).expect("state");
		assert_eq!(state.key.as_ref(), "draft");
		assert!(state.update && state.delete);
	}

	#[test]
	fn test_from_here() {
		let wf = invoice_workflow();
		let keys: Vec<_> = wf.from_here(&object(Some("open"))).iter().map(|t| t.key.as_ref()).collect();
		assert_eq!(keys, vec!["pay", "reopen"]);
	}

	#[test]
	fn test_unknown_state() {
		let wf = invoice_workflow();
		assert!(wf.current_state(&object(Some("archived"))).is_err());
	}

	#[test]
	fn test_invalid_transition() {
		let res = Workflow::new(
			vec![WorkflowState::new("a", "A")],
			vec![WorkflowTransition::new("go", "Go", &["a"], "b")],
		);
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_default_workflow() {
		let wf = Workflow::default();
		assert!(!wf.enabled());
		assert_eq!(wf.initial(), DEFAULT_STATE);
	}
}

// vim: ts=4
