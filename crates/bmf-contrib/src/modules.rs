//! Modules of the built-in applications

use bmf_core::module::{ModuleDef, ModuleRegistry};
use bmf_core::workflow::{Workflow, WorkflowState, WorkflowTransition};
use bmf_types::error::ClResult;
use tracing::info;

use crate::categories::{CUSTOMER, EMPLOYEES, TRANSACTIONS};

// Accounting //
//************//
/// Invoices can not be changed once paid, and never deleted once opened
pub fn invoice_workflow() -> ClResult<Workflow> {
	Workflow::new(
		vec![
			WorkflowState::new("draft", "Draft"),
			WorkflowState::new("open", "Open").delete(false),
			WorkflowState::new("paid", "Paid").update(false).delete(false),
			WorkflowState::new("cancelled", "Cancelled").update(false),
		],
		vec![
			WorkflowTransition::new("open", "Open", &["draft"], "open"),
			WorkflowTransition::new("pay", "Set paid", &["open"], "paid"),
			WorkflowTransition::new("cancel", "Cancel", &["draft", "open"], "cancelled"),
			WorkflowTransition::new("draft", "Set to draft", &["open", "cancelled"], "draft"),
		],
	)
}

pub fn invoice() -> ClResult<ModuleDef> {
	ModuleDef::builder("djangobmf_accounting", "invoice")
		.verbose_name("Invoice")
		.category(TRANSACTIONS.slug)
		.create_view("invoice", "Invoice")
		.create_view("credit", "Credit note")
		.has_report(true)
		.can_clone(true)
		.workflow(invoice_workflow()?)
		.build()
}

pub fn transaction() -> ClResult<ModuleDef> {
	ModuleDef::builder("djangobmf_accounting", "transaction")
		.verbose_name("Transaction")
		.category(TRANSACTIONS.slug)
		.workflow(Workflow::new(
			vec![
				WorkflowState::new("draft", "Draft"),
				WorkflowState::new("balanced", "Balanced").update(false).delete(false),
			],
			vec![WorkflowTransition::new("balance", "Balance", &["draft"], "balanced")],
		)?)
		.build()
}

// Customer //
//**********//
pub fn customer() -> ClResult<ModuleDef> {
	ModuleDef::builder("djangobmf_customer", "customer")
		.verbose_name("Customer")
		.category(CUSTOMER.slug)
		.create_view("company", "Company")
		.create_view("person", "Person")
		.can_clone(true)
		.build()
}

// Employee //
//**********//
pub fn employee() -> ClResult<ModuleDef> {
	ModuleDef::builder("djangobmf_employee", "employee")
		.verbose_name("Employee")
		.category(EMPLOYEES.slug)
		.build()
}

pub fn register_modules(registry: &mut ModuleRegistry) -> ClResult<()> {
	for module in [invoice()?, transaction()?, customer()?, employee()?] {
		registry.register(module)?;
	}
	info!("Registered {} built-in modules", registry.len());
	Ok(())
}


// vim: ts=4
