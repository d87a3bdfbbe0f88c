//! Site categories of the built-in applications

use bmf_core::category::{Category, CategoryRegistry};
use bmf_types::error::ClResult;

pub const TRANSACTIONS: Category = Category::new("Transactions", "transactions");
pub const CUSTOMER: Category = Category::new("Customer", "customer");
pub const EMPLOYEES: Category = Category::new("Employees", "employees");

pub fn register_categories(registry: &mut CategoryRegistry) -> ClResult<()> {
	for category in [TRANSACTIONS, CUSTOMER, EMPLOYEES] {
		registry.register(category)?;
	}
	Ok(())
}


// vim: ts=4
