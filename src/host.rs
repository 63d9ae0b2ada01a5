//! Narrow interfaces onto the host application.
//!
//! The mapping core never talks to a scene directly. Whatever runs the tool
//! implements these traits; every call happens on the single control thread
//! that drives the session, so none of them need to be `Send` or `Sync`.

use std::path::PathBuf;

use crate::axis::SkipArgument;
use crate::constraint::ConstraintKind;

pub trait SceneQuery {
	/// Currently selected objects, empty when nothing is selected.
	fn selection(&self) -> Vec<String>;

	/// Every descendant of `root`, in the order the host lists them
	/// (deepest first). Empty when there are none.
	fn descendants(&self, root: &str) -> Vec<String>;
}

pub trait ConstraintHost {
	type Handle;
	type Error: std::error::Error;

	/// Create a constraint of `kind` driving `target` from `source`.
	fn create_constraint(
		&mut self,
		kind: ConstraintKind,
		source: &str,
		target: &str,
		maintain_offset: bool,
		skip: &SkipArgument,
	) -> Result<Self::Handle, Self::Error>;

	fn find_nodes_by_type(&self, type_name: &str) -> Vec<String>;

	fn delete(&mut self, node: &str) -> Result<(), Self::Error>;
}

pub trait FileDialog {
	fn pick_save_file(&mut self, filter: &str) -> Option<PathBuf>;
	fn pick_open_file(&mut self, filter: &str) -> Option<PathBuf>;
}

/// Delete every constraint node of the given kinds, returning how many were
/// removed. Stops at the first host error.
pub fn delete_constraints<H: ConstraintHost>(
	host: &mut H,
	kinds: &[ConstraintKind],
) -> Result<usize, H::Error> {
	let mut count = 0;
	for kind in kinds {
		let nodes = host.find_nodes_by_type(kind.node_type());
		for node in nodes.iter() {
			host.delete(node)?;
			count += 1;
		}
	}
	log::info!("deleted {} constraint nodes", count);
	Ok(count)
}
