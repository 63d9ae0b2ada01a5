//! The controller a UI panel drives.
//!
//! Each method handles one discrete UI event and runs to completion. Rejected
//! row operations and failed file operations are logged and returned; none of
//! them leave the session half-updated.

use std::path::{Path, PathBuf};

use crate::axis::Axis;
use crate::codec;
use crate::config::ToolConfig;
use crate::constraint::ConstraintKind;
use crate::error::{MappingError, Result};
use crate::host::{self, ConstraintHost, FileDialog, SceneQuery};
use crate::table::MappingTable;
use crate::SourceId;

#[derive(Clone, Debug, Default)]
pub struct MatchingSession {
	config: ToolConfig,
	root: Option<SourceId>,
	table: MappingTable,
}

fn reported<T>(r: Result<T>) -> Result<T> {
	if let Err(e) = &r {
		log::warn!("{}", e);
	}
	r
}

impl MatchingSession {
	pub fn new(config: ToolConfig) -> Self {
		Self {
			config,
			root: None,
			table: MappingTable::new(),
		}
	}

	pub fn config(&self) -> &ToolConfig {
		&self.config
	}

	pub fn root(&self) -> Option<&str> {
		self.root.as_deref()
	}

	pub fn table(&self) -> &MappingTable {
		&self.table
	}

	/// Take the first selected object as the source root.
	pub fn pick_source<S: SceneQuery>(&mut self, scene: &S) -> Option<&str> {
		let picked = scene.selection().into_iter().next()?;
		log::debug!("source root `{}`", picked);
		self.root = Some(picked);
		self.root.as_deref()
	}

	pub fn expand<S: SceneQuery>(&mut self, scene: &S) -> Result<usize> {
		let root = match &self.root {
			Some(r) => r,
			None => return reported(Err(MappingError::NoSource)),
		};
		let descendants = scene.descendants(root);
		reported(self.table.expand(root, &descendants))?;
		Ok(self.table.len())
	}

	/// Set the target of row `index` from the first selected object.
	/// Nothing happens when the selection is empty.
	pub fn pick_target<S: SceneQuery>(&mut self, scene: &S, index: usize) -> Result<Option<String>> {
		let picked = match scene.selection().into_iter().next() {
			Some(p) => p,
			None => return Ok(None),
		};
		reported(self.table.set_target(index, picked.as_str()))?;
		Ok(Some(picked))
	}

	pub fn set_target(&mut self, index: usize, target: &str) -> Result<()> {
		reported(self.table.set_target(index, target))
	}

	pub fn add_target(&mut self, index: usize) -> Result<()> {
		reported(self.table.split_source(index))
	}

	pub fn delete_target(&mut self, index: usize) -> Result<()> {
		reported(self.table.remove_at(index).map(|_| ()))
	}

	pub fn toggle_constraint(&mut self, index: usize, kind: ConstraintKind, on: bool) -> Result<()> {
		reported(self.table.toggle_constraint(index, kind, on))
	}

	pub fn update_axis(
		&mut self,
		index: usize,
		kind: ConstraintKind,
		axis: Axis,
		value: bool,
	) -> Result<()> {
		reported(self.table.update_constraint_axis(index, kind, axis, value))
	}

	/// Apply every row, then clear the session if configured to. Host errors
	/// come back untouched and leave the rows in place.
	pub fn apply<H: ConstraintHost>(&mut self, host: &mut H) -> std::result::Result<usize, H::Error> {
		let count = self.table.apply_all(host)?;
		if self.config.clear_after_apply {
			self.clear();
		}
		Ok(count)
	}

	pub fn clear(&mut self) {
		self.root = None;
		self.table.reset();
	}

	pub fn delete_constraints<H: ConstraintHost>(&self, host: &mut H) -> std::result::Result<usize, H::Error> {
		host::delete_constraints(host, &self.config.delete_kinds)
	}

	pub fn save_to<P: AsRef<Path>>(&self, file: P) -> Result<()> {
		let file = file.as_ref();
		reported(self.table.validate().and_then(|_| codec::save(&self.table, file)))?;
		log::info!("saved {} rows to {}", self.table.len(), file.display());
		Ok(())
	}

	pub fn load_from<P: AsRef<Path>>(&mut self, file: P) -> Result<()> {
		let file = file.as_ref();
		let table = reported(codec::load(file))?;
		log::info!("loaded {} rows from {}", table.len(), file.display());
		self.root = table.get(0).map(|e| e.source().to_string());
		self.table = table;
		Ok(())
	}

	pub fn save<D: FileDialog>(&self, dialog: &mut D) -> Result<PathBuf> {
		let file = reported(dialog.pick_save_file(&self.config.file_filter).ok_or(MappingError::NoFileChosen))?;
		self.save_to(&file)?;
		Ok(file)
	}

	pub fn load<D: FileDialog>(&mut self, dialog: &mut D) -> Result<PathBuf> {
		let file = reported(dialog.pick_open_file(&self.config.file_filter).ok_or(MappingError::NoFileChosen))?;
		self.load_from(&file)?;
		Ok(file)
	}
}
