use std::collections::HashMap;

use crate::axis::Axis;
use crate::constraint::ConstraintKind;
use crate::entry::PairEntry;
use crate::error::{MappingError, PolicyViolation, Result};
use crate::host::ConstraintHost;
use crate::{SourceId, TargetId};

// a source may drive at most this many targets
pub const MAX_TARGETS: usize = 2;

/// Ordered rows of source/target pairs. Row order is the display order and
/// the order constraints are applied in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingTable {
	entries: Vec<PairEntry>,
}

impl MappingTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn from_entries(entries: Vec<PairEntry>) -> Self {
		Self { entries }
	}

	/// Replace the table with one empty row per object of the hierarchy.
	///
	/// `descendants` is taken in host listing order (deepest first); rows come
	/// out root first so parents always precede their children. A listing
	/// with an empty name, or a name more than twice, is refused and the
	/// table keeps its rows.
	pub fn expand(&mut self, root: &str, descendants: &[SourceId]) -> Result<()> {
		let mut entries = Vec::with_capacity(descendants.len() + 1);
		entries.push(PairEntry::new(root));
		entries.extend(descendants.iter().rev().map(PairEntry::new));
		if let Some(msg) = shape_problem(&entries) {
			return Err(MappingError::Hierarchy(msg));
		}
		log::info!("expanded `{}` into {} rows", root, entries.len());
		self.entries = entries;
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&PairEntry> {
		self.entries.get(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &PairEntry> + '_ {
		self.entries.iter()
	}

	pub fn source_count(&self, source: &str) -> usize {
		self.entries.iter().filter(|e| e.source() == source).count()
	}

	pub fn targets_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.entries
			.iter()
			.filter(move |e| e.source() == source)
			.filter_map(|e| e.target())
	}

	fn entry(&self, index: usize) -> Result<&PairEntry> {
		self.entries.get(index).ok_or(MappingError::IndexOutOfRange {
			index,
			len: self.entries.len(),
		})
	}

	fn entry_mut(&mut self, index: usize) -> Result<&mut PairEntry> {
		let len = self.entries.len();
		self.entries
			.get_mut(index)
			.ok_or(MappingError::IndexOutOfRange { index, len })
	}

	/// Give the source at `index` a second, empty row right after it.
	pub fn split_source(&mut self, index: usize) -> Result<()> {
		let source = self.entry(index)?.source().to_string();
		if self.source_count(&source) >= MAX_TARGETS {
			return Err(PolicyViolation::SourceAlreadySplit { name: source }.into());
		}
		log::debug!("split `{}` at row {}", source, index);
		self.entries.insert(index + 1, PairEntry::new(source));
		Ok(())
	}

	/// Drop the row at `index`; the last row of a source can't be removed.
	pub fn remove_at(&mut self, index: usize) -> Result<PairEntry> {
		let source = self.entry(index)?.source().to_string();
		if self.source_count(&source) <= 1 {
			return Err(PolicyViolation::LastTarget { name: source }.into());
		}
		log::debug!("removed row {} of `{}`", index, source);
		Ok(self.entries.remove(index))
	}

	pub fn set_target(&mut self, index: usize, target: impl Into<TargetId>) -> Result<()> {
		self.entry_mut(index)?.set_target(target);
		Ok(())
	}

	pub fn toggle_constraint(&mut self, index: usize, kind: ConstraintKind, on: bool) -> Result<()> {
		self.entry_mut(index)?.toggle(kind, on);
		Ok(())
	}

	pub fn update_constraint_axis(
		&mut self,
		index: usize,
		kind: ConstraintKind,
		axis: Axis,
		value: bool,
	) -> Result<()> {
		self.entry_mut(index)?.update_axis(kind, axis, value);
		Ok(())
	}

	/// Create every constraint of every row that has a target, in row order.
	/// Returns the number of constraints created; the first host error stops
	/// the run and is returned as is.
	pub fn apply_all<H: ConstraintHost>(&self, host: &mut H) -> std::result::Result<usize, H::Error> {
		let mut count = 0;
		for e in self.entries.iter() {
			let target = match e.target() {
				Some(t) => t,
				None => continue,
			};
			for spec in e.constraints().values() {
				spec.apply(host, e.source(), target)?;
				count += 1;
			}
		}
		log::info!("applied {} constraints", count);
		Ok(count)
	}

	pub fn reset(&mut self) {
		self.entries.clear();
	}

	/// Table-wide shape check run on loaded tables.
	pub fn validate(&self) -> Result<()> {
		match shape_problem(&self.entries) {
			Some(msg) => Err(MappingError::Format(msg)),
			None => Ok(()),
		}
	}
}

// first way `entries` breaks the table rules, if any
fn shape_problem(entries: &[PairEntry]) -> Option<String> {
	if entries.is_empty() {
		return Some("mapping has no rows".to_string());
	}
	let mut counts: HashMap<&str, usize> = HashMap::new();
	for (i, e) in entries.iter().enumerate() {
		if e.source().trim().is_empty() {
			return Some(format!("row {} has an empty source", i));
		}
		for (kind, spec) in e.constraints() {
			if spec.kind() != *kind {
				return Some(format!(
					"row {} keys a {:?} constraint under {:?}",
					i, spec.kind(), kind,
				));
			}
		}
		let n = counts.entry(e.source()).or_insert(0);
		*n += 1;
		if *n > MAX_TARGETS {
			return Some(format!("source `{}` appears in more than {} rows", e.source(), MAX_TARGETS));
		}
	}
	None
}
