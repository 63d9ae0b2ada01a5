use std::collections::BTreeMap;

use crate::axis::Axis;
use crate::constraint::{ConstraintKind, ConstraintSpec};
use crate::{SourceId, TargetId};

/// One row of the mapping: a source, its (possibly unset) target and the
/// constraints to create between them. Each row owns its own constraint map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairEntry {
	source: SourceId,
	target: Option<TargetId>,
	constraints: BTreeMap<ConstraintKind, ConstraintSpec>,
}

impl PairEntry {
	pub fn new(source: impl Into<SourceId>) -> Self {
		Self {
			source: source.into(),
			target: None,
			constraints: BTreeMap::new(),
		}
	}

	pub(crate) fn from_parts(
		source: SourceId,
		target: Option<TargetId>,
		constraints: BTreeMap<ConstraintKind, ConstraintSpec>,
	) -> Self {
		Self { source, target, constraints }
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn target(&self) -> Option<&str> {
		self.target.as_deref()
	}

	// blank names count as unset, surrounding whitespace is dropped
	pub fn set_target(&mut self, target: impl Into<TargetId>) {
		let target = target.into();
		let trimmed = target.trim();
		self.target = if trimmed.is_empty() {
			None
		} else if trimmed.len() == target.len() {
			Some(target)
		} else {
			Some(trimmed.to_string())
		};
	}

	pub fn has_target(&self) -> bool {
		self.target.is_some()
	}

	pub fn constraints(&self) -> &BTreeMap<ConstraintKind, ConstraintSpec> {
		&self.constraints
	}

	pub fn constraint(&self, kind: ConstraintKind) -> Option<&ConstraintSpec> {
		self.constraints.get(&kind)
	}

	pub fn toggle(&mut self, kind: ConstraintKind, on: bool) {
		if on {
			self.constraints
				.entry(kind)
				.or_insert_with(|| ConstraintSpec::new(kind));
		} else {
			self.constraints.remove(&kind);
		}
	}

	pub fn update_axis(&mut self, kind: ConstraintKind, axis: Axis, value: bool) {
		if let Some(spec) = self.constraints.get_mut(&kind) {
			spec.update_axis(axis, value);
		}
	}
}
