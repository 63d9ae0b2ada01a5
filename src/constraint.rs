use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::axis::{Axis, AxisMask, SkipArgument};
use crate::host::ConstraintHost;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConstraintKind {
	Parent = 0,
	Point = 1,
	Orient = 2,
	Scale = 3,
}

/// Transform channel a skip argument is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
	Translate,
	Rotate,
	Scale,
}

struct KindInfo {
	node_type: &'static str,
	label: &'static str,
	channels: &'static [Channel],
}

// indexed by ordinal
const KIND_TABLE: [KindInfo; 4] = [
	KindInfo {
		node_type: "parentConstraint",
		label: "Parent",
		channels: &[Channel::Translate, Channel::Rotate],
	},
	KindInfo {
		node_type: "pointConstraint",
		label: "Point",
		channels: &[Channel::Translate],
	},
	KindInfo {
		node_type: "orientConstraint",
		label: "Orient",
		channels: &[Channel::Rotate],
	},
	KindInfo {
		node_type: "scaleConstraint",
		label: "Scale",
		channels: &[Channel::Scale],
	},
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown constraint ordinal {0}")]
pub struct UnknownKind(pub u8);

impl ConstraintKind {
	pub const ALL: [ConstraintKind; 4] = [
		ConstraintKind::Parent,
		ConstraintKind::Point,
		ConstraintKind::Orient,
		ConstraintKind::Scale,
	];

	pub fn ordinal(self) -> u8 {
		self as u8
	}

	fn info(self) -> &'static KindInfo {
		&KIND_TABLE[self as usize]
	}

	/// Node type the host creates for this kind; also what bulk deletion
	/// searches for.
	pub fn node_type(self) -> &'static str {
		self.info().node_type
	}

	pub fn label(self) -> &'static str {
		self.info().label
	}

	pub fn channels(self) -> &'static [Channel] {
		self.info().channels
	}
}

impl TryFrom<u8> for ConstraintKind {
	type Error = UnknownKind;

	fn try_from(v: u8) -> Result<Self, UnknownKind> {
		Self::ALL.get(v as usize).copied().ok_or(UnknownKind(v))
	}
}

impl From<ConstraintKind> for u8 {
	fn from(kind: ConstraintKind) -> u8 {
		kind.ordinal()
	}
}

// displays as the ordinal, which is how saved mappings key their rows
impl fmt::Display for ConstraintKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.ordinal())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a constraint ordinal")]
pub struct ParseKindError(String);

impl FromStr for ConstraintKind {
	type Err = ParseKindError;

	// only the exact ordinal text, so each kind has a single key
	fn from_str(s: &str) -> Result<Self, ParseKindError> {
		Self::ALL
			.iter()
			.copied()
			.find(|k| k.to_string() == s)
			.ok_or_else(|| ParseKindError(s.to_string()))
	}
}

/// One constraint between a source/target pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
	#[serde(rename = "constraint")]
	kind: ConstraintKind,
	#[serde(flatten)]
	mask: AxisMask,
}

impl ConstraintSpec {
	pub fn new(kind: ConstraintKind) -> Self {
		Self {
			kind,
			mask: AxisMask::default(),
		}
	}

	pub fn kind(&self) -> ConstraintKind {
		self.kind
	}

	pub fn mask(&self) -> &AxisMask {
		&self.mask
	}

	pub fn update_axis(&mut self, axis: Axis, value: bool) {
		self.mask.set(axis, value);
	}

	pub fn skip_argument(&self) -> SkipArgument {
		self.mask.to_skip_argument()
	}

	// always keeps the current offset between the pair
	pub fn apply<H: ConstraintHost>(
		&self,
		host: &mut H,
		source: &str,
		target: &str,
	) -> Result<H::Handle, H::Error> {
		let skip = self.skip_argument();
		log::debug!("{} constraint {} -> {} skip {}", self.kind.label(), source, target, skip);
		host.create_constraint(self.kind, source, target, true, &skip)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordinals_are_stable() {
		for (i, k) in ConstraintKind::ALL.iter().enumerate() {
			assert_eq!(k.ordinal() as usize, i);
			assert_eq!(ConstraintKind::try_from(i as u8).unwrap(), *k);
		}
		assert_eq!(ConstraintKind::try_from(4), Err(UnknownKind(4)));
		assert_eq!("2".parse::<ConstraintKind>().unwrap(), ConstraintKind::Orient);
		assert!("parent".parse::<ConstraintKind>().is_err());
		assert!("00".parse::<ConstraintKind>().is_err());
		assert!(" 0".parse::<ConstraintKind>().is_err());
		assert!("+1".parse::<ConstraintKind>().is_err());
	}

	#[test]
	fn dispatch_table() {
		assert_eq!(ConstraintKind::Parent.node_type(), "parentConstraint");
		assert_eq!(ConstraintKind::Scale.node_type(), "scaleConstraint");
		assert_eq!(
			ConstraintKind::Parent.channels(),
			&[Channel::Translate, Channel::Rotate],
		);
		assert_eq!(ConstraintKind::Orient.channels(), &[Channel::Rotate]);
	}

	#[test]
	fn serialized_shape() {
		let mut spec = ConstraintSpec::new(ConstraintKind::Point);
		spec.update_axis(Axis::Z, true);
		let v = serde_json::to_value(&spec).unwrap();
		assert_eq!(v, serde_json::json!({"constraint": 1, "x": false, "y": false, "z": true}));
		let back: ConstraintSpec = serde_json::from_value(v).unwrap();
		assert_eq!(back, spec);
	}

	#[test]
	fn rejects_missing_axis_and_bad_ordinal() {
		let missing = serde_json::json!({"constraint": 0, "x": false, "y": false});
		assert!(serde_json::from_value::<ConstraintSpec>(missing).is_err());
		let bad = serde_json::json!({"constraint": 9, "x": false, "y": false, "z": false});
		assert!(serde_json::from_value::<ConstraintSpec>(bad).is_err());
		let wrong_type = serde_json::json!({"constraint": 0, "x": "yes", "y": false, "z": false});
		assert!(serde_json::from_value::<ConstraintSpec>(wrong_type).is_err());
	}
}
