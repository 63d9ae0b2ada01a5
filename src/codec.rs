//! Saved mapping files.
//!
//! A mapping is stored as three parallel lists: row sources, row targets
//! (`""` when unset) and per-row constraint maps keyed by kind ordinal.
//!
//! ```json
//! {
//!   "sources": ["Root", "Arm"],
//!   "targets": ["Root_ctrl", ""],
//!   "constraints": [{"0": {"constraint": 0, "x": false, "y": false, "z": false}}, {}]
//! }
//! ```

use serde::de::{self, MapAccess, Visitor};
use serde::{Serialize, Serializer, Deserialize, Deserializer};
use serde_with::{serde_as, DeserializeAs, DisplayFromStr, Same, SerializeAs};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::constraint::{ConstraintKind, ConstraintSpec};
use crate::entry::PairEntry;
use crate::error::{MappingError, Result};
use crate::table::MappingTable;
use crate::{SourceId, TargetId};

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
	pub sources: Vec<SourceId>,
	pub targets: Vec<TargetId>,
	#[serde_as(as = "Vec<ConstraintRow>")]
	pub constraints: Vec<BTreeMap<ConstraintKind, ConstraintSpec>>,
}

// one row of `constraints`: ordinal keys, each allowed once
struct ConstraintRow;

impl SerializeAs<BTreeMap<ConstraintKind, ConstraintSpec>> for ConstraintRow {
	fn serialize_as<S: Serializer>(
		row: &BTreeMap<ConstraintKind, ConstraintSpec>,
		serializer: S,
	) -> std::result::Result<S::Ok, S::Error> {
		<BTreeMap<DisplayFromStr, Same>>::serialize_as(row, serializer)
	}
}

impl<'de> DeserializeAs<'de, BTreeMap<ConstraintKind, ConstraintSpec>> for ConstraintRow {
	fn deserialize_as<D: Deserializer<'de>>(
		deserializer: D,
	) -> std::result::Result<BTreeMap<ConstraintKind, ConstraintSpec>, D::Error> {
		struct RowVisitor;

		impl<'de> Visitor<'de> for RowVisitor {
			type Value = BTreeMap<ConstraintKind, ConstraintSpec>;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a map from constraint ordinal to constraint")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
				let mut row = BTreeMap::new();
				while let Some(key) = map.next_key::<String>()? {
					let kind: ConstraintKind = key.parse().map_err(<A::Error as de::Error>::custom)?;
					let spec: ConstraintSpec = map.next_value()?;
					if row.insert(kind, spec).is_some() {
						return Err(<A::Error as de::Error>::custom(format!("constraint `{}` listed twice", key)));
					}
				}
				Ok(row)
			}
		}

		deserializer.deserialize_map(RowVisitor)
	}
}

impl MappingDocument {
	pub fn from_json(s: &str) -> Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	pub fn from_value(v: serde_json::Value) -> Result<Self> {
		Ok(serde_json::from_value(v)?)
	}

	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

pub fn encode(table: &MappingTable) -> MappingDocument {
	let mut doc = MappingDocument::default();
	for e in table.iter() {
		doc.sources.push(e.source().to_string());
		doc.targets.push(e.target().unwrap_or_default().to_string());
		doc.constraints.push(e.constraints().clone());
	}
	doc
}

/// Rebuild a table, rejecting anything `MappingTable::validate` would.
pub fn decode(doc: MappingDocument) -> Result<MappingTable> {
	let n = doc.sources.len();
	if doc.targets.len() != n || doc.constraints.len() != n {
		return Err(MappingError::format(format!(
			"list lengths differ: {} sources, {} targets, {} constraint rows",
			n,
			doc.targets.len(),
			doc.constraints.len(),
		)));
	}
	let entries = doc
		.sources
		.into_iter()
		.zip(doc.targets)
		.zip(doc.constraints)
		.map(|((source, target), constraints)| {
			let target = if target.trim().is_empty() { None } else { Some(target) };
			PairEntry::from_parts(source, target, constraints)
		})
		.collect();
	let table = MappingTable::from_entries(entries);
	table.validate()?;
	Ok(table)
}

pub fn to_json(table: &MappingTable) -> Result<String> {
	encode(table).to_json()
}

pub fn from_json(s: &str) -> Result<MappingTable> {
	decode(MappingDocument::from_json(s)?)
}

pub fn load<P: AsRef<Path>>(file: P) -> Result<MappingTable> {
	let string: String = std::fs::read_to_string(file)?;
	from_json(&string)
}

pub fn save<P: AsRef<Path>>(table: &MappingTable, file: P) -> Result<()> {
	let string = to_json(table)?;
	std::fs::write(file, string)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::axis::Axis;
	use serde_json::json;

	fn sample() -> MappingTable {
		let mut t = MappingTable::new();
		t.expand("Root", &["Hand".to_string(), "Arm".to_string()]).unwrap();
		t.set_target(0, "Root_ctrl").unwrap();
		t.toggle_constraint(0, ConstraintKind::Parent, true).unwrap();
		t.split_source(2).unwrap();
		t.set_target(3, "Hand_ik").unwrap();
		t.toggle_constraint(3, ConstraintKind::Orient, true).unwrap();
		t.update_constraint_axis(3, ConstraintKind::Orient, Axis::X, true).unwrap();
		t.update_constraint_axis(3, ConstraintKind::Orient, Axis::Z, true).unwrap();
		t
	}

	#[test]
	fn encoded_layout() {
		let mut t = MappingTable::new();
		t.expand("Root", &["Arm".to_string()]).unwrap();
		t.set_target(0, "Root_ctrl").unwrap();
		t.toggle_constraint(0, ConstraintKind::Point, true).unwrap();
		let v = serde_json::to_value(encode(&t)).unwrap();
		assert_eq!(v, json!({
			"sources": ["Root", "Arm"],
			"targets": ["Root_ctrl", ""],
			"constraints": [
				{"1": {"constraint": 1, "x": false, "y": false, "z": false}},
				{},
			],
		}));
	}

	#[test]
	fn round_trip() {
		let t = sample();
		let back = from_json(&to_json(&t).unwrap()).unwrap();
		assert_eq!(back, t);
	}

	#[test]
	fn missing_targets_is_format_error() {
		let v = json!({"sources": ["Root"], "constraints": [{}]});
		let err = MappingDocument::from_value(v).unwrap_err();
		assert!(matches!(err, MappingError::Format(ref m) if m.contains("targets")));
	}

	#[test]
	fn unknown_fields_are_ignored() {
		let v = json!({
			"version": 3,
			"sources": ["Root"],
			"targets": [""],
			"constraints": [{"3": {"constraint": 3, "x": true, "y": false, "z": false, "w": 1}}],
		});
		let t = decode(MappingDocument::from_value(v).unwrap()).unwrap();
		let spec = t.get(0).unwrap().constraint(ConstraintKind::Scale).unwrap();
		assert!(spec.mask().skip_x);
	}

	#[test]
	fn malformed_rows_fail_at_decode() {
		let bad_key = json!({
			"sources": ["Root"], "targets": [""],
			"constraints": [{"parent": {"constraint": 0, "x": false, "y": false, "z": false}}],
		});
		assert!(matches!(MappingDocument::from_value(bad_key), Err(MappingError::Format(_))));

		let bad_row = json!({
			"sources": ["Root"], "targets": [""],
			"constraints": [{"0": {"constraint": 0, "x": 1}}],
		});
		assert!(matches!(MappingDocument::from_value(bad_row), Err(MappingError::Format(_))));

		let mismatched = json!({
			"sources": ["Root"], "targets": [""],
			"constraints": [{"0": {"constraint": 2, "x": false, "y": false, "z": false}}],
		});
		let doc = MappingDocument::from_value(mismatched).unwrap();
		assert!(matches!(decode(doc), Err(MappingError::Format(_))));
	}

	#[test]
	fn each_kind_keyed_once() {
		let repeated = r#"{
			"sources": ["Root"], "targets": [""],
			"constraints": [{
				"0": {"constraint": 0, "x": false, "y": false, "z": false},
				"0": {"constraint": 0, "x": true, "y": true, "z": true}
			}]
		}"#;
		let err = from_json(repeated).unwrap_err();
		assert!(matches!(err, MappingError::Format(ref m) if m.contains("listed twice")));

		let padded = r#"{
			"sources": ["Root"], "targets": [""],
			"constraints": [{
				"0": {"constraint": 0, "x": false, "y": false, "z": false},
				"00": {"constraint": 0, "x": true, "y": true, "z": true}
			}]
		}"#;
		assert!(matches!(from_json(padded), Err(MappingError::Format(_))));
	}

	#[test]
	fn blank_target_loads_unset() {
		let v = json!({"sources": ["Root"], "targets": ["  "], "constraints": [{}]});
		let t = decode(MappingDocument::from_value(v).unwrap()).unwrap();
		assert!(!t.get(0).unwrap().has_target());
	}

	#[test]
	fn length_mismatch_and_empty_fail() {
		let doc = MappingDocument {
			sources: vec!["Root".into(), "Arm".into()],
			targets: vec!["".into()],
			constraints: vec![BTreeMap::new(), BTreeMap::new()],
		};
		assert!(matches!(decode(doc), Err(MappingError::Format(_))));
		assert!(matches!(decode(MappingDocument::default()), Err(MappingError::Format(_))));
	}

	#[test]
	fn save_and_load_file() {
		let path = std::env::temp_dir().join(format!("cm_codec_{}.json", std::process::id()));
		let t = sample();
		save(&t, &path).unwrap();
		let back = load(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(back, t);
	}

	#[test]
	fn load_missing_file_is_io_error() {
		let err = load("/nonexistent/dir/mapping.json").unwrap_err();
		assert!(matches!(err, MappingError::Io(_)));
	}
}
