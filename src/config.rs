use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::constraint::ConstraintKind;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
	// passed to the host file dialog
	pub file_filter: String,
	pub clear_after_apply: bool,
	// kinds removed by bulk deletion
	pub delete_kinds: Vec<ConstraintKind>,
}

impl Default for ToolConfig {
	fn default() -> Self {
		Self {
			file_filter: "JSON (*.json)".to_string(),
			clear_after_apply: true,
			delete_kinds: ConstraintKind::ALL.to_vec(),
		}
	}
}

impl ToolConfig {
	pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
		let string: String = std::fs::read_to_string(file)?;
		Ok(serde_json::from_str(&string)?)
	}
}
