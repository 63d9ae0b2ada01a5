//! Hierarchy listings: plain text, first name is the root, the rest are its
//! descendants in host listing order. Blank lines and `#` comments are
//! skipped.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{MappingError, Result};
use crate::table::MappingTable;

pub fn read_listing<R: BufRead>(reader: R) -> Result<MappingTable> {
	let mut names = Vec::new();
	for line in reader.lines() {
		let line = line?;
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue
		}
		names.push(line.to_string());
	}
	if names.is_empty() {
		return Err(MappingError::Hierarchy("no root listed".to_string()));
	}
	let root = names.remove(0);
	let mut table = MappingTable::new();
	table.expand(&root, &names)?;
	Ok(table)
}

// `rig/arm.txt` -> `rig/arm.mapping.json`
pub fn default_output(input: &Path) -> PathBuf {
	input.with_extension("mapping.json")
}
