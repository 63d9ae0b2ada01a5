use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
	X,
	Y,
	Z,
}

impl Axis {
	pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

	// host axis identifier
	pub fn as_str(self) -> &'static str {
		match self {
			Axis::X => "x",
			Axis::Y => "y",
			Axis::Z => "z",
		}
	}

	// checkbox tokens come in either case
	pub fn from_token(token: &str) -> Option<Self> {
		match token {
			"X" | "x" => Some(Axis::X),
			"Y" | "y" => Some(Axis::Y),
			"Z" | "z" => Some(Axis::Z),
			_ => None,
		}
	}
}

impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// What a constraint is told to skip.
///
/// The host expects a scalar when exactly one axis is skipped and a list
/// otherwise, so the three shapes are kept distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipArgument {
	None,
	Single(Axis),
	Many(Vec<Axis>),
}

impl fmt::Display for SkipArgument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SkipArgument::None => f.write_str("none"),
			SkipArgument::Single(a) => write!(f, "{}", a),
			SkipArgument::Many(v) => {
				let names: Vec<_> = v.iter().map(|a| a.as_str()).collect();
				write!(f, "[{}]", names.join(", "))
			}
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMask {
	#[serde(rename = "x")]
	pub skip_x: bool,
	#[serde(rename = "y")]
	pub skip_y: bool,
	#[serde(rename = "z")]
	pub skip_z: bool,
}

impl AxisMask {
	pub fn get(&self, axis: Axis) -> bool {
		match axis {
			Axis::X => self.skip_x,
			Axis::Y => self.skip_y,
			Axis::Z => self.skip_z,
		}
	}

	pub fn set(&mut self, axis: Axis, value: bool) {
		match axis {
			Axis::X => self.skip_x = value,
			Axis::Y => self.skip_y = value,
			Axis::Z => self.skip_z = value,
		}
	}

	// unknown tokens are ignored
	pub fn set_token(&mut self, token: &str, value: bool) {
		if let Some(axis) = Axis::from_token(token) {
			self.set(axis, value);
		}
	}

	pub fn to_skip_argument(&self) -> SkipArgument {
		let mut skipped: Vec<Axis> = Axis::ALL
			.iter()
			.copied()
			.filter(|a| self.get(*a))
			.collect();
		match skipped.len() {
			0 => SkipArgument::None,
			1 => SkipArgument::Single(skipped.remove(0)),
			_ => SkipArgument::Many(skipped),
		}
	}
}
