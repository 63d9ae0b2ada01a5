use constraint_mapping::{codec, listing, MappingError};
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn main() -> Result<(), MappingError> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = std::env::args().collect::<Vec<_>>();
	let input = match args.get(1) {
		Some(x) => Path::new(x),
		None => {
			eprintln!("usage: build_mapping <hierarchy.txt> [out.json]");
			std::process::exit(2);
		}
	};
	let file = std::fs::File::open(input)?;
	let table = listing::read_listing(BufReader::new(file))?;
	table.validate()?;
	let path = match args.get(2) {
		Some(x) => PathBuf::from(x),
		None => listing::default_output(input),
	};
	codec::save(&table, &path)?;
	log::info!("wrote {} rows to {}", table.len(), path.display());
	Ok(())
}
