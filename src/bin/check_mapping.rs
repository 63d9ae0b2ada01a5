use constraint_mapping::{codec, MappingError};

fn main() -> Result<(), MappingError> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = std::env::args().collect::<Vec<_>>();
	if args.len() < 2 {
		eprintln!("usage: check_mapping <mapping.json> [out.json]");
		std::process::exit(2);
	}
	let table = match codec::load(&args[1]) {
		Ok(t) => t,
		Err(e) => {
			log::error!("{}: {}", args[1], e);
			return Err(e);
		}
	};
	let unset = table.iter().filter(|e| !e.has_target()).count();
	let constraints: usize = table.iter().map(|e| e.constraints().len()).sum();
	log::info!(
		"{} rows, {} without target, {} constraints",
		table.len(), unset, constraints,
	);
	for e in table.iter() {
		for spec in e.constraints().values() {
			log::debug!(
				"{} -> {}: {} skip {}",
				e.source(),
				e.target().unwrap_or("-"),
				spec.kind().label(),
				spec.skip_argument(),
			);
		}
	}
	if let Some(out) = args.get(2) {
		codec::save(&table, out)?;
		log::info!("rewrote {}", out);
	}
	Ok(())
}
