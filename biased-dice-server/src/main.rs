use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use log::info;

use biased_dice_core::model::dice_table::DiceTable;

mod routes;
mod settings;

use routes::SharedData;
use settings::{Args, Settings};

/// Main entry point for the server.
///
/// Builds the dice table from the settings, wraps it in a `Mutex` shared by
/// every worker, and starts an Actix-web HTTP server.
///
/// # Notes
/// - Binds to 127.0.0.1:5000 unless configured otherwise.
/// - Settings come from `--config <file.toml>`, then command line flags.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let settings = Settings::load(&Args::parse())?;
	let table = DiceTable::new(settings.face_count)?;
	info!(
		"starting with a {}-sided die, profiles from {}",
		table.face_count(),
		settings.profiles_dir
	);

	let shared_data = SharedData::new(table, settings.history_limit, settings.profiles_dir.clone());
	let shared_table = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_table.clone())
			.configure(routes::configure)
	})
		.bind((settings.host.as_str(), settings.port))?
		.run()
		.await?;

	Ok(())
}
