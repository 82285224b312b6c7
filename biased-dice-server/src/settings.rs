use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

/// Command line of the server.
///
/// Every flag overrides the matching key of the optional TOML file.
#[derive(Parser, Debug)]
#[command(name = "biased-dice-server", about = "HTTP API over a weighted dice table", version)]
pub struct Args {
	/// Optional TOML settings file
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Address to bind
	#[arg(long)]
	pub host: Option<String>,

	/// Port to bind
	#[arg(long)]
	pub port: Option<u16>,

	/// Number of faces of the die at startup
	#[arg(long)]
	pub faces: Option<u32>,

	/// Directory holding `.dat` weight profiles
	#[arg(long)]
	pub profiles_dir: Option<String>,

	/// Number of rolls kept in the in-memory history
	#[arg(long)]
	pub history_limit: Option<usize>,
}

/// Resolved server settings.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
	pub host: String,
	pub port: u16,
	pub face_count: u32,
	pub profiles_dir: String,
	pub history_limit: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			face_count: 6,
			profiles_dir: "./data".to_owned(),
			history_limit: 10,
		}
	}
}

impl Settings {
	/// Reads settings from a TOML file. Missing keys keep their defaults.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
		let contents = fs::read_to_string(&path)
			.map_err(|e| format!("Failed to read {}: {e}", path.as_ref().display()))?;
		Ok(toml::from_str(&contents)?)
	}

	/// Loads the settings file named on the command line, if any, then applies flags.
	pub fn load(args: &Args) -> Result<Self, Box<dyn std::error::Error>> {
		let mut settings = match &args.config {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		settings.apply(args);
		Ok(settings)
	}

	fn apply(&mut self, args: &Args) {
		if let Some(host) = &args.host {
			self.host = host.clone();
		}
		if let Some(port) = args.port {
			self.port = port;
		}
		if let Some(faces) = args.faces {
			self.face_count = faces;
		}
		if let Some(dir) = &args.profiles_dir {
			self.profiles_dir = dir.clone();
		}
		if let Some(limit) = args.history_limit {
			self.history_limit = limit;
		}
	}
}
