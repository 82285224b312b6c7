use std::ffi::OsStr;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::error::{DiceError, Result};
use crate::model::distribution::{Distribution, Weight};

/// Extension of weight profile files.
pub const PROFILE_EXTENSION: &str = "dat";

/// Reads a weights file and returns its distribution.
///
/// - One non-negative integer per line, in face order
/// - Blank lines and lines starting with `#` are ignored
///
/// # Errors
/// - `ParseWeight` on the first line that is not a weight
/// - `EmptyDistribution` if the file holds no weight at all
pub fn read_weights<P: AsRef<Path>>(filename: P) -> Result<Distribution> {
	let contents = fs::read_to_string(filename)?;
	parse_weights(&contents)
}

/// Parses the contents of a weights file.
pub fn parse_weights(contents: &str) -> Result<Distribution> {
	let mut weights = Vec::new();
	for (index, line) in contents.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let weight = line.parse::<Weight>().map_err(|_| DiceError::ParseWeight {
			line: index + 1,
			content: line.to_owned(),
		})?;
		weights.push(weight);
	}
	Distribution::new(weights)
}

/// Writes a distribution as a weights file, one weight per line.
pub fn write_weights<P: AsRef<Path>>(filename: P, distribution: &Distribution) -> Result<()> {
	let mut contents = String::new();
	for weight in distribution.weights() {
		// Writing into a String cannot fail
		let _ = writeln!(contents, "{weight}");
	}
	fs::write(filename, contents)?;
	Ok(())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/loaded.dat"` → `"loaded"`
/// - `"loaded.dat"` → `"loaded"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

/// Lists profile names (file stems of `.dat` files) in a directory.
pub fn list_profiles<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	list_files(dir, PROFILE_EXTENSION)?.iter().map(get_filename).collect()
}

/// Path of the profile called `name` inside `dir`.
pub fn profile_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
	let mut path = dir.as_ref().join(name);
	path.set_extension(PROFILE_EXTENSION);
	path
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_weights_skipping_comments() {
		let d = parse_weights("# loaded d4\n10\n\n 20 \n30\n40\n").unwrap();
		assert_eq!(d.weights(), &[10, 20, 30, 40]);
	}

	#[test]
	fn reports_bad_line() {
		let err = parse_weights("10\n-5\n").unwrap_err();
		assert!(matches!(err, DiceError::ParseWeight { line: 2, ref content } if content == "-5"));
	}

	#[test]
	fn empty_file_is_not_a_distribution() {
		assert!(matches!(parse_weights("# nothing\n"), Err(DiceError::EmptyDistribution)));
	}

	#[test]
	fn filename_without_extension() {
		assert_eq!(get_filename("./data/loaded.dat").unwrap(), "loaded");
		assert_eq!(get_filename("loaded.dat").unwrap(), "loaded");
	}

	#[test]
	fn profile_path_adds_extension() {
		assert_eq!(profile_path("data", "d20"), PathBuf::from("data/d20.dat"));
	}
}
