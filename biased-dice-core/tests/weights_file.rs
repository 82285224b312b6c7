use std::fs;
use std::path::PathBuf;

use biased_dice_core::io::{list_profiles, profile_path, read_weights, write_weights};
use biased_dice_core::model::distribution::Distribution;

fn scratch_dir(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("biased-dice-{name}-{}", std::process::id()));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).unwrap();
	dir
}

#[test]
fn weights_survive_a_write_and_read() {
	let dir = scratch_dir("roundtrip");
	let path = profile_path(&dir, "d8");
	let distribution = Distribution::build_default(8).unwrap();

	write_weights(&path, &distribution).unwrap();
	assert_eq!(read_weights(&path).unwrap(), distribution);

	fs::remove_dir_all(dir).unwrap();
}

#[test]
fn only_profile_files_are_listed() {
	let dir = scratch_dir("listing");
	fs::write(dir.join("loaded.dat"), "1\n99\n").unwrap();
	fs::write(dir.join("fair.dat"), "1\n1\n1\n").unwrap();
	fs::write(dir.join("notes.txt"), "not a profile").unwrap();
	fs::create_dir(dir.join("nested.dat")).unwrap();

	assert_eq!(list_profiles(&dir).unwrap(), vec!["fair".to_owned(), "loaded".to_owned()]);

	fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
	let dir = scratch_dir("missing");
	let err = read_weights(dir.join("absent.dat")).unwrap_err();
	assert!(matches!(err, biased_dice_core::DiceError::Io(_)));
	fs::remove_dir_all(dir).unwrap();
}
