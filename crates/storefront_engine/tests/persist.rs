use std::fs;

use storefront_engine::{ensure_state_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("state").join("cart");
    ensure_state_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn write_replaces_previous_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("cart.ron", "(lines: [])").unwrap();
    let second = writer.write("cart.ron", "(lines: [1])").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(lines: [1])");
    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn file_in_place_of_dir_is_an_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let writer = AtomicFileWriter::new(blocker.clone());
    assert!(writer.write("cart.ron", "data").is_err());
    assert!(!temp.path().join("cart.ron").exists());
}
