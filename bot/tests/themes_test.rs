//! Integration Tests for Theme Loading
//!
//! Loads real template files from a temporary directory through the registry.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use placekit_bot::themes::{ThemeError, ThemeRegistry};
use regex::bytes::Regex;

const REF_A: &str = "RBX0123456789ABCDEF0123456789ABCDEF";
const REF_B: &str = "RBXFEDCBA9876543210FEDCBA9876543210";
const GUID: &str = "{6C0E1A9B-3F4D-4E2A-9B1C-0D2E3F405162}";

fn template() -> String {
    format!(
        r#"<roblox version="4">
  <Item class="Workspace" referent="{REF_A}">
    <Item class="Script" referent="{REF_B}">
      <Properties>
        <string name="ScriptGuid">{GUID}</string>
        <Ref name="Target">{REF_A}</Ref>
      </Properties>
    </Item>
  </Item>
</roblox>"#
    )
}

fn write_theme(dir: &Path, file_name: &str, contents: &[u8]) -> ThemeRegistry {
    let path = dir.join(file_name);
    fs::write(&path, contents).expect("Failed to write template");
    ThemeRegistry::default().with_theme("nl", "Normal Theme", path)
}

fn referents(data: &[u8]) -> Vec<Vec<u8>> {
    let re = Regex::new(r"RBX[A-Z0-9]{32}").unwrap();
    re.find_iter(data).map(|m| m.as_bytes().to_vec()).collect()
}

#[test]
fn place_file_is_randomized_consistently() {
    let dir = tempfile::tempdir().unwrap();
    let original = template();
    let registry = write_theme(dir.path(), "Normal_Theme.rbxlx", original.as_bytes());

    let place = registry.load("nl").unwrap().expect("theme exists");
    assert_eq!(place.file_name, "Normal_Theme.rbxlx");
    assert_eq!(place.bytes.len(), original.len());

    let text = String::from_utf8(place.bytes).unwrap();
    assert!(!text.contains(REF_A));
    assert!(!text.contains(REF_B));
    assert!(!text.contains(GUID));

    let refs = referents(text.as_bytes());
    assert_eq!(refs.len(), 3);
    assert_eq!(refs[0], refs[2], "Workspace and its Ref must stay linked");
    assert_ne!(refs[0], refs[1]);
}

#[test]
fn template_on_disk_is_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = template();
    let registry = write_theme(dir.path(), "Normal_Theme.rbxlx", original.as_bytes());

    registry.load("nl").unwrap();

    let on_disk = fs::read_to_string(dir.path().join("Normal_Theme.rbxlx")).unwrap();
    assert_eq!(on_disk, original);
}

#[test]
fn non_place_template_is_returned_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let original = template();
    let registry = write_theme(dir.path(), "Normal_Theme.rbxl", original.as_bytes());

    let place = registry.load("nl").unwrap().unwrap();
    assert_eq!(place.bytes, original.as_bytes());
}

#[test]
fn each_request_gets_fresh_identifiers() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(write_theme(
        dir.path(),
        "Normal_Theme.rbxlx",
        template().as_bytes(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.load("nl").unwrap().unwrap().bytes)
        })
        .collect();

    let outputs: HashSet<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs.len(), 8);

    for output in &outputs {
        let refs = referents(output);
        assert_eq!(refs[0], refs[2]);
    }
}

#[test]
fn unknown_theme_and_missing_file_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ThemeRegistry::builtin(dir.path());

    assert!(registry.load("xx").unwrap().is_none());
    assert!(matches!(registry.load("nl"), Err(ThemeError::Io { .. })));
}

#[test]
fn empty_template_loads_as_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let registry = write_theme(dir.path(), "Empty.rbxlx", b"");

    let place = registry.load("nl").unwrap().expect("theme exists");
    assert!(place.bytes.is_empty());
}
