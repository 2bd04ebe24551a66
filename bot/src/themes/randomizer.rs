//! Place File Identifier Randomizer
//!
//! Rewrites referent ids (`RBX` + 32 chars) and script GUIDs (`{8-4-4-4-12}`)
//! inside a `.rbxlx` document. Every distinct original id gets one fresh
//! replacement per call, so links between instances survive the rewrite.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use rand::rngs::OsRng;
use rand::RngCore;
use regex::bytes::{Captures, Regex};
use uuid::Uuid;

/// Extension of rewritable place files.
pub const PLACE_FILE_EXTENSION: &str = ".rbxlx";

static REFERENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RBX[A-Z0-9]{32}").expect("referent pattern is valid")
});

static SCRIPT_GUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[A-Z0-9]{8}-[A-Z0-9]{4}-[A-Z0-9]{4}-[A-Z0-9]{4}-[A-Z0-9]{12}\}")
        .expect("script guid pattern is valid")
});

/// Replace every match of `re`, reusing one generated value per distinct match.
fn replace_consistently(
    re: &Regex,
    data: &[u8],
    mut generate: impl FnMut() -> Vec<u8>,
) -> Vec<u8> {
    let mut cache: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();

    re.replace_all(data, |caps: &Captures<'_>| {
        cache
            .entry(caps[0].to_vec())
            .or_insert_with(&mut generate)
            .clone()
    })
    .into_owned()
}

/// Generate a referent id: `RBX` followed by 32 uppercase hex digits from the OS RNG.
fn new_referent() -> Vec<u8> {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    format!("RBX{}", hex::encode_upper(bytes)).into_bytes()
}

/// Generate a braced, uppercase v4 GUID.
fn new_script_guid() -> Vec<u8> {
    format!("{:X}", Uuid::new_v4().braced()).into_bytes()
}

/// Replace all referent ids with fresh random ones.
pub fn randomize_referents(data: &[u8]) -> Vec<u8> {
    replace_consistently(&REFERENT_RE, data, new_referent)
}

/// Replace all braced script GUIDs with fresh random ones.
pub fn randomize_script_guids(data: &[u8]) -> Vec<u8> {
    replace_consistently(&SCRIPT_GUID_RE, data, new_script_guid)
}

/// Run the referent pass, then the script GUID pass.
pub fn randomize_place(data: &[u8]) -> Vec<u8> {
    randomize_script_guids(&randomize_referents(data))
}

/// Whether a template path names a rewritable place file.
pub fn is_place_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(PLACE_FILE_EXTENSION))
}
