//! Offline derivation tool: exhaustively searches for the minimal interleave
//! networks behind the byte-stream-split fast paths and prints every one it
//! finds, in both human-readable and JSON form.
//!
//! The 128-bit searches finish in well under a second. The 256-bit encode
//! search walks a few million states; set `BYTEPLANE_WIDE=1` to include the
//! wide goals (build with `--release` for those).

use byteplane::error::ByteplaneError;
use byteplane::lane::{Lane16, Lane32, LaneRegister};
use byteplane::search::command::{NARROW_ALPHABET, WIDE_ALPHABET};
use byteplane::search::{search, transpose_goal, SearchConfig};

fn report<R: LaneRegister, const SIZE: usize>(
    label: &str,
    initial: [R; SIZE],
    target: [R; SIZE],
    config: &SearchConfig,
) -> Result<(), ByteplaneError> {
    let networks = search(initial, target, config)?;
    println!("{} ({} minimal networks)", label, networks.len());
    for network in &networks {
        println!("  {}", network);
    }
    println!("{}", serde_json::to_string(&networks)?);
    println!();
    Ok(())
}

fn narrow_goals() -> Result<(), ByteplaneError> {
    let config = SearchConfig {
        alphabet: &NARROW_ALPHABET,
        max_len: 6,
    };

    let (initial, target) = transpose_goal::<Lane16, 4>(4)?;
    report("float encode networks", initial, target, &config)?;
    report("float decode networks", target, initial, &config)?;

    let (initial, target) = transpose_goal::<Lane16, 8>(8)?;
    report("double encode networks", initial, target, &config)?;
    report("double decode networks", target, initial, &config)?;
    Ok(())
}

fn wide_goals() -> Result<(), ByteplaneError> {
    // Seed the bounds from the known constructions: the 128-bit networks per
    // half plus the two cross-lane fixups.
    let (initial, target) = transpose_goal::<Lane32, 4>(4)?;
    let encode_config = SearchConfig {
        alphabet: &WIDE_ALPHABET,
        max_len: 6,
    };
    let decode_config = SearchConfig {
        alphabet: &WIDE_ALPHABET,
        max_len: 4,
    };
    report("float avx2 encode networks", initial, target, &encode_config)?;
    report("float avx2 decode networks", target, initial, &decode_config)?;
    Ok(())
}

fn main() -> Result<(), ByteplaneError> {
    env_logger::init();

    narrow_goals()?;

    if std::env::var("BYTEPLANE_WIDE").as_deref() == Ok("1") {
        wide_goals()?;
    } else {
        println!("set BYTEPLANE_WIDE=1 to also derive the 256-bit networks");
    }
    Ok(())
}
