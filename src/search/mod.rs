//! This module contains the pure, offline search engine that discovers
//! minimal-length command networks for the byte-stream-split transpose.
//!
//! The search is a bounded depth-first branch-and-bound over sequences of
//! [`Command`]s applied to a small file of lane registers. It is a
//! design-time tool: its output (a network) is what gets hand-unrolled into
//! the vectorized paths of `kernels::split`. Nothing at codec run time
//! depends on this module; the two only share the lane/command vocabulary.
//!
//! The engine is exhaustive within its bound: pruning only ever discards
//! branches that can no longer tie or beat the best known length, so the
//! result set contains every sequence of the globally minimal length
//! reachable through the supplied alphabet. Searching with initial and
//! target swapped yields the networks of the inverse transform.

pub mod command;

use crate::error::ByteplaneError;
use crate::lane::LaneRegister;
use self::command::{Command, Pairing};
use serde::{Deserialize, Serialize};
use std::fmt;

//==================================================================================
// 1. Networks
//==================================================================================

/// An ordered sequence of commands implementing a lane permutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    cmds: Vec<Command>,
}

impl Network {
    pub fn new(cmds: Vec<Command>) -> Self {
        Self { cmds }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Applies the network to a register file and returns the resulting file.
    ///
    /// Every command must be supported by `R`; wide-only commands panic on
    /// 16-byte registers.
    pub fn apply<R: LaneRegister, const SIZE: usize>(&self, mut regs: [R; SIZE]) -> [R; SIZE] {
        for &cmd in &self.cmds {
            regs = apply_command(&regs, cmd);
        }
        regs
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} cmds]", self.cmds.len())?;
        for cmd in &self.cmds {
            write!(f, " {}", cmd)?;
        }
        Ok(())
    }
}

//==================================================================================
// 2. Command application
//==================================================================================

/// Applies one command to a register file, producing the successor file.
pub fn apply_command<R: LaneRegister, const SIZE: usize>(
    regs: &[R; SIZE],
    cmd: Command,
) -> [R; SIZE] {
    let mut out = [R::ZERO; SIZE];
    match cmd {
        Command::Interleave { gran, pairing } => {
            for i in 0..SIZE / 2 {
                let (a, b) = match pairing {
                    Pairing::Next => (regs[2 * i], regs[2 * i + 1]),
                    Pairing::Skip => (regs[i], regs[i + SIZE / 2]),
                };
                let (lo, hi) = R::interleave(a, b, gran);
                out[2 * i] = lo;
                out[2 * i + 1] = hi;
            }
        }
        Command::PermuteQuads => {
            for (o, r) in out.iter_mut().zip(regs.iter()) {
                *o = r.permute_quads();
            }
        }
        Command::ShuffleDwords => {
            for (o, r) in out.iter_mut().zip(regs.iter()) {
                *o = r.shuffle_dwords();
            }
        }
    }
    out
}

//==================================================================================
// 3. Search configuration & canonical goals
//==================================================================================

/// The validated input of one search invocation.
///
/// `max_len` is the inclusive length bound seeding the branch-and-bound; seed
/// it from a known achievable construction, because the search space grows
/// with the alphabet size to the power of the depth.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig<'a> {
    pub alphabet: &'a [Command],
    pub max_len: usize,
}

impl SearchConfig<'_> {
    /// Checks the configuration against the register type before any search
    /// work begins.
    pub fn validate<R: LaneRegister, const SIZE: usize>(&self) -> Result<(), ByteplaneError> {
        if SIZE < 2 || SIZE % 2 != 0 {
            return Err(ByteplaneError::InvalidConfig(format!(
                "register file size must be even and at least 2, got {}",
                SIZE
            )));
        }
        for cmd in self.alphabet {
            if cmd.requires_wide() && !R::WIDE {
                return Err(ByteplaneError::InvalidConfig(format!(
                    "command {} requires a 32-byte register",
                    cmd
                )));
            }
        }
        Ok(())
    }
}

/// Builds the canonical (initial, target) labelings for the byte-stream-split
/// transpose of one SIZE * R::BYTES byte block of `width`-byte elements.
///
/// The initial file labels every byte with its own position; the target file
/// places label `pos * width + plane` at flat position `plane * elems + pos`,
/// i.e. plane k of the block holds byte k of every element in order.
pub fn transpose_goal<R: LaneRegister, const SIZE: usize>(
    width: usize,
) -> Result<([R; SIZE], [R; SIZE]), ByteplaneError> {
    if width != 4 && width != 8 {
        return Err(ByteplaneError::InvalidConfig(format!(
            "element width must be 4 or 8, got {}",
            width
        )));
    }
    let total = SIZE * R::BYTES;
    if total % width != 0 {
        return Err(ByteplaneError::InvalidConfig(format!(
            "block of {} bytes is not a whole number of {}-byte elements",
            total, width
        )));
    }
    if total > 256 {
        return Err(ByteplaneError::InvalidConfig(format!(
            "block of {} bytes exceeds the 256 distinct single-byte labels",
            total
        )));
    }
    let elems = total / width;
    let initial: [R; SIZE] = std::array::from_fn(|i| R::from_fn(|j| (i * R::BYTES + j) as u8));
    let target: [R; SIZE] = std::array::from_fn(|i| {
        R::from_fn(|j| {
            let flat = i * R::BYTES + j;
            let plane = flat / elems;
            let pos = flat % elems;
            (pos * width + plane) as u8
        })
    });
    Ok((initial, target))
}

//==================================================================================
// 4. The bounded branch-and-bound
//==================================================================================

/// The shared bound and result accumulator, threaded by `&mut` through the
/// recursion. Never process-wide state.
struct BestNetworks {
    best_len: usize,
    networks: Vec<Network>,
}

fn traverse<R: LaneRegister, const SIZE: usize>(
    regs: [R; SIZE],
    cmds: &mut Vec<Command>,
    target: &[R; SIZE],
    alphabet: &[Command],
    acc: &mut BestNetworks,
) {
    if cmds.len() > acc.best_len {
        return;
    }
    if regs == *target {
        if cmds.len() < acc.best_len {
            // Everything recorded so far is now known to be suboptimal.
            acc.best_len = cmds.len();
            acc.networks.clear();
        }
        acc.networks.push(Network::new(cmds.clone()));
        return;
    }
    if cmds.len() == acc.best_len {
        // Children would be longer than the best; no point expanding.
        return;
    }
    for &cmd in alphabet {
        let child = apply_command(&regs, cmd);
        cmds.push(cmd);
        traverse(child, cmds, target, alphabet, acc);
        cmds.pop();
    }
}

/// Finds every minimal-length command sequence transforming `initial` into
/// `target` within `config.max_len` steps.
///
/// An unreachable target (or an empty alphabet) is a normal outcome and
/// yields an empty vector; only a configuration invalid for the register
/// type is an error. Two calls with identical inputs return identical
/// vectors.
pub fn search<R: LaneRegister, const SIZE: usize>(
    initial: [R; SIZE],
    target: [R; SIZE],
    config: &SearchConfig,
) -> Result<Vec<Network>, ByteplaneError> {
    config.validate::<R, SIZE>()?;
    let mut acc = BestNetworks {
        best_len: config.max_len,
        networks: Vec::new(),
    };
    let mut cmds = Vec::with_capacity(config.max_len + 1);
    traverse(initial, &mut cmds, &target, config.alphabet, &mut acc);
    match acc.networks.first() {
        Some(first) => log::debug!(
            "search found {} minimal network(s) of length {}",
            acc.networks.len(),
            first.len()
        ),
        None => log::debug!("search found no network within {} steps", config.max_len),
    }
    Ok(acc.networks)
}
