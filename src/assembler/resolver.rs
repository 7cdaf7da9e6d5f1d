//! Fixed-point label resolution
//!
//! Each pass lays the groups out, then fills every pending operand from the
//! symbol table. An operand whose width changes moves everything after it, so
//! the layout is recomputed immediately and another pass is scheduled. The
//! loop ends on the first pass that changes no operand size.

use crate::assembler::segment::{layout, GroupKind, InstructionKind, MemoryState, SegmentGroup};
use crate::assembler::symbol_table::lookup;
use crate::assembler::AssemblerError;
use crate::opcodes::encode;

/// Operand bytes for a branch at `offset` (size `size`) jumping to `target`.
fn branch_displacement(target: usize, offset: usize, size: usize) -> u8 {
    (target.wrapping_sub(offset + size) & 0xFF) as u8
}

/// Signed distance from the end of a branch to its target.
fn signed_displacement(target: usize, offset: usize, size: usize) -> i64 {
    target as i64 - (offset + size) as i64
}

/// Width a resolved value needs: one byte when the high byte is zero.
fn width_of(value: u16) -> usize {
    if value >> 8 == 0 {
        1
    } else {
        2
    }
}

/// Runs one resolution pass. Returns how many operands changed width.
fn resolve_pass(groups: &mut [SegmentGroup], origin: usize) -> Result<usize, AssemblerError> {
    let mut resized = 0;
    layout(groups, origin);

    for index in 0..groups.len() {
        if groups[index].kind != GroupKind::Normal {
            continue;
        }
        let (name, modes) = match &groups[index].memory.state {
            MemoryState::Label { name, modes } => (name.clone(), modes.clone()),
            _ => continue,
        };

        let Some(symbol) = lookup(groups, &name) else {
            return Err(AssemblerError::MissingLabelDeclaration {
                line: groups[index].line,
                label: name,
            });
        };

        let group = &mut groups[index];
        if group.instruction.branch {
            let size = group.instruction.kind.size() + group.memory.size();
            let displacement = branch_displacement(symbol.value as usize, group.offset, size);
            group.memory.bytes = vec![displacement];
            continue;
        }

        let old_size = group.memory.size();
        let new_size = width_of(symbol.value);
        let mut size = old_size;

        if new_size != old_size {
            if let Some(&(_, mode)) = modes.iter().find(|(width, _)| *width == new_size) {
                if let InstructionKind::Opcode { operation, .. } = group.instruction.kind {
                    if let Some(opcode) = encode(operation, mode) {
                        group.instruction.kind = InstructionKind::Opcode {
                            opcode,
                            operation,
                            mode,
                        };
                        size = new_size;
                        resized += 1;
                    }
                }
            }
        }

        let value = symbol.value.to_le_bytes();
        group.memory.bytes = value[..size.min(2)].to_vec();
        group.memory.bytes.resize(size, 0);

        if size != old_size {
            log::trace!(
                "line {}: {} resized from {} to {} bytes",
                group.line,
                name,
                old_size,
                size
            );
            layout(groups, origin);
        }
    }

    Ok(resized)
}

/// Checks each branch lands within a signed byte of its end.
fn check_branch_ranges(groups: &[SegmentGroup]) -> Result<(), AssemblerError> {
    for group in groups.iter().filter(|g| g.kind == GroupKind::Normal && g.instruction.branch) {
        let name = match &group.memory.state {
            MemoryState::Label { name, .. } => name,
            _ => continue,
        };
        let Some(symbol) = lookup(groups, name) else {
            continue;
        };
        let displacement = signed_displacement(symbol.value as usize, group.offset, group.size());
        if !(-128..=127).contains(&displacement) {
            return Err(AssemblerError::BranchOutOfRange {
                line: group.line,
                label: name.clone(),
                displacement,
            });
        }
    }
    Ok(())
}

/// Fails on the first group that starts or ends past the top of memory.
fn check_address_space(groups: &[SegmentGroup]) -> Result<(), AssemblerError> {
    let overflow = groups.iter().find(|g| g.offset > 0xFFFF || g.offset + g.size() > 0x1_0000);
    match overflow {
        Some(group) => Err(AssemblerError::ProgramOverflow { line: group.line }),
        None => Ok(()),
    }
}

/// Resolves every label reference in `groups` and lays them out at `origin`.
///
/// Each extra pass can only follow an operand that widened, and an operand
/// widens at most once, so the loop is bounded by the number of pending
/// operands plus one. With `check_branch_range` set, a branch whose target is
/// more than a signed byte away fails instead of wrapping.
pub fn resolve(
    groups: &mut [SegmentGroup],
    origin: u16,
    check_branch_range: bool,
) -> Result<(), AssemblerError> {
    let origin = origin as usize;
    let pending = groups
        .iter()
        .filter(|g| matches!(g.memory.state, MemoryState::Label { .. }))
        .count();

    for pass in 1..=pending + 1 {
        let resized = resolve_pass(groups, origin)?;
        log::debug!("resolution pass {}: {} operand(s) resized", pass, resized);
        if resized == 0 {
            break;
        }
    }

    check_address_space(groups)?;

    if check_branch_range {
        check_branch_ranges(groups)?;
    }

    for group in groups.iter_mut() {
        if matches!(group.memory.state, MemoryState::Label { .. }) {
            group.memory.state = MemoryState::Memory;
        }
    }

    Ok(())
}
