//! Byte emitter for resolved segment groups

use crate::assembler::segment::{GroupKind, InstructionKind, MemoryState, SegmentGroup};
use crate::assembler::AssemblerError;

/// Concatenates opcode and operand bytes of every normal group.
///
/// Ghost groups emit nothing. A group still waiting on a label is an error.
pub fn encode(groups: &[SegmentGroup]) -> Result<Vec<u8>, AssemblerError> {
    let mut bytes = Vec::with_capacity(groups.iter().map(SegmentGroup::size).sum());

    for group in groups.iter().filter(|g| g.kind == GroupKind::Normal) {
        if group.memory.state != MemoryState::Memory {
            return Err(AssemblerError::UnresolvedSegment { line: group.line });
        }
        match group.instruction.kind {
            InstructionKind::Opcode { opcode, .. } => bytes.push(opcode),
            _ => return Err(AssemblerError::UnresolvedSegment { line: group.line }),
        }
        bytes.extend_from_slice(&group.memory.bytes);
    }

    Ok(bytes)
}
