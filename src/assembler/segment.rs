//! Segment groups: the per-line unit the assembler lays out and resolves.
//!
//! A program is an ordered `Vec<SegmentGroup>` owned by one assembly run. The
//! resolver mutates groups in place, addressing them by index.

use crate::{AddressingMode, Operation};

/// Whether a group occupies address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// An instruction: opcode byte plus operand bytes.
    Normal,
    /// A label or constant declaration; emits nothing.
    Ghost,
}

/// What the instruction segment of a group records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionKind {
    /// A real opcode byte.
    Opcode {
        opcode: u8,
        operation: Operation,
        mode: AddressingMode,
    },
    /// `NAME:` defines a label at the group's offset.
    Label(String),
    /// `DEFINE NAME VALUE` declares a constant.
    Variable(String),
}

impl InstructionKind {
    pub fn size(&self) -> usize {
        match self {
            InstructionKind::Opcode { .. } => 1,
            InstructionKind::Label(_) | InstructionKind::Variable(_) => 0,
        }
    }
}

/// The instruction half of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSegment {
    /// Operator text as written (upper-cased).
    pub operator: String,
    /// True for the eight conditional branches.
    pub branch: bool,
    pub kind: InstructionKind,
}

/// Resolution state of an operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryState {
    /// Bytes are final.
    Memory,
    /// Bytes wait on a label. `modes` maps each operand size the instruction
    /// may take to the addressing mode used at that size.
    Label {
        name: String,
        modes: Vec<(usize, AddressingMode)>,
    },
    /// The value of a `DEFINE` constant.
    Variable,
}

/// The operand half of a group: 0-2 little-endian bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySegment {
    pub state: MemoryState,
    pub bytes: Vec<u8>,
}

impl MemorySegment {
    pub fn known(bytes: Vec<u8>) -> Self {
        Self {
            state: MemoryState::Memory,
            bytes,
        }
    }

    /// A pending label reference sized for its narrowest mode.
    pub fn pending(name: String, modes: Vec<(usize, AddressingMode)>) -> Self {
        let size = modes.iter().map(|(size, _)| *size).min().unwrap_or(0);
        Self {
            state: MemoryState::Label { name, modes },
            bytes: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The little-endian value of the bytes.
    pub fn value(&self) -> usize {
        self.bytes
            .iter()
            .rev()
            .fold(0, |acc, &byte| (acc << 8) | byte as usize)
    }
}

/// One source line's worth of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentGroup {
    /// 1-based source line.
    pub line: usize,
    /// Assigned address.
    pub offset: usize,
    pub kind: GroupKind,
    pub instruction: InstructionSegment,
    pub memory: MemorySegment,
}

impl SegmentGroup {
    pub fn instruction(
        line: usize,
        operator: &str,
        operation: Operation,
        mode: AddressingMode,
        opcode: u8,
        memory: MemorySegment,
    ) -> Self {
        Self {
            line,
            offset: 0,
            kind: GroupKind::Normal,
            instruction: InstructionSegment {
                operator: operator.to_string(),
                branch: operation.is_branch(),
                kind: InstructionKind::Opcode {
                    opcode,
                    operation,
                    mode,
                },
            },
            memory,
        }
    }

    pub fn label(line: usize, name: &str) -> Self {
        Self {
            line,
            offset: 0,
            kind: GroupKind::Ghost,
            instruction: InstructionSegment {
                operator: format!("{}:", name),
                branch: false,
                kind: InstructionKind::Label(name.to_string()),
            },
            memory: MemorySegment::known(Vec::new()),
        }
    }

    pub fn variable(line: usize, name: &str, bytes: Vec<u8>) -> Self {
        Self {
            line,
            offset: 0,
            kind: GroupKind::Ghost,
            instruction: InstructionSegment {
                operator: "DEFINE".to_string(),
                branch: false,
                kind: InstructionKind::Variable(name.to_string()),
            },
            memory: MemorySegment {
                state: MemoryState::Variable,
                bytes,
            },
        }
    }

    /// Bytes this group occupies in the image; zero for ghosts.
    pub fn size(&self) -> usize {
        match self.kind {
            GroupKind::Ghost => 0,
            GroupKind::Normal => self.instruction.kind.size() + self.memory.size(),
        }
    }
}

/// Assigns consecutive offsets starting at `origin`.
pub fn layout(groups: &mut [SegmentGroup], origin: usize) {
    let mut offset = origin;
    for group in groups.iter_mut() {
        group.offset = offset;
        offset += group.size();
    }
}
