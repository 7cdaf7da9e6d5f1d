//! Symbol table derived from segment groups
//!
//! There is no separately maintained table: definitions live in the ghost
//! groups themselves, and lookups scan the sequence. The first definition of a
//! name wins.

use crate::assembler::segment::{InstructionKind, SegmentGroup};

/// What a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// `NAME:` — resolves to its address.
    Label,
    /// `DEFINE NAME VALUE` — resolves to its value.
    Constant,
}

/// A symbol table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Upper-cased name
    pub name: String,

    /// Address for labels, declared value for constants
    pub value: u16,

    pub kind: SymbolKind,

    /// Source line where the symbol was defined
    pub defined_at: usize,
}

fn defined_name(group: &SegmentGroup) -> Option<&str> {
    match &group.instruction.kind {
        InstructionKind::Label(name) | InstructionKind::Variable(name) => Some(name.as_str()),
        InstructionKind::Opcode { .. } => None,
    }
}

fn symbol_of(group: &SegmentGroup) -> Option<Symbol> {
    let (name, value, kind) = match &group.instruction.kind {
        InstructionKind::Label(name) => (name, group.offset, SymbolKind::Label),
        InstructionKind::Variable(name) => (name, group.memory.value(), SymbolKind::Constant),
        InstructionKind::Opcode { .. } => return None,
    };
    Some(Symbol {
        name: name.clone(),
        value: value as u16,
        kind,
        defined_at: group.line,
    })
}

/// Finds the first definition of `name` at the groups' current offsets.
///
/// Labels are laid out inside the 64 KB address space by the resolver, which
/// rejects any program that runs past 0xFFFF, so `value` never truncates.
pub fn lookup(groups: &[SegmentGroup], name: &str) -> Option<Symbol> {
    groups
        .iter()
        .find(|group| defined_name(group) == Some(name))
        .and_then(symbol_of)
}

/// Snapshot of every symbol in a segment sequence
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Collects definitions in source order, dropping later redefinitions.
    pub fn scan(groups: &[SegmentGroup]) -> Self {
        let mut symbols: Vec<Symbol> = Vec::new();
        for symbol in groups.iter().filter_map(symbol_of) {
            if !symbols.iter().any(|s| s.name == symbol.name) {
                symbols.push(symbol);
            }
        }
        Self { symbols }
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Get all symbols
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}
