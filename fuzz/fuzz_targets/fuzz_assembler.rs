//! Fuzz target for the assembler.
//!
//! Feeds arbitrary strings to the assembler to find panics in parsing,
//! resolution and encoding. Successful output must be consistent with its
//! own symbol table.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::{assemble, Assembler, AssemblerOptions};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    if let Ok(output) = assemble(&source) {
        assert_eq!(output.origin, 0x0600);
        let mut names: Vec<&str> = output.symbols.iter().map(|s| s.name.as_str()).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count, "symbols must be unique");
    }

    // Strict branch checking may only reject what permissive mode accepts
    let strict = Assembler::new(AssemblerOptions::default().with_branch_range_check(true));
    if let Ok(checked) = strict.assemble(&source) {
        let permissive = assemble(&source).expect("strict success implies permissive success");
        assert_eq!(checked.bytes, permissive.bytes);
    }
});
