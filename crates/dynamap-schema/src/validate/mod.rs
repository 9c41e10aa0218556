//! Identifier checks shared by the assembler and the emitter.

pub mod naming;
