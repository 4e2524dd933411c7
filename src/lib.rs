//! Meta-level description of the SX-Aurora VE vector instruction set.
//!
//! One declarative table (see [`instructions`]) describes every vector
//! instruction and its operand shapes; the [`dsl`] expansion engine turns
//! each description into the full family of concrete variants (per element
//! type, masked/unmasked, packed/unpacked, register/immediate, and the two
//! calling conventions); and [`generate`] renders the artifacts consumed by
//! the compiler: backend instruction definitions, IR-intrinsic and builtin
//! declarations, the intrinsics header, legacy lowering patterns and
//! dispatch lines, per-intrinsic test programs, and the manual.
//!
//! The table is built once per run and is immutable afterwards; generation
//! is a deterministic function of it. Errors in the table itself (unknown
//! operand shapes, misused element types) panic during construction, before
//! any artifact is written.

pub mod dsl;
pub mod generate;
pub mod instructions;
