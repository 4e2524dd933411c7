//! The description DSL: element types, the operand model, instruction
//! variants, the expansion engine, and the instruction table they fill.

pub mod expand;
pub mod inst;
pub mod operand;
pub mod table;
pub mod types;

pub use inst::{inst, CallingConv, Inst, InstListExt, MemEffect};
pub use operand::{Operand, OperandKind};
pub use table::{Entry, InstTable, Section, TableBuilder};
