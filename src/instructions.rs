//! The declarative instruction table, one module per manual section.

mod control;
mod fixed_arith;
mod float;
mod gather;
mod logical;
mod mask_arith;
mod mask_reg;
mod recursive;
mod shift;
mod transfer;

use crate::dsl::{CallingConv, InstTable, TableBuilder};

/// Build the full instruction table for one calling convention.
#[must_use]
pub fn table(conv: CallingConv) -> InstTable {
    let mut b = TableBuilder::new(conv);
    transfer::define(&mut b);
    fixed_arith::define(&mut b);
    logical::define(&mut b);
    shift::define(&mut b);
    float::define(&mut b);
    mask_arith::define(&mut b);
    recursive::define(&mut b);
    gather::define(&mut b);
    mask_reg::define(&mut b);
    control::define(&mut b);
    b.finish()
}
