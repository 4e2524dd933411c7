//! Vector logical arithmetic: the bitwise family and the sequence numbers.

use crate::dsl::expand::{expand, logical, shape};
use crate::dsl::operand::vx;
use crate::dsl::types::U64;
use crate::dsl::{InstListExt, TableBuilder};

pub fn define(b: &mut TableBuilder) {
    b.section(
        "5.3.2.9. Vector Logical Arithmetic Operation Instructions",
        23,
    );

    b.extend(logical(0xC4, "vand", "VAND", "{0} = {1} & {2}"));
    b.extend(logical(0xC5, "vor", "VOR", "{0} = {1} | {2}"));
    b.extend(logical(0xC6, "vxor", "VXOR", "{0} = {1} ^ {2}"));
    b.extend(logical(0xC7, "veqv", "VEQV", "{0} = ~({1} ^ {2})"));
    b.not_implemented("VLDZ");
    b.not_implemented("VPCNT");
    b.not_implemented("VBRV");

    let seq = [shape(vx(&U64), [])];
    b.extend(expand(0x99, Some("VSEQ"), "vseq", &seq, Some("{0} = i")).no_test());
    b.extend(expand(0x99, Some("VSEQl"), "pvseq.lo", &seq, Some("{0} = i")).no_test());
    b.extend(expand(0x99, Some("VSEQu"), "pvseq.up", &seq, Some("{0} = i")).no_test());
    b.extend(expand(0x99, Some("VSEQp"), "pvseq", &seq, Some("{0} = i")).no_test());
}
