//! Vector shift instructions, plus the shift-and-add VSFA.

use crate::dsl::expand::{add_mask, expand, shape, shift, shift_packed};
use crate::dsl::operand::{imm_i, sy, sz, vm, vx, vz};
use crate::dsl::types::{I32, I64, U32, U64};
use crate::dsl::TableBuilder;

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.10. Vector Shift Instructions", 25);

    b.extend(shift(0xE5, "vsll", "VSLL", &U64, "{0} = {1} << ({2} & 0x3f)"));
    b.extend(shift_packed(0xE5, "vsll", "VSLL", &U32, "{0} = {1} << ({2} & 0x1f)"));
    b.not_implemented("VSLD");
    b.extend(shift(0xF5, "vsrl", "VSRL", &U64, "{0} = {1} >> ({2} & 0x3f)"));
    b.extend(shift_packed(0xF5, "vsrl", "VSRL", &U32, "{0} = {1} >> ({2} & 0x1f)"));
    b.not_implemented("VSRD");
    b.extend(shift(0xE6, "vsla.w", "VSLA", &I32, "{0} = {1} << ({2} & 0x1f)"));
    b.extend(shift_packed(0xE6, "vsla", "VSLA", &I32, "{0} = {1} << ({2} & 0x1f)"));
    b.extend(shift(0xD4, "vsla.l", "VSLAX", &I64, "{0} = {1} << ({2} & 0x3f)"));
    b.extend(shift(0xF6, "vsra.w", "VSRA", &I32, "{0} = {1} >> ({2} & 0x1f)"));
    b.extend(shift_packed(0xF6, "vsra", "VSRA", &I32, "{0} = {1} >> ({2} & 0x1f)"));
    b.extend(shift(0xD5, "vsra.l", "VSRAX", &I64, "{0} = {1} >> ({2} & 0x3f)"));

    let o_vsfa = add_mask(
        &[
            shape(vx(&U64), [vz(&U64), sy(&U64), sz(&U64)]),
            shape(vx(&U64), [vz(&U64), imm_i(&U64), sz(&U64)]),
        ],
        vm(),
    );
    b.extend(expand(
        0xD7,
        Some("VSFA"),
        "vsfa",
        &o_vsfa,
        Some("{0} = ({1} << ({2} & 0x7)) + {3}"),
    ));
}
