//! Vector fixed-point arithmetic: add/subtract/multiply/divide/compare and
//! min/max over the integer element types.

use crate::dsl::expand::{expand, inst3divbys, inst3l, inst3u, inst3w, shape};
use crate::dsl::operand::{imm_i, sy, vx, vy, vz};
use crate::dsl::types::{I32, I64, U32, U64};
use crate::dsl::TableBuilder;

pub fn define(b: &mut TableBuilder) {
    b.section(
        "5.3.2.8. Vector Fixed-Point Arithmetic Operation Instructions",
        19,
    );

    b.extend(inst3u(0xC8, "vaddu", "VADD", "{0} = {1} + {2}", true));
    b.extend(inst3w(0xCA, "vadds", "VADS", "{0} = {1} + {2}", true));
    b.extend(inst3l(0x8B, "vadds", "VADX", "{0} = {1} + {2}"));
    b.extend(inst3u(0xC8, "vsubu", "VSUB", "{0} = {1} - {2}", true));
    b.extend(inst3w(0xCA, "vsubs", "VSBS", "{0} = {1} - {2}", true));
    b.extend(inst3l(0x8B, "vsubs", "VSBX", "{0} = {1} - {2}"));
    b.extend(inst3u(0xC9, "vmulu", "VMPY", "{0} = {1} * {2}", false));
    b.extend(inst3w(0xCB, "vmuls", "VMPS", "{0} = {1} * {2}", false));
    b.extend(inst3l(0xDB, "vmuls", "VMPX", "{0} = {1} * {2}"));

    // Widening multiply: 64-bit products of 32-bit factors.
    let o_vmpd = [
        shape(vx(&I64), [vy(&I32), vz(&I32)]),
        shape(vx(&I64), [sy(&I32), vz(&I32)]),
        shape(vx(&I64), [imm_i(&I32), vz(&I32)]),
    ];
    b.extend(expand(
        0xD9,
        Some("VMPD"),
        "vmuls.l.w",
        &o_vmpd,
        Some("{0} = {1} * {2}"),
    ));

    b.extend(inst3u(0xE9, "vdivu", "VDIV", "{0} = {1} / {2}", false));
    b.extend(inst3divbys(0xE9, "vdivu.l", "VDIVl", &U64));
    b.extend(inst3divbys(0xE9, "vdivu.w", "VDIVw", &U32));
    b.extend(inst3w(0xEB, "vdivs", "VDVS", "{0} = {1} / {2}", false));
    b.extend(inst3divbys(0xEB, "vdivs.w.sx", "VDVSwsx", &I32));
    b.extend(inst3divbys(0xEB, "vdivs.w.zx", "VDVSwzx", &I32));
    b.extend(inst3l(0xFB, "vdivs", "VDVX", "{0} = {1} / {2}"));
    b.extend(inst3divbys(0xEB, "vdivs.l", "VDVXl", &I64));

    b.extend(inst3u(0xB9, "vcmpu", "VCMP", "{0} = compare({1}, {2})", true));
    b.extend(inst3w(0xFA, "vcmps", "VCPS", "{0} = compare({1}, {2})", true));
    b.extend(inst3l(0xBA, "vcmps", "VCPX", "{0} = compare({1}, {2})"));
    b.extend(inst3w(0x8A, "vmaxs", "VCMSa", "{0} = max({1}, {2})", true));
    b.extend(inst3w(0x8A, "vmins", "VCMSi", "{0} = min({1}, {2})", true));
    b.extend(inst3l(0x9A, "vmaxs", "VCMXa", "{0} = max({1}, {2})"));
    b.extend(inst3l(0x9A, "vmins", "VCMXi", "{0} = min({1}, {2})"));
}
