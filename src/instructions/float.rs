//! Vector floating-point operations, including the fused multiply-add
//! family and the float/integer conversions.

use crate::dsl::expand::{expand, inst2f, inst3f, inst4f, shape, vfix};
use crate::dsl::operand::{sy, vx, vy, vz};
use crate::dsl::types::{F32, F64, I32, I64};
use crate::dsl::TableBuilder;

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.11. Vector Floating-Point Operation Instructions", 26);

    b.extend(inst3f(0xCC, "vfadd", "VFAD", "{0} = {1} + {2}", true));
    b.extend(inst3f(0xDC, "vfsub", "VFSB", "{0} = {1} - {2}", true));
    b.extend(inst3f(0xCD, "vfmul", "VFMP", "{0} = {1} * {2}", true));
    b.extend(inst3f(0xDD, "vfdiv", "VFDV", "{0} = {1} / {2}", false));

    // Software single-precision divide alternatives; intrinsic-only.
    b.extend(expand(
        None,
        None,
        "vfdivsA",
        &[shape(vx(&F32), [vy(&F32), vz(&F32)])],
        Some("{0} = {1} / {2}"),
    ));
    b.extend(expand(
        None,
        None,
        "vfdivsA",
        &[shape(vx(&F32), [sy(&F32), vz(&F32)])],
        Some("{0} = {1} / {2}"),
    ));
    b.extend(expand(
        None,
        None,
        "pvfdivA",
        &[shape(vx(&F32), [vy(&F32), vz(&F32)])],
        Some("{0} = {1} / {2}"),
    ));

    b.extend(inst2f(0xED, "vfsqrt", "VFSQRT", "{0} = std::sqrt({1})", false));
    b.extend(inst3f(0xFC, "vfcmp", "VFCP", "{0} = compare({1}, {2})", true));
    b.extend(inst3f(0xBD, "vfmax", "VFCMa", "{0} = max({1}, {2})", true));
    b.extend(inst3f(0xBD, "vfmin", "VFCMi", "{0} = min({1}, {2})", true));
    b.extend(inst4f(0xE2, "vfmad", "VFMAD", "{0} = {2} * {3} + {1}"));
    b.extend(inst4f(0xF2, "vfmsb", "VFMSB", "{0} = {2} * {3} - {1}"));
    b.extend(inst4f(0xE3, "vfnmad", "VFNMAD", "{0} =  - ({2} * {3} + {1})"));
    b.extend(inst4f(0xF3, "vfnmsb", "VFNMSB", "{0} =  - ({2} * {3} - {1})"));
    b.extend(inst2f(0xE1, "vrcp", "VRCP", "{0} = 1.0f / {1}", true));
    b.extend(inst2f(0xF1, "vrsqrt", "VRSQRT", "{0} = 1.0f / std::sqrt({1})", true));
    b.not_implemented("VRSQRTnex");

    let wide_to_int = [shape(vx(&I32), [vy(&F64)])];
    b.extend(vfix(0xE8, "VFIXdsx", "vcvt.w.d.sx", &wide_to_int, "int"));
    b.extend(vfix(0xE8, "VFIXdzx", "vcvt.w.d.zx", &wide_to_int, "unsigned int"));
    let single_to_int = [shape(vx(&I32), [vy(&F32)])];
    b.extend(vfix(0xE8, "VFIXssx", "vcvt.w.s.sx", &single_to_int, "int"));
    b.extend(vfix(0xE8, "VFIXszx", "vcvt.w.s.zx", &single_to_int, "unsigned int"));
    b.extend(vfix(0xE8, "VFIXp", "pvcvt.w.s", &single_to_int, "int"));
    b.extend(vfix(
        0xA8,
        "VFIXX",
        "vcvt.l.d",
        &[shape(vx(&I64), [vy(&F64)])],
        "long long",
    ));

    b.extend(expand(
        0xF8,
        Some("VFLTd"),
        "vcvt.d.w",
        &[shape(vx(&F64), [vy(&I32)])],
        Some("{0} = (double){1}"),
    ));
    b.extend(expand(
        0xF8,
        Some("VFLTs"),
        "vcvt.s.w",
        &[shape(vx(&F32), [vy(&I32)])],
        Some("{0} = (float){1}"),
    ));
    b.extend(expand(
        0xF8,
        Some("VFLTp"),
        "pvcvt.s.w",
        &[shape(vx(&F32), [vy(&I32)])],
        Some("{0} = (float){1}"),
    ));
    b.extend(expand(
        0xB8,
        Some("VFLTX"),
        "vcvt.d.l",
        &[shape(vx(&F64), [vy(&I64)])],
        Some("{0} = (double){1}"),
    ));
    b.extend(expand(
        0x8F,
        Some("VCVD"),
        "vcvt.d.s",
        &[shape(vx(&F64), [vy(&F32)])],
        Some("{0} = (double){1}"),
    ));
    b.extend(expand(
        0x9F,
        Some("VCVS"),
        "vcvt.s.d",
        &[shape(vx(&F32), [vy(&F64)])],
        Some("{0} = (float){1}"),
    ));
}
