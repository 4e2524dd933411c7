//! Vector recursive-relation instructions: sums and first/last-element
//! maximum/minimum reductions.

use crate::dsl::expand::{flm, shape, vsum};
use crate::dsl::operand::{vx, vy};
use crate::dsl::types::{F32, F64, I32, I64, U32};
use crate::dsl::TableBuilder;

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.13. Vector Recursive Relation Instructions", 32);

    b.extend(vsum(0xEA, "VSUMSsx", "vsum.w.sx", &[shape(vx(&I32), [vy(&I32)])]));
    b.extend(vsum(0xEA, "VSUMSzx", "vsum.w.zx", &[shape(vx(&I32), [vy(&I32)])]));
    b.extend(vsum(0xAA, "VSUMX", "vsum.l", &[shape(vx(&I64), [vy(&I64)])]));
    b.extend(vsum(0xEC, "VFSUMd", "vfsum.d", &[shape(vx(&F64), [vy(&F64)])]));
    b.extend(vsum(0xEC, "VFSUMs", "vfsum.s", &[shape(vx(&F32), [vy(&F32)])]));

    b.extend(flm(0xBB, "VMAXSa{}sx", "vrmaxs.w{}.sx", &[shape(vx(&I32), [vy(&I32)])]));
    b.extend(flm(0xBB, "VMAXSa{}zx", "vrmaxs.w{}.zx", &[shape(vx(&U32), [vy(&U32)])]));
    b.extend(flm(0xBB, "VMAXSi{}sx", "vrmins.w{}.sx", &[shape(vx(&I32), [vy(&I32)])]));
    b.extend(flm(0xBB, "VMAXSi{}zx", "vrmins.w{}.zx", &[shape(vx(&U32), [vy(&U32)])]));
    b.extend(flm(0xAB, "VMAXXa{}", "vrmaxs.l{}", &[shape(vx(&I64), [vy(&I64)])]));
    b.extend(flm(0xAB, "VMAXXi{}", "vrmins.l{}", &[shape(vx(&I64), [vy(&I64)])]));
    b.extend(flm(0xAD, "VFMAXad{}", "vfrmax.d{}", &[shape(vx(&F64), [vy(&F64)])]));
    b.extend(flm(0xAD, "VFMAXas{}", "vfrmax.s{}", &[shape(vx(&F32), [vy(&F32)])]));
    b.extend(flm(0xAD, "VFMAXid{}", "vfrmin.d{}", &[shape(vx(&F64), [vy(&F64)])]));
    b.extend(flm(0xAD, "VFMAXis{}", "vfrmin.s{}", &[shape(vx(&F32), [vy(&F32)])]));

    for m in [
        "VRAND", "VROR", "VRXOR", "VFIA", "VFIS", "VFIM", "VFIAM", "VFISM", "VFIMA", "VFIMS",
    ] {
        b.not_implemented(m);
    }
}
