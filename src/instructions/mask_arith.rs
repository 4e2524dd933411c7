//! Vector mask arithmetic: merge, shuffle, compress/expand, and the
//! mask-forming compares.

use crate::dsl::expand::{expand, shape, vfmkm};
use crate::dsl::inst::inst;
use crate::dsl::operand::{cc, imm_n, sy, vd, vm, vm512, vmx512, vx, vy, vz};
use crate::dsl::types::{F32, I32, U32, U64};
use crate::dsl::{InstListExt, TableBuilder};

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.12. Vector Mask Arithmetic Instructions", 31);

    b.extend(expand(
        0xD6,
        Some("VMRG"),
        "vmrg",
        &[shape(vx(&U64), [vy(&U64), vz(&U64), vm()])],
        None,
    ));
    // Packed merge keeps the 512-bit mask but is not spelled `pvmrg`.
    b.push(
        inst(
            Some(0xD6),
            Some("VMRG"),
            "vmrg.w",
            "vmrgw_vvvM",
            vec![vx(&U32)],
            vec![vy(&U32), vz(&U32), vm512()],
        )
        .backend("VMRGpvm")
        .packed(),
    );

    b.extend(expand(
        0xBC,
        Some("VSHF"),
        "vshf",
        &[
            shape(vx(&U64), [vy(&U64), vz(&U64), sy(&U64)]),
            shape(vx(&U64), [vy(&U64), vz(&U64), imm_n(&U64)]),
        ],
        None,
    ));
    b.extend(
        expand(
            0x8D,
            Some("VCP"),
            "vcp",
            &[shape(vx(&U64), [vz(&U64), vm(), vd(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0x9D,
            Some("VEX"),
            "vex",
            &[shape(vx(&U64), [vz(&U64), vm(), vd(&U64)])],
            None,
        )
        .no_test(),
    );

    b.extend(vfmkm(0xB4, "VFMK", "vfmk.l"));
    b.extend(expand(0xB4, Some("VFMKat"), "vfmk.at", &[shape(vm(), [])], None).no_test());
    b.extend(expand(0xB4, Some("VFMKaf"), "vfmk.af", &[shape(vm(), [])], None).no_test());
    b.extend(expand(None, Some("VFMKpat"), "pvfmk.at", &[shape(vm512(), [])], None).no_test());
    b.extend(expand(None, Some("VFMKpaf"), "pvfmk.af", &[shape(vm512(), [])], None).no_test());
    b.extend(vfmkm(0xB4, "VFMS", "vfmk.w"));
    b.extend(
        expand(
            None,
            Some("VFMSp"),
            "pvfmk.w",
            &[shape(vm512(), [cc(), vz(&I32)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            None,
            Some("VFMSp"),
            "pvfmk.w",
            &[shape(vmx512(), [cc(), vz(&I32), vm512()])],
            None,
        )
        .no_test(),
    );
    b.extend(vfmkm(0xB4, "VFMFd", "vfmk.d"));
    b.extend(vfmkm(0xB4, "VFMFs", "vfmk.s"));
    b.extend(
        expand(
            None,
            Some("VFMFp"),
            "pvfmk.s",
            &[shape(vm512(), [cc(), vz(&F32)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            None,
            Some("VFMFp"),
            "pvfmk.s",
            &[shape(vmx512(), [cc(), vz(&F32), vm512()])],
            None,
        )
        .no_test(),
    );
}
