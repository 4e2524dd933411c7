//! Vector transfer instructions: loads, stores, prefetch, element and mask
//! register moves, broadcasts.

use crate::dsl::expand::{expand, shape, store, vldm, vstm};
use crate::dsl::inst::inst;
use crate::dsl::operand::{imm_i, imm_n, sx, sy, sz, uimm7, vd, vm, vm512, vmd, vmd512, vmx, vmx512, vmz, vmz512, vx, vz};
use crate::dsl::types::{F32, F64, I32, I64, U32, U64, VOID_CONST_PTR};
use crate::dsl::{InstListExt, TableBuilder};

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.7. Vector Transfer Instructions", 18);

    b.extend(vldm(0x81, "VLD", "vld"));
    b.extend(vldm(0x82, "VLDU", "vldu"));
    b.extend(vldm(0x83, "VLDLsx", "vldl.sx"));
    b.extend(vldm(0x83, "VLDLzx", "vldl.zx"));
    b.extend(vldm(0xC1, "VLD2D", "vld2d"));
    b.extend(vldm(0xC2, "VLDU2D", "vldu2d"));
    b.extend(vldm(0xC3, "VLDL2Dsx", "vldl2d.sx"));
    b.extend(vldm(0xC3, "VLDL2Dzx", "vldl2d.zx"));
    b.extend(vstm(0x91, "VST", "vst"));
    b.extend(vstm(0x92, "VSTU", "vstu"));
    b.extend(vstm(0x93, "VSTL", "vstl"));
    b.extend(vstm(0xD1, "VST2D", "vst2d"));
    b.extend(vstm(0xD2, "VSTU2D", "vstu2d"));
    b.extend(vstm(0xD3, "VSTL2D", "vstl2d"));

    b.extend(
        expand(
            0x80,
            Some("PFCHV"),
            "pfchv",
            &[store([sy(&I64), sz(&VOID_CONST_PTR)])],
            None,
        )
        .no_test()
        .inaccessible_or_arg_mem(),
    );
    b.extend(
        expand(
            0x80,
            Some("PFCHV"),
            "pfchv",
            &[store([imm_i(&I64), sz(&VOID_CONST_PTR)])],
            None,
        )
        .no_test()
        .inaccessible_or_arg_mem(),
    );

    b.extend(
        expand(
            0x8E,
            Some("LSV"),
            "lsv",
            &[shape(vx(&U64), [vd(&U64), sy(&U32), sz(&U64)])],
            None,
        )
        .no_test(),
    );

    // Element reads share one encoding; only the u64 view defines it.
    b.push(
        inst(
            Some(0x9E),
            Some("LVS"),
            "lvs",
            "lvs_svs_u64",
            vec![sx(&U64)],
            vec![vx(&U64), sy(&U32)],
        )
        .backend("LVSi64r")
        .no_test(),
    );
    b.push(
        inst(
            Some(0x9E),
            Some("LVS"),
            "lvs",
            "lvs_svs_f64",
            vec![sx(&F64)],
            vec![vx(&U64), sy(&U32)],
        )
        .backend("LVSf64r")
        .no_test()
        .no_backend_def(),
    );
    b.push(
        inst(
            Some(0x9E),
            Some("LVS"),
            "lvs",
            "lvs_svs_f32",
            vec![sx(&F32)],
            vec![vx(&U64), sy(&U32)],
        )
        .backend("LVSf32r")
        .no_test()
        .no_backend_def(),
    );

    b.extend(
        expand(
            0xB7,
            Some("LVMr"),
            "lvm",
            &[shape(vmx(), [vmd(), sy(&U64), sz(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0xB7,
            Some("LVMi"),
            "lvm",
            &[shape(vmx(), [vmd(), imm_n(&U64), sz(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0xB7,
            Some("LVMpi"),
            "lvm",
            &[shape(vmx512(), [vmd512(), imm_n(&U64), sz(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0xA7,
            Some("SVMr"),
            "svm",
            &[shape(sx(&U64), [vmz(), sy(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0xA7,
            Some("SVMi"),
            "svm",
            &[shape(sx(&U64), [vmz(), imm_n(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0xA7,
            Some("SVMpi"),
            "svm",
            &[shape(sx(&U64), [vmz512(), imm_n(&U64)])],
            None,
        )
        .no_test(),
    );

    define_vbrd(b);

    b.extend(
        expand(
            0x9C,
            Some("VMV"),
            "vmv",
            &[shape(vx(&U64), [sy(&U32), vz(&U64)])],
            None,
        )
        .no_test(),
    );
    b.extend(
        expand(
            0x9C,
            Some("VMV"),
            "vmv",
            &[shape(vx(&U64), [uimm7(&U32), vz(&U64)])],
            None,
        )
        .no_test(),
    );
}

/// The broadcast family: per-type entries share the one opcode, so the f64
/// views reuse the i64 encodings and define no instruction of their own.
fn define_vbrd(b: &mut TableBuilder) {
    let opc = Some(0x8C);
    let ex = "{0} = {1}";
    b.push(
        inst(opc, Some("VBRD"), "vbrd", "vbrd_vs_f64", vec![vx(&F64)], vec![sy(&F64)])
            .backend("VBRDf64r")
            .expr(ex)
            .no_backend_def(),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "vbrd",
            "vbrd_vsmv_f64",
            vec![vx(&F64)],
            vec![sy(&F64), vm(), vd(&F64)],
        )
        .backend("VBRDf64rm")
        .expr(ex)
        .no_backend_def(),
    );
    b.push(
        inst(opc, Some("VBRD"), "vbrd", "vbrd_vs_i64", vec![vx(&I64)], vec![sy(&I64)])
            .backend("VBRDr")
            .expr(ex),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "vbrd",
            "vbrd_vsmv_i64",
            vec![vx(&I64)],
            vec![sy(&I64), vm(), vd(&I64)],
        )
        .backend("VBRDrm")
        .expr(ex),
    );
    b.push(
        inst(opc, Some("VBRD"), "vbrd", "vbrd_vI_i64", vec![vx(&I64)], vec![imm_i(&I64)])
            .backend("VBRDi")
            .expr(ex),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "vbrd",
            "vbrd_vImv_i64",
            vec![vx(&I64)],
            vec![imm_i(&I64), vm(), vd(&I64)],
        )
        .backend("VBRDim")
        .expr(ex),
    );
    b.push(
        inst(opc, Some("VBRD"), "vbrdu", "vbrdu_vs_f32", vec![vx(&F32)], vec![sy(&F32)])
            .backend("VBRDf32r")
            .expr(ex),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "vbrdu",
            "vbrdu_vsmv_f32",
            vec![vx(&F32)],
            vec![sy(&F32), vm(), vd(&F32)],
        )
        .backend("VBRDf32rm")
        .expr(ex),
    );
    b.push(
        inst(opc, Some("VBRD"), "vbrdl", "vbrdl_vs_i32", vec![vx(&I32)], vec![sy(&I32)])
            .backend("VBRDi32r")
            .expr(ex),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "vbrdl",
            "vbrdl_vsmv_i32",
            vec![vx(&I32)],
            vec![sy(&I32), vm(), vd(&I32)],
        )
        .backend("VBRDi32rm")
        .expr(ex),
    );
    b.push(
        inst(opc, Some("VBRD"), "vbrdl", "vbrdl_vI_i32", vec![vx(&I32)], vec![imm_i(&I32)])
            .backend("VBRDi32i")
            .expr(ex),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "vbrdl",
            "vbrdl_vImv_i32",
            vec![vx(&I32)],
            vec![imm_i(&I32), vm(), vd(&I32)],
        )
        .backend("VBRDi32im")
        .expr(ex),
    );
    b.push(
        inst(opc, Some("VBRD"), "pvbrd", "pvbrd_vs_i64", vec![vx(&U32)], vec![sy(&U64)])
            .backend("VBRDp")
            .packed()
            .expr(ex),
    );
    b.push(
        inst(
            opc,
            Some("VBRD"),
            "pvbrd",
            "pvbrd_vsMv_i64",
            vec![vx(&U32)],
            vec![sy(&U64), vm512(), vd(&U32)],
        )
        .backend("VBRDpm")
        .packed()
        .expr(ex),
    );
}
