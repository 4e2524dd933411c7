//! The expansion engine: pure functions that turn one semantic operation
//! description into its full family of instruction variants.
//!
//! Each combinator covers one recurring shape of the instruction set (the
//! three-operand arithmetic families, the masked cross-product, the packed
//! twins, the memory families) and bottoms out in [`expand`], which fixes
//! the identity of every variant: its intrinsic name (assembly mnemonic plus
//! the operand-kind suffix) and its backend definition name (base name plus
//! the registered instruction suffix).
//!
//! Malformed input fails immediately: an operand shape without a registered
//! suffix, or a masked shape without a vector result, is a bug in the table
//! itself and panics with the offending operation and shape.

use super::inst::{inst, Inst, InstListExt};
use super::operand::{self, Operand};
use super::types;

/// One operand-list shape: an optional result operand plus the inputs.
#[derive(Clone, Debug)]
pub struct Shape {
    pub out: Option<Operand>,
    pub ins: Vec<Operand>,
}

/// A shape producing a result.
pub fn shape(out: Operand, ins: impl Into<Vec<Operand>>) -> Shape {
    Shape {
        out: Some(out),
        ins: ins.into(),
    }
}

/// A store-like shape with no result operand.
pub fn store(ins: impl Into<Vec<Operand>>) -> Shape {
    Shape {
        out: None,
        ins: ins.into(),
    }
}

/// The canonical vector/vector, vector/scalar, and vector/immediate
/// three-operand shapes.
pub fn args_vvv(ty: &'static types::ElemType) -> Shape {
    shape(operand::vx(ty), [operand::vy(ty), operand::vz(ty)])
}

pub fn args_vsv(ty: &'static types::ElemType) -> Shape {
    shape(operand::vx(ty), [operand::sy(ty), operand::vz(ty)])
}

pub fn args_viv(ty: &'static types::ElemType) -> Shape {
    shape(operand::vx(ty), [operand::imm_i(ty), operand::vz(ty)])
}

/// The masked cross-product: the given shapes followed by a masked copy of
/// each, with the mask and a merge destination (typed to the shape's result)
/// appended to the inputs.
///
/// # Panics
///
/// Panics when a masked copy is requested for a shape without a vector
/// result; there is nothing to merge into.
pub fn add_mask(shapes: &[Shape], mask: Operand) -> Vec<Shape> {
    let mut all = shapes.to_vec();
    for s in shapes {
        let out = s
            .out
            .as_ref()
            .unwrap_or_else(|| panic!("masked shape without a result operand"));
        let elem = out
            .ty
            .elem
            .unwrap_or_else(|| panic!("masked shape with a non-vector result `{}`", out.role));
        let mut ins = s.ins.clone();
        ins.push(mask);
        ins.push(operand::vd(elem));
        all.push(Shape {
            out: s.out,
            ins,
        });
    }
    all
}

/// Instruction-name suffix for an operand-kind sequence.
///
/// This mapping is closed: every shape the combinators can produce must be
/// registered here, and an unknown key is a fatal table-construction error.
fn backend_suffix(asm: &str, key: &str) -> &'static str {
    match key {
        "v" | "vv" | "vvv" | "vvvv" => "v",
        "vvvm" | "vvvM" => "v",
        "vvvmv" | "vvvMv" | "vvvvmv" | "vvvvMv" => "vm",
        "vs" | "svs" | "vsv" | "vsvv" | "vvss" => "r",
        "vvs" | "vvsv" => "r2",
        "vsmv" | "vsMv" | "vsvmv" | "vsvMv" | "vsvvmv" | "vsvvMv" | "vvssmv" => "rm",
        "vvsmv" | "vvsMv" => "rm2",
        "vvsvmv" | "vvsvMv" => "r2m",
        "vI" | "vIv" | "vIvv" | "vvIs" | "vvvI" => "i",
        "vvI" | "vvIv" => "i2",
        "vImv" | "vIMv" | "vIvmv" | "vvIsmv" => "im",
        "vvImv" => "im2",
        "vvIvmv" => "i2m",
        "vss" => "rr",
        "vIs" => "ir",
        "vsZ" => "rz",
        "vIZ" => "iz",
        "vvvs" => "r",
        "vvm" | "vvmv" | "vvMv" => "vm",
        "mcv" | "Mcv" => "v",
        "mcvm" | "McvM" => "vm",
        "ss" | "Is" | "m" | "M" | "mm" | "MM" | "mmm" | "MMM" | "sm" | "sM" | "sms" | "smI"
        | "sMI" | "mmss" | "mmIs" | "MMIs" => "",
        _ => panic!("no instruction-name suffix registered for operand shape `{key}` of `{asm}`"),
    }
}

/// The core cross-product: one variant per operand-list shape.
///
/// The intrinsic name is the assembly mnemonic with punctuation removed plus
/// `_` and the operand kind codes; the backend name is `backend_base` plus
/// the registered instruction suffix. Variants are packed when the assembly
/// mnemonic carries the `p` prefix; entries without an opcode are pseudo and
/// lose their assembly mnemonic.
///
/// # Panics
///
/// Panics on an empty shape list or an unregistered operand shape.
pub fn expand<'a>(
    opcode: impl Into<Option<u8>>,
    backend_base: impl Into<Option<&'a str>>,
    asm: &str,
    shapes: &[Shape],
    expr: impl Into<Option<&'a str>>,
) -> Vec<Inst> {
    let opcode = opcode.into();
    let backend_base = backend_base.into();
    let expr = expr.into();
    assert!(!shapes.is_empty(), "`{asm}` expands no operand shapes");

    let mnemonic: Option<String> =
        backend_base.map(|b| b.chars().filter(|c| !c.is_ascii_lowercase()).collect());
    let base_name = asm.replace('.', "");
    let packed = asm.starts_with('p');
    let asm = if opcode.is_none() { "" } else { asm };

    shapes
        .iter()
        .map(|s| {
            let outs: Vec<Operand> = s.out.into_iter().collect();
            let key: String = outs
                .iter()
                .chain(&s.ins)
                .map(Operand::kind_code)
                .collect();
            let mut i = inst(
                opcode,
                mnemonic.as_deref(),
                asm,
                format!("{base_name}_{key}"),
                outs,
                s.ins.clone(),
            );
            if let Some(base) = backend_base {
                i = i.backend(format!("{base}{}", backend_suffix(&base_name, &key)));
            }
            if packed {
                i = i.packed();
            }
            if let Some(e) = expr {
                i = i.expr(e);
            }
            i
        })
        .collect()
}

/// [`expand`] over the masked cross-product; the mask width follows the
/// packed prefix of the assembly mnemonic.
pub fn expand_masked<'a>(
    opcode: impl Into<Option<u8>>,
    backend_base: impl Into<Option<&'a str>>,
    asm: &str,
    shapes: &[Shape],
    expr: impl Into<Option<&'a str>>,
) -> Vec<Inst> {
    let mask = if asm.starts_with('p') {
        operand::vm512()
    } else {
        operand::vm()
    };
    expand(opcode, backend_base, asm, &add_mask(shapes, mask), expr)
}

/// Two-operand floating-point family: `.d`, `.s`, and optionally the packed
/// form. No masked variants.
pub fn inst2f(opc: u8, name: &str, backend: &str, expr: &str, has_packed: bool) -> Vec<Inst> {
    use super::types::{F32, F64};
    let mut all = expand(
        opc,
        Some(format!("{backend}d").as_str()),
        &format!("{name}.d"),
        &[shape(operand::vx(&F64), [operand::vy(&F64)])],
        Some(expr),
    );
    all.extend(expand(
        opc,
        Some(format!("{backend}s").as_str()),
        &format!("{name}.s"),
        &[shape(operand::vx(&F32), [operand::vy(&F32)])],
        Some(expr),
    ));
    if has_packed {
        all.extend(expand(
            opc,
            Some(format!("{backend}p").as_str()),
            &format!("p{name}"),
            &[shape(operand::vx(&F32), [operand::vy(&F32)])],
            Some(expr),
        ));
    }
    all
}

/// Three-operand floating-point family over f64/f32, with masked variants
/// and optionally the packed form. Packed vector/scalar shapes take a 64-bit
/// scalar holding both lanes.
pub fn inst3f(opc: u8, name: &str, backend: &str, expr: &str, has_packed: bool) -> Vec<Inst> {
    use super::types::{F32, F64, U64};
    let o_f64 = add_mask(&[args_vvv(&F64), args_vsv(&F64)], operand::vm());
    let o_f32 = add_mask(&[args_vvv(&F32), args_vsv(&F32)], operand::vm());
    let o_pf32 = add_mask(
        &[
            args_vvv(&F32),
            shape(operand::vx(&F32), [operand::sy(&U64), operand::vz(&F32)]),
        ],
        operand::vm512(),
    );

    let mut all = expand(
        opc,
        Some(format!("{backend}d").as_str()),
        &format!("{name}.d"),
        &o_f64,
        Some(expr),
    );
    all.extend(expand(
        opc,
        Some(format!("{backend}s").as_str()),
        &format!("{name}.s"),
        &o_f32,
        Some(expr),
    ));
    if has_packed {
        all.extend(expand(
            opc,
            Some(format!("{backend}p").as_str()),
            &format!("p{name}"),
            &o_pf32,
            Some(expr),
        ));
    }
    all
}

/// Three-operand unsigned family: `.l` over u64 and `.w` over u32, each with
/// immediate and masked variants, plus the optional packed form.
pub fn inst3u(opc: u8, name: &str, backend: &str, expr: &str, has_packed: bool) -> Vec<Inst> {
    use super::types::{U32, U64};
    let o_u64 = add_mask(
        &[args_vvv(&U64), args_vsv(&U64), args_viv(&U64)],
        operand::vm(),
    );
    let o_u32 = add_mask(
        &[args_vvv(&U32), args_vsv(&U32), args_viv(&U32)],
        operand::vm(),
    );
    let o_pu32 = add_mask(
        &[
            args_vvv(&U32),
            shape(operand::vx(&U32), [operand::sy(&U64), operand::vz(&U32)]),
        ],
        operand::vm512(),
    );

    let mut all = expand(
        opc,
        Some(format!("{backend}l").as_str()),
        &format!("{name}.l"),
        &o_u64,
        Some(expr),
    );
    all.extend(expand(
        opc,
        Some(format!("{backend}w").as_str()),
        &format!("{name}.w"),
        &o_u32,
        Some(expr),
    ));
    if has_packed {
        all.extend(expand(
            opc,
            Some(format!("{backend}p").as_str()),
            &format!("p{name}"),
            &o_pu32,
            Some(expr),
        ));
    }
    all
}

/// Three-operand signed-64 family: `.l` with immediate and masked variants.
pub fn inst3l(opc: u8, name: &str, backend: &str, expr: &str) -> Vec<Inst> {
    use super::types::I64;
    let shapes = add_mask(
        &[args_vvv(&I64), args_vsv(&I64), args_viv(&I64)],
        operand::vm(),
    );
    expand(
        opc,
        Some(format!("{backend}l").as_str()),
        &format!("{name}.l"),
        &shapes,
        Some(expr),
    )
}

/// Three-operand signed-32 family: the `.w.sx`/`.w.zx` pair, plus the
/// optional packed form.
pub fn inst3w(opc: u8, name: &str, backend: &str, expr: &str, has_packed: bool) -> Vec<Inst> {
    use super::types::{I32, U64};
    let o_i32 = add_mask(
        &[args_vvv(&I32), args_vsv(&I32), args_viv(&I32)],
        operand::vm(),
    );
    let o_pi32 = add_mask(
        &[
            args_vvv(&I32),
            shape(operand::vx(&I32), [operand::sy(&U64), operand::vz(&I32)]),
        ],
        operand::vm512(),
    );

    let mut all = expand(
        opc,
        Some(format!("{backend}wsx").as_str()),
        &format!("{name}.w.sx"),
        &o_i32,
        Some(expr),
    );
    all.extend(expand(
        opc,
        Some(format!("{backend}wzx").as_str()),
        &format!("{name}.w.zx"),
        &o_i32,
        Some(expr),
    ));
    if has_packed {
        all.extend(expand(
            opc,
            Some(format!("{backend}p").as_str()),
            &format!("p{name}"),
            &o_pi32,
            Some(expr),
        ));
    }
    all
}

/// Scalar-divisor divide specializations: vector dividend with a scalar or
/// immediate divisor, masked variants included.
pub fn inst3divbys(opc: u8, asm: &str, backend: &str, ty: &'static types::ElemType) -> Vec<Inst> {
    let shapes = add_mask(
        &[
            shape(operand::vx(ty), [operand::vy(ty), operand::sy(ty)]),
            shape(operand::vx(ty), [operand::vy(ty), operand::imm_i(ty)]),
        ],
        operand::vm(),
    );
    expand(opc, Some(backend), asm, &shapes, Some("{0} = {1} / {2}"))
}

/// Bitwise-logical family: u64 shapes plus the packed u32 form.
pub fn logical(opc: u8, name: &str, backend: &str, expr: &str) -> Vec<Inst> {
    use super::types::{U32, U64};
    let shapes = add_mask(&[args_vvv(&U64), args_vsv(&U64)], operand::vm());
    let shapes_p = add_mask(
        &[
            args_vvv(&U32),
            shape(operand::vx(&U32), [operand::sy(&U64), operand::vz(&U32)]),
        ],
        operand::vm512(),
    );

    let mut all = expand(opc, Some(backend), name, &shapes, Some(expr));
    all.extend(expand(
        opc,
        Some(format!("{backend}p").as_str()),
        &format!("p{name}"),
        &shapes_p,
        Some(expr),
    ));
    all
}

/// Shift family: vector, scalar, and immediate shift amounts, masked.
pub fn shift(opc: u8, name: &str, backend: &str, ty: &'static types::ElemType, expr: &str) -> Vec<Inst> {
    use super::types::U64;
    let shapes = add_mask(
        &[
            shape(operand::vx(ty), [operand::vz(ty), operand::vy(&U64)]),
            shape(operand::vx(ty), [operand::vz(ty), operand::sy(&U64)]),
            shape(operand::vx(ty), [operand::vz(ty), operand::imm_n(&U64)]),
        ],
        operand::vm(),
    );
    expand(opc, Some(backend), name, &shapes, Some(expr))
}

/// Packed shift family: per-lane vector amounts are 32-bit, scalar amounts
/// carry both lanes in 64 bits.
pub fn shift_packed(
    opc: u8,
    name: &str,
    backend: &str,
    ty: &'static types::ElemType,
    expr: &str,
) -> Vec<Inst> {
    use super::types::{U32, U64};
    let shapes = add_mask(
        &[
            shape(operand::vx(ty), [operand::vz(ty), operand::vy(&U32)]),
            shape(operand::vx(ty), [operand::vz(ty), operand::sy(&U64)]),
        ],
        operand::vm512(),
    );
    expand(
        opc,
        Some(format!("{backend}p").as_str()),
        &format!("p{name}"),
        &shapes,
        Some(expr),
    )
}

/// Four-operand fused multiply-add family over f64/f32 plus the packed form.
pub fn inst4f(opc: u8, name: &str, backend: &str, expr: &str) -> Vec<Inst> {
    use super::types::{F32, F64, U64};
    fn shapes_for(
        ty: &'static types::ElemType,
        sty: &'static types::ElemType,
    ) -> [Shape; 3] {
        [
            shape(
                operand::vx(ty),
                [operand::vy(ty), operand::vz(ty), operand::vw(ty)],
            ),
            shape(
                operand::vx(ty),
                [operand::sy(sty), operand::vz(ty), operand::vw(ty)],
            ),
            shape(
                operand::vx(ty),
                [operand::vy(ty), operand::sy(sty), operand::vw(ty)],
            ),
        ]
    }

    let o_f64 = add_mask(&shapes_for(&F64, &F64), operand::vm());
    let o_f32 = add_mask(&shapes_for(&F32, &F32), operand::vm());
    // The packed family keeps the all-vector shape of the f32 family but
    // widens the scalar operand to the two-lane container.
    let packed = shapes_for(&F32, &U64);
    let o_pf32 = add_mask(
        &[shapes_for(&F32, &F32)[0].clone(), packed[1].clone(), packed[2].clone()],
        operand::vm512(),
    );

    let mut all = expand(
        opc,
        Some(format!("{backend}d").as_str()),
        &format!("{name}.d"),
        &o_f64,
        Some(expr),
    );
    all.extend(expand(
        opc,
        Some(format!("{backend}s").as_str()),
        &format!("{name}.s"),
        &o_f32,
        Some(expr),
    ));
    all.extend(expand(
        opc,
        Some(format!("{backend}p").as_str()),
        &format!("p{name}"),
        &o_pf32,
        Some(expr),
    ));
    all
}

/// First/last-element reduction pair: the `{}` marker in the names expands
/// to the first-element and last-element spellings. Last-element variants
/// have no generated test.
pub fn flm(opc: u8, backend: &str, asm: &str, shapes: &[Shape]) -> Vec<Inst> {
    let mut all = expand(
        opc,
        Some(backend.replace("{}", "f").as_str()),
        &asm.replace("{}", ".fst"),
        shapes,
        None,
    );
    all.extend(
        expand(
            opc,
            Some(backend.replace("{}", "l").as_str()),
            &asm.replace("{}", ".lst"),
            shapes,
            None,
        )
        .no_test(),
    );
    all
}

/// Mask-compare family: the unmasked form and the masked form that ANDs an
/// existing mask.
pub fn vfmkm(opc: u8, backend: &str, asm: &str) -> Vec<Inst> {
    use super::types::I64;
    let mut all = expand(
        opc,
        Some(backend),
        asm,
        &[shape(operand::vm(), [operand::cc(), operand::vz(&I64)])],
        None,
    )
    .no_test();
    all.extend(
        expand(
            opc,
            Some(backend),
            asm,
            &[shape(
                operand::vmx(),
                [operand::cc(), operand::vz(&I64), operand::vm()],
            )],
            None,
        )
        .no_test(),
    );
    all
}

/// Sum-reduction family: an unmasked and masked pair per base shape. The
/// masked form writes a fresh result, so no merge destination is appended
/// and masked calls take no merge argument.
pub fn vsum(opc: u8, backend: &str, asm: &str, base_shapes: &[Shape]) -> Vec<Inst> {
    let mut shapes = Vec::new();
    for s in base_shapes {
        shapes.push(s.clone());
        let mut masked = s.clone();
        masked.ins.push(operand::vm());
        shapes.push(masked);
    }
    expand(opc, Some(backend), asm, &shapes, None).no_mask_base()
}

/// Float-to-integer conversion pair: round-to-nearest and the `.rz`
/// round-toward-zero twin, both masked.
pub fn vfix(
    opc: u8,
    backend: &str,
    asm: &str,
    shapes: &[Shape],
    cty: &str,
) -> Vec<Inst> {
    let nearest = format!("{{0}} = ({cty})({{1}}+0.5)");
    let truncate = format!("{{0}} = ({cty})({{1}})");
    let mut all = expand_masked(opc, Some(backend), asm, shapes, Some(nearest.as_str()));
    all.extend(expand_masked(
        opc,
        Some(format!("{backend}rz").as_str()),
        &format!("{asm}.rz"),
        shapes,
        Some(truncate.as_str()),
    ));
    all
}

/// Strided vector load: register and immediate stride forms.
pub fn vldm(opc: u8, backend: &str, asm: &str) -> Vec<Inst> {
    use super::types::{U64, VOID_CONST_PTR};
    let shapes = [
        shape(
            operand::vx(&U64),
            [operand::sy(&U64), operand::sz(&VOID_CONST_PTR)],
        ),
        shape(
            operand::vx(&U64),
            [operand::imm_i(&U64), operand::sz(&VOID_CONST_PTR)],
        ),
    ];
    expand(opc, Some(backend), asm, &shapes, None)
        .no_test()
        .read_mem()
}

/// Strided vector store, plus the deprecated `.ot` addressing twin that is
/// kept on the legacy lowering path.
pub fn vstm(opc: u8, backend: &str, asm: &str) -> Vec<Inst> {
    use super::types::{U64, VOID_PTR};
    let shapes = [
        store([
            operand::vx(&U64),
            operand::sy(&U64),
            operand::sz(&VOID_PTR),
        ]),
        store([
            operand::vx(&U64),
            operand::imm_i(&U64),
            operand::sz(&VOID_PTR),
        ]),
    ];
    let mut all = expand(opc, Some(backend), asm, &shapes, None)
        .no_test()
        .write_mem();
    all.extend(
        expand(
            opc,
            Some(format!("{backend}ot").as_str()),
            &format!("{asm}.ot"),
            &shapes,
            None,
        )
        .old_lowering()
        .no_test()
        .write_mem(),
    );
    all
}

/// Gather: plain and masked address vectors.
pub fn vgtm(opc: u8, backend: &str, asm: &str) -> Vec<Inst> {
    use super::types::U64;
    let shapes = [
        shape(operand::vx(&U64), [operand::vy(&U64)]),
        shape(operand::vx(&U64), [operand::vy(&U64), operand::vm()]),
    ];
    expand(opc, Some(backend), asm, &shapes, None)
        .no_test()
        .read_mem()
}

/// Scatter: plain and masked forms, plus the deprecated `.ot` twin.
pub fn vscm(opc: u8, backend: &str, asm: &str) -> Vec<Inst> {
    use super::types::U64;
    let shapes = [
        store([operand::vx(&U64), operand::vy(&U64)]),
        store([operand::vx(&U64), operand::vy(&U64), operand::vm()]),
    ];
    let mut all = expand(opc, Some(backend), asm, &shapes, None)
        .no_test()
        .write_mem();
    all.extend(
        expand(
            opc,
            Some(format!("{backend}ot").as_str()),
            &format!("{asm}.ot"),
            &shapes,
            None,
        )
        .no_test()
        .write_mem()
        .old_lowering(),
    );
    all
}
