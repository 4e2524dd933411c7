//! Generated C test programs and their reference implementations.
//!
//! Every variant that requests a test gets one C function, named after its
//! intrinsic name, exercising the callable function over whole arrays in
//! vector-length-sized steps. Reference implementations are produced from
//! the variant's semantic expression template. Mask-arithmetic results and
//! the merge instruction need different scaffolding and get their own
//! generators.

use std::path::Path;

use super::format_expr;
use super::formatter::{write_if_changed, Formatter};
use crate::dsl::{Inst, Operand};

/// A generated test: the prototype, the test body, and the optional
/// reference implementation.
pub struct TestFunc {
    header: String,
    definition: String,
    reference: Option<String>,
}

impl TestFunc {
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// The extern declaration for the driver harness.
    pub fn decl(&self) -> String {
        format!("extern {};", self.header)
    }
}

/// Build the test for one variant.
///
/// # Panics
///
/// Panics for variants that request no test; callers gate on
/// [`Inst::has_test`].
pub fn generate(i: &Inst) -> TestFunc {
    assert!(i.has_test(), "`{}` requests no test", i.name());
    if i.mnemonic() == Some("VMRG") {
        merge_test(i)
    } else if i.outs().first().is_some_and(Operand::is_mask) {
        mask_test(i)
    } else {
        vector_test(i)
    }
}

/// Strided load/store helpers matched to an operand's element width.
fn vld_vst(i: &Inst, op: &Operand) -> (&'static str, &'static str) {
    use crate::dsl::types::{F32, I32, U32};
    if !i.is_packed() {
        if let Some(elem) = op.ty.elem {
            if *elem == F32 {
                return ("vldu_vss", "vstu_vss");
            }
            if *elem == I32 || *elem == U32 {
                return ("vldlsx_vss", "vstl_vss");
            }
        }
    }
    ("vld_vss", "vst_vss")
}

fn func_header(i: &Inst) -> String {
    let args = i
        .outs()
        .iter()
        .chain(i.ins())
        .filter(|op| !op.is_imm())
        .map(|op| format!("{} {}", op.ty.ctype, op.formal_name()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("void {}({args}, int n)", i.name())
}

/// The general vector-loop test: load inputs, call the function once per
/// block, store the result.
fn vector_test(i: &Inst) -> TestFunc {
    let header = func_header(i);
    let out = &i.outs()[0];
    let indent = " ".repeat(8);
    let mut body = String::new();

    let step = if i.is_packed() {
        body.push_str(&format!(
            "{indent}int l = n - i < 512 ? (n - i) / 2UL : 256;\n"
        ));
        512
    } else {
        body.push_str(&format!("{indent}int l = n - i < 256 ? n - i : 256;\n"));
        256
    };
    body.push_str(&format!("{indent}_ve_lvl(l);\n"));

    // The merge destination is passed through the result pointer, not as a
    // separate array.
    let mut ins: Vec<&Operand> = i.ins().iter().collect();
    if i.has_mask() && ins.last().is_some_and(|op| op.is_vreg()) {
        ins.pop();
    }

    let mut args: Vec<String> = Vec::new();
    for op in &ins {
        if op.is_vreg() {
            let (vld, _) = vld_vst(i, op);
            body.push_str(&format!(
                "{indent}__vr {} = _ve_{vld}({}, p{});\n",
                op.role,
                i.stride(op),
                op.role
            ));
        }
        if op.is_mask512() {
            body.push_str(&format!(
                "{indent}__vr {role}0 = _ve_vld_vss({}, p{role});\n",
                i.stride(op),
                role = op.role
            ));
            body.push_str(&format!(
                "{indent}__vm512 {role} = _ve_pvfmkw_Mcv(VECC_G, {role}0);\n",
                role = op.role
            ));
        } else if op.is_mask() {
            body.push_str(&format!(
                "{indent}__vr {role}0 = _ve_vldlzx_vss(4, p{role});\n",
                role = op.role
            ));
            body.push_str(&format!(
                "{indent}__vm {role} = _ve_vfmkw_mcv(VECC_G, {role}0);\n",
                role = op.role
            ));
        }
        if op.is_reg() || op.is_mask() {
            args.push(op.role.to_string());
        } else if op.is_imm() {
            args.push("3".to_string());
        } else if op.is_cc() {
            args.push(op.role.to_string());
        }
    }

    let callable = i.callable_name();
    if i.has_mask() {
        let (vld, _) = vld_vst(i, out);
        body.push_str(&format!(
            "{indent}__vr {} = _ve_{vld}({}, p{});\n",
            out.role,
            i.stride(out),
            out.role
        ));
        if i.has_mask_base() {
            args.push(out.role.to_string());
        }
        body.push_str(&format!(
            "{indent}{} = {callable}({});\n",
            out.role,
            args.join(", ")
        ));
    } else {
        body.push_str(&format!(
            "{indent}__vr {} = {callable}({});\n",
            out.role,
            args.join(", ")
        ));
    }

    if out.is_vreg() {
        let (_, vst) = vld_vst(i, out);
        body.push_str(&format!(
            "{indent}_ve_{vst}({}, {}, {});\n",
            out.role,
            i.stride(out),
            out.formal_name()
        ));
    }

    let bump = if i.is_packed() { 512 } else { 256 };
    let bumps = i
        .outs()
        .iter()
        .chain(ins.iter().copied())
        .filter(|op| op.is_vreg() || op.is_mask())
        .map(|op| format!("{indent}p{} += {bump};", op.role))
        .collect::<Vec<_>>()
        .join("\n");
    body.push_str(&bumps);

    let definition = format!(
        "#include \"veintrin.h\"\n{header} {{\n    for (int i = 0; i < n; i += {step}) {{\n{body}\n    }}\n}}\n"
    );

    TestFunc {
        reference: vector_reference(i, &header),
        header,
        definition,
    }
}

fn vector_reference(i: &Inst, header: &str) -> Option<String> {
    let expr = i.expr_template()?;

    let mut values: Vec<String> = Vec::new();
    for op in i.outs().iter().chain(i.ins()) {
        if op.is_vreg() {
            values.push(format!("p{}[i]", op.role));
        } else if op.is_reg() {
            values.push(op.role.to_string());
        } else if op.is_imm() {
            values.push("3".to_string());
        }
    }
    let mut body = format_expr(expr, &values);
    body.push(';');

    // Packed scalar operands hold two lanes; reinterpret one lane for the
    // element-wise reference.
    let mut preprocess = String::new();
    if i.is_packed() {
        for op in i.ins() {
            if op.is_sreg() {
                let ctype = i.outs()[0].ty.elem.map_or("", |e| e.ctype);
                preprocess = format!("{ctype} sy0 = *({ctype}*)&sy;");
                body = body.replace("sy", "sy0");
            }
        }
    }

    if i.has_mask() {
        body = format!("if (pvm[i] > 0) {{ {body} }}");
    }

    Some(format!(
        "{header}\n{{\n    {preprocess}\n    for (int i = 0; i < n; ++i) {{\n        {body}\n    }}\n}}"
    ))
}

/// Mask-arithmetic results cannot be stored directly; move them through the
/// element-wise mask accessors.
fn mask_test(i: &Inst) -> TestFunc {
    let header = format!(
        "void {}(unsigned long int* px, unsigned long int const* py, unsigned long int* pz, int n)",
        i.name()
    );
    let args = i
        .ins()
        .iter()
        .map(|op| op.role)
        .collect::<Vec<_>>()
        .join(", ");

    let (vm_ty, m, lanes) = if i.outs()[0].is_mask512() {
        ("__vm512", "M", 8)
    } else {
        ("__vm", "m", 4)
    };

    let mut lvm = String::new();
    let mut svm = String::new();
    for lane in 0..lanes {
        lvm.push_str(&format!(
            "    vmy = _ve_lvm_{m}{m}ss(vmy, {lane}, py[{lane}]);\n"
        ));
        lvm.push_str(&format!(
            "    vmz = _ve_lvm_{m}{m}ss(vmz, {lane}, pz[{lane}]);\n"
        ));
        svm.push_str(&format!("    px[{lane}] = _ve_svm_s{m}s(vmx, {lane});\n"));
    }

    let definition = format!(
        "#include <veintrin.h>\n{header}\n{{\n    {vm_ty} vmx, vmy, vmz;\n{lvm}\n    vmx = {}({args});\n\n{svm}}}\n",
        i.callable_name()
    );

    let reference = i.expr_template().map(|expr| {
        let values = vec![
            "px[i]".to_string(),
            "py[i]".to_string(),
            "pz[i]".to_string(),
        ];
        let line = format_expr(expr, &values);
        format!(
            "{header}\n{{\n    for (int i = 0; i < {lanes}; ++i)\n        {line};\n}}\n"
        )
    });

    TestFunc {
        header,
        definition,
        reference,
    }
}

/// The merge instruction selects per lane between two inputs; its test forms
/// the mask from a third array.
fn merge_test(i: &Inst) -> TestFunc {
    let wide = i.ins()[2].is_mask512();
    let (ty, stride, vm_ty, vfmk, vld, lvl) = if wide {
        (
            "unsigned int*",
            512,
            "__vm512",
            "_ve_pvfmkw_Mcv",
            "_ve_vld_vss(8, pm)",
            "_ve_lvl(n - i < 512 ? (n - i) / 2UL : 256)",
        )
    } else {
        (
            "unsigned long int*",
            256,
            "__vm",
            "_ve_vfmkw_mcv",
            "_ve_vldlzx_vss(4, pm)",
            "_ve_lvl(n - i < 256 ? n - i : 256)",
        )
    };

    let header = format!(
        "void {name}({ty} px, {ty} py, {ty} pz, unsigned int* pm, int n)",
        name = i.name()
    );

    let definition = format!(
        "#include <veintrin.h>\n{header}\n{{\n    for (int i = 0; i < n; i += {stride}) {{\n        {lvl};\n        __vr vy = _ve_vld_vss(8, py);\n        __vr vz = _ve_vld_vss(8, pz);\n        __vr tmp = {vld};\n        {vm_ty} vm = {vfmk}(VECC_G, tmp);\n        __vr vx = {call}(vy, vz, vm);\n        _ve_vst_vss(vx, 8, px);\n        px += {stride};\n        py += {stride};\n        pz += {stride};\n        pm += {stride};\n    }}\n}}",
        call = i.callable_name()
    );

    let reference = Some(format!(
        "{header}\n{{\n    for (int i = 0; i < n; ++i) {{\n        px[i] = pm[i] > 0 ? pz[i] : py[i];\n    }}\n}}"
    ));

    TestFunc {
        header,
        definition,
        reference,
    }
}

/// Extern declarations for every generated test.
pub fn decls(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts.iter().filter(|i| i.has_test()) {
        f.raw_line(generate(i).decl());
    }
    f.contents()
}

/// The reference-implementation translation unit.
pub fn reference_program(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    f.raw_line("#include <math.h>");
    f.raw_line("#include <algorithm>");
    f.raw_line("using namespace std;");
    f.raw_line("#include \"../refutils.h\"");
    f.raw_line("namespace ref {");
    for i in insts.iter().filter(|i| i.has_test()) {
        if let Some(r) = generate(i).reference() {
            f.raw_line(r);
        }
    }
    f.raw_line("}");
    f.contents()
}

/// All test definitions as one stream, for inspection.
pub fn print_all(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts.iter().filter(|i| i.has_test()) {
        f.raw_line(generate(i).definition());
    }
    f.contents()
}

/// Write one test file per variant into `dir`, skipping files whose content
/// is already up to date.
pub fn write_all(insts: &[&Inst], dir: &Path) -> std::io::Result<()> {
    for i in insts.iter().filter(|i| i.has_test()) {
        let path = dir.join(format!("{}.c", i.name()));
        write_if_changed(path, generate(i).definition())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::expand::{args_vsv, args_vvv, expand, expand_masked, shape};
    use crate::dsl::operand::{vm, vx, vy, vz};
    use crate::dsl::types::{F64, U64};

    fn vfadd() -> Vec<Inst> {
        expand_masked(
            0xCC,
            Some("VFADd"),
            "vfadd.d",
            &[args_vvv(&F64), args_vsv(&F64)],
            Some("{0} = {1} + {2}"),
        )
    }

    #[test]
    fn vector_test_loads_calls_and_stores() {
        let fam = vfadd();
        let t = generate(&fam[0]);
        assert_eq!(
            t.header(),
            "void vfaddd_vvv(double* pvx, double* pvy, double* pvz, int n)"
        );
        let d = t.definition();
        assert!(d.starts_with("#include \"veintrin.h\"\n"));
        assert!(d.contains("for (int i = 0; i < n; i += 256) {"));
        assert!(d.contains("__vr vy = _ve_vld_vss(8, pvy);"));
        assert!(d.contains("__vr vx = _ve_vfaddd_vvv(vy, vz);"));
        assert!(d.contains("_ve_vst_vss(vx, 8, pvx);"));
        assert!(d.contains("pvx += 256;"));
    }

    #[test]
    fn masked_tests_merge_through_the_result() {
        let fam = vfadd();
        // Shapes come first, masked copies after: [vvv, vsv, vvvmv, vsvmv].
        let t = generate(&fam[2]);
        let d = t.definition();
        // The loaded result is passed as the merge argument.
        assert!(t.header().ends_with(
            "(double* pvx, double* pvy, double* pvz, unsigned int* pvm, double* pvd, int n)"
        ));
        assert!(d.contains("__vm vm = _ve_vfmkw_mcv(VECC_G, vm0);"));
        assert!(d.contains("vx = _ve_vfaddd_vvvmv(vy, vz, vm, vx);"));
        let r = t.reference().unwrap();
        assert!(r.contains("if (pvm[i] > 0) { pvx[i] = pvy[i] + pvz[i]; }"));
    }

    #[test]
    fn scalar_operands_stay_scalar() {
        let fam = vfadd();
        let t = generate(&fam[1]);
        assert_eq!(
            t.header(),
            "void vfaddd_vsv(double* pvx, double sy, double* pvz, int n)"
        );
        assert!(t.definition().contains("__vr vx = _ve_vfaddd_vsv(sy, vz);"));
        assert!(t.reference().unwrap().contains("pvx[i] = sy + pvz[i];"));
    }

    #[test]
    fn mask_arith_tests_move_masks_elementwise() {
        let fam = expand(
            0x84,
            Some("ANDM"),
            "andm",
            &[shape(
                crate::dsl::operand::vmx(),
                [crate::dsl::operand::vmy(), crate::dsl::operand::vmz()],
            )],
            Some("{0} = {1} & {2}"),
        );
        let t = generate(&fam[0]);
        let d = t.definition();
        assert!(d.contains("__vm vmx, vmy, vmz;"));
        assert!(d.contains("vmy = _ve_lvm_mmss(vmy, 3, py[3]);"));
        assert!(d.contains("vmx = _ve_andm_mmm(vmy, vmz);"));
        assert!(d.contains("px[3] = _ve_svm_sms(vmx, 3);"));
        assert!(!d.contains("py[4]"));
        let r = t.reference().unwrap();
        assert!(r.contains("for (int i = 0; i < 4; ++i)"));
        assert!(r.contains("px[i] = py[i] & pz[i];"));
    }

    #[test]
    fn merge_tests_form_the_mask_from_memory() {
        let fam = expand(
            0xD6,
            Some("VMRG"),
            "vmrg",
            &[shape(vx(&U64), [vy(&U64), vz(&U64), vm()])],
            None,
        );
        let t = generate(&fam[0]);
        let d = t.definition();
        assert!(d.contains("__vm vm = _ve_vfmkw_mcv(VECC_G, tmp);"));
        assert!(d.contains("__vr vx = _ve_vmrg_vvvm(vy, vz, vm);"));
        assert!(t
            .reference()
            .unwrap()
            .contains("px[i] = pm[i] > 0 ? pz[i] : py[i];"));
    }

    #[test]
    fn written_tests_are_stable() {
        let dir = tempfile::tempdir().unwrap();
        let fam = vfadd();
        let refs: Vec<&Inst> = fam.iter().collect();
        write_all(&refs, dir.path()).unwrap();
        assert!(dir.path().join("vfaddd_vvv.c").exists());
        assert!(dir.path().join("vfaddd_vvvmv.c").exists());
        // A second run rewrites nothing.
        let mtime = std::fs::metadata(dir.path().join("vfaddd_vvv.c"))
            .unwrap()
            .modified()
            .unwrap();
        write_all(&refs, dir.path()).unwrap();
        assert_eq!(
            std::fs::metadata(dir.path().join("vfaddd_vvv.c"))
                .unwrap()
                .modified()
                .unwrap(),
            mtime
        );
    }
}
