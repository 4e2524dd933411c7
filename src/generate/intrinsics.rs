//! IR-intrinsic declarations, compiler builtin declarations, and the header
//! macros mapping callable functions to builtins.
//!
//! Variants with immediate operands generate none of these: they share the
//! scalar-operand entry point and only differ at instruction selection.

use super::formatter::Formatter;
use crate::dsl::Inst;

impl Inst {
    /// The IR-intrinsic declaration line.
    pub fn intrinsic_decl(&self) -> String {
        let outs = self
            .outs()
            .iter()
            .map(|op| op.ty.intrin_type)
            .collect::<Vec<_>>()
            .join(", ");
        let ins = self
            .ins()
            .iter()
            .map(|op| op.ty.intrin_type)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "let TargetPrefix = \"ve\" in def {} : GCCBuiltin<\"{}\">, Intrinsic<[{}], [{}], [{}]>;",
            self.intrin_name(),
            self.builtin_name(),
            outs,
            ins,
            self.mem().property()
        )
    }

    /// The builtin type-signature string: one code per output (`v` when there
    /// are none) followed by one code per input.
    ///
    /// # Panics
    ///
    /// Panics for variants that generate no builtin; callers gate on
    /// [`Inst::has_builtin`] and [`Inst::has_imm_op`].
    pub fn builtin_signature(&self) -> String {
        assert!(
            self.has_builtin() && !self.has_imm_op(),
            "`{}` generates no builtin",
            self.name()
        );
        let mut sig = if self.outs().is_empty() {
            "v".to_string()
        } else {
            self.outs().iter().map(|op| op.ty.builtin_code).collect()
        };
        sig.extend(self.ins().iter().map(|op| op.ty.builtin_code));
        sig
    }

    /// The builtin declaration line.
    pub fn builtin_decl(&self) -> String {
        format!(
            "BUILTIN({}, \"{}\", \"n\")",
            self.builtin_name(),
            self.builtin_signature()
        )
    }

    /// The header macro mapping the callable function to its builtin.
    pub fn header_macro(&self) -> String {
        format!("#define {} {}", self.func_name(), self.builtin_name())
    }
}

fn has_intrinsic(i: &Inst) -> bool {
    !i.has_imm_op()
}

fn has_builtin_decl(i: &Inst) -> bool {
    !i.has_imm_op() && i.has_builtin()
}

pub fn intrinsic_defs(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts.iter().filter(|i| has_intrinsic(i)) {
        f.raw_line(i.intrinsic_decl());
    }
    f.contents()
}

pub fn builtin_defs(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts.iter().filter(|i| has_builtin_decl(i)) {
        f.raw_line(i.builtin_decl());
    }
    f.contents()
}

/// The intrinsics header: one `#define` per builtin-generating variant.
pub fn header_defs(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts.iter().filter(|i| has_builtin_decl(i)) {
        f.raw_line(i.header_macro());
    }
    f.contents()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::expand::{args_viv, args_vvv, expand};
    use crate::dsl::types::F64;
    use crate::dsl::CallingConv;

    #[test]
    fn builtin_signature_concatenates_type_codes() {
        let fam = expand(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        assert_eq!(fam[0].builtin_signature(), "V256dV256dV256d");
        assert_eq!(
            fam[0].builtin_decl(),
            "BUILTIN(__builtin_ve_vfaddd_vvv, \"V256dV256dV256d\", \"n\")"
        );
    }

    #[test]
    #[should_panic(expected = "generates no builtin")]
    fn immediate_variants_have_no_signature() {
        let fam = expand(0xC8, Some("VADDl"), "vaddu.l", &[args_viv(&crate::dsl::types::U64)], None);
        let _ = fam[0].builtin_signature();
    }

    #[test]
    fn intrinsic_decl_shape() {
        let fam = expand(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        assert_eq!(
            fam[0].intrinsic_decl(),
            "let TargetPrefix = \"ve\" in def int_ve_vfaddd_vvv : \
             GCCBuiltin<\"__builtin_ve_vfaddd_vvv\">, \
             Intrinsic<[LLVMType<v256f64>], [LLVMType<v256f64>, LLVMType<v256f64>], [IntrNoMem]>;"
        );
    }

    #[test]
    fn header_macro_follows_the_convention() {
        let fam = expand(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        assert_eq!(
            fam[0].header_macro(),
            "#define _ve_vfaddd_vvv __builtin_ve_vfaddd_vvv"
        );
        let vl = fam[0].clone().into_vl();
        assert_eq!(vl.conv(), CallingConv::Vl);
        assert_eq!(
            vl.header_macro(),
            "#define _vel_vfaddd_vvvvl __builtin_ve_vl_vfaddd_vvvvl"
        );
    }
}
