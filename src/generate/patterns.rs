//! Legacy lowering: instruction-selection patterns for unmasked variants and
//! the masked-lowering dispatch table.

use super::formatter::Formatter;
use crate::dsl::{CallingConv, Inst};

impl Inst {
    /// The instruction-selection pattern for this variant, if it lowers
    /// through the legacy path.
    ///
    /// Masked variants never get a pattern; they dispatch through
    /// [`Inst::lowering_case`] instead. Immediate variants match the scalar
    /// intrinsic identity against immediate DAG operands, which is what
    /// selects the immediate instruction form.
    pub fn pattern(&self) -> Option<String> {
        if self.mnemonic().is_none() || !self.has_pattern() {
            return None;
        }
        if !self.is_old_lowering() || self.has_mask() {
            return None;
        }
        let backend = self.backend_name()?;
        let args = self
            .ins()
            .iter()
            .map(crate::dsl::Operand::dag_op)
            .collect::<Vec<_>>()
            .join(", ");
        let head = self.intrin_name().replace(['I', 'N', 'Z'], "s");
        let result = match self.conv() {
            // The base convention reads the ambient vector length.
            CallingConv::Base => format!("({backend} {args}, (GetVL (i32 0)))"),
            CallingConv::Vl => format!("({backend} {args})"),
        };
        Some(format!("def : Pat<({head} {args}), {result}>;"))
    }

    /// The masked-lowering dispatch line: intrinsic identity to backend
    /// instruction and input arity.
    pub fn lowering_case(&self) -> Option<String> {
        if !self.has_mask() || !self.is_old_lowering() {
            return None;
        }
        let backend = self.backend_name()?;
        Some(format!(
            "case Intrinsic::{}: return LowerIntrinsicWithMaskAndVL(Op, DAG, Subtarget, VE::{}, {});",
            self.intrin_id(),
            backend,
            self.ins().len()
        ))
    }
}

pub fn patterns(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts {
        if let Some(p) = i.pattern() {
            f.raw_line(p);
        }
    }
    f.contents()
}

/// Dispatch lines, deduplicated by final text. Several addressing-mode
/// variants share one intrinsic, so their lines coincide; the first
/// occurrence wins and order is otherwise preserved.
pub fn lowering(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    let mut seen = std::collections::HashSet::new();
    for i in insts {
        if let Some(l) = i.lowering_case() {
            if seen.insert(l.clone()) {
                f.raw_line(l);
            }
        }
    }
    f.contents()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::expand::{args_viv, args_vvv, expand, expand_masked};
    use crate::dsl::types::{F64, U64};
    use crate::dsl::InstListExt;

    #[test]
    fn masked_variants_never_emit_patterns() {
        let fam = expand_masked(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None)
            .old_lowering();
        assert_eq!(
            fam[0].pattern().unwrap(),
            "def : Pat<(int_ve_vfaddd_vvv v256f64:$vy, v256f64:$vz), \
             (VFADdv v256f64:$vy, v256f64:$vz, (GetVL (i32 0)))>;"
        );
        assert_eq!(fam[1].pattern(), None);
        assert!(fam[1].lowering_case().is_some());
        assert!(fam[0].lowering_case().is_none());
    }

    #[test]
    fn unflagged_variants_emit_nothing() {
        let fam = expand(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        assert_eq!(fam[0].pattern(), None);
    }

    #[test]
    fn immediate_patterns_match_the_scalar_intrinsic() {
        let fam = expand(0xC8, Some("VADDl"), "vaddu.l", &[args_viv(&U64)], None).old_lowering();
        assert_eq!(
            fam[0].pattern().unwrap(),
            "def : Pat<(int_ve_vaddul_vsv (i64 simm7:$I), v256f64:$vz), \
             (VADDli (i64 simm7:$I), v256f64:$vz, (GetVL (i32 0)))>;"
        );
    }

    #[test]
    fn vl_patterns_omit_the_ambient_length() {
        let fam = expand(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        let i = fam[0].clone().into_vl();
        assert_eq!(
            i.pattern().unwrap(),
            "def : Pat<(int_ve_vl_vfaddd_vvvvl v256f64:$vy, v256f64:$vz, v256f64:$vd, i32:$vl), \
             (vfadddvvvvl v256f64:$vy, v256f64:$vz, v256f64:$vd, i32:$vl)>;"
        );
    }

    #[test]
    fn coinciding_dispatch_lines_collapse() {
        let fam = expand_masked(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None)
            .old_lowering();
        let masked = &fam[1];
        let refs: Vec<&crate::dsl::Inst> = vec![masked, masked];
        let out = lowering(&refs);
        assert_eq!(out.lines().count(), 1);
        assert_eq!(
            out.trim_end(),
            "case Intrinsic::ve_vfaddd_vvvmv: return \
             LowerIntrinsicWithMaskAndVL(Op, DAG, Subtarget, VE::VFADdvm, 4);"
        );
    }
}
