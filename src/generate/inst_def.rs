//! Backend instruction-definition blocks.

use super::formatter::Formatter;
use crate::dsl::{Inst, Operand};

fn fmt_ops(ops: &[&Operand]) -> String {
    ops.iter()
        .map(|op| format!("{}:${}", op.reg_class, op.role))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Inst {
    /// The definition block for this variant, or `None` when it defines no
    /// backend instruction (pseudo entries and encoding-sharing views).
    pub fn backend_def(&self) -> Option<String> {
        if !self.has_backend_def() {
            return None;
        }
        let name = self.backend_name()?;
        let opcode = self.opcode()?;

        let outs = fmt_ops(&self.outs().iter().collect::<Vec<_>>());
        let ins = fmt_ops(&self.ins().iter().collect::<Vec<_>>());
        // The merge destination and the vector length never appear in the
        // assembly operand list.
        let visible: Vec<&Operand> = self
            .ins()
            .iter()
            .filter(|op| op.role != "vd" && op.role != "vl")
            .collect();
        let asm_args = self
            .outs()
            .iter()
            .chain(visible.iter().copied())
            .map(|op| format!("${}", op.role))
            .collect::<Vec<_>>()
            .join(",");

        let mut s = format!(
            "def {name} : RV<0x{opcode:x}, (outs {outs}), (ins {ins}),\n"
        );
        s.push_str(&format!("       \"{} {asm_args}\",", self.asm()));
        s.push_str(" [], NoItinerary>\n");
        s.push_str("{\n");
        if self.ins().len() > 2 && self.ins()[1].is_sreg() {
            s.push_str("  let cs = 1;\n");
        }
        if self.is_packed() {
            s.push_str("  let cx = 1;\n");
            s.push_str("  let cx2 = 1;\n");
        }
        if self.is_masked() {
            s.push_str("  bits<4> vm;\n");
            s.push_str("  let m = vm;\n");
        }
        if self.has_pass_through() {
            s.push_str(&format!(
                "  let Constraints = \"${} = $vd\";\n",
                self.outs()[0].role
            ));
        }
        s.push_str("  let DecoderNamespace = \"VEL\";\n");
        if self.has_vl_op() {
            s.push_str("  let DisableEncoding = \"$vl\";\n");
        }
        s.push_str("}\n");
        Some(s)
    }
}

/// All definition blocks, each headed by a mnemonic comment.
pub fn generate(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts {
        if let Some(def) = i.backend_def() {
            f.comment(format!("{} {}", i.mnemonic().unwrap_or(""), i.asm()));
            f.raw_line(def);
        }
    }
    f.contents()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::expand::{args_vvv, expand_masked};
    use crate::dsl::types::F64;

    #[test]
    fn masked_defs_carry_the_aliasing_constraint() {
        let fam = expand_masked(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        let def = fam[1].backend_def().unwrap();
        assert!(def.starts_with("def VFADdvm : RV<0xcc, (outs V64:$vx), (ins V64:$vy, V64:$vz, VM:$vm, V64:$vd),\n"));
        assert!(def.contains("\"vfadd.d $vx,$vy,$vz\""));
        assert!(def.contains("bits<4> vm;"));
        assert!(def.contains("let Constraints = \"$vx = $vd\";"));
        assert!(def.contains("let DecoderNamespace = \"VEL\";"));
        assert!(!def.contains("DisableEncoding"));
    }

    #[test]
    fn scalar_second_inputs_set_cs() {
        let fam = expand_masked(
            0xCC,
            Some("VFADd"),
            "vfadd.d",
            &[crate::dsl::expand::args_vsv(&F64)],
            None,
        );
        // Two inputs only, so `cs` stays clear even for the scalar form.
        let def = fam[0].backend_def().unwrap();
        assert!(!def.contains("let cs = 1;"));
        // The masked copy has four inputs with the scalar second.
        let masked = fam[1].backend_def().unwrap();
        assert!(masked.contains("(ins I64:$sy, V64:$vz, VM:$vm, V64:$vd)"));
        assert!(!masked.contains("let cs = 1;"));

        let div = crate::dsl::expand::inst3divbys(0xE9, "vdivu.l", "VDIVl", &crate::dsl::types::U64);
        let masked_div = div[2].backend_def().unwrap();
        assert!(masked_div.contains("let cs = 1;"));
    }

    #[test]
    fn vl_variants_suppress_length_encoding() {
        let fam = expand_masked(0xCC, Some("VFADd"), "vfadd.d", &[args_vvv(&F64)], None);
        let i = fam[0].clone().into_vl();
        let def = i.backend_def().unwrap();
        assert!(def.starts_with("def vfadddvvvvl : RV<0xcc,"));
        assert!(def.contains("let DisableEncoding = \"$vl\";"));
        assert!(def.contains("\"vfadd.d $vx,$vy,$vz\""));
    }
}
