//! The operand model: one tagged value per operand position.
//!
//! Operands are built through the abbreviated constructors at the bottom of
//! this module (`vx`, `sy`, `imm_i`, `vm`, ...), which mirror how the ISA
//! manual names operand positions. The construction sites in
//! `crate::instructions` read like the manual's operand tables:
//!
//! ```
//! # use veintrin_meta::dsl::operand::{vx, vy, vz, types};
//! let ops = [vx(&types::F64), vy(&types::F64), vz(&types::F64)];
//! assert_eq!(ops[0].role, "vx");
//! assert_eq!(ops[0].kind_code(), 'v');
//! ```

pub use super::types;
use super::types::ElemType;

/// Encodings for immediate operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmKind {
    /// 7-bit signed immediate.
    SImm7,
    /// 6-bit unsigned immediate.
    UImm6,
    /// 7-bit unsigned immediate.
    UImm7,
    /// Zero-displacement immediate of addressing forms.
    Zero,
}

impl ImmKind {
    /// The DAG-pattern leaf matched by this encoding.
    pub fn pattern_leaf(self) -> &'static str {
        match self {
            ImmKind::SImm7 | ImmKind::Zero => "simm7",
            ImmKind::UImm6 => "uimm6",
            ImmKind::UImm7 => "uimm7",
        }
    }
}

/// What lives in an operand position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    ScalarReg,
    VectorReg,
    /// 256-bit mask register.
    Mask256,
    /// 512-bit mask register pair.
    Mask512,
    Imm(ImmKind),
    CondCode,
    /// Explicit vector-length operand.
    VectorLength,
    /// Masked-write merge destination; unselected lanes read from it. Aliased
    /// to the first output register in the backend definition.
    PassThrough,
}

/// One operand position: kind, element type, positional role, register class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    pub kind: OperandKind,
    pub ty: &'static ElemType,
    /// Positional name used in generated identifiers and test scaffolding.
    pub role: &'static str,
    /// Backend register class (or immediate placeholder class).
    pub reg_class: &'static str,
}

impl Operand {
    /// One-letter code used to key suffix derivation.
    pub fn kind_code(&self) -> char {
        match self.kind {
            OperandKind::ScalarReg => 's',
            OperandKind::VectorReg | OperandKind::PassThrough => 'v',
            OperandKind::Mask256 => 'm',
            OperandKind::Mask512 => 'M',
            OperandKind::Imm(ImmKind::Zero) => 'Z',
            OperandKind::Imm(_) => 'I',
            OperandKind::CondCode => 'c',
            OperandKind::VectorLength => 'l',
        }
    }

    pub fn is_imm(&self) -> bool {
        matches!(self.kind, OperandKind::Imm(_))
    }

    pub fn is_reg(&self) -> bool {
        self.is_vreg() || self.is_sreg()
    }

    /// Vector register, including the merge destination.
    pub fn is_vreg(&self) -> bool {
        matches!(self.kind, OperandKind::VectorReg | OperandKind::PassThrough)
    }

    pub fn is_sreg(&self) -> bool {
        self.kind == OperandKind::ScalarReg
    }

    pub fn is_mask(&self) -> bool {
        matches!(self.kind, OperandKind::Mask256 | OperandKind::Mask512)
    }

    pub fn is_mask512(&self) -> bool {
        self.kind == OperandKind::Mask512
    }

    pub fn is_cc(&self) -> bool {
        self.kind == OperandKind::CondCode
    }

    pub fn is_vl(&self) -> bool {
        self.kind == OperandKind::VectorLength
    }

    pub fn is_pass_through(&self) -> bool {
        self.kind == OperandKind::PassThrough
    }

    /// Parameter name in generated test functions: vector and mask operands
    /// are passed as pointers, so their names gain a `p` prefix.
    pub fn formal_name(&self) -> String {
        if self.is_vreg() || self.is_mask() {
            format!("p{}", self.role)
        } else {
            self.role.to_string()
        }
    }

    /// The intrinsic-header C type of a vector or mask operand.
    ///
    /// # Panics
    ///
    /// Panics for non-vector operand kinds.
    pub fn vector_ctype(&self) -> &'static str {
        if self.is_vreg() {
            "__vr"
        } else if self.is_mask512() {
            "__vm512"
        } else if self.is_mask() {
            "__vm"
        } else {
            panic!("operand `{}` has no vector C type", self.role)
        }
    }

    /// Lane stride of the operand's type, in bytes.
    pub fn stride(&self) -> u32 {
        self.ty.stride()
    }

    /// The operand as it appears in a DAG pattern.
    pub fn dag_op(&self) -> String {
        match self.kind {
            OperandKind::Imm(imm) => {
                format!("({} {}:${})", self.ty.value_type, imm.pattern_leaf(), self.role)
            }
            OperandKind::CondCode => format!("({} uimm6:${})", self.ty.value_type, self.role),
            _ => format!("{}:${}", self.ty.value_type, self.role),
        }
    }
}

fn vreg(ty: &'static ElemType, role: &'static str) -> Operand {
    Operand {
        kind: OperandKind::VectorReg,
        ty: types::vector(ty),
        role,
        reg_class: "V64",
    }
}

fn sreg(ty: &'static ElemType, role: &'static str) -> Operand {
    let reg_class = if *ty == types::F32 {
        "F32"
    } else if *ty == types::I32 || *ty == types::U32 {
        "I32"
    } else {
        "I64"
    };
    Operand {
        kind: OperandKind::ScalarReg,
        ty,
        role,
        reg_class,
    }
}

fn mask256(role: &'static str) -> Operand {
    Operand {
        kind: OperandKind::Mask256,
        ty: &types::V4_U64,
        role,
        reg_class: "VM",
    }
}

fn mask512(role: &'static str) -> Operand {
    Operand {
        kind: OperandKind::Mask512,
        ty: &types::V8_U64,
        role,
        reg_class: "VM512",
    }
}

fn imm(kind: ImmKind, ty: &'static ElemType, role: &'static str) -> Operand {
    Operand {
        kind: OperandKind::Imm(kind),
        ty,
        role,
        reg_class: "simm7Op64",
    }
}

pub fn vx(ty: &'static ElemType) -> Operand {
    vreg(ty, "vx")
}
pub fn vy(ty: &'static ElemType) -> Operand {
    vreg(ty, "vy")
}
pub fn vz(ty: &'static ElemType) -> Operand {
    vreg(ty, "vz")
}
pub fn vw(ty: &'static ElemType) -> Operand {
    vreg(ty, "vw")
}

/// The merge destination appended to masked operand lists.
pub fn vd(ty: &'static ElemType) -> Operand {
    Operand {
        kind: OperandKind::PassThrough,
        ty: types::vector(ty),
        role: "vd",
        reg_class: "V64",
    }
}

pub fn sx(ty: &'static ElemType) -> Operand {
    sreg(ty, "sx")
}
pub fn sy(ty: &'static ElemType) -> Operand {
    sreg(ty, "sy")
}
pub fn sz(ty: &'static ElemType) -> Operand {
    sreg(ty, "sz")
}
pub fn sw(ty: &'static ElemType) -> Operand {
    sreg(ty, "sw")
}

pub fn vm() -> Operand {
    mask256("vm")
}
pub fn vmx() -> Operand {
    mask256("vmx")
}
pub fn vmy() -> Operand {
    mask256("vmy")
}
pub fn vmz() -> Operand {
    mask256("vmz")
}
pub fn vmd() -> Operand {
    mask256("vmd")
}
pub fn vm512() -> Operand {
    mask512("vm")
}
pub fn vmx512() -> Operand {
    mask512("vmx")
}
pub fn vmy512() -> Operand {
    mask512("vmy")
}
pub fn vmz512() -> Operand {
    mask512("vmz")
}
pub fn vmd512() -> Operand {
    mask512("vmd")
}

pub fn cc() -> Operand {
    Operand {
        kind: OperandKind::CondCode,
        ty: &types::U32,
        role: "cc",
        reg_class: "CCOp",
    }
}

/// The explicit vector-length operand of the `_vel_` calling convention.
pub fn vl() -> Operand {
    Operand {
        kind: OperandKind::VectorLength,
        ty: &types::U32,
        role: "vl",
        reg_class: "VLS",
    }
}

pub fn imm_i(ty: &'static ElemType) -> Operand {
    imm(ImmKind::SImm7, ty, "I")
}
pub fn imm_n(ty: &'static ElemType) -> Operand {
    imm(ImmKind::UImm6, ty, "N")
}
pub fn uimm7(ty: &'static ElemType) -> Operand {
    imm(ImmKind::UImm7, ty, "N")
}
pub fn imm_z(ty: &'static ElemType) -> Operand {
    imm(ImmKind::Zero, ty, "Z")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes() {
        assert_eq!(vx(&types::F64).kind_code(), 'v');
        assert_eq!(sy(&types::I32).kind_code(), 's');
        assert_eq!(vd(&types::F64).kind_code(), 'v');
        assert_eq!(vm().kind_code(), 'm');
        assert_eq!(vm512().kind_code(), 'M');
        assert_eq!(imm_i(&types::I64).kind_code(), 'I');
        assert_eq!(imm_n(&types::U64).kind_code(), 'I');
        assert_eq!(imm_z(&types::VOID_PTR).kind_code(), 'Z');
        assert_eq!(cc().kind_code(), 'c');
        assert_eq!(vl().kind_code(), 'l');
    }

    #[test]
    fn scalar_register_classes() {
        assert_eq!(sy(&types::F64).reg_class, "I64");
        assert_eq!(sy(&types::F32).reg_class, "F32");
        assert_eq!(sy(&types::I32).reg_class, "I32");
        assert_eq!(sy(&types::VOID_CONST_PTR).reg_class, "I64");
    }

    #[test]
    fn dag_ops() {
        assert_eq!(vx(&types::F64).dag_op(), "v256f64:$vx");
        assert_eq!(imm_i(&types::I64).dag_op(), "(i64 simm7:$I)");
        assert_eq!(imm_n(&types::U64).dag_op(), "(i64 uimm6:$N)");
        assert_eq!(cc().dag_op(), "(i32 uimm6:$cc)");
    }

    #[test]
    fn formal_names() {
        assert_eq!(vx(&types::F64).formal_name(), "pvx");
        assert_eq!(vm().formal_name(), "pvm");
        assert_eq!(sy(&types::I64).formal_name(), "sy");
    }
}
