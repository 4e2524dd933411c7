//! The catalogue of element types used by VE operands.
//!
//! Every operand position refers to one of the static [`ElemType`] values
//! defined here, either a scalar kind (the `F64`..`VOID_CONST_PTR` group) or
//! a register-sized view derived from one (the 256-lane vector views and the
//! two mask-register views). A type carries every per-type string the
//! generators need, so the rest of the crate never switches on type names.

/// One element type, shared by reference across all operands of that kind.
///
/// ```
/// # use veintrin_meta::dsl::types;
/// assert_eq!(types::V256_F64.builtin_code, "V256d");
/// assert_eq!(types::V256_F64.stride(), 8);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ElemType {
    /// Backend value type, e.g. `v256f64` or `i64`.
    pub value_type: &'static str,
    /// Single- or multi-character code used in builtin signature strings.
    pub builtin_code: &'static str,
    /// Type as spelled in IR-intrinsic declarations.
    pub intrin_type: &'static str,
    /// C type as spelled in test programs and the manual.
    pub ctype: &'static str,
    /// Scalar element type for vector and mask kinds; `None` for scalars.
    pub elem: Option<&'static ElemType>,
}

impl ElemType {
    pub fn is_vector(&self) -> bool {
        self.elem.is_some()
    }

    /// Memory stride of one lane, in bytes.
    ///
    /// # Panics
    ///
    /// Panics when called on a scalar kind; only vector and mask views have
    /// a lane stride. Hitting this means the instruction table itself is
    /// malformed.
    #[must_use]
    pub fn stride(&self) -> u32 {
        let elem = self
            .elem
            .unwrap_or_else(|| panic!("stride requested for non-vector type `{}`", self.value_type));
        if *elem == F64 || *elem == I64 || *elem == U64 {
            8
        } else {
            4
        }
    }
}

pub static F64: ElemType = ElemType {
    value_type: "f64",
    builtin_code: "d",
    intrin_type: "LLVMType<f64>",
    ctype: "double",
    elem: None,
};
pub static F32: ElemType = ElemType {
    value_type: "f32",
    builtin_code: "f",
    intrin_type: "LLVMType<f32>",
    ctype: "float",
    elem: None,
};
pub static I64: ElemType = ElemType {
    value_type: "i64",
    builtin_code: "Li",
    intrin_type: "LLVMType<i64>",
    ctype: "long int",
    elem: None,
};
pub static I32: ElemType = ElemType {
    value_type: "i32",
    builtin_code: "i",
    intrin_type: "LLVMType<i32>",
    ctype: "int",
    elem: None,
};
pub static U64: ElemType = ElemType {
    value_type: "i64",
    builtin_code: "LUi",
    intrin_type: "LLVMType<i64>",
    ctype: "unsigned long int",
    elem: None,
};
pub static U32: ElemType = ElemType {
    value_type: "i32",
    builtin_code: "Ui",
    intrin_type: "LLVMType<i32>",
    ctype: "unsigned int",
    elem: None,
};
pub static VOID_PTR: ElemType = ElemType {
    value_type: "i64",
    builtin_code: "v*",
    intrin_type: "llvm_ptr_ty",
    ctype: "void*",
    elem: None,
};
pub static VOID_CONST_PTR: ElemType = ElemType {
    value_type: "i64",
    builtin_code: "vC*",
    intrin_type: "llvm_ptr_ty",
    ctype: "void const*",
    elem: None,
};

// The 256-lane vector views. All of them live in the same 256x64-bit
// register file, so the backend value type is uniformly v256f64; the C type
// is the pointed-to element type of the test scaffolding.
pub static V256_F64: ElemType = ElemType {
    value_type: "v256f64",
    builtin_code: "V256d",
    intrin_type: "LLVMType<v256f64>",
    ctype: "double*",
    elem: Some(&F64),
};
pub static V256_F32: ElemType = ElemType {
    value_type: "v256f64",
    builtin_code: "V256d",
    intrin_type: "LLVMType<v256f64>",
    ctype: "float*",
    elem: Some(&F32),
};
pub static V256_I64: ElemType = ElemType {
    value_type: "v256f64",
    builtin_code: "V256d",
    intrin_type: "LLVMType<v256f64>",
    ctype: "long int*",
    elem: Some(&I64),
};
pub static V256_I32: ElemType = ElemType {
    value_type: "v256f64",
    builtin_code: "V256d",
    intrin_type: "LLVMType<v256f64>",
    ctype: "int*",
    elem: Some(&I32),
};
pub static V256_U64: ElemType = ElemType {
    value_type: "v256f64",
    builtin_code: "V256d",
    intrin_type: "LLVMType<v256f64>",
    ctype: "unsigned long int*",
    elem: Some(&U64),
};
pub static V256_U32: ElemType = ElemType {
    value_type: "v256f64",
    builtin_code: "V256d",
    intrin_type: "LLVMType<v256f64>",
    ctype: "unsigned int*",
    elem: Some(&U32),
};

/// 256-bit mask register (VM), viewed as 4x64 bits.
pub static V4_U64: ElemType = ElemType {
    value_type: "v4i64",
    builtin_code: "V4ULi",
    intrin_type: "LLVMType<v4i64>",
    ctype: "unsigned int*",
    elem: Some(&U64),
};
/// 512-bit mask register pair (VM512), viewed as 8x64 bits.
pub static V8_U64: ElemType = ElemType {
    value_type: "v8i64",
    builtin_code: "V8ULi",
    intrin_type: "LLVMType<v8i64>",
    ctype: "unsigned int*",
    elem: Some(&U64),
};

/// The 256-lane vector view of a scalar element type.
///
/// # Panics
///
/// Panics for kinds that never occur as vector elements (the pointer types).
#[must_use]
pub fn vector(elem: &'static ElemType) -> &'static ElemType {
    if *elem == F64 {
        &V256_F64
    } else if *elem == F32 {
        &V256_F32
    } else if *elem == I64 {
        &V256_I64
    } else if *elem == I32 {
        &V256_I32
    } else if *elem == U64 {
        &V256_U64
    } else if *elem == U32 {
        &V256_U32
    } else {
        panic!("no vector view for element type `{}`", elem.ctype)
    }
}
