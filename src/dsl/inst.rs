//! One fully-resolved instruction variant.
//!
//! An [`Inst`] is produced once by the expansion combinators (or built
//! directly for irregular entries), optionally adjusted through the
//! builder-style property setters, and is immutable after it is appended to
//! a table section. Everything a generator asks of a variant (names,
//! predicates, operand lists) is answered from here.

use super::operand::{self, Operand};

/// Memory behavior attached to the generated IR intrinsic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemEffect {
    None,
    Read,
    Write,
    InaccessibleOrArgMem,
}

impl MemEffect {
    /// Property name as spelled in intrinsic declarations.
    pub fn property(self) -> &'static str {
        match self {
            MemEffect::None => "IntrNoMem",
            MemEffect::Read => "IntrReadMem",
            MemEffect::Write => "IntrWriteMem",
            MemEffect::InaccessibleOrArgMem => "IntrInaccessibleMemOrArgMemOnly",
        }
    }
}

/// The two function-naming schemes generated from the table.
///
/// `Base` relies on the ambient vector length set by `_ve_lvl`; `Vl` passes
/// the active lane count as a trailing operand of every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallingConv {
    Base,
    Vl,
}

impl CallingConv {
    /// Prefix of the generated callable function.
    pub fn func_prefix(self) -> &'static str {
        match self {
            CallingConv::Base => "_ve_",
            CallingConv::Vl => "_vel_",
        }
    }

    /// Infix shared by the builtin and IR-intrinsic names.
    pub fn intrin_infix(self) -> &'static str {
        match self {
            CallingConv::Base => "_ve_",
            CallingConv::Vl => "_ve_vl_",
        }
    }
}

/// One concrete instruction variant.
#[derive(Clone, Debug)]
pub struct Inst {
    opcode: Option<u8>,
    /// Mnemonic as listed in the ISA manual, e.g. `VFAD`. Absent for entries
    /// that exist only as intrinsics.
    mnemonic: Option<String>,
    /// Assembly mnemonic, e.g. `vfadd.d`. Empty for pseudo entries.
    asm: String,
    /// Intrinsic name without any prefix, e.g. `vfaddd_vvv`.
    name: String,
    backend_name: Option<String>,
    outs: Vec<Operand>,
    ins: Vec<Operand>,
    conv: CallingConv,
    packed: bool,
    mem: MemEffect,
    old_lowering: bool,
    has_test: bool,
    has_builtin: bool,
    has_pattern: bool,
    has_backend_def: bool,
    has_mask_base: bool,
    expr: Option<String>,
}

/// Abbreviated constructor; properties default to the common case and are
/// adjusted with the builder-style setters below.
pub fn inst(
    opcode: Option<u8>,
    mnemonic: Option<&str>,
    asm: &str,
    name: impl Into<String>,
    outs: Vec<Operand>,
    ins: Vec<Operand>,
) -> Inst {
    Inst {
        opcode,
        mnemonic: mnemonic.map(str::to_string),
        asm: asm.to_string(),
        name: name.into(),
        backend_name: None,
        outs,
        ins,
        conv: CallingConv::Base,
        packed: false,
        mem: MemEffect::None,
        old_lowering: false,
        has_test: true,
        has_builtin: true,
        has_pattern: true,
        has_backend_def: true,
        has_mask_base: true,
        expr: None,
    }
}

impl Inst {
    // Builder-style property setters, applied before the variant reaches a
    // section. Each consumes and returns the same identity.

    #[must_use]
    pub fn backend(mut self, name: impl Into<String>) -> Self {
        self.backend_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn packed(mut self) -> Self {
        self.packed = true;
        self
    }

    #[must_use]
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }

    #[must_use]
    pub fn read_mem(mut self) -> Self {
        self.mem = MemEffect::Read;
        self
    }

    #[must_use]
    pub fn write_mem(mut self) -> Self {
        self.mem = MemEffect::Write;
        self
    }

    #[must_use]
    pub fn inaccessible_or_arg_mem(mut self) -> Self {
        self.mem = MemEffect::InaccessibleOrArgMem;
        self
    }

    #[must_use]
    pub fn old_lowering(mut self) -> Self {
        self.old_lowering = true;
        self
    }

    #[must_use]
    pub fn no_test(mut self) -> Self {
        self.has_test = false;
        self
    }

    #[must_use]
    pub fn no_builtin(mut self) -> Self {
        self.has_builtin = false;
        self
    }

    #[must_use]
    pub fn no_pattern(mut self) -> Self {
        self.has_pattern = false;
        self
    }

    #[must_use]
    pub fn no_backend_def(mut self) -> Self {
        self.has_backend_def = false;
        self
    }

    /// Reduction-style masked variants write a fresh result instead of
    /// merging into the destination; they take no merge argument.
    #[must_use]
    pub fn no_mask_base(mut self) -> Self {
        self.has_mask_base = false;
        self
    }

    // Identity and operand access.

    pub fn opcode(&self) -> Option<u8> {
        self.opcode
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref()
    }

    pub fn asm(&self) -> &str {
        &self.asm
    }

    /// Prefix-less intrinsic name, with immediate role letters intact.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outs(&self) -> &[Operand] {
        &self.outs
    }

    pub fn ins(&self) -> &[Operand] {
        &self.ins
    }

    pub fn conv(&self) -> CallingConv {
        self.conv
    }

    pub fn mem(&self) -> MemEffect {
        self.mem
    }

    pub fn expr_template(&self) -> Option<&str> {
        self.expr.as_deref()
    }

    // Derived names.

    /// The generated callable function, e.g. `_ve_vfaddd_vvv`.
    pub fn func_name(&self) -> String {
        format!("{}{}", self.conv.func_prefix(), self.name)
    }

    /// The register-operand entry point this variant is callable through:
    /// immediate variants share the scalar function.
    pub fn callable_name(&self) -> String {
        format!(
            "{}{}",
            self.conv.func_prefix(),
            self.name.replace(['I', 'N'], "s")
        )
    }

    /// The compiler builtin, e.g. `__builtin_ve_vfaddd_vvv`.
    pub fn builtin_name(&self) -> String {
        format!("__builtin{}{}", self.conv.intrin_infix(), self.name)
    }

    /// The IR intrinsic record name, e.g. `int_ve_vfaddd_vvv`.
    pub fn intrin_name(&self) -> String {
        format!("int{}{}", self.conv.intrin_infix(), self.name)
    }

    /// The IR intrinsic identifier, e.g. `ve_vfaddd_vvv`.
    pub fn intrin_id(&self) -> String {
        format!(
            "{}{}",
            self.conv.intrin_infix().trim_start_matches('_'),
            self.name
        )
    }

    /// Backend instruction-definition name, e.g. `VFADdv`.
    pub fn backend_name(&self) -> Option<&str> {
        self.backend_name.as_deref()
    }

    /// Operand kind codes of outputs then inputs, e.g. `vvvmv`.
    pub fn shape_key(&self) -> String {
        self.outs
            .iter()
            .chain(&self.ins)
            .map(Operand::kind_code)
            .collect()
    }

    // Stored properties and derived predicates.

    pub fn is_packed(&self) -> bool {
        self.packed
    }

    pub fn is_old_lowering(&self) -> bool {
        self.old_lowering
    }

    pub fn has_test(&self) -> bool {
        self.has_test
    }

    pub fn has_builtin(&self) -> bool {
        self.has_builtin
    }

    pub fn has_pattern(&self) -> bool {
        self.has_pattern
    }

    /// Whether a backend definition block is emitted for this variant.
    pub fn has_backend_def(&self) -> bool {
        self.has_backend_def && !self.is_pseudo()
    }

    /// Whether masked calls pass the merge destination as an argument.
    pub fn has_mask_base(&self) -> bool {
        self.has_mask() && self.has_mask_base
    }

    /// Entries without an opcode have no machine instruction.
    pub fn is_pseudo(&self) -> bool {
        self.opcode.is_none()
    }

    /// Lane-predicated execution: the variant takes a governing mask input.
    pub fn is_masked(&self) -> bool {
        self.ins.iter().any(|op| op.role == "vm")
    }

    /// A mask register appears as the result or among the inputs.
    pub fn has_mask(&self) -> bool {
        self.outs.first().is_some_and(Operand::is_mask) || self.ins.iter().any(Operand::is_mask)
    }

    pub fn has_imm_op(&self) -> bool {
        self.ins.iter().any(Operand::is_imm)
    }

    pub fn has_pass_through(&self) -> bool {
        self.ins.iter().any(Operand::is_pass_through)
    }

    pub fn has_vl_op(&self) -> bool {
        self.ins.iter().any(Operand::is_vl)
    }

    pub fn has_expr(&self) -> bool {
        self.expr.is_some()
    }

    /// Lane stride used by test scaffolding: packed variants always move
    /// whole 64-bit containers.
    pub fn stride(&self, op: &Operand) -> u32 {
        if self.packed {
            8
        } else {
            op.stride()
        }
    }

    /// Rewrite this variant into the explicit vector-length convention.
    ///
    /// Vector-producing variants gain a merge destination (unless they
    /// already carry one), every variant gains a trailing vector-length
    /// operand, and the backend name is rebuilt from the assembly mnemonic
    /// plus the final operand-kind sequence so the two conventions never
    /// collide. The explicit-length functions predate the default lowering
    /// path, so `old_lowering` is set.
    ///
    /// # Panics
    ///
    /// Panics when applied to a variant that already has a vector-length
    /// operand; the transform is defined on base variants only.
    #[must_use]
    pub fn into_vl(mut self) -> Self {
        assert!(
            !self.has_vl_op(),
            "`{}` already uses the explicit vector-length convention",
            self.name
        );
        if !self.has_pass_through() {
            if let Some(out) = self.outs.first() {
                if out.kind == operand::OperandKind::VectorReg {
                    let elem = out.ty.elem.expect("vector operand has an element type");
                    self.ins.push(operand::vd(elem));
                    self.name.push('v');
                }
            }
        }
        self.ins.push(operand::vl());
        self.name.push('l');
        self.backend_name = if self.asm.is_empty() {
            None
        } else {
            Some(format!("{}{}", self.asm.replace('.', ""), self.shape_key()))
        };
        self.old_lowering = true;
        self.conv = CallingConv::Vl;
        self
    }
}

impl core::fmt::Display for Inst {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}({})", self.func_name(), self.shape_key())
    }
}

/// Mass application of the property setters over a freshly expanded family.
pub trait InstListExt: Sized {
    fn map_insts(self, f: impl Fn(Inst) -> Inst) -> Self;

    #[must_use]
    fn no_test(self) -> Self {
        self.map_insts(Inst::no_test)
    }
    #[must_use]
    fn no_builtin(self) -> Self {
        self.map_insts(Inst::no_builtin)
    }
    #[must_use]
    fn no_backend_def(self) -> Self {
        self.map_insts(Inst::no_backend_def)
    }
    #[must_use]
    fn no_mask_base(self) -> Self {
        self.map_insts(Inst::no_mask_base)
    }
    #[must_use]
    fn read_mem(self) -> Self {
        self.map_insts(Inst::read_mem)
    }
    #[must_use]
    fn write_mem(self) -> Self {
        self.map_insts(Inst::write_mem)
    }
    #[must_use]
    fn inaccessible_or_arg_mem(self) -> Self {
        self.map_insts(Inst::inaccessible_or_arg_mem)
    }
    #[must_use]
    fn old_lowering(self) -> Self {
        self.map_insts(Inst::old_lowering)
    }
}

impl InstListExt for Vec<Inst> {
    fn map_insts(self, f: impl Fn(Inst) -> Inst) -> Self {
        self.into_iter().map(f).collect()
    }
}
