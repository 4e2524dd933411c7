//! Vector-control and control instructions, and the hand-written helpers
//! that only appear in the manual.

use crate::dsl::expand::{expand, shape};
use crate::dsl::operand::{vx, vy};
use crate::dsl::types::{F32, F64};
use crate::dsl::{InstListExt, TableBuilder};

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.16. Vector Control Instructions", 34);
    b.dummy("LVL", "void _ve_lvl(int vl)", "lvl");
    b.not_implemented("SVL");
    b.not_implemented("SMVL");
    b.not_implemented("LVIX");

    b.section("5.3.2.17. Control Instructions", 35);
    b.dummy("SVOB", "void _ve_svob(void)", "svob");

    b.section("Others", None);
    b.dummy(
        "",
        "unsigned long int _ve_pack_f32p(float const* p0, float const* p1)",
        "ldu,ldl,or",
    );
    b.dummy(
        "",
        "unsigned long int _ve_pack_f32a(float const* p)",
        "load and mul",
    );
    b.dummy("", "unsigned long int _ve_pack_i32(int a, int b)", "sll,add,or");

    b.extend(
        expand(
            None,
            None,
            "vec_expf",
            &[shape(vx(&F32), [vy(&F32)])],
            Some("{0} = expf({1})"),
        )
        .no_builtin(),
    );
    b.extend(
        expand(
            None,
            None,
            "vec_exp",
            &[shape(vx(&F64), [vy(&F64)])],
            Some("{0} = exp({1})"),
        )
        .no_builtin(),
    );

    b.dummy("", "__vm _ve_extract_vm512u(__vm512 vm)", "");
    b.dummy("", "__vm _ve_extract_vm512l(__vm512 vm)", "");
    b.dummy("", "__vm512 _ve_insert_vm512u(__vm512 vmx, __vm vmy)", "");
    b.dummy("", "__vm512 _ve_insert_vm512l(__vm512 vmx, __vm vmy)", "");
}
