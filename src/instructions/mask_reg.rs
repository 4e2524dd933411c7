//! Vector mask register instructions: bitwise mask arithmetic and the mask
//! population counts.

use crate::dsl::expand::{expand, shape};
use crate::dsl::operand::{sx, vmx, vmx512, vmy, vmy512, vmz, vmz512};
use crate::dsl::types::U64;
use crate::dsl::{InstListExt, TableBuilder};

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.15. Vector Mask Register Instructions", 34);

    let pairs: [(u8, &str, &str, &str); 5] = [
        (0x84, "ANDM", "andm", "{0} = {1} & {2}"),
        (0x85, "ORM", "orm", "{0} = {1} | {2}"),
        (0x86, "XORM", "xorm", "{0} = {1} ^ {2}"),
        (0x87, "EQVM", "eqvm", "{0} = ~({1} ^ {2})"),
        (0x94, "NNDM", "nndm", "{0} = (~{1}) & {2}"),
    ];
    for (opc, backend, asm, ex) in pairs {
        b.extend(expand(
            opc,
            Some(backend),
            asm,
            &[shape(vmx(), [vmy(), vmz()])],
            Some(ex),
        ));
        b.extend(expand(
            opc,
            Some(format!("{backend}p").as_str()),
            asm,
            &[shape(vmx512(), [vmy512(), vmz512()])],
            Some(ex),
        ));
    }

    b.extend(expand(
        0x95,
        Some("NEGM"),
        "negm",
        &[shape(vmx(), [vmy()])],
        Some("{0} = ~{1}"),
    ));
    b.extend(expand(
        0x95,
        Some("NEGMp"),
        "negm",
        &[shape(vmx512(), [vmy512()])],
        Some("{0} = ~{1}"),
    ));

    b.extend(expand(0xA4, Some("PCVM"), "pcvm", &[shape(sx(&U64), [vmy()])], None).no_test());
    b.extend(expand(0xA5, Some("LZVM"), "lzvm", &[shape(sx(&U64), [vmy()])], None).no_test());
    b.extend(expand(0xA6, Some("TOVM"), "tovm", &[shape(sx(&U64), [vmy()])], None).no_test());
}
