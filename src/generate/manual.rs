//! The human-readable manual: C prototypes with per-lane descriptions, as
//! plain text rows or a hyperlinked HTML table.

use super::format_expr;
use super::formatter::{fmtln, Formatter};
use crate::dsl::{Entry, Inst, InstTable};

/// The manual row of one variant: its C prototype and, when the variant has
/// a semantic template, the per-lane description.
fn make(i: &Inst) -> (String, String) {
    let mut values: Vec<String> = Vec::new();

    let out_type = match i.outs().first() {
        None => "void",
        Some(out) if out.is_vreg() => {
            values.push(format!("{}[:]", out.role));
            "__vr"
        }
        Some(out) if out.is_mask512() => {
            values.push(format!("{}[:]", out.role));
            "__vm512"
        }
        Some(out) if out.is_mask() => {
            values.push(format!("{}[:]", out.role));
            "__vm256"
        }
        Some(out) if out.is_sreg() => out.ty.ctype,
        Some(out) => panic!("unexpected result operand kind for `{}`", out.role),
    };

    let mut params: Vec<String> = Vec::new();
    for op in i.ins() {
        if op.is_vreg() {
            params.push(format!("__vr {}", op.role));
            values.push(format!("{}[:]", op.role));
        } else if op.is_sreg() {
            params.push(format!("{} {}", op.ty.ctype, op.role));
            values.push(op.role.to_string());
        } else if op.is_mask512() {
            params.push(format!("__vm512 {}", op.role));
            values.push(format!("{}[:]", op.role));
        } else if op.is_mask() {
            params.push(format!("__vm256 {}", op.role));
            values.push(format!("{}[:]", op.role));
        } else if op.is_imm() {
            params.push(format!("{} {}", op.ty.ctype, op.role));
            values.push(op.role.to_string());
        } else if op.is_cc() {
            params.push("int cc".to_string());
        } else if op.is_vl() {
            params.push("int vl".to_string());
        }
    }

    let func = format!("{out_type} {}({})", i.callable_name(), params.join(", "));

    let expr = match i.expr_template() {
        None => String::new(),
        Some(template) => {
            let formatted = format_expr(template, &values);
            if i.has_mask() {
                // Unselected lanes keep the merge value.
                let rhs = match formatted.rfind("= ") {
                    Some(pos) => &formatted[pos + 2..],
                    None => formatted.as_str(),
                };
                format!(
                    "{} = {} ? {} : {}",
                    values[0],
                    values[values.len() - 2],
                    rhs,
                    values[values.len() - 1]
                )
            } else {
                formatted
            }
        }
    };
    (func, expr)
}

/// Plain-text manual: one aligned row per variant with a description.
pub fn text(insts: &[&Inst]) -> String {
    let mut f = Formatter::new();
    for i in insts {
        if i.has_expr() {
            let (func, expr) = make(i);
            fmtln!(f, "    {func:<80} // {expr}");
        }
    }
    f.contents()
}

/// Group key for HTML rowspans: the mnemonic with element-type spellings
/// removed so per-type rows share one cell.
fn rowspan_key(mnemonic: &str) -> String {
    let mut key = mnemonic.to_string();
    for ty in ["i64", "i32", "f64", "f32"] {
        key = key.replace(ty, "");
    }
    key
}

/// The HTML manual: a per-section table with one row per entry, grouped by
/// mnemonic, optionally linking each assembly mnemonic to its manual page.
pub fn html(table: &InstTable, link_pages: bool) -> String {
    use std::collections::HashMap;

    let mut f = Formatter::new();
    for (idx, s) in table.sections().iter().enumerate() {
        f.raw_line(format!("<a href=\"#sec{idx}\">{}</a><br>", s.name));
    }
    for (idx, s) in table.sections().iter().enumerate() {
        let mut rowspan: HashMap<String, usize> = HashMap::new();
        let mut rows: Vec<(String, String, String, String)> = Vec::new();
        for e in s.entries() {
            let (mnemonic, func, asm, expr) = match e {
                Entry::Dummy {
                    mnemonic,
                    prototype,
                    asm,
                } => (mnemonic.clone(), prototype.clone(), asm.clone(), String::new()),
                Entry::Inst(i) => {
                    let (func, expr) = make(i);
                    (
                        i.mnemonic().unwrap_or("").to_string(),
                        func,
                        i.asm().to_string(),
                        expr,
                    )
                }
            };
            let key = rowspan_key(&mnemonic);
            *rowspan.entry(key.clone()).or_insert(0) += 1;
            let asm = match s.page {
                Some(page) if link_pages => {
                    format!("<a href=\"Aurora-as-manual-v3.2.pdf#page={page}\">{asm}</a>")
                }
                _ => asm,
            };
            rows.push((key, func, asm, expr));
        }

        f.raw_line(format!("<h3><a name=\"sec{idx}\">{}</a></h3>", s.name));
        f.raw_line("<table border=1>");
        f.raw_line(
            "<tr><th>Instruction</th><th>Function</th><th>asm</th><th>Description</th></tr>",
        );
        let mut row = 0;
        for (key, func, asm, expr) in rows {
            f.raw_line("<tr>");
            if row == 0 {
                row = rowspan[&key];
                f.raw_line(format!("<td rowspan={row}>{key}</td>"));
            }
            row -= 1;
            f.raw_line(format!("<td>{func}</td><td>{asm}</td><td>{expr}</td></tr>"));
        }
        f.raw_line("</table>");
    }
    f.contents()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::expand::{args_vvv, expand_masked};
    use crate::dsl::types::F64;
    use crate::dsl::CallingConv;

    #[test]
    fn rows_show_prototype_and_description() {
        let fam = expand_masked(
            0xCC,
            Some("VFADd"),
            "vfadd.d",
            &[args_vvv(&F64)],
            Some("{0} = {1} + {2}"),
        );
        let (func, expr) = make(&fam[0]);
        assert_eq!(func, "__vr _ve_vfaddd_vvv(__vr vy, __vr vz)");
        assert_eq!(expr, "vx[:] = vy[:] + vz[:]");

        let (func, expr) = make(&fam[1]);
        assert_eq!(func, "__vr _ve_vfaddd_vvvmv(__vr vy, __vr vz, __vm256 vm, __vr vd)");
        assert_eq!(expr, "vx[:] = vm[:] ? vy[:] + vz[:] : vd[:]");
    }

    #[test]
    fn html_groups_rows_by_mnemonic() {
        let t = crate::instructions::table(CallingConv::Base);
        let out = html(&t, true);
        assert!(out.contains("<a href=\"#sec0\">5.3.2.7. Vector Transfer Instructions</a><br>"));
        assert!(out.contains("Aurora-as-manual-v3.2.pdf#page=18"));
        assert!(out.contains("<td>not yet implemented</td>"));
        // The page-less final section renders plain mnemonics.
        assert!(out.contains("<td>sll,add,or</td>"));
    }
}
