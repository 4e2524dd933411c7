//! Vector gathering/scattering instructions.

use crate::dsl::expand::{vgtm, vscm};
use crate::dsl::TableBuilder;

pub fn define(b: &mut TableBuilder) {
    b.section("5.3.2.14. Vector Gathering/Scattering Instructions", 33);

    b.extend(vgtm(0xA1, "VGT", "vgt"));
    b.extend(vgtm(0xA2, "VGTU", "vgtu"));
    b.extend(vgtm(0xA3, "VGTLsx", "vgtl.sx"));
    b.extend(vgtm(0xA3, "VGTLzx", "vgtl.zx"));
    b.extend(vscm(0xB1, "VSC", "vsc"));
    b.extend(vscm(0xB2, "VSCU", "vscu"));
    b.extend(vscm(0xB3, "VSCL", "vscl"));
}
