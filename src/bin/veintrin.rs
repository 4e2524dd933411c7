//! Command-line driver: build the instruction table and print or write the
//! requested artifacts.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use veintrin_meta::dsl::{CallingConv, Inst};
use veintrin_meta::generate::{inst_def, intrinsics, manual, patterns, tests};
use veintrin_meta::instructions;

#[derive(Parser)]
#[command(about = "Generate compiler artifacts for the VE vector instruction set")]
struct Args {
    /// Emit backend instruction definitions.
    #[arg(long)]
    inst: bool,
    /// Emit IR-intrinsic declarations.
    #[arg(short = 'i', long)]
    intrin: bool,
    /// Emit legacy instruction-selection patterns.
    #[arg(short = 'p', long)]
    pattern: bool,
    /// Emit builtin declarations.
    #[arg(short = 'b', long)]
    builtin: bool,
    /// Emit the intrinsics header macros.
    #[arg(long)]
    header: bool,
    /// Emit extern declarations for the generated tests.
    #[arg(long)]
    decl: bool,
    /// Generate test programs (into --test-dir, or stdout without one).
    #[arg(short = 't', long)]
    test: bool,
    /// Emit the reference-implementation translation unit.
    #[arg(short = 'r', long)]
    reference: bool,
    /// Emit the masked-lowering dispatch lines.
    #[arg(short = 'l', long)]
    lowering: bool,
    /// Print the manual rows.
    #[arg(short = 'm', long)]
    manual: bool,
    /// Print the HTML manual.
    #[arg(long)]
    html: bool,
    /// Print the HTML manual without manual-page links.
    #[arg(long)]
    html_no_link: bool,
    /// Emit everything printable.
    #[arg(short = 'a', long)]
    all: bool,
    /// Generate the explicit vector-length convention.
    #[arg(long)]
    vl: bool,
    /// Only consider variants whose intrinsic name contains this substring.
    #[arg(short = 'f', long)]
    filter: Option<String>,
    /// Directory for generated test programs.
    #[arg(long)]
    test_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let mut args = Args::parse();

    if args.all {
        args.inst = true;
        args.intrin = true;
        args.pattern = true;
        args.builtin = true;
        args.header = true;
        args.decl = true;
        args.reference = true;
        args.test = true;
    }

    let conv = if args.vl {
        CallingConv::Vl
    } else {
        CallingConv::Base
    };
    let table = instructions::table(conv);

    let insts: Vec<&Inst> = table
        .insts()
        .filter(|i| match &args.filter {
            Some(pat) => i.name().contains(pat.as_str()),
            None => true,
        })
        .collect();
    if let Some(pat) = &args.filter {
        log::info!("filter: {pat} -> {} variants", insts.len());
    }

    if args.inst {
        print!("{}", inst_def::generate(&insts));
    }
    if args.intrin {
        print!("{}", intrinsics::intrinsic_defs(&insts));
    }
    if args.pattern {
        print!("{}", patterns::patterns(&insts));
    }
    if args.builtin {
        print!("{}", intrinsics::builtin_defs(&insts));
    }
    if args.header {
        print!("{}", intrinsics::header_defs(&insts));
    }
    if args.decl {
        print!("{}", tests::decls(&insts));
    }
    if args.test {
        match &args.test_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                tests::write_all(&insts, dir)?;
            }
            None => print!("{}", tests::print_all(&insts)),
        }
    }
    if args.reference {
        print!("{}", tests::reference_program(&insts));
    }
    if args.lowering {
        print!("{}", patterns::lowering(&insts));
    }
    if args.manual {
        print!("{}", manual::text(&insts));
    }
    if args.html {
        print!("{}", manual::html(&table, true));
    }
    if args.html_no_link {
        print!("{}", manual::html(&table, false));
    }

    Ok(())
}
