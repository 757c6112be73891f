//! Pym interpreter command line.
//!
//! When called with arguments, it interprets the corresponding files in a
//! single interpreter session (so classes and globals defined in one file are
//! visible to the next).
//!
//! When called without arguments, it reads a whole program from standard
//! input and runs it.

use std::env;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;

use anyhow::{self, Context};

use rpym::interpreter::Interpreter;

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();

    let mut interp_stdout = io::stdout();
    let mut interp = Interpreter::new(&mut interp_stdout);

    if args.is_empty() {
        let mut program = String::new();
        io::stdin()
            .read_to_string(&mut program)
            .context("failed to read program from stdin")?;
        interp.eval(program.as_bytes())?;
    } else {
        for p in &args {
            let reader =
                BufReader::new(File::open(p).with_context(|| format!("failed to open {}", p))?);
            interp.eval(reader)?;
        }
    }

    Ok(())
}
