//! A bytecode interpreter for a small stack/queue-oriented instruction set.
//! Each source line names an opcode plus an optional integer operand, and the
//! machine mutates a single dual-mode collection of integers accordingly.

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;
extern crate strum;
#[macro_use] extern crate strum_macros;
extern crate nom;

mod errors;
mod instructions;
mod machine;
mod parser;
mod stack;

use std::env;
use std::fs;
use std::io;
use std::process;

use crate::machine::Machine;

fn main() {
  let mut args = env::args();
  let _program = args.next();

  let filename = match (args.next(), args.next()) {
    (Some(filename), None) => filename,
    _ => {
      eprintln!("USAGE: staque file");
      process::exit(1);
    }
  };

  let source = match fs::read_to_string(&filename) {
    Ok(source) => source,
    Err(_) => {
      eprintln!("Error: Can't open file {}", filename);
      process::exit(1);
    }
  };

  let stdout = io::stdout();
  let mut machine = Machine::new(stdout.lock());

  if let Err(error) = machine.run(&source) {
    eprintln!("{}", error);
    process::exit(1);
  }
}
