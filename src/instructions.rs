/*!
  The instruction set of the machine. One source line holds at most one
  instruction: an opcode name followed, for `push`, by an integer operand.
  The set is closed, so the opcode is an enum, and the name table used for
  dispatch is derived rather than written by hand.
*/

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, IntoStaticStr};

/**
  Opcodes of the machine. Dispatch resolves the first token of a line to a
  variant with `Opcode::from_str` (derived by `EnumString`), and diagnostics
  recover the lowercase source-text name with `IntoStaticStr`. Every
  operation reads or mutates the shared collection; only `push` consumes an
  operand token.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "snake_case")]
pub enum Opcode {
  Push,       // push n : insert n per the current mode
  Pop,        // pop    : discard the front value
  Pall,       // pall   : print every value, front to back
  Pint,       // pint   : print the front value
  Swap,       // swap   : exchange the two front values
  Add,        // add    : second + first, collapse to one value
  Sub,        // sub    : second - first
  Mul,        // mul    : second * first
  Div,        // div    : second / first, integer division
  Mod,        // mod    : second % first
  Nop,        // nop    : do nothing
  Pchar,      // pchar  : print the front value as a character
  Pstr,       // pstr   : print values as characters until 0 or non-ASCII
  Rotl,       // rotl   : move the front value to the back
  Rotr,       // rotr   : move the back value to the front
  Stack,      // stack  : insertions go to the front (LIFO)
  Queue,      // queue  : insertions go to the back (FIFO)
}

impl Opcode {
  /// The lowercase source-text name of the opcode.
  pub fn name(&self) -> &'static str {
    (*self).into()
  }
}

/// One decoded source line: an opcode plus its raw operand token, if any.
/// The operand stays a token until `push` asks for its numeric value, so a
/// malformed integer is diagnosed on the line that tries to use it.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Instruction<'a> {
  pub opcode  : Opcode,
  pub operand : Option<&'a str>
}

impl<'a> Display for Instruction<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.operand {
      Some(operand) => {
        write!(f, "{} {}", self.opcode, operand)
      }
      None => {
        write!(f, "{}", self.opcode)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn opcode_lookup_resolves_every_name() {
    let names = [
      "push", "pop", "pall", "pint", "swap", "add", "sub", "mul", "div",
      "mod", "nop", "pchar", "pstr", "rotl", "rotr", "stack", "queue"
    ];
    for name in &names {
      let opcode = Opcode::from_str(name).unwrap();
      assert_eq!(&opcode.name(), name);
    }
  }

  #[test]
  fn opcode_lookup_rejects_unknown_names() {
    assert!(Opcode::from_str("foo").is_err());
    assert!(Opcode::from_str("Push").is_err());
    assert!(Opcode::from_str("").is_err());
  }

  #[test]
  fn instructions_display_as_source_text() {
    let instruction = Instruction { opcode: Opcode::Push, operand: Some("-5") };
    assert_eq!(instruction.to_string(), "push -5");

    let instruction = Instruction { opcode: Opcode::Pall, operand: None };
    assert_eq!(instruction.to_string(), "pall");
  }
}
