/*!
  Failure conditions of a run. Every opcode operation returns
  `Result<(), RunError>`, and the dispatch loop stops at the first error it
  sees; there is no recovery and no retry. The `Display` impl renders the one
  diagnostic line the interpreter prints for each failure.
*/

use std::fmt::{Display, Formatter};
use std::io;

/// Everything that can halt a run, tagged with the 1-based source line on
/// which it happened.
#[derive(Debug)]
pub enum RunError {
  /// The first token of the line names no opcode.
  UnknownInstruction {
    line   : usize,
    opcode : String
  },
  /// `push` with a missing or malformed integer operand.
  PushUsage { line: usize },
  /// `pop` on an empty collection.
  PopEmpty { line: usize },
  /// `pint` on an empty collection.
  PintEmpty { line: usize },
  /// `pchar` on an empty collection.
  PcharEmpty { line: usize },
  /// `pchar` on a value outside the ASCII range.
  PcharRange { line: usize },
  /// A two-operand opcode on a collection holding fewer than two values.
  StackTooShort {
    line   : usize,
    opcode : &'static str
  },
  /// `div` or `mod` with a zero divisor at the front.
  DivisionByZero { line: usize },
  /// The output stream rejected a write.
  Output(io::Error)
}

impl Display for RunError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      RunError::UnknownInstruction { line, opcode } => {
        write!(f, "L{}: unknown instruction {}", line, opcode)
      }

      RunError::PushUsage { line } => {
        write!(f, "L{}: usage: push integer", line)
      }

      RunError::PopEmpty { line } => {
        write!(f, "L{}: can't pop an empty stack", line)
      }

      RunError::PintEmpty { line } => {
        write!(f, "L{}: can't pint, stack empty", line)
      }

      RunError::PcharEmpty { line } => {
        write!(f, "L{}: can't pchar, stack empty", line)
      }

      RunError::PcharRange { line } => {
        write!(f, "L{}: can't pchar, value out of range", line)
      }

      RunError::StackTooShort { line, opcode } => {
        write!(f, "L{}: can't {}, stack too short", line, opcode)
      }

      RunError::DivisionByZero { line } => {
        write!(f, "L{}: division by zero", line)
      }

      RunError::Output(error) => {
        write!(f, "Error: {}", error)
      }

    }
  }
}

impl From<io::Error> for RunError {
  fn from(error: io::Error) -> RunError {
    RunError::Output(error)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn diagnostics_carry_the_line_number() {
    let error = RunError::UnknownInstruction { line: 2, opcode: "foo".to_string() };
    assert_eq!(error.to_string(), "L2: unknown instruction foo");

    let error = RunError::PopEmpty { line: 4 };
    assert_eq!(error.to_string(), "L4: can't pop an empty stack");

    let error = RunError::StackTooShort { line: 7, opcode: "add" };
    assert_eq!(error.to_string(), "L7: can't add, stack too short");

    let error = RunError::DivisionByZero { line: 3 };
    assert_eq!(error.to_string(), "L3: division by zero");
  }
}
