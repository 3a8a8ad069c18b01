/*!
  The execution engine. A `Machine` owns the one collection of a run and an
  output handle, executes a program line by line, and stops at the first
  failure. Operations never touch the collection except through the front
  (and the back, for rotations); the mode only redirects where `push`
  inserts.
*/

use std::fmt::{Display, Formatter};
use std::io::Write;
use std::str::FromStr;

use prettytable::{format as TableFormat, Table};

use crate::errors::RunError;
use crate::instructions::{Instruction, Opcode};
use crate::parser::split_line;
use crate::stack::{Mode, Stack};

pub struct Machine<W: Write> {
  stack : Stack,
  out   : W
}

impl<W: Write> Machine<W> {

  pub fn new(out: W) -> Machine<W> {
    Machine {
      stack: Stack::new(),
      out
    }
  }

  // region Dispatch

  /**
    Executes a whole program, one line at a time, in file order. The first
    failure halts the run and is returned with the line it happened on;
    output printed by earlier lines stays on the output stream. Reaching the
    end of the source with no failure is the only successful outcome.
  */
  pub fn run(&mut self, source: &str) -> Result<(), RunError> {
    for (index, text) in source.lines().enumerate() {
      let line = index + 1;

      let tokens = match split_line(text) {
        Some(tokens) => tokens,
        None => continue
      };

      let opcode = match Opcode::from_str(tokens.opcode) {
        Ok(opcode) => opcode,
        Err(_) => {
          return Err(RunError::UnknownInstruction {
            line,
            opcode: tokens.opcode.to_string()
          });
        }
      };

      let instruction = Instruction { opcode, operand: tokens.operand };
      self.execute(&instruction, line)?;

      #[cfg(feature = "trace_execution")]
      eprintln!("L{}: {}\n{}", line, instruction, self);
    }
    Ok(())
  }

  fn execute(&mut self, instruction: &Instruction<'_>, line: usize) -> Result<(), RunError> {
    match instruction.opcode {
      Opcode::Push  => self.push(instruction.operand, line),
      Opcode::Pop   => self.pop(line),
      Opcode::Pall  => self.pall(),
      Opcode::Pint  => self.pint(line),
      Opcode::Swap  => self.swap(line),
      Opcode::Pchar => self.pchar(line),
      Opcode::Pstr  => self.pstr(),

      | Opcode::Add
      | Opcode::Sub
      | Opcode::Mul
      | Opcode::Div
      | Opcode::Mod => self.arithmetic(instruction.opcode, line),

      Opcode::Nop => Ok(()),

      Opcode::Rotl => {
        self.stack.rotate_left();
        Ok(())
      }

      Opcode::Rotr => {
        self.stack.rotate_right();
        Ok(())
      }

      Opcode::Stack => {
        self.stack.set_mode(Mode::Stack);
        Ok(())
      }

      Opcode::Queue => {
        self.stack.set_mode(Mode::Queue);
        Ok(())
      }
    }
  }

  // endregion

  // region Opcode operations

  /// Inserts the operand per the current mode. The operand token must parse
  /// as a signed integer.
  fn push(&mut self, operand: Option<&str>, line: usize) -> Result<(), RunError> {
    let value = match operand.and_then(|token| token.parse::<i64>().ok()) {
      Some(value) => value,
      None => return Err(RunError::PushUsage { line })
    };
    self.stack.insert(value);
    Ok(())
  }

  /// Discards the front value.
  fn pop(&mut self, line: usize) -> Result<(), RunError> {
    if self.stack.is_empty() {
      return Err(RunError::PopEmpty { line });
    }
    self.stack.remove_front();
    Ok(())
  }

  /// Prints the front value, base 10, one line.
  fn pint(&mut self, line: usize) -> Result<(), RunError> {
    match self.stack.front() {
      Some(value) => {
        writeln!(self.out, "{}", value)?;
        Ok(())
      }
      None => Err(RunError::PintEmpty { line })
    }
  }

  /// Prints every value, front to back, one per line. Prints nothing for an
  /// empty collection.
  fn pall(&mut self) -> Result<(), RunError> {
    for value in self.stack.values() {
      writeln!(self.out, "{}", value)?;
    }
    Ok(())
  }

  /// Exchanges the two front values.
  fn swap(&mut self, line: usize) -> Result<(), RunError> {
    if self.stack.len() < 2 {
      return Err(RunError::StackTooShort { line, opcode: Opcode::Swap.name() });
    }
    self.stack.swap_front();
    Ok(())
  }

  /**
    The two-operand arithmetic opcodes. The first operand is the front
    value, the second is the value behind it; the result of
    `second ∘ first` replaces the second and the first is discarded. The
    operand order is fixed regardless of mode, and a zero divisor is
    diagnosed before anything is mutated.
  */
  fn arithmetic(&mut self, opcode: Opcode, line: usize) -> Result<(), RunError> {
    let (first, second) = match self.stack.front_two() {
      Some(pair) => pair,
      None => {
        return Err(RunError::StackTooShort { line, opcode: opcode.name() });
      }
    };

    let result = match opcode {
      Opcode::Add => second.wrapping_add(first),
      Opcode::Sub => second.wrapping_sub(first),
      Opcode::Mul => second.wrapping_mul(first),

      Opcode::Div => {
        if first == 0 {
          return Err(RunError::DivisionByZero { line });
        }
        second.wrapping_div(first)
      }

      Opcode::Mod => {
        if first == 0 {
          return Err(RunError::DivisionByZero { line });
        }
        second.wrapping_rem(first)
      }

      _ => unreachable!("`{}` is not an arithmetic opcode.", opcode)
    };

    self.stack.combine_front(result);
    Ok(())
  }

  /// Prints the front value as an ASCII character, then a newline.
  fn pchar(&mut self, line: usize) -> Result<(), RunError> {
    let value = match self.stack.front() {
      Some(value) => value,
      None => return Err(RunError::PcharEmpty { line })
    };
    if value < 0 || value > 127 {
      return Err(RunError::PcharRange { line });
    }
    writeln!(self.out, "{}", value as u8 as char)?;
    Ok(())
  }

  /// Prints values front to back as characters, stopping at the end, at a
  /// zero value, or at a value outside the ASCII range. Always ends with a
  /// newline, even when nothing else is printed.
  fn pstr(&mut self) -> Result<(), RunError> {
    let mut text = String::new();
    for &value in self.stack.values() {
      if value <= 0 || value > 127 {
        break;
      }
      text.push(value as u8 as char);
    }
    writeln!(self.out, "{}", text)?;
    Ok(())
  }

  // endregion

}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl<W: Write> Display for Machine<W> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Position", ubl->"Value"]);

    for (i, value) in self.stack.values().enumerate() {
      match i {
        0 => {
          table.add_row(row![r->"front =", format!("{}", value)]);
        }
        _ => {
          table.add_row(row![r->format!("front+{} =", i), format!("{}", value)]);
        }
      }
    }

    write!(f, "Mode: {}\n{}", self.stack.mode(), table)
  }
}
