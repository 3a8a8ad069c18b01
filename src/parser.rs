/*!
  Splits a raw source line into whitespace-delimited tokens. A line is blank,
  a comment, or an instruction of the form `opcode [operand]`; anything past
  the operand token is ignored. Comment lines are lines whose first token
  starts with `#`, and they are treated exactly like blank lines: the
  dispatcher never sees them.
*/

use nom::{
  bytes::complete::is_not,
  character::complete::space0,
  combinator::opt,
  sequence::{pair, preceded},
  IResult
};

/// The tokens drawn from one source line.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct LineTokens<'a> {
  pub opcode  : &'a str,
  pub operand : Option<&'a str>
}

/// One whitespace-delimited token, with any leading spaces consumed.
fn token(input: &str) -> IResult<&str, &str> {
  preceded(space0, is_not(" \t\r"))(input)
}

/// Splits a line into its opcode and operand tokens. Returns `None` for
/// blank lines and comment lines.
pub fn split_line(line: &str) -> Option<LineTokens> {
  let parsed: IResult<&str, (&str, Option<&str>)> = pair(token, opt(token))(line);
  match parsed {
    Ok((_rest, (opcode, operand))) if !opcode.starts_with('#') => {
      Some(LineTokens { opcode, operand })
    }
    _ => None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_lines_produce_no_tokens() {
    assert_eq!(split_line(""), None);
    assert_eq!(split_line("   "), None);
    assert_eq!(split_line("\t\t"), None);
  }

  #[test]
  fn comment_lines_produce_no_tokens() {
    assert_eq!(split_line("# a comment"), None);
    assert_eq!(split_line("#comment"), None);
    assert_eq!(split_line("   # indented comment"), None);
  }

  #[test]
  fn a_lone_opcode_has_no_operand() {
    assert_eq!(
      split_line("pall"),
      Some(LineTokens { opcode: "pall", operand: None })
    );
  }

  #[test]
  fn an_operand_follows_the_opcode() {
    assert_eq!(
      split_line("push 1"),
      Some(LineTokens { opcode: "push", operand: Some("1") })
    );
    assert_eq!(
      split_line("  push\t-42  "),
      Some(LineTokens { opcode: "push", operand: Some("-42") })
    );
  }

  #[test]
  fn tokens_past_the_operand_are_ignored() {
    assert_eq!(
      split_line("push 1 trailing junk"),
      Some(LineTokens { opcode: "push", operand: Some("1") })
    );
  }

  #[test]
  fn the_operand_token_is_kept_verbatim() {
    // Whether the token is a valid integer is decided at execution time.
    assert_eq!(
      split_line("push abc"),
      Some(LineTokens { opcode: "push", operand: Some("abc") })
    );
  }
}
