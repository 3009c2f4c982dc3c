use crate::error_handling::*;
use crate::evaluating::*;
use crate::parsing::*;
use crate::scanning::*;

use std::fmt;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "> ";

/// What a single line of input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    exit,
    empty,
    assignment { name: String, expression: String },
    malformed_assignment,
    expression(String),
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            Command::exit
        } else if line.is_empty() {
            Command::empty
        } else if line.contains('=') {
            let parts: Vec<&str> = line.split('=').map(str::trim).collect();
            match parts.as_slice() {
                [name, expression] if !name.is_empty() && !expression.is_empty() =>
                    Command::assignment { name: name.to_string(), expression: expression.to_string() },
                _ => Command::malformed_assignment,
            }
        } else {
            Command::expression(line.into())
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    exit,
    nothing,
    assigned { name: String, value: f64 },
    result(f64),
    malformed_assignment,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::exit => write!(f, "Session finished."),
            Outcome::nothing => Ok(()),
            Outcome::assigned { name, value } => write!(f, "{} = {}", name, format_value(*value)),
            Outcome::result(value) => write!(f, "Result: {}", format_value(*value)),
            Outcome::malformed_assignment => write!(f, "Malformed assignment."),
        }
    }
}

/// One user's calculator: the variables assigned so far and the loop that
/// feeds lines through scanning, parsing and evaluating.
#[derive(Debug, Default)]
pub struct Session {
    variables: Variables,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn calculate(&self, expression: &str) -> Result<f64> {
        let tokens = tokenize(expression);
        log::debug!("tokens: {:?}", tokens.iter().map(|token| token.content.as_str()).collect::<Vec<_>>());
        let postfix = convert(SimpleScanner::new(tokens), self.variables())?;
        log::debug!("postfix: {}", render(&postfix));
        let value = evaluate(&postfix)?;
        log::debug!("value: {}", format_value(value));
        Ok(value)
    }

    /// Handles one line. The variable table only changes when an assignment
    /// evaluated successfully.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        match Command::from(line) {
            Command::exit => Ok(Outcome::exit),
            Command::empty => Ok(Outcome::nothing),
            Command::assignment { name, expression } => {
                let value = self.calculate(&expression)?;
                log::info!("{} <- {}", name, format_value(value));
                self.variables.insert(name.clone(), value);
                Ok(Outcome::assigned { name, value })
            },
            Command::malformed_assignment => {
                log::warn!("malformed assignment: {:?}", line.trim());
                Ok(Outcome::malformed_assignment)
            },
            Command::expression(expression) => Ok(Outcome::result(self.calculate(&expression)?)),
        }
    }

    /// Prompts, reads and answers lines until `exit` or the end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        log::info!("session started");
        let mut line = String::new();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match self.execute(&line) {
                Ok(Outcome::nothing) => {},
                Ok(Outcome::exit) => {
                    writeln!(output, "{}", Outcome::exit)?;
                    break;
                },
                Ok(outcome) => writeln!(output, "{}", outcome)?,
                Err(e) => {
                    log::warn!("could not evaluate {:?}: {}", line.trim(), e);
                    writeln!(output, "Error, {}", e)?;
                },
            }
        }
        log::info!("session finished with {} variable(s)", self.variables().len());
        Ok(())
    }
}
