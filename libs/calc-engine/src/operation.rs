//! Typed operation requests
//!
//! Front-ends build an [`Operation`] from already-parsed numbers and hand it
//! to [`Calculator::apply`]. The engine itself never parses text.

use crate::engine::Calculator;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One engine operation with its arguments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Add { a: f64, b: f64 },
    Subtract { a: f64, b: f64 },
    Multiply { a: f64, b: f64 },
    Divide { a: f64, b: f64 },
    Power { base: f64, exponent: f64 },
    SquareRoot { n: f64 },
    Percentage { n: f64, pct: f64 },
    Factorial { n: f64 },
    Logarithm { n: f64, base: f64 },
    Sin { degrees: f64 },
    Cos { degrees: f64 },
    Tan { degrees: f64 },
    MemoryAdd { value: f64 },
    MemorySubtract { value: f64 },
    MemoryRecall,
    MemoryClear,
    Reset,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Subtract { .. } => "subtract",
            Self::Multiply { .. } => "multiply",
            Self::Divide { .. } => "divide",
            Self::Power { .. } => "power",
            Self::SquareRoot { .. } => "square_root",
            Self::Percentage { .. } => "percentage",
            Self::Factorial { .. } => "factorial",
            Self::Logarithm { .. } => "logarithm",
            Self::Sin { .. } => "sin",
            Self::Cos { .. } => "cos",
            Self::Tan { .. } => "tan",
            Self::MemoryAdd { .. } => "memory_add",
            Self::MemorySubtract { .. } => "memory_subtract",
            Self::MemoryRecall => "memory_recall",
            Self::MemoryClear => "memory_clear",
            Self::Reset => "reset",
        }
    }
}

/// What an applied operation produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Numeric result (computations and memory recall)
    Value(f64),
    /// State-only operation finished
    Done,
}

impl Outcome {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Done => None,
        }
    }
}

impl Calculator {
    /// Dispatch an operation to the matching engine method
    pub fn apply(&mut self, op: Operation) -> Result<Outcome> {
        let value = match op {
            Operation::Add { a, b } => self.add(a, b)?,
            Operation::Subtract { a, b } => self.subtract(a, b)?,
            Operation::Multiply { a, b } => self.multiply(a, b)?,
            Operation::Divide { a, b } => self.divide(a, b)?,
            Operation::Power { base, exponent } => self.power(base, exponent)?,
            Operation::SquareRoot { n } => self.square_root(n)?,
            Operation::Percentage { n, pct } => self.percentage(n, pct)?,
            Operation::Factorial { n } => self.factorial(n)?,
            Operation::Logarithm { n, base } => self.logarithm(n, base)?,
            Operation::Sin { degrees } => self.sin(degrees)?,
            Operation::Cos { degrees } => self.cos(degrees)?,
            Operation::Tan { degrees } => self.tan(degrees)?,
            Operation::MemoryRecall => self.memory_recall(),
            Operation::MemoryAdd { value } => {
                self.memory_add(value);
                return Ok(Outcome::Done);
            },
            Operation::MemorySubtract { value } => {
                self.memory_subtract(value);
                return Ok(Outcome::Done);
            },
            Operation::MemoryClear => {
                self.memory_clear();
                return Ok(Outcome::Done);
            },
            Operation::Reset => {
                self.reset();
                return Ok(Outcome::Done);
            },
        };
        Ok(Outcome::Value(value))
    }
}
