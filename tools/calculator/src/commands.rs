//! One-shot subcommands
//!
//! Each invocation evaluates a single operation on a fresh engine.

use anyhow::Result;
use calc_engine::{format_with_precision, Calculator, Operation, Outcome, DEFAULT_LOG_BASE};
use clap::Subcommand;
use colored::*;
use serde_json::json;
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Addition: a + b
    Add {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Subtraction: a - b
    #[command(alias = "sub")]
    Subtract {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Multiplication: a × b
    #[command(alias = "mul")]
    Multiply {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Division: a ÷ b
    #[command(alias = "div")]
    Divide {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Power: base^exponent
    #[command(alias = "pow")]
    Power {
        #[arg(allow_negative_numbers = true)]
        base: f64,
        #[arg(allow_negative_numbers = true)]
        exponent: f64,
    },

    /// Square root
    Sqrt {
        #[arg(allow_negative_numbers = true)]
        n: f64,
    },

    /// Percentage: pct% of n
    Percent {
        #[arg(allow_negative_numbers = true)]
        n: f64,
        #[arg(allow_negative_numbers = true)]
        pct: f64,
    },

    /// Factorial of a non-negative integer
    Factorial {
        #[arg(allow_negative_numbers = true)]
        n: f64,
    },

    /// Logarithm (default base 10)
    Log {
        #[arg(allow_negative_numbers = true)]
        n: f64,

        /// Logarithm base
        #[arg(short, long, default_value_t = DEFAULT_LOG_BASE, allow_negative_numbers = true)]
        base: f64,
    },

    /// Sine of an angle in degrees
    Sin {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },

    /// Cosine of an angle in degrees
    Cos {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },

    /// Tangent of an angle in degrees
    Tan {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
}

impl Command {
    pub fn operation(&self) -> Operation {
        match *self {
            Self::Add { a, b } => Operation::Add { a, b },
            Self::Subtract { a, b } => Operation::Subtract { a, b },
            Self::Multiply { a, b } => Operation::Multiply { a, b },
            Self::Divide { a, b } => Operation::Divide { a, b },
            Self::Power { base, exponent } => Operation::Power { base, exponent },
            Self::Sqrt { n } => Operation::SquareRoot { n },
            Self::Percent { n, pct } => Operation::Percentage { n, pct },
            Self::Factorial { n } => Operation::Factorial { n },
            Self::Log { n, base } => Operation::Logarithm { n, base },
            Self::Sin { degrees } => Operation::Sin { degrees },
            Self::Cos { degrees } => Operation::Cos { degrees },
            Self::Tan { degrees } => Operation::Tan { degrees },
        }
    }
}

/// Output options for one-shot mode
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub digits: usize,
}

/// Evaluate one operation and print the outcome
///
/// Results and JSON bodies go to `out`, text-mode errors to `err`.
/// Returns `Ok(false)` when the engine rejected the input.
pub fn run<W, E>(op: Operation, options: OutputOptions, out: &mut W, err: &mut E) -> Result<bool>
where
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    let mut calc = Calculator::new();
    let result = calc.apply(op);

    if options.json {
        let body = match &result {
            Ok(outcome) => json!({
                "operation": op.name(),
                "result": outcome.value(),
                "snapshot": calc.snapshot(),
            }),
            Err(e) => json!({
                "operation": op.name(),
                "error": { "kind": e.kind(), "message": e.to_string() },
            }),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(result.is_ok());
    }

    match result {
        Ok(Outcome::Value(value)) => {
            writeln!(out, "{}", format_with_precision(value, options.digits))?;
            Ok(true)
        },
        Ok(Outcome::Done) => Ok(true),
        Err(e) => {
            writeln!(err, "{} {}", "Error:".red(), e)?;
            Ok(false)
        },
    }
}
