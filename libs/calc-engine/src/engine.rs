//! Calculator - stateful arithmetic engine
//!
//! Owns the memory accumulator and the bounded history. Each operation
//! validates its inputs first, then computes, then appends exactly one
//! history entry. A rejected call changes nothing.

use crate::error::{CalcError, Result};
use crate::format::describe_number;
use crate::history::History;
use serde::{Deserialize, Serialize};
use std::f64::consts::E;
use tracing::debug;

/// Default base for [`Calculator::logarithm`]
pub const DEFAULT_LOG_BASE: f64 = 10.0;

/// Largest n whose factorial is finite in f64
const MAX_FINITE_FACTORIAL: f64 = 170.0;

/// Point-in-time copy of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub memory: f64,
    pub history: Vec<String>,
}

/// Calculator engine
///
/// # Example
/// ```rust
/// use calc_engine::{CalcError, Calculator};
///
/// let mut calc = Calculator::new();
/// assert_eq!(calc.add(10.0, 5.0).unwrap(), 15.0);
/// assert_eq!(calc.divide(1.0, 0.0), Err(CalcError::DivisionByZero));
/// assert_eq!(calc.show_history(), vec!["10 + 5 = 15"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    memory: f64,
    history: History,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    // === Arithmetic ===

    pub fn add(&mut self, a: f64, b: f64) -> Result<f64> {
        let result = a + b;
        Ok(self.record(
            "add",
            format!("{} + {}", describe_number(a), describe_number(b)),
            result,
        ))
    }

    pub fn subtract(&mut self, a: f64, b: f64) -> Result<f64> {
        let result = a - b;
        Ok(self.record(
            "subtract",
            format!("{} - {}", describe_number(a), describe_number(b)),
            result,
        ))
    }

    pub fn multiply(&mut self, a: f64, b: f64) -> Result<f64> {
        let result = a * b;
        Ok(self.record(
            "multiply",
            format!("{} × {}", describe_number(a), describe_number(b)),
            result,
        ))
    }

    /// Divide `a` by `b`
    ///
    /// Fails with [`CalcError::DivisionByZero`] when `b` is zero.
    pub fn divide(&mut self, a: f64, b: f64) -> Result<f64> {
        if b == 0.0 {
            return Err(reject("divide", CalcError::DivisionByZero));
        }
        let result = a / b;
        Ok(self.record(
            "divide",
            format!("{} ÷ {}", describe_number(a), describe_number(b)),
            result,
        ))
    }

    /// Raise `base` to `exponent`
    ///
    /// No domain check: a negative base with a fractional exponent yields NaN,
    /// overflow yields infinity. Callers must handle non-finite results.
    pub fn power(&mut self, base: f64, exponent: f64) -> Result<f64> {
        let result = base.powf(exponent);
        Ok(self.record(
            "power",
            format!("{}^{}", describe_number(base), describe_number(exponent)),
            result,
        ))
    }

    pub fn square_root(&mut self, n: f64) -> Result<f64> {
        if n < 0.0 {
            return Err(reject(
                "square_root",
                CalcError::invalid_domain(format!(
                    "cannot take square root of negative number {}",
                    describe_number(n)
                )),
            ));
        }
        let result = n.sqrt();
        Ok(self.record("square_root", format!("√{}", describe_number(n)), result))
    }

    /// `pct` percent of `n`
    pub fn percentage(&mut self, n: f64, pct: f64) -> Result<f64> {
        let result = n * (pct / 100.0);
        Ok(self.record(
            "percentage",
            format!("{}% of {}", describe_number(pct), describe_number(n)),
            result,
        ))
    }

    /// Factorial of a non-negative integer value
    ///
    /// The result is an f64, so anything above 170! is infinite.
    pub fn factorial(&mut self, n: f64) -> Result<f64> {
        if n < 0.0 || n.fract() != 0.0 {
            return Err(reject(
                "factorial",
                CalcError::invalid_domain(format!(
                    "factorial requires a non-negative integer, got {}",
                    describe_number(n)
                )),
            ));
        }
        let result = if n > MAX_FINITE_FACTORIAL {
            f64::INFINITY
        } else {
            (2..=n as u64).fold(1.0, |acc, k| acc * k as f64)
        };
        // -0.0 + 0.0 == +0.0, so the entry reads `0!`
        let n = n + 0.0;
        Ok(self.record("factorial", format!("{}!", describe_number(n)), result))
    }

    /// Logarithm of `n` in the given base
    ///
    /// Valid bases are (0, 1) and (1, ∞). Euler's number is rendered as `e`
    /// in the history entry.
    pub fn logarithm(&mut self, n: f64, base: f64) -> Result<f64> {
        if n <= 0.0 {
            return Err(reject(
                "logarithm",
                CalcError::invalid_domain(format!(
                    "logarithm requires a positive number, got {}",
                    describe_number(n)
                )),
            ));
        }
        if base <= 0.0 || base == 1.0 {
            return Err(reject(
                "logarithm",
                CalcError::invalid_domain(format!(
                    "logarithm base must be positive and not equal to 1, got {}",
                    describe_number(base)
                )),
            ));
        }

        let result = if base == 10.0 {
            n.log10()
        } else if base == 2.0 {
            n.log2()
        } else if base == E {
            n.ln()
        } else {
            n.log(base)
        };
        let base_str = if base == E {
            "e".to_string()
        } else {
            describe_number(base)
        };
        Ok(self.record(
            "logarithm",
            format!("log_{}({})", base_str, describe_number(n)),
            result,
        ))
    }

    /// Logarithm with the default base 10
    pub fn log10(&mut self, n: f64) -> Result<f64> {
        self.logarithm(n, DEFAULT_LOG_BASE)
    }

    // === Trigonometry (degrees) ===

    pub fn sin(&mut self, degrees: f64) -> Result<f64> {
        let result = degrees.to_radians().sin();
        Ok(self.record("sin", format!("sin({}°)", describe_number(degrees)), result))
    }

    pub fn cos(&mut self, degrees: f64) -> Result<f64> {
        let result = degrees.to_radians().cos();
        Ok(self.record("cos", format!("cos({}°)", describe_number(degrees)), result))
    }

    pub fn tan(&mut self, degrees: f64) -> Result<f64> {
        let result = degrees.to_radians().tan();
        Ok(self.record("tan", format!("tan({}°)", describe_number(degrees)), result))
    }

    // === Memory (never recorded in history) ===

    /// M+
    pub fn memory_add(&mut self, value: f64) {
        self.memory += value;
        debug!(value, memory = self.memory, "memory_add");
    }

    /// M-
    pub fn memory_subtract(&mut self, value: f64) {
        self.memory -= value;
        debug!(value, memory = self.memory, "memory_subtract");
    }

    /// MR
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    /// MC
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
        debug!("memory_clear");
    }

    // === History ===

    /// History entries, oldest first
    pub fn show_history(&self) -> Vec<&str> {
        self.history.entries().collect()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clear memory and history together
    pub fn reset(&mut self) {
        self.memory = 0.0;
        self.history.clear();
        debug!("reset");
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            memory: self.memory,
            history: self.history.entries().map(str::to_string).collect(),
        }
    }

    /// Append the history entry for a successful operation and pass the
    /// result through
    fn record(&mut self, operation: &'static str, description: String, result: f64) -> f64 {
        let entry = format!("{} = {}", description, describe_number(result));
        debug!(operation, result, entry = %entry, "calculated");
        self.history.push(entry);
        result
    }
}

fn reject(operation: &'static str, err: CalcError) -> CalcError {
    debug!(operation, error = %err, "rejected");
    err
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn approx(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() < tolerance
    }

    #[test]
    fn test_basic_arithmetic() {
        let mut calc = Calculator::new();
        assert_eq!(calc.add(10.0, 5.0).unwrap(), 15.0);
        assert_eq!(calc.subtract(10.0, 5.0).unwrap(), 5.0);
        assert_eq!(calc.multiply(10.0, 5.0).unwrap(), 50.0);
        assert_eq!(calc.divide(10.0, 2.0).unwrap(), 5.0);
    }

    #[test]
    fn test_history_templates() {
        let mut calc = Calculator::new();
        calc.add(10.0, 5.0).unwrap();
        calc.subtract(10.0, 5.0).unwrap();
        calc.multiply(2.0, 3.5).unwrap();
        calc.divide(9.0, 3.0).unwrap();
        calc.power(2.0, 3.0).unwrap();
        calc.square_root(16.0).unwrap();
        calc.percentage(200.0, 10.0).unwrap();
        calc.factorial(5.0).unwrap();
        calc.logarithm(8.0, 2.0).unwrap();
        calc.sin(0.0).unwrap();

        assert_eq!(
            calc.show_history(),
            vec![
                "10 + 5 = 15",
                "10 - 5 = 5",
                "2 × 3.5 = 7",
                "9 ÷ 3 = 3",
                "2^3 = 8",
                "√16 = 4",
                "10% of 200 = 20",
                "5! = 120",
                "log_2(8) = 3",
                "sin(0°) = 0",
            ]
        );
    }

    #[test]
    fn test_trig_templates() {
        let mut calc = Calculator::new();
        calc.cos(0.0).unwrap();
        calc.tan(0.0).unwrap();
        assert_eq!(calc.show_history(), vec!["cos(0°) = 1", "tan(0°) = 0"]);
    }

    #[test]
    fn test_history_keeps_full_precision() {
        let mut calc = Calculator::new();
        calc.divide(1.0, 3.0).unwrap();
        assert_eq!(calc.show_history(), vec!["1 ÷ 3 = 0.3333333333333333"]);
    }

    #[test]
    fn test_logarithm_euler_base() {
        let mut calc = Calculator::new();
        let result = calc.logarithm(E, E).unwrap();
        assert!(approx(result, 1.0, 1e-12));
        assert!(calc.show_history()[0].starts_with("log_e(2.718281828459045) = "));
    }

    #[test]
    fn test_logarithm_default_base() {
        let mut calc = Calculator::new();
        assert!(approx(calc.log10(100.0).unwrap(), 2.0, 1e-9));
        assert!(calc.show_history()[0].starts_with("log_10(100) = "));
    }

    #[test]
    fn test_logarithm_fractional_base_allowed() {
        let mut calc = Calculator::new();
        assert!(approx(calc.logarithm(4.0, 0.5).unwrap(), -2.0, 1e-9));
    }

    #[test]
    fn test_logarithm_invalid_base() {
        let mut calc = Calculator::new();
        assert!(matches!(
            calc.logarithm(10.0, 1.0),
            Err(CalcError::InvalidDomain(_))
        ));
        assert!(matches!(
            calc.logarithm(10.0, 0.0),
            Err(CalcError::InvalidDomain(_))
        ));
        assert!(matches!(
            calc.logarithm(10.0, -2.0),
            Err(CalcError::InvalidDomain(_))
        ));
        assert!(matches!(
            calc.logarithm(0.0, 10.0),
            Err(CalcError::InvalidDomain(_))
        ));
        assert!(calc.show_history().is_empty());
    }

    #[test]
    fn test_factorial_edges() {
        let mut calc = Calculator::new();
        assert_eq!(calc.factorial(0.0).unwrap(), 1.0);
        assert_eq!(calc.factorial(1.0).unwrap(), 1.0);
        assert_eq!(calc.factorial(10.0).unwrap(), 3_628_800.0);
        assert!(calc.factorial(170.0).unwrap().is_finite());
        assert_eq!(calc.factorial(171.0).unwrap(), f64::INFINITY);
        assert!(calc.factorial(f64::NAN).is_err());
        assert!(calc.factorial(f64::INFINITY).is_err());
    }

    #[test]
    fn test_factorial_negative_zero_recorded_as_zero() {
        let mut calc = Calculator::new();
        assert_eq!(calc.factorial(-0.0).unwrap(), 1.0);
        assert_eq!(calc.show_history(), vec!["0! = 1"]);
    }

    #[test]
    fn test_power_is_permissive() {
        let mut calc = Calculator::new();
        assert!(calc.power(-8.0, 1.0 / 3.0).unwrap().is_nan());
        assert_eq!(calc.power(10.0, 400.0).unwrap(), f64::INFINITY);
        assert_eq!(calc.power(0.0, -1.0).unwrap(), f64::INFINITY);
        assert_eq!(calc.history().len(), 3);
    }

    #[test]
    fn test_divide_by_negative_zero() {
        let mut calc = Calculator::new();
        assert_eq!(calc.divide(1.0, -0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_memory_not_recorded() {
        let mut calc = Calculator::new();
        calc.memory_add(50.0);
        calc.memory_subtract(20.0);
        assert_eq!(calc.memory_recall(), 30.0);
        calc.memory_clear();
        assert_eq!(calc.memory_recall(), 0.0);
        assert!(calc.show_history().is_empty());
    }

    #[test]
    fn test_snapshot() {
        let mut calc = Calculator::new();
        calc.memory_add(7.0);
        calc.multiply(3.0, 4.0).unwrap();

        let snapshot = calc.snapshot();
        assert_eq!(snapshot.memory, 7.0);
        assert_eq!(snapshot.history, vec!["3 × 4 = 12".to_string()]);
    }

    #[test]
    #[traced_test]
    fn test_operations_are_logged() {
        let mut calc = Calculator::new();
        calc.add(1.0, 2.0).unwrap();
        let _ = calc.divide(1.0, 0.0);

        assert!(logs_contain("calculated"));
        assert!(logs_contain("1 + 2 = 3"));
        assert!(logs_contain("rejected"));
        assert!(logs_contain("Cannot divide by zero"));
    }
}
