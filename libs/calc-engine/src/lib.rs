//! calc-engine - Stateful calculator engine
//!
//! Discrete arithmetic and transcendental operations over `f64`, a memory
//! accumulator, and a bounded history of the last ten calculations.
//!
//! # Example
//!
//! ```rust
//! use calc_engine::{format_result, Calculator, Operation, Outcome};
//!
//! let mut calc = Calculator::new();
//!
//! let root = calc.square_root(16.0).unwrap();
//! assert_eq!(format_result(root), "4");
//!
//! let third = calc.divide(1.0, 3.0).unwrap();
//! assert_eq!(format_result(third), "0.333333");
//!
//! calc.memory_add(50.0);
//! calc.memory_subtract(20.0);
//! assert_eq!(calc.apply(Operation::MemoryRecall).unwrap(), Outcome::Value(30.0));
//!
//! assert_eq!(calc.show_history(), vec!["√16 = 4", "1 ÷ 3 = 0.3333333333333333"]);
//! ```
//!
//! # Operations
//!
//! | Operation | History entry | Fails when |
//! |-----------|---------------|------------|
//! | `add(a, b)` | `a + b = r` | - |
//! | `subtract(a, b)` | `a - b = r` | - |
//! | `multiply(a, b)` | `a × b = r` | - |
//! | `divide(a, b)` | `a ÷ b = r` | `b == 0` |
//! | `power(base, exp)` | `base^exp = r` | - |
//! | `square_root(n)` | `√n = r` | `n < 0` |
//! | `percentage(n, pct)` | `pct% of n = r` | - |
//! | `factorial(n)` | `n! = r` | `n < 0` or not an integer |
//! | `logarithm(n, base)` | `log_base(n) = r` | `n <= 0`, `base <= 0`, `base == 1` |
//! | `sin/cos/tan(deg)` | `sin(deg°) = r` | - |

pub mod engine;
pub mod error;
pub mod format;
pub mod history;
pub mod operation;

// Re-exports for convenience
pub use engine::{Calculator, EngineSnapshot, DEFAULT_LOG_BASE};
pub use error::{CalcError, Result};
pub use format::{describe_number, format_result, format_with_precision};
pub use history::{History, HISTORY_CAPACITY};
pub use operation::{Operation, Outcome};
