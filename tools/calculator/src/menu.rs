//! Interactive numbered menu
//!
//! Reads a choice, prompts for the operands, calls the engine and prints the
//! outcome. Works over any [`LineSource`] and writer so sessions can be
//! scripted.

use crate::config::CalculatorConfig;
use crate::input::{prompt_integer, prompt_number, prompt_number_or, LineSource};
use anyhow::Result;
use calc_engine::{
    describe_number, format_with_precision, Calculator, Operation, Outcome, DEFAULT_LOG_BASE,
    HISTORY_CAPACITY,
};
use colored::*;
use std::io::Write;
use tracing::debug;

const MENU: &str = "
ADVANCED CALCULATOR MENU
===================================
BASIC OPERATIONS
 1. Addition (+)          2. Subtraction (-)
 3. Multiplication (×)    4. Division (÷)

ADVANCED OPERATIONS
 5. Power (x^y)           6. Square Root (√)
 7. Percentage (%)        8. Factorial (!)
 9. Logarithm (log)

TRIGONOMETRY (Degrees)
10. Sine (sin)           11. Cosine (cos)
12. Tangent (tan)

MEMORY FUNCTIONS
13. Memory Add (M+)      14. Memory Subtract (M-)
15. Memory Recall (MR)   16. Memory Clear (MC)

UTILITIES
17. Show History         18. Reset Calculator
19. Exit
===================================";

const PAUSE_PROMPT: &str = "\nPress Enter to continue...";

/// Result of handling one menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
    EndOfInput,
}

/// One interactive calculator session
pub struct MenuSession {
    calc: Calculator,
    digits: usize,
    color: bool,
    show_menu: bool,
    prompt: String,
}

impl MenuSession {
    pub fn new(config: &CalculatorConfig, color: bool) -> Self {
        Self {
            calc: Calculator::new(),
            digits: config.display.significant_digits,
            color,
            show_menu: config.repl.show_menu,
            prompt: config.repl.prompt.clone(),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    /// Run until the user exits or input ends
    pub fn run<S, W>(&mut self, source: &mut S, out: &mut W) -> Result<()>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        loop {
            if self.show_menu {
                writeln!(out, "{}", MENU)?;
            }
            let Some(choice) = source.read_line(&self.prompt)? else {
                break;
            };
            match self.handle(choice.trim(), source, out)? {
                // Hold the output on screen before the menu is redrawn
                Step::Continue if self.show_menu => {
                    if source.read_line(PAUSE_PROMPT)?.is_none() {
                        break;
                    }
                },
                Step::Continue => continue,
                Step::Exit => {
                    writeln!(out, "Thank you for using the calculator!")?;
                    break;
                },
                Step::EndOfInput => break,
            }
        }
        Ok(())
    }

    fn handle<S, W>(&mut self, choice: &str, source: &mut S, out: &mut W) -> Result<Step>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        debug!(choice, "menu choice");

        let op = match choice {
            "1" => read_pair(source, out, "Enter first number: ", "Enter second number: ")?
                .map(|(a, b)| Operation::Add { a, b }),
            "2" => read_pair(source, out, "Enter first number: ", "Enter second number: ")?
                .map(|(a, b)| Operation::Subtract { a, b }),
            "3" => read_pair(source, out, "Enter first number: ", "Enter second number: ")?
                .map(|(a, b)| Operation::Multiply { a, b }),
            "4" => read_pair(source, out, "Enter dividend: ", "Enter divisor: ")?
                .map(|(a, b)| Operation::Divide { a, b }),
            "5" => read_pair(source, out, "Enter base: ", "Enter exponent: ")?
                .map(|(base, exponent)| Operation::Power { base, exponent }),
            "6" => prompt_number(source, out, "Enter number: ")?
                .map(|n| Operation::SquareRoot { n }),
            "7" => read_pair(source, out, "Enter number: ", "Enter percentage: ")?
                .map(|(n, pct)| Operation::Percentage { n, pct }),
            "8" => prompt_integer(source, out, "Enter integer: ")?
                .map(|n| Operation::Factorial { n: n as f64 }),
            "9" => {
                let Some(n) = prompt_number(source, out, "Enter number: ")? else {
                    return Ok(Step::EndOfInput);
                };
                prompt_number_or(
                    source,
                    out,
                    "Enter base (or press Enter for base 10): ",
                    DEFAULT_LOG_BASE,
                )?
                .map(|base| Operation::Logarithm { n, base })
            },
            "10" => prompt_number(source, out, "Enter angle in degrees: ")?
                .map(|degrees| Operation::Sin { degrees }),
            "11" => prompt_number(source, out, "Enter angle in degrees: ")?
                .map(|degrees| Operation::Cos { degrees }),
            "12" => prompt_number(source, out, "Enter angle in degrees: ")?
                .map(|degrees| Operation::Tan { degrees }),
            "13" => prompt_number(source, out, "Enter value to add to memory: ")?
                .map(|value| Operation::MemoryAdd { value }),
            "14" => prompt_number(source, out, "Enter value to subtract from memory: ")?
                .map(|value| Operation::MemorySubtract { value }),
            "15" => Some(Operation::MemoryRecall),
            "16" => Some(Operation::MemoryClear),
            "17" => {
                self.print_history(out)?;
                return Ok(Step::Continue);
            },
            "18" => Some(Operation::Reset),
            "19" => return Ok(Step::Exit),
            _ => {
                writeln!(out, "{}", self.error("Invalid choice! Please select 1-19."))?;
                return Ok(Step::Continue);
            },
        };

        match op {
            Some(op) => self.execute(op, out)?,
            None => return Ok(Step::EndOfInput),
        }
        Ok(Step::Continue)
    }

    fn execute<W: Write + ?Sized>(&mut self, op: Operation, out: &mut W) -> Result<()> {
        match self.calc.apply(op) {
            Ok(outcome) => self.report(op, outcome, out),
            Err(e) => {
                writeln!(out, "{}", self.error(&format!("Error: {}", e)))?;
                Ok(())
            },
        }
    }

    fn report<W: Write + ?Sized>(&self, op: Operation, outcome: Outcome, out: &mut W) -> Result<()> {
        let memory = describe_number(self.calc.memory_recall());
        let message = match (op, outcome) {
            (Operation::MemoryAdd { value }, _) => {
                format!("Added {} to memory. Memory = {}", describe_number(value), memory)
            },
            (Operation::MemorySubtract { value }, _) => format!(
                "Subtracted {} from memory. Memory = {}",
                describe_number(value),
                memory
            ),
            (Operation::MemoryRecall, _) => format!("Memory Recall: {}", memory),
            (Operation::MemoryClear, _) => "Memory cleared!".to_string(),
            (Operation::Reset, _) => "Calculator reset! Memory and history cleared.".to_string(),
            (_, Outcome::Value(value)) => {
                let text = format!("Result: {}", format_with_precision(value, self.digits));
                if self.color {
                    text.green().to_string()
                } else {
                    text
                }
            },
            (_, Outcome::Done) => return Ok(()),
        };
        writeln!(out, "{}", message)?;
        Ok(())
    }

    fn print_history<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let history = self.calc.show_history();
        if history.is_empty() {
            writeln!(out, "No calculations in history.")?;
            return Ok(());
        }

        writeln!(out, "\nLast {} Calculations:", HISTORY_CAPACITY)?;
        writeln!(out, "{}", "-".repeat(30))?;
        for (i, entry) in history.iter().enumerate() {
            writeln!(out, "{:2}. {}", i + 1, entry)?;
        }
        writeln!(out, "{}", "-".repeat(30))?;
        Ok(())
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

fn read_pair<S, W>(
    source: &mut S,
    out: &mut W,
    first: &str,
    second: &str,
) -> Result<Option<(f64, f64)>>
where
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let Some(a) = prompt_number(source, out, first)? else {
        return Ok(None);
    };
    Ok(prompt_number(source, out, second)?.map(|b| (a, b)))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CHOICE_PROMPT;
    use crate::input::ScriptedInput;

    fn quiet_config() -> CalculatorConfig {
        let mut config = CalculatorConfig::default();
        config.repl.show_menu = false;
        config
    }

    fn run_script(lines: &[&str]) -> (MenuSession, String) {
        let mut session = MenuSession::new(&quiet_config(), false);
        let mut input = ScriptedInput::new(lines.iter().copied());
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_addition_and_exit() {
        let (session, out) = run_script(&["1", "10", "5", "19"]);
        assert!(out.contains("Result: 15"));
        assert!(out.contains("Thank you for using the calculator!"));
        assert_eq!(session.calculator().show_history(), vec!["10 + 5 = 15"]);
    }

    #[test]
    fn test_invalid_number_is_reprompted() {
        let (session, out) = run_script(&["3", "two", "2", "4", "19"]);
        assert!(out.contains("Invalid input! Please enter a number."));
        assert!(out.contains("Result: 8"));
        assert_eq!(session.calculator().history().len(), 1);
    }

    #[test]
    fn test_division_by_zero_reports_error() {
        let (session, out) = run_script(&["4", "5", "0", "19"]);
        assert!(out.contains("Error: Cannot divide by zero"));
        assert!(session.calculator().show_history().is_empty());
    }

    #[test]
    fn test_result_uses_display_precision() {
        let (_, out) = run_script(&["4", "1", "3", "19"]);
        assert!(out.contains("Result: 0.333333"));
    }

    #[test]
    fn test_factorial_requires_integer_input() {
        let (_, out) = run_script(&["8", "2.5", "5", "8", "-3", "19"]);
        assert!(out.contains("Invalid input! Please enter an integer."));
        assert!(out.contains("Result: 120"));
        assert!(out.contains("Error: Invalid domain: factorial requires a non-negative integer"));
    }

    #[test]
    fn test_logarithm_default_base() {
        let (session, out) = run_script(&["9", "100", "", "19"]);
        assert!(out.contains("Result: 2"));
        assert!(session.calculator().show_history()[0].starts_with("log_10(100) = "));
    }

    #[test]
    fn test_memory_functions() {
        let (session, out) = run_script(&["13", "50", "14", "20", "15", "16", "15", "19"]);
        assert!(out.contains("Added 50 to memory. Memory = 50"));
        assert!(out.contains("Subtracted 20 from memory. Memory = 30"));
        assert!(out.contains("Memory Recall: 30"));
        assert!(out.contains("Memory cleared!"));
        assert!(out.contains("Memory Recall: 0"));
        assert_eq!(session.calculator().memory_recall(), 0.0);
        assert!(session.calculator().show_history().is_empty());
    }

    #[test]
    fn test_show_history_and_reset() {
        let (_, out) = run_script(&["17", "6", "16", "17", "18", "17", "19"]);
        assert_eq!(out.matches("No calculations in history.").count(), 2);
        assert!(out.contains(" 1. √16 = 4"));
        assert!(out.contains("Calculator reset! Memory and history cleared."));
    }

    #[test]
    fn test_invalid_choice() {
        let (_, out) = run_script(&["42", "19"]);
        assert!(out.contains("Invalid choice! Please select 1-19."));
    }

    #[test]
    fn test_end_of_input_mid_operation() {
        let (session, out) = run_script(&["1", "3"]);
        assert!(!out.contains("Result"));
        assert!(session.calculator().show_history().is_empty());
    }

    #[test]
    fn test_menu_is_printed() {
        let mut session = MenuSession::new(&CalculatorConfig::default(), false);
        let mut input = ScriptedInput::new(["19"]);
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ADVANCED CALCULATOR MENU"));
        assert_eq!(input.prompts, vec![DEFAULT_CHOICE_PROMPT.to_string()]);
    }

    #[test]
    fn test_pause_after_each_choice_with_menu() {
        let mut session = MenuSession::new(&CalculatorConfig::default(), false);
        let mut input = ScriptedInput::new(["1", "2", "3", "", "42", "", "19"]);
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();

        let pauses = input.prompts.iter().filter(|p| *p == PAUSE_PROMPT).count();
        assert_eq!(pauses, 2);
        assert_eq!(input.prompts.last().map(String::as_str), Some(DEFAULT_CHOICE_PROMPT));
        assert_eq!(session.calculator().show_history(), vec!["2 + 3 = 5"]);
    }

    #[test]
    fn test_no_pause_without_menu() {
        let mut input = ScriptedInput::new(["1", "2", "3", "19"]);
        let mut session = MenuSession::new(&quiet_config(), false);
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();

        assert!(!input.prompts.iter().any(|p| p == PAUSE_PROMPT));
        assert!(String::from_utf8(out).unwrap().contains("Thank you"));
    }
}
