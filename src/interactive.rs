//! Menu-driven prompt loop for entering and summarizing expenses.
//!
//! The session reads from any [`BufRead`] and writes to any [`Write`], so it can
//! be driven from a terminal or from a script in tests.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::core::{BudgetConfig, Category, Expense, summarize};
use crate::report::render_text;
use crate::storage::ExpenseStore;

const CHOICE_PROMPT: &str = "Enter your choice between (1-3): ";
const MONTH_PROMPT: &str = "Enter the month number (e.g., 1 for January): ";

/// Accepts plain non-negative decimals: digits with at most one `.`.
pub fn parse_amount_input(input: &str) -> Option<f64> {
    let input = input.trim();
    let mut dots = 0;
    let mut digits = 0;
    for c in input.chars() {
        match c {
            '.' => dots += 1,
            '0'..='9' => digits += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    input.parse().ok()
}

pub struct Session<R, W, S> {
    input: R,
    output: W,
    store: S,
    budget: BudgetConfig,
    today: NaiveDate,
}

impl<R: BufRead, W: Write, S: ExpenseStore> Session<R, W, S> {
    pub fn new(input: R, output: W, store: S, budget: BudgetConfig, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            store,
            budget,
            today,
        }
    }

    /// Returns the store, e.g. to inspect what a scripted session saved.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs the menu loop until the user exits or input ends.
    ///
    /// Storage failures are reported and the menu continues; only errors on
    /// the terminal itself end the session.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Running Expense Tracker!")?;
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt_non_empty(CHOICE_PROMPT)? else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    if !self.enter_expense()? {
                        break;
                    }
                }
                "2" => {
                    if !self.summarize_expenses()? {
                        break;
                    }
                }
                "3" => {
                    let bye = "You have exited the Expense tracking application";
                    writeln!(self.output, "{bye}")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Please enter 1, 2, or 3")?,
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Expense Tracker Menu")?;
        writeln!(self.output, "----------------------")?;
        writeln!(self.output, "1- Enter Expense")?;
        writeln!(self.output, "2- Summarize Expense")?;
        writeln!(self.output, "3- Exit")?;
        writeln!(self.output, "----------------------")
    }

    /// Reads one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_non_empty(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            match self.read_line(prompt)? {
                None => return Ok(None),
                Some(s) if !s.is_empty() => return Ok(Some(s)),
                Some(_) => writeln!(self.output, "Please enter a valid input and try again.")?,
            }
        }
    }

    fn prompt_amount(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(s) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_amount_input(&s) {
                Some(amount) => return Ok(Some(amount)),
                None => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn prompt_category(&mut self) -> io::Result<Option<Category>> {
        let prompt = format!("Enter a category number [1 - {}]: ", Category::ALL.len());
        loop {
            for (i, category) in Category::ALL.iter().enumerate() {
                writeln!(self.output, "  {}. {category}", i + 1)?;
            }
            let Some(s) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            let picked = s
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| Category::ALL.get(i).copied());
            match picked {
                Some(category) => return Ok(Some(category)),
                None => writeln!(self.output, "Invalid category. Please try again!")?,
            }
        }
    }

    fn prompt_month(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(s) = self.read_line(MONTH_PROMPT)? else {
                return Ok(None);
            };
            match s.parse::<u32>() {
                Ok(m) if (1..=12).contains(&m) => return Ok(Some(m)),
                _ => writeln!(
                    self.output,
                    "Please enter a month number between 1 and 12."
                )?,
            }
        }
    }

    /// Returns `false` when input ended mid-entry.
    fn enter_expense(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Getting User Expense")?;
        let Some(name) = self.prompt_non_empty("Enter expense name: ")? else {
            return Ok(false);
        };
        let Some(amount) = self.prompt_amount("Enter expense amount: ")? else {
            return Ok(false);
        };
        let Some(category) = self.prompt_category()? else {
            return Ok(false);
        };
        match Expense::new(name, category, amount) {
            Ok(expense) => match self.store.append(&expense) {
                Ok(()) => writeln!(self.output, "Saved expense: {expense}")?,
                Err(e) => {
                    warn!(error = %e, "Expense not saved");
                    writeln!(self.output, "Could not save expense: {e}")?;
                }
            },
            Err(e) => writeln!(self.output, "Could not save expense: {e}")?,
        }
        Ok(true)
    }

    /// Returns `false` when input ended before a month was chosen.
    fn summarize_expenses(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Summarizing User Expense")?;
        let loaded = match self.store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "Could not load expenses");
                writeln!(self.output, "Could not load expenses: {e}")?;
                return Ok(true);
            }
        };
        for rejected in &loaded.rejected {
            writeln!(self.output, "Skipped malformed record at {rejected}")?;
        }
        let Some(month) = self.prompt_month()? else {
            return Ok(false);
        };
        debug!(month, "Summarizing from interactive session");
        match summarize(loaded.log.expenses(), &self.budget, self.today, month) {
            Ok(report) => writeln!(self.output, "\n{}", render_text(&report))?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_input_accepts_plain_decimals() {
        assert_eq!(parse_amount_input("12"), Some(12.0));
        assert_eq!(parse_amount_input("12.50"), Some(12.5));
        assert_eq!(parse_amount_input(".5"), Some(0.5));
        assert_eq!(parse_amount_input(" 3 "), Some(3.0));
    }

    #[test]
    fn amount_input_rejects_other_text() {
        assert_eq!(parse_amount_input(""), None);
        assert_eq!(parse_amount_input("."), None);
        assert_eq!(parse_amount_input("1.2.3"), None);
        assert_eq!(parse_amount_input("-4"), None);
        assert_eq!(parse_amount_input("1e3"), None);
        assert_eq!(parse_amount_input("abc"), None);
    }
}
