//! Session command - interactive menu for recording services one at a time

use crate::billing::{BillableItem, BillingHistory};
use crate::money::display_amount;
use clap::Args;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

#[derive(Args, Debug, Default)]
pub struct SessionCommand {}

impl SessionCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = Session::new(stdin.lock(), stdout.lock());
        session.run()?;
        log::info!("Session closed with {} invoices", session.history().len());
        Ok(())
    }
}

/// Menu loop over any line based input and output.
///
/// Owns the only billing history of the session.
pub struct Session<R, W> {
    input: R,
    output: W,
    history: BillingHistory,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            history: BillingHistory::new(),
        }
    }

    pub fn history(&self) -> &BillingHistory {
        &self.history
    }

    /// Run until the user exits or input ends, then print the totals
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "Menu:")?;
            writeln!(self.output, "1. Add a new service")?;
            writeln!(self.output, "2. Show service details")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    if self.add_service()?.is_none() {
                        break;
                    }
                }
                "2" => self.show_history()?,
                "3" => break,
                _ => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
        self.print_totals()
    }

    /// `None` when input ended before the item was complete
    fn add_service(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "Service types:")?;
        writeln!(self.output, "1. Supplement")?;
        writeln!(self.output, "2. Personal Training")?;
        writeln!(self.output, "3. Group Class")?;
        let Some(choice) = self.prompt("Select the service type: ")? else {
            return Ok(None);
        };

        let item = match choice.as_str() {
            "1" => {
                let Some(name) = self.prompt("Supplement name: ")? else {
                    return Ok(None);
                };
                let markup = self.prompt_number::<Decimal>("Markup percent (number only): ")?;
                let Some(markup) = markup else {
                    return Ok(None);
                };
                let list_price = self.prompt_number::<Decimal>("List price (number only): ")?;
                let Some(list_price) = list_price else {
                    return Ok(None);
                };
                BillableItem::supplement(name, markup, list_price)
            }
            "2" => {
                let Some(activity) = self.prompt("Training type: ")? else {
                    return Ok(None);
                };
                let Some(hours) = self.prompt_number::<u32>("Duration in hours: ")? else {
                    return Ok(None);
                };
                BillableItem::personal_training(activity, hours)
            }
            "3" => {
                let Some(activity) = self.prompt("Class type: ")? else {
                    return Ok(None);
                };
                let participants = self.prompt_number::<u32>("Number of participants: ")?;
                let Some(participants) = participants else {
                    return Ok(None);
                };
                let Some(minutes) = self.prompt_number::<u32>("Duration in minutes: ")? else {
                    return Ok(None);
                };
                BillableItem::group_class(activity, participants, minutes)
            }
            _ => {
                writeln!(self.output, "Invalid service type. Try again.")?;
                return Ok(Some(()));
            }
        };

        let description = match item.describe() {
            Ok(description) => description,
            Err(err) => {
                writeln!(self.output, "Unable to record service: {}", err)?;
                return Ok(Some(()));
            }
        };
        match self.history.record(item) {
            Ok(invoice) => {
                log::debug!("Recorded invoice #{}", invoice.number());
                writeln!(self.output, "Added {}", description)?;
            }
            Err(err) => writeln!(self.output, "Unable to record service: {}", err)?,
        }
        Ok(Some(()))
    }

    fn show_history(&mut self) -> io::Result<()> {
        if self.history.is_empty() {
            writeln!(self.output, "No services recorded.")?;
        }
        for line in self.history.list_all() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn print_totals(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Total Billed: {}",
            display_amount(self.history.total_billed())
        )?;
        writeln!(
            self.output,
            "Simple Services: {}",
            self.history.count_simple_services()
        )?;
        self.output.flush()
    }

    /// Re-prompt on lines that are not valid UTF-8, `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{}", text)?;
            self.output.flush()?;
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(line.trim().to_string())),
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    writeln!(self.output, "Input is not valid text. Try again.")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Re-prompt until the answer parses
    fn prompt_number<T>(&mut self, text: &str) -> io::Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(
                    self.output,
                    "'{}' is not a valid number ({}). Try again.",
                    answer, err
                )?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn run_session(input: &str) -> (BillingHistory, String) {
        run_session_bytes(input.as_bytes())
    }

    fn run_session_bytes(input: &[u8]) -> (BillingHistory, String) {
        let mut output = Vec::new();
        let mut session = Session::new(input, &mut output);
        session.run().unwrap();
        let history = session.history().clone();
        drop(session);
        (history, String::from_utf8(output).unwrap())
    }

    #[test]
    fn records_each_service_type() {
        let input = "1\n1\nWhey\n10\n100\n1\n2\nBoxing\n3\n1\n3\nYoga\n5\n60\n3\n";
        let (history, output) = run_session(input);

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.total_billed(),
            dec!(133.10) + dec!(6630) + dec!(5304)
        );
        assert!(output.contains("Total Billed: $12067.10"));
        assert!(output.contains("Simple Services: 1"));
    }

    #[test]
    fn shows_history_descriptions() {
        let input = "1\n2\nBoxing\n3\n2\n3\n";
        let (_, output) = run_session(input);
        let line = "Personal Training: Boxing, Duration: 3 hours, Final Price: $6630.00";
        assert!(output.contains(&format!("Added {}", line)));
        // Once when added, once in the listing
        assert_eq!(output.matches(line).count(), 2);
    }

    #[test]
    fn empty_history_listing() {
        let (_, output) = run_session("2\n3\n");
        assert!(output.contains("No services recorded."));
        assert!(output.contains("Total Billed: $0.00"));
        assert!(output.contains("Simple Services: 0"));
    }

    #[test]
    fn reprompts_on_non_numeric_input() {
        let input = "1\n2\nBoxing\nthree\n-1\n3\n3\n";
        let (history, output) = run_session(input);

        assert_eq!(history.len(), 1);
        assert_eq!(history.total_billed(), dec!(6630));
        assert!(output.contains("'three' is not a valid number"));
        assert!(output.contains("'-1' is not a valid number"));
    }

    #[test]
    fn invalid_choices_return_to_menu() {
        let input = "9\n1\n7\n3\n";
        let (history, output) = run_session(input);

        assert!(history.is_empty());
        assert!(output.contains("Invalid option. Try again."));
        assert!(output.contains("Invalid service type. Try again."));
    }

    #[test]
    fn end_of_input_prints_totals() {
        let (history, output) = run_session("1\n3\nSpinning\n15\n60\n");
        assert_eq!(history.len(), 1);
        assert!(output.ends_with("Total Billed: $4243.20\nSimple Services: 0\n"));
    }

    #[test]
    fn interrupted_item_is_not_recorded() {
        let (history, output) = run_session("1\n1\nWhey\n10\n");
        assert!(history.is_empty());
        assert!(output.contains("Total Billed: $0.00"));
    }

    #[test]
    fn overflowing_item_is_reported_and_skipped() {
        let input = format!("1\n1\nGold\n100\n{}\n3\n", Decimal::MAX);
        let (history, output) = run_session(&input);
        assert!(history.is_empty());
        let message = "Unable to record service: Supplement price calculation overflowed";
        assert!(output.contains(message));
        assert!(!output.contains("Added"));
    }

    #[test]
    fn invalid_utf8_line_is_reprompted() {
        let input = b"1\n2\nBox\xffing\nBoxing\n3\n3\n";
        let (history, output) = run_session_bytes(input);

        assert_eq!(history.len(), 1);
        assert_eq!(history.total_billed(), dec!(6630));
        assert!(output.contains("Input is not valid text. Try again."));
        assert!(output.contains("Simple Services: 0"));
    }

    #[test]
    fn invalid_utf8_menu_choice_still_prints_totals() {
        let (history, output) = run_session_bytes(b"\xfe\xff\n");
        assert!(history.is_empty());
        assert!(output.contains("Input is not valid text. Try again."));
        assert!(output.ends_with("Total Billed: $0.00\nSimple Services: 0\n"));
    }
}
