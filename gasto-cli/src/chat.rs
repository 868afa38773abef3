//! Interactive chat shell: each stdin line is one inbound message.
//!
//! Routing is explicit: while a category choice is pending, plain text
//! answers it; otherwise plain text opens a new expense. Two escapes
//! override the default: `/gasto <text>` forces expense routing and
//! `/responder <text>` forces free-text routing.

use anyhow::Result;
use gasto_core::{Category, DialogueError, DialogueManager, Inbound, Outcome};
use gasto_store::{CsvAssociationStore, CsvLedger};
use std::io::{self, BufRead, Write};

pub fn run_chat(
    user: &str,
    currency: &str,
    store: CsvAssociationStore,
    ledger: CsvLedger,
) -> Result<()> {
    let mut manager = DialogueManager::new(store, ledger);

    println!("gasto chat — user: {user}");
    println!("Type an expense like `90 almoço no shopping`. /sair to quit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/sair" || line == "/quit" {
            break;
        }

        let inbound = route(line, manager.is_awaiting(user));
        let result = manager.handle(user, inbound);
        report(result, currency, &manager);
    }

    Ok(())
}

fn route(line: &str, awaiting: bool) -> Inbound {
    if let Some(rest) = line.strip_prefix("/gasto ") {
        return Inbound::Expense(rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("/responder ") {
        return Inbound::FreeText(rest.trim().to_string());
    }
    if awaiting {
        Inbound::FreeText(line.to_string())
    } else {
        Inbound::Expense(line.to_string())
    }
}

fn report(
    result: Result<Outcome, DialogueError>,
    currency: &str,
    manager: &DialogueManager<CsvAssociationStore, CsvLedger>,
) {
    match result {
        Ok(Outcome::Recorded(record)) => {
            println!(
                "Saved: {} | {} | {currency} {:.2} | {}",
                record.timestamp.format(gasto_core::ExpenseRecord::TIMESTAMP_FMT),
                record.category,
                record.amount,
                record.description
            );
            match manager.ledger().total() {
                Ok(total) => println!("Total so far: {currency} {total:.2}\n"),
                Err(e) => println!("(could not read total: {e})\n"),
            }
        }
        Ok(Outcome::NeedCategory {
            amount,
            description,
            choices,
        }) => {
            println!("Could not infer a category for \"{description}\" ({currency} {amount:.2}).");
            println!("Reply with one of: {}\n", labels(choices));
        }
        Err(DialogueError::NoAmountFound) => {
            println!("No amount found. Try: 90 almoço no shopping\n");
        }
        Err(DialogueError::OrphanResponse) => {
            println!("Nothing pending to classify.\n");
        }
        Err(e) => {
            // Store/ledger failure: pending context survives, retry is safe.
            println!("Could not save ({e}). Your answer was not lost; try again.\n");
        }
    }
}

fn labels(choices: &[Category]) -> String {
    choices
        .iter()
        .map(Category::label)
        .collect::<Vec<_>>()
        .join(", ")
}
