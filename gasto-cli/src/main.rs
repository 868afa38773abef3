use anyhow::Result;
use clap::{Parser, Subcommand};
use gasto_core::{DialogueError, DialogueManager, Inbound, Outcome};
use gasto_store::{CsvAssociationStore, CsvLedger};

mod chat;
mod state;

#[derive(Parser, Debug)]
#[command(name = "gasto", version, about = "Expense capture with learned categories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat: lines are expenses, or category answers while
    /// one is pending
    Chat {
        /// User identity for pending-context tracking (default: profile)
        #[arg(long)]
        user: Option<String>,
    },

    /// Record a single expense message; fails when a category choice
    /// would be needed (pending state does not survive the process)
    Add {
        /// The message, e.g. `90 almoço no shopping`
        text: Vec<String>,
    },

    /// Print the accumulated ledger total
    Total,

    /// Write a profile.json with the given defaults
    Setup {
        #[arg(long, default_value = "default")]
        user: String,

        #[arg(long, default_value = "R$")]
        currency: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chat { user } => {
            let profile = state::read_profile()?;
            let user = user.unwrap_or(profile.user);
            let store = CsvAssociationStore::load(state::associations_path()?)?;
            let ledger = CsvLedger::new(state::ledger_path()?);
            chat::run_chat(&user, &profile.currency, store, ledger)?;
        }

        Command::Add { text } => {
            add_one_shot(&text.join(" "))?;
        }

        Command::Total => {
            let profile = state::read_profile()?;
            let ledger = CsvLedger::new(state::ledger_path()?);
            println!("Total: {} {:.2}", profile.currency, ledger.total()?);
        }

        Command::Setup { user, currency } => {
            let profile = state::Profile { user, currency };
            state::write_profile(&profile)?;
            println!("Profile written to {}", state::profile_path()?.display());
        }
    }

    Ok(())
}

fn add_one_shot(text: &str) -> Result<()> {
    let profile = state::read_profile()?;
    let store = CsvAssociationStore::load(state::associations_path()?)?;
    let ledger = CsvLedger::new(state::ledger_path()?);
    let mut manager = DialogueManager::new(store, ledger);

    match manager.handle(&profile.user, Inbound::Expense(text.to_string())) {
        Ok(Outcome::Recorded(record)) => {
            println!(
                "Saved: {} | {} | {} {:.2} | {}",
                record.timestamp.format(gasto_core::ExpenseRecord::TIMESTAMP_FMT),
                record.category,
                profile.currency,
                record.amount,
                record.description
            );
            println!("Total so far: {} {:.2}", profile.currency, manager.ledger().total()?);
            Ok(())
        }
        Ok(Outcome::NeedCategory { description, .. }) => {
            // Pending context is in-memory only; a one-shot process
            // cannot hold the follow-up conversation.
            anyhow::bail!(
                "no known category for \"{description}\"; run `gasto chat` to pick one"
            )
        }
        Err(DialogueError::NoAmountFound) => {
            anyhow::bail!("no amount found in \"{text}\"; try something like `90 almoço`")
        }
        Err(e) => Err(e.into()),
    }
}
