//! Per-user conversational state machine tying extraction, categorization
//! and learning together across messages.
//!
//! Each user is either `Idle` (no entry in the session store) or awaiting
//! a category choice (a pending amount+description is parked for them).
//! The transport layer tags inbound events as expense-bearing or free
//! text; free text answers the pending question when there is one and is
//! an orphan otherwise.

use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use thiserror::Error;

use crate::categorize::categorize;
use crate::expense::{Category, ExpenseRecord};
use crate::extract::extract;
use crate::learn::learn;
use crate::store::AssociationStore;

/// Durable sink for finalized expense records (the ledger collaborator).
/// Appends must be atomic per record; anything beyond that is the
/// implementation's business.
pub trait LedgerSink {
    fn append(&mut self, record: &ExpenseRecord) -> anyhow::Result<()>;
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    pub records: Vec<ExpenseRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerSink for MemoryLedger {
    fn append(&mut self, record: &ExpenseRecord) -> anyhow::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// An inbound message, pre-routed by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Typed or transcribed text that should open (or replace) an expense.
    Expense(String),
    /// Any other text; consumed as the category answer when one is pending.
    FreeText(String),
}

/// Expense captured but still waiting on a category choice.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExpense {
    pub amount: f64,
    pub description: String,
    pub opened_at: NaiveDateTime,
}

/// Pending contexts keyed by user identity. Volatile: lost on process
/// restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    pending: HashMap<String, PendingExpense>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: &str) -> Option<&PendingExpense> {
        self.pending.get(user)
    }

    pub fn is_awaiting(&self, user: &str) -> bool {
        self.pending.contains_key(user)
    }

    /// Park an expense for `user`, replacing any previous pending one.
    pub fn open(&mut self, user: &str, pending: PendingExpense) {
        self.pending.insert(user.to_string(), pending);
    }

    pub fn clear(&mut self, user: &str) -> Option<PendingExpense> {
        self.pending.remove(user)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop pending contexts opened before `cutoff`, returning how many
    /// were dropped. Nothing in the default flow calls this; hosts that
    /// want to close the no-timeout liveness gap may sweep with it.
    pub fn expire_before(&mut self, cutoff: NaiveDateTime) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, p| p.opened_at >= cutoff);
        before - self.pending.len()
    }
}

#[derive(Debug, Error)]
pub enum DialogueError {
    /// No usable amount in the message (no numeric token, or the value
    /// was not positive). Non-mutating.
    #[error("no amount found in message")]
    NoAmountFound,
    /// Free text arrived while nothing was pending for that user.
    /// Non-mutating no-op.
    #[error("nothing pending to classify")]
    OrphanResponse,
    /// The association store failed to persist. Pending context is kept.
    #[error("association store error: {0}")]
    Store(#[source] anyhow::Error),
    /// The ledger append failed. Pending context is kept so the answer
    /// can be retried.
    #[error("ledger error: {0}")]
    Ledger(#[source] anyhow::Error),
}

/// What the dialogue produced for one inbound message.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Record finalized and appended to the ledger.
    Recorded(ExpenseRecord),
    /// Category unresolved; ask the user to pick from `choices`.
    NeedCategory {
        amount: f64,
        description: String,
        choices: &'static [Category],
    },
}

/// Orchestrates extractor, categorizer and learner over an association
/// store and a ledger sink, holding per-user pending state in between.
pub struct DialogueManager<S: AssociationStore, L: LedgerSink> {
    store: S,
    ledger: L,
    sessions: SessionStore,
}

impl<S: AssociationStore, L: LedgerSink> DialogueManager<S, L> {
    pub fn new(store: S, ledger: L) -> Self {
        Self {
            store,
            ledger,
            sessions: SessionStore::new(),
        }
    }

    pub fn is_awaiting(&self, user: &str) -> bool {
        self.sessions.is_awaiting(user)
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionStore {
        &mut self.sessions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Handle one inbound message for `user`, fully, before the next.
    pub fn handle(&mut self, user: &str, inbound: Inbound) -> Result<Outcome, DialogueError> {
        match inbound {
            Inbound::Expense(text) => self.handle_expense(user, &text),
            Inbound::FreeText(text) => self.handle_free_text(user, &text),
        }
    }

    fn handle_expense(&mut self, user: &str, text: &str) -> Result<Outcome, DialogueError> {
        let extracted = extract(text).map_err(|_| DialogueError::NoAmountFound)?;
        // Zero parses fine but is not a recordable expense.
        if extracted.amount <= 0.0 {
            return Err(DialogueError::NoAmountFound);
        }

        match categorize(&extracted.description, &self.store) {
            Some(category) => {
                let record = self.finalize(category, extracted.amount, &extracted.description)?;
                Ok(Outcome::Recorded(record))
            }
            None => {
                // A new ambiguous expense replaces whatever was pending.
                self.sessions.open(
                    user,
                    PendingExpense {
                        amount: extracted.amount,
                        description: extracted.description.clone(),
                        opened_at: Local::now().naive_local(),
                    },
                );
                Ok(Outcome::NeedCategory {
                    amount: extracted.amount,
                    description: extracted.description,
                    choices: &Category::ALL,
                })
            }
        }
    }

    fn handle_free_text(&mut self, user: &str, text: &str) -> Result<Outcome, DialogueError> {
        let Some(pending) = self.sessions.get(user).cloned() else {
            return Err(DialogueError::OrphanResponse);
        };

        // Whatever the text is, it is the answer; non-members become the
        // catch-all rather than an error.
        let category = Category::resolve_reply(text);
        let record = self.finalize(category, pending.amount, &pending.description)?;

        // Only cleared once the record made it to the ledger.
        self.sessions.clear(user);
        Ok(Outcome::Recorded(record))
    }

    fn finalize(
        &mut self,
        category: Category,
        amount: f64,
        description: &str,
    ) -> Result<ExpenseRecord, DialogueError> {
        learn(description, category, &mut self.store).map_err(DialogueError::Store)?;
        let record = ExpenseRecord::new(
            Local::now().naive_local(),
            category,
            amount,
            description,
        );
        self.ledger.append(&record).map_err(DialogueError::Ledger)?;
        Ok(record)
    }
}
