//! gasto-core: expense capture pipeline — amount extraction, learned
//! word→category inference, and the per-user disambiguation dialogue.

pub mod categorize;
pub mod dialogue;
pub mod expense;
pub mod extract;
pub mod learn;
pub mod store;

pub use categorize::categorize;
pub use dialogue::{
    DialogueError, DialogueManager, Inbound, LedgerSink, MemoryLedger, Outcome, PendingExpense,
    SessionStore,
};
pub use expense::{Category, ExpenseRecord};
pub use extract::{ExtractError, Extracted, extract};
pub use learn::learn;
pub use store::{AssociationStore, MemoryStore};
