//! gasto-store: CSV-backed collaborators for the expense pipeline — the
//! word→category association file and the append-only expense ledger.

pub mod associations;
pub mod ledger;

pub use associations::CsvAssociationStore;
pub use ledger::CsvLedger;
