//! faktor — offline invoice and proforma management over a local JSON store.
//!
//! The library holds everything with a contract worth testing: the domain
//! model and its validation, the pure total calculator, the invoice
//! lifecycle, the id-keyed catalogs and the backup/restore manager. The
//! binary wraps it in an interactive CLI.

pub mod backup;
pub mod calc;
pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod store;
