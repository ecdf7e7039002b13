//! # Domain Module
//!
//! The expense sync core. It operates independently of any UI framework and
//! of the transport used to reach the remote collection.
//!
//! ## Module Organization
//!
//! - **validation**: per-field checks that gate what may enter the store
//! - **expense_form**: field-input state of one open add/edit form
//! - **expense_store**: the in-memory expense collection and its four mutations
//! - **sync_orchestrator**: ordering of local mutations against remote calls,
//!   per-operation status and the pending guard
//! - **screen_state**: loading / error / content view state for callers
//! - **expense_summary**: recent-period filtering and totals
//!
//! ## Business Rules
//!
//! - Amounts must be finite and greater than zero
//! - Dates must be real calendar dates (YYYY-MM-DD)
//! - Descriptions must not be blank
//! - A candidate with any invalid field is rejected and never sent
//! - Identifiers are unique within the store

pub mod expense_form;
pub mod expense_store;
pub mod expense_summary;
pub mod screen_state;
pub mod sync_orchestrator;
pub mod validation;

pub use expense_form::*;
pub use expense_store::*;
pub use expense_summary::*;
pub use screen_state::*;
pub use sync_orchestrator::*;
pub use validation::*;
