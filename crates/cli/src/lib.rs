//! # empdb
//!
//! Employee database built on the [`store`] slot file and the [`index`]
//! merge-sort / binary-search engine.
//!
//! [`Engine`] is the call surface: record creation, listing, tombstone
//! deletes, field indexes and SSN lookup. [`Menu`] drives it from a line
//! oriented terminal session and [`query`] evaluates the small
//! `SELECT ... WHERE` language over live records.

pub mod config;
pub mod engine;
pub mod input;
pub mod logging;
pub mod menu;
pub mod query;
pub mod render;

pub use config::DbConfig;
pub use engine::{Engine, IndexOutcome, IndexedEmployee, SearchOutcome};
pub use input::{InputError, NewEmployee};
pub use menu::Menu;
pub use query::{Query, QueryError, QueryRow};
