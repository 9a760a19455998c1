//! # Pumpz Architecture
//!
//! Pumpz is a **UI-agnostic table controller** for pump equipment records. The
//! binary is one client of it; the library never assumes a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments and shell lines, renders the table      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - The table controller: query, sort, page and edit state   │
//! │  - Returns plain values and `Result<CmdResult>`             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - filter → sort → paginate, and the edit session           │
//! │  - Pure functions and small state machines                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait, InMemoryStore, JSON dataset loader    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Views
//!
//! The visible rows are a pure function of
//! `(collection, query, sort, page, page size)`. They are recomputed from the
//! store on every call instead of being patched incrementally, so they cannot
//! fall out of sync with an edit.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of each engine.
//! 2. **API** (`api.rs`): the page policy and edit flow across engines.
//! 3. **CLI** (`tests/`): the binary, driven through `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: The controller facade
//! - [`commands`]: Filter, sort, pagination, edit session, view pipeline
//! - [`store`]: Storage abstraction, in-memory store, dataset loader
//! - [`model`]: Core data types (`Record`, `Column`, `FieldValue`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
