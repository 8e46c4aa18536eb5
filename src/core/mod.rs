//! # Core Application Logic
//!
//! This module contains Nafta's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • calculate/present    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │    DATA    │
//!          │  Adapter   │                │   Loader   │
//!          │ (ratatui)  │                │  (tokio)   │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`selector`]: Type-ahead selector state machine
//! - [`form`]: Trip form: three selectors, trip type, hours, validation
//! - [`calculator`]: Pure fuel cost calculation
//! - [`present`]: Display strings for a calculation result
//! - [`format`]: Locale number formatting
//! - [`config`]: Layered configuration

pub mod action;
pub mod calculator;
pub mod config;
pub mod form;
pub mod format;
pub mod present;
pub mod selector;
pub mod state;
