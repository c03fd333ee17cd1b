//! # Repository Download Handle
//!
//! `repohandle` is the **configuration layer** of a repository metadata
//! download client. A [`Handle`] carries a fixed catalog of typed options
//! (mirror lists, proxies, SSL policy, callbacks, retry tuning, GPG policy)
//! that a transfer engine reads before and during a download.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facades (handle.rs)                                        │
//! │  - Code-keyed: set_option(OptionCode) / get_info(InfoCode)  │
//! │  - Attribute: set_attr(name) / attr(name)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Option Store (store.rs)                                    │
//! │  - One slot per catalog entry, coerced values only          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Option System (options/)                                   │
//! │  - Catalog, value kinds, coercion rules                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transfer code reads options through [`OptionsView`], a borrowed typed
//! view that also invokes the stored callbacks. [`HandleConfig`] seeds a
//! handle from a TOML file and the environment.
//!
//! ## Key Principle: One Write Path
//!
//! Every write, whichever facade or config source it comes from, ends in
//! [`OptionStore::set`]: look up the catalog entry, coerce, then store. A
//! rejected value never reaches the store.
//!
//! ## Threading
//!
//! A handle is `Send + Sync` and is mutated through `&mut self`, so
//! configuration and transfers cannot overlap. Callbacks must be
//! `Send + Sync` to be stored.

pub mod codes;
pub mod config;
pub mod error;
pub mod handle;
pub mod options;
pub mod store;
pub mod view;

pub use codes::{DerivedInfo, InfoCode, InfoSource, OptionCode};
pub use config::HandleConfig;
pub use error::{HandleError, Result};
pub use handle::Handle;
pub use options::{Callback, CbStatus, Input, OptValue};
pub use store::OptionStore;
pub use view::OptionsView;
