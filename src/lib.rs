//! Library crate for clients-admin.
//!
//! This crate exposes the building blocks of the TUI:
//! - HTTP client and wire types for the `/clients` resource (`api`)
//! - Application state, screen controllers and update loop (`app`)
//! - CPF masking and validation (`cpf`)
//! - Error and result types (`error`)
//! - In-memory search over loaded clients (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `clients-admin` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod cpf;
pub mod error;
pub mod search;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
