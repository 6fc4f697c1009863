//! # Newscols Architecture
//!
//! Newscols models a **multi-column text block** for a block-based content
//! editor: the block's attribute schema, the rules that keep every attribute
//! valid, and the derivation of the inline style that lays the text out in
//! columns. It is a library that happens to have a CLI, not the other way
//! round.
//!
//! ## The Core
//!
//! ```text
//!   raw control value ──▶ clamp / normalize ──▶ AttributeSet ──▶ derive_style ──▶ StyleDeclaration
//!                          (clamp.rs)            (model.rs)        (style.rs)
//!                               │
//!                               └── dropCapSize ──▶ resolve_drop_cap_size (dropcap.rs)
//! ```
//!
//! The core is pure and never fails: malformed input is clamped, falls back
//! to a prior value, or is rejected without touching the stored value.
//!
//! The editing surface and the saved markup both render through
//! [`render::render_block`], so the style a user sees while editing is the
//! style that gets saved.
//!
//! ## The Layers Around It
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, initializes logging, prints results    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, normalizes CLI input into domain values     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Loads documents, drives block instances, returns data    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//!
//! ## Module Overview
//!
//! - [`attributes`]: Attribute schema registry and typed values
//! - [`clamp`]: Clamp/normalize engine for raw control values
//! - [`dropcap`]: Drop-capital size presets and their derived metrics
//! - [`model`]: The `AttributeSet` and its persisted form
//! - [`block`]: Registered block types and capability profiles
//! - [`style`]: Style derivation
//! - [`render`]: Editing and persisted render targets
//! - [`codec`]: Persisted block markup
//! - [`instance`]: Block instance lifecycle
//! - [`document`]: Documents holding blocks, drift reports
//! - [`store`]: Document storage
//! - [`commands`]: Business logic for each command
//! - [`api`]: The API facade
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod block;
pub mod clamp;
pub mod codec;
pub mod commands;
pub mod config;
pub mod document;
pub mod dropcap;
pub mod error;
pub mod instance;
pub mod model;
pub mod render;
pub mod store;
pub mod style;
