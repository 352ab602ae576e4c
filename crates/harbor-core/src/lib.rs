//! Core types and definitions for the harbor dashboard.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geographic and scene points, fixture records, components, commands,
//! snapshots, events, constants, and configuration.
//! It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod fixtures;
pub mod format;
pub mod state;
pub mod types;
