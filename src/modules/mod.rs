//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the clients for the hosted backend: the relational store and
//! object storage, plus their shared connection.

pub mod storage;
pub mod store;
pub mod supabase;
