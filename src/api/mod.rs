//! # API Layer
//!
//! Transport adapters exposing the use cases.

pub mod rest;
