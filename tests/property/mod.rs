// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Addressing, index construction and reconciliation properties.

mod addressing;
mod reconciliation;
