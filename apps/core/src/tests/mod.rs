//! Test Module
//!
//! Cross-module test suite for the wellness core.
//!
//! ## Test Categories
//! - `analysis_tests`: Scoring properties and end-to-end pattern scenarios
//! - `assessment_tests`: DASS-21 scoring and severity bands
//! - `database_tests`: CRUD operations for users, chats, journals, assessments, snapshots
//! - `advisor_tests`: Assessment suggestion flow over the SQLite store
