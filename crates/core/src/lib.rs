//! Core library for ctorinject
//!
//! This crate implements the **Functional Core** of the ctorinject application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`ctorinject_core`** (this crate): Pure text transformations with zero I/O
//! - **`ctorinject`**: File reads and writes, console output and orchestration
//!
//! Every function here takes file content as a `&str` and hands back new
//! content (or the reason it left it alone). Reading and writing the file is
//! the shell's business, so everything below is tested with string fixtures.
//!
//! # Module Organization
//!
//! - [`inject`]: Constructor rewriting (extend an existing constructor, or
//!   synthesize a new one) plus `use` statement insertion
//! - [`manifest`]: Target lists, dependency settings and controller paths
//! - [`plan`]: Entity fix instructions to apply by hand after injection
//! - [`report`]: Per-target results and console marker lines
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ctorinject_core::inject::{inject, Dependency, InjectMode, Outcome};
//!
//! let source = "public function __construct(\n    private readonly Foo $foo,\n) {";
//!
//! match inject(source, InjectMode::Extend, &Dependency::default()) {
//!     Outcome::Injected(content) => assert!(content.contains("$companyContext")),
//!     Outcome::Skipped(reason) => panic!("{reason:?}"),
//! }
//! ```
//!
//! The rewriting is regex based, not a parser. Constructors must follow the
//! one-parameter-per-line, trailing-comma layout; anything else is reported
//! as not matched and left untouched.

pub mod inject;
pub mod manifest;
pub mod plan;
pub mod report;
