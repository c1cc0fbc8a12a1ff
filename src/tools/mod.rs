//! The tools module provides helpers for vitzip.
//!
//! The tools are:
//! - cli: Options and command line interface.
//! - data_io: Whole-file reads and writes, output naming and input cleanup.
//! - mtf: Move-To-Front transform.
//!
pub mod cli;
pub mod data_io;
pub mod mtf;
