// src/lib.rs

//! Controller for a single-image upload workflow.
//!
//! A file is validated, previewed, and posted to an analysis service; the
//! answer (product, price comparison, sentiment) is rendered into three
//! result regions. [`app::App`] owns the workflow and writes to a
//! [`core::page::Surface`]; the host runs the asynchronous work it requests
//! and feeds the completions back.

pub mod app;
pub mod config;
pub mod core;
pub mod logging;
