//! Core pipeline stages and page rendering for pagegen.
//!
//! This crate ties together input loading, product parsing, question
//! generation, and the three page renderers into a single run
//! ([`pipeline::run_pipeline`]).

pub mod blocks;
pub mod comparison;
pub mod faq;
pub mod input;
pub mod parser;
pub mod pipeline;
pub mod product_page;
pub mod questions;
pub mod writer;
