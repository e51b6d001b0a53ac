#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for social-rows
//!
//! This library consolidates all functionality for the social-rows tool, which turns LinkedIn and
//! Facebook analytics delivered by a remote API into flat, typed rows for reporting tools.
//!
//! # Module Organization
//!
//! - [`records`]: Platforms, categories, and the raw metric records of a bundle
//! - [`fields`]: The catalogue of output fields and their types
//! - [`normalize`]: Turning records into rows of typed values
//! - [`api`]: The analytics API client
//! - [`reports`]: Report generation in multiple formats
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod api;
pub mod commands;
pub mod fields;
pub mod normalize;
pub mod records;
pub mod reports;

pub use crate::commands::{Host, run};
