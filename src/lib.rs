//! Payroll engine for multi-tenant school management.
//!
//! This crate computes monthly payslips (gross salary, employee pension,
//! progressive PAYE and net salary) for school staff, runs payroll for a
//! whole school, and reports on outstanding student fees. Storage is behind
//! the [`repository::SchoolRepository`] trait; the [`api`] module exposes the
//! workflows over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod fees;
pub mod models;
pub mod repository;
pub mod service;
pub mod template;
