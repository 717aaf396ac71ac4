//! TalentScout - Conversational Candidate Intake Assistant
//!
//! This crate implements an AI-assisted screening conversation for tech
//! recruiting: resume upload and pre-fill, field-by-field gathering with
//! validation, confirmation and correction, then generated interview
//! questions and a recruiter summary.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
