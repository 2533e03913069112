//! Directory Chat - SMS menu agent over a community resource directory
//!
//! A contact texts in, picks a language, what they need, who it is for and a
//! ZIP code, and gets back pages of matching resources.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
