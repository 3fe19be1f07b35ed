//! # IO Module
//!
//! Interface layer exposing the domain to the presentation layer over HTTP.

pub mod rest;

pub use rest::*;
