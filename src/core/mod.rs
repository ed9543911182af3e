//! Core HTML parsing primitives
//!
//! This module contains the fundamental building blocks for HTML parsing:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Attributes: Lenient attribute parsing and extraction

pub mod attributes;
pub mod scanner;
