//! # ficha
//!
//! A parser for the ficha match-sheet format: a small line-oriented notation
//! describing football matches, ingested into validated match records and
//! folded into league standings and scorer rankings.
//!
//! See the [ficha module](ficha) for the pipeline overview.

pub mod ficha;
