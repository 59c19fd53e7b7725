//! Category and rating aggregation.
//!
//! This module tallies records per category, applies the minimum-sample-size
//! filter, computes the rating statistics (means, histogram, per-category
//! distributions), and assembles the dashboard payload.

pub mod categories;
pub mod ratings;
pub mod types;
pub mod utility;
pub mod view;
