//! Shared primitive types used across the entire analysis.

/// A platform user identifier, exactly as it appears in the order feed.
pub type UserId = String;

/// An order identifier.
pub type OrderId = String;
