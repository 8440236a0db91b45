//! Shared primitive types used across the dashboard core.

/// A stable, unique identifier for any record (customer, decision, event).
pub type EntityId = String;

/// Identifier of one monitoring session.
pub type SessionId = String;

/// Wall-clock instant as shown on the dashboard (no timezone; seed data
/// and generated events share the same local frame).
pub type Timestamp = chrono::NaiveDateTime;
