//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing the last modification of an entity.
#[derive(Clone, Copy, Debug)]
pub struct Update;

/// Marker type describing an entity (logical) deletion.
#[derive(Clone, Copy, Debug)]
pub struct Deletion;
