//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
/// - Shareable across tasks (Sync, they are broadcast to subscribers)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
