//! Marker for values travelling into a reducer.

/// Something a reducer can consume.
///
/// User-facing intents (a trigger press) travel through an
/// [`IntentSender`](super::IntentSender). System events produced while
/// carrying an intent out, such as a finished fetch, implement this as well
/// and are fed to the reducer directly by the owning view model.
pub trait Intent: Send + 'static {}
