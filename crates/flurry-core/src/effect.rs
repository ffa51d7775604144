//! The switchable background effect interface.

/// A background effect the theme coordinator can switch on and off.
///
/// Implementations must make `disable` idempotent: the coordinator disables
/// every effect before enabling the requested one.
pub trait Effect {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Turn the effect on. Returns `false` when the effect cannot run.
    fn enable(&mut self) -> bool;

    /// Turn the effect off.
    fn disable(&mut self);

    /// Whether the effect is currently on.
    fn is_enabled(&self) -> bool;

    /// Flip the effect. Returns the new enabled state.
    fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
            false
        } else {
            self.enable()
        }
    }
}
