use crate::context::SimContext;
use crate::error::SimResult;

/// Background behaviour driven by the tick, such as regrowth or wandering.
///
/// A [`Simulation`](crate::Simulation) ticks its systems in the order they
/// were added, each seeing the world as the previous one left it.
pub trait System: std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Advance by one tick.
    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// Runs once, just before the first tick.
    fn init(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }

    /// Lets [`Simulation::get_system`](crate::Simulation::get_system) hand
    /// back the concrete type.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable counterpart of [`as_any`](Self::as_any).
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
