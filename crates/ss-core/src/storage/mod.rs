mod inventory;
mod slots;

pub use inventory::{Inventory, STARTER_KIT, Selection};
pub use slots::{Slot, SlotStorage};
