pub mod element;
pub mod locator;
pub mod memory;

pub use element::{
    EditableHandle, ElementId, ElementKind, EventStream, HostElement, HostPage, KeyPress,
    Modifiers, RawEvent,
};
pub use locator::InputLocator;
pub use memory::{MemoryElement, MemoryPage};
