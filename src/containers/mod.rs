//! Containers that hold suspended algorithm state between steps.

mod queue;
mod stack;

pub use queue::Queue;
pub use stack::Stack;
