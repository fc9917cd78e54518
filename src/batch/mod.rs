//! Named actions, the dispatcher that executes them, and the sequential
//! batch interpreter.

pub mod action;
pub mod dispatcher;
pub mod interpreter;

pub use action::{Action, ActionKind};
pub use dispatcher::{ActionData, Dispatcher};
pub use interpreter::{run_batch, ActionResult};
