pub mod task;

pub use task::{DEFAULT_PRIORITY, Task, TaskStatus};
