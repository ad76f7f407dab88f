mod status;
mod task;

pub use status::TaskStatus;
pub use task::{Ratio, Task};
