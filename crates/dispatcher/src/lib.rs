pub mod dispatch;
pub mod scheduler;
