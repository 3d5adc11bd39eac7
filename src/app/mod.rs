pub mod dispatch;
pub mod watch;
