//! Local file system helpers

mod home;
mod local;

pub use home::{stackctl_home_dir, stacks_dir, state_dir, STACKCTL_TEST_HOME_VAR};
pub use local::atomic_write;
