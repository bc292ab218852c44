//! External command execution and tool discovery.

pub mod command;
pub mod platform;

pub use command::{
    display_command, execute, execute_checked, CommandOptions, CommandResult, EnvOverrides,
};
pub use platform::{detect_java_home, java_home_from};
