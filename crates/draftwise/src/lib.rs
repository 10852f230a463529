// Library root: exposes the application modules to the binary and to
// integration tests.

pub mod app;
pub mod config;
pub mod console;
pub mod protocol;
