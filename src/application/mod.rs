#[allow(clippy::module_inception)]
mod application;
pub mod data;
mod patch_printer;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use patch_printer::PatchPrinter;
pub use runtime_config::RuntimeConfig;
