/// Presentation layer modules
///
/// This layer exposes the depository through a command line interface.
pub mod cli;

pub use cli::CliApp;
