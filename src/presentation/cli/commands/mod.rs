pub mod branches;
pub mod documents;
pub mod init;
pub mod projects;

pub use branches::*;
pub use documents::*;
pub use init::*;
pub use projects::*;
