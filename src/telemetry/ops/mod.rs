pub mod init;
pub mod registry;
pub mod search;
pub mod history;
