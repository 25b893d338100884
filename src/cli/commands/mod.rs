pub mod eval;
pub mod init;
