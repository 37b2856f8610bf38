pub mod analyze;
pub mod classes;
pub mod dashboard;
pub mod history;
pub mod init;
pub mod passage;
pub mod session;
pub mod students;
pub mod validate;
