pub mod init;
pub mod preview;
pub mod schema;
pub mod submit;
pub mod validate;
pub mod wizard;
