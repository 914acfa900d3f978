mod init;
mod platforms;
mod shell;
mod show;

pub use init::cmd_init;
pub use platforms::cmd_platforms;
pub use shell::cmd_shell;
pub use show::cmd_show;
