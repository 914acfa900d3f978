//! Implementation of the `dev platforms` command.

use anyhow::Result;
use devlua_lib::platform::Platform;

use crate::output;

pub fn cmd_platforms() -> Result<()> {
  let current = Platform::current();

  for platform in Platform::supported() {
    if Some(platform) == current {
      println!("{} (current)", platform);
    } else {
      println!("{}", platform);
    }
  }

  if current.is_none() {
    output::print_error("current host is not a supported platform");
  }

  Ok(())
}
