//! Process exit helper
//!
//! Every terminal state of the CLI routes through here. On Windows the
//! command runs in an ephemeral elevated console window, so termination is
//! delayed with a visible countdown; everywhere else it exits immediately.

use std::time::Duration;

/// Terminate the process with the given exit code
pub fn graceful_exit(code: i32) -> ! {
    if cfg!(windows) {
        for remaining in (1..=5).rev() {
            println!("Exiting in {}...", remaining);
            std::thread::sleep(Duration::from_secs(1));
        }
    }

    std::process::exit(code)
}
