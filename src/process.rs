//! Process liveness probing.

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Probe whether a process with the given pid currently exists, without
/// affecting it.
///
/// Sends the null signal (signal 0): the kernel performs the existence and
/// permission checks but delivers nothing. `EPERM` still means the process
/// exists; `ESRCH` means it does not. Pids above `i32::MAX` are treated as
/// non-existent.
pub fn pid_is_alive(pid: u32) -> bool {
    let raw = match i32::try_from(pid) {
        Ok(v) => v,
        Err(_) => return false,
    };

    match kill(Pid::from_raw(raw), None) {
        Ok(()) | Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_process_is_alive() {
        assert!(pid_is_alive(std::process::id()));
    }

    #[test]
    fn test_nonexistent_process_is_dead() {
        // Beyond the default pid_max on Linux
        assert!(!pid_is_alive(999_999_999));
    }

    #[test]
    fn test_pid_beyond_i32_is_dead() {
        assert!(!pid_is_alive(u32::MAX));
    }
}
