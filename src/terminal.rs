//! The host terminal around a run: unbuffered, unechoed input while the machine owns the
//! keyboard, and a SIGINT handler that puts the terminal back before exiting.

use lazy_static::lazy_static;
use log::debug;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::io;
use std::sync::Mutex;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

const STDIN_FILENO: i32 = 0;
const STDOUT_FILENO: i32 = 1;

pub const INTERRUPT_EXIT_CODE: i32 = -2;

lazy_static! {
    // Settings to restore from the signal handler.
    static ref SAVED: Mutex<Option<Termios>> = Mutex::new(None);
}

/// Turns off line buffering and echo on stdin; the original settings come back on drop.
#[derive(Debug)]
pub struct InputMode {
    original: Termios,
}

impl InputMode {
    pub fn raw() -> io::Result<InputMode> {
        let original = Termios::from_fd(STDIN_FILENO)?;

        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FILENO, TCSANOW, &raw)?;

        if let Ok(mut saved) = SAVED.lock() {
            *saved = Some(original);
        }
        debug!("input buffering disabled");

        Ok(InputMode { original })
    }

    pub fn restore(&self) -> io::Result<()> {
        tcsetattr(STDIN_FILENO, TCSANOW, &self.original)
    }
}

impl Drop for InputMode {
    fn drop(&mut self) {
        if let Ok(mut saved) = SAVED.lock() {
            *saved = None;
        }
        if let Err(e) = self.restore() {
            debug!("failed to restore input buffering: {}", e);
        }
    }
}

pub fn install_interrupt_handler() -> io::Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(handle_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );

    unsafe { sigaction(Signal::SIGINT, &action) }
        .map(|_| ())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

extern "C" fn handle_interrupt(_signal: libc::c_int) {
    // try_lock: the interrupted thread may be holding the lock.
    if let Ok(saved) = SAVED.try_lock() {
        if let Some(original) = *saved {
            let _ = tcsetattr(STDIN_FILENO, TCSANOW, &original);
        }
    }

    unsafe {
        libc::write(STDOUT_FILENO, b"\n".as_ptr() as *const libc::c_void, 1);
        libc::_exit(INTERRUPT_EXIT_CODE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nix::sys::signal::raise;
    use nix::sys::wait::{waitpid, WaitStatus};
    use nix::unistd::{fork, ForkResult};

    #[test]
    fn interrupt_handler_installs() {
        assert!(install_interrupt_handler().is_ok());
    }

    #[test]
    fn interrupt_exits_with_code() {
        // The child must not be the one to initialise the lock.
        lazy_static::initialize(&SAVED);

        match fork().unwrap() {
            ForkResult::Child => {
                if install_interrupt_handler().is_ok() {
                    let _ = raise(Signal::SIGINT);
                }
                unsafe { libc::_exit(1) };
            }
            ForkResult::Parent { child } => {
                let status = waitpid(child, None).unwrap();

                // -2 as seen through an 8-bit exit status.
                assert_eq!(status, WaitStatus::Exited(child, 254));
            }
        }
    }

    #[test]
    fn nothing_saved_outside_raw_mode() {
        // Without a terminal on stdin raw mode fails and leaves nothing to restore.
        if Termios::from_fd(STDIN_FILENO).is_err() {
            assert!(InputMode::raw().is_err());
            assert!(SAVED.lock().unwrap().is_none());
        }
    }
}
