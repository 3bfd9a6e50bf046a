//! Ctrl-C handling for the interactive menu.
//!
//! An interrupt ends the session the same way end of input does: print
//! `Exiting...` and exit with status 0. Nothing is saved on the way out;
//! every completed operation has already been written.

#[cfg(unix)]
const MESSAGE: &[u8] = b"\nExiting...\n";

/// Install the SIGINT handler. A no-op on platforms without POSIX signals.
pub fn install() {
    #[cfg(unix)]
    {
        let handler = on_sigint as extern "C" fn(libc::c_int);
        // SAFETY: the handler only calls async-signal-safe functions
        // (write and _exit) and touches no shared state.
        let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
        if previous == libc::SIG_ERR {
            tracing::warn!("failed to install SIGINT handler");
        }
    }
}

#[cfg(unix)]
extern "C" fn on_sigint(_signal: libc::c_int) {
    // SAFETY: MESSAGE is a static buffer valid for its full length; the
    // result is ignored because nothing can be done about a failed write
    // while exiting.
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            MESSAGE.as_ptr().cast::<libc::c_void>(),
            MESSAGE.len(),
        );
        libc::_exit(0);
    }
}
