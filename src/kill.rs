//! Process termination on request.

/// Terminates the process with a fixed exit code.
#[derive(Clone, Copy, Debug)]
pub struct KillSwitch {
    exit_code: i32,
}

impl KillSwitch {
    pub fn new(exit_code: i32) -> Self {
        Self { exit_code }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Exit immediately. Pending responses, including the one for the current
    /// request, are never written.
    pub fn trigger(&self) -> ! {
        let code = self.exit_code();
        tracing::info!(exit_code = code, "Kill requested, exiting");
        std::process::exit(code)
    }
}
