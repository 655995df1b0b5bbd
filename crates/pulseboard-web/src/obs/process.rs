use std::sync::Mutex;

use pulseboard_core::metrics::MemoryProbe;
use pulseboard_core::{PulseError, Result};
use sysinfo::{Pid, System};

/// Reads this process's resident set size through `sysinfo`.
pub struct SysinfoProbe {
    pid: Pid,
    sys: Mutex<System>,
}

impl SysinfoProbe {
    pub fn new() -> Result<Self> {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| PulseError::Internal(format!("current pid unavailable: {e}")))?;
        Ok(Self { pid, sys: Mutex::new(System::new()) })
    }
}

impl MemoryProbe for SysinfoProbe {
    fn resident_bytes(&self) -> Result<u64> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|_| PulseError::Internal("memory probe lock poisoned".into()))?;
        if !sys.refresh_process(self.pid) {
            return Err(PulseError::Internal(format!("process {} not found", self.pid)));
        }
        sys.process(self.pid)
            .map(|p| p.memory())
            .ok_or_else(|| PulseError::Internal(format!("process {} not found", self.pid)))
    }
}
