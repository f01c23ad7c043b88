use sysinfo::{Pid, ProcessesToUpdate, System};

/// Signal-free "does process P exist" capability, swappable so the
/// supervisor can be exercised without real processes.
pub trait ProcessProbe {
    fn is_alive(&mut self, pid: u32) -> bool;
}

/// Kernel-backed probe. A PID recycled by an unrelated process still reads
/// as alive; that limitation is inherited from the PID-file scheme.
pub struct SystemProbe {
    system: System,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe for SystemProbe {
    fn is_alive(&mut self, pid: u32) -> bool {
        let pid = Pid::from_u32(pid);
        // Refresh only the queried PID, dropping it if it has exited.
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        self.system.process(pid).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_process_is_alive() {
        let mut probe = SystemProbe::new();
        assert!(probe.is_alive(std::process::id()));
    }

    #[test]
    fn absurd_pid_is_not_alive() {
        let mut probe = SystemProbe::new();
        assert!(!probe.is_alive(u32::MAX - 1));
    }
}
