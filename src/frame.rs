//! Frame scheduling state: a coalescing gate for scroll sampling and a
//! lifecycle flag for self-rescheduling loops.

#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// `true` when the caller should schedule a frame; `false` when one is already queued.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPhase {
    Idle,
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug)]
pub struct TaskState {
    phase: TaskPhase,
    frames: u64,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            phase: TaskPhase::Idle,
            frames: 0,
        }
    }
}

impl TaskState {
    pub fn start(&mut self) -> bool {
        if self.phase == TaskPhase::Running {
            return false;
        }
        self.phase = TaskPhase::Running;
        self.frames = 0;
        true
    }

    /// Counts a frame; returns whether the loop body should run.
    pub fn tick(&mut self) -> bool {
        if self.phase != TaskPhase::Running {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn finish(&mut self) {
        if self.phase == TaskPhase::Running {
            self.phase = TaskPhase::Finished;
        }
    }

    pub fn cancel(&mut self) {
        if self.phase == TaskPhase::Running {
            self.phase = TaskPhase::Cancelled;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == TaskPhase::Running
    }

    #[cfg(test)]
    fn phase(&self) -> TaskPhase {
        self.phase
    }

    #[cfg(test)]
    fn frames(&self) -> u64 {
        self.frames
    }
}
