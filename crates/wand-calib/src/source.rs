use glam::Quat;
use std::collections::VecDeque;

/// Anything that can report the device's current raw attitude, in the
/// sensor's native frame.
pub trait AttitudeSource {
    fn attitude(&mut self) -> Quat;
}

impl<S: AttitudeSource + ?Sized> AttitudeSource for &mut S {
    fn attitude(&mut self) -> Quat {
        (**self).attitude()
    }
}

impl<S: AttitudeSource + ?Sized> AttitudeSource for Box<S> {
    fn attitude(&mut self) -> Quat {
        (**self).attitude()
    }
}

/// Source that always reports the same attitude.
#[derive(Debug, Clone, Copy)]
pub struct FixedAttitude(pub Quat);

impl AttitudeSource for FixedAttitude {
    fn attitude(&mut self) -> Quat {
        self.0
    }
}

/// Source that replays a queue of readings, then keeps repeating the last one.
#[derive(Debug, Clone)]
pub struct ScriptedAttitude {
    queue: VecDeque<Quat>,
    last: Quat,
    reads: usize,
}

impl ScriptedAttitude {
    pub fn new(readings: impl IntoIterator<Item = Quat>) -> Self {
        Self {
            queue: readings.into_iter().collect(),
            last: Quat::IDENTITY,
            reads: 0,
        }
    }

    /// Number of readings taken so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl AttitudeSource for ScriptedAttitude {
    fn attitude(&mut self) -> Quat {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.reads += 1;
        self.last
    }
}
