/// Logic-loop gate.
/// Frames arrive at whatever rate the host schedules them; a tick runs only
/// once the elapsed time since the last executed tick reaches the interval.
/// Missed ticks are not replayed: the snake never moves more than one cell
/// per frame.
#[derive(Debug, Clone, Default)]
pub struct TickTimer {
    /// Timestamp (ms) of the last executed tick, or of the first frame seen.
    last_tick: Option<f64>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Whether a tick is due at `now` for the given interval. Records `now`
    /// as the last tick time when it returns true.
    ///
    /// The first frame after construction or `reset` only arms the timer, so
    /// a new round waits one full interval before its first move.
    pub fn ready(&mut self, now: f64, interval: f64) -> bool {
        let last = *self.last_tick.get_or_insert(now);
        if now - last >= interval {
            self.last_tick = Some(now);
            true
        } else {
            false
        }
    }

    /// Forget the last tick; the next frame re-arms the timer.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }
}
