use std::fmt;
use std::time::Duration;

use smallvec::SmallVec;
use web_time::Instant;

/// Identity of one floating-surface session. Never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

struct Scheduled<T> {
    deadline: Instant,
    seq: u64,
    session: SessionId,
    task: T,
}

/// Deadline queue for single-threaded deferred work.
///
/// Nothing fires on its own: the owner calls `take_due` from its event loop.
/// Every entry is tagged with the session it was scheduled for, so the caller
/// can drop work whose session has since ended.
pub struct TimerQueue<T> {
    entries: SmallVec<[Scheduled<T>; 2]>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, session: SessionId, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled {
            deadline: now + delay,
            seq,
            session,
            task,
        });
    }

    /// Drops every pending entry for `session`; returns how many went.
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.session != session);
        before - self.entries.len()
    }

    /// Removes and returns everything due at `now`, earliest first
    /// (scheduling order breaks ties).
    pub fn take_due(&mut self, now: Instant) -> Vec<(SessionId, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| (e.session, e.task)).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
