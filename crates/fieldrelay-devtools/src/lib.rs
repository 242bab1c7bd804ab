use std::collections::VecDeque;
use std::fmt;

use web_time::Instant;

use fieldrelay_core::{DisplayId, ImeAction, NodeId, SessionId};

pub const DEFAULT_TRACE_CAPACITY: usize = 128;

/// What the router decided for one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Shown {
        session: SessionId,
        display: DisplayId,
        target: NodeId,
        action: ImeAction,
    },
    Hidden {
        session: Option<SessionId>,
        cause: &'static str,
    },
    Ignored(&'static str),
    PlacementFailed { display: DisplayId },
    SyncDropped { target: NodeId },
    SubmitReplayed { action: ImeAction, ok: bool },
    AutoClosed { session: SessionId },
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Shown {
                session,
                display,
                target,
                action,
            } => write!(f, "shown {session} on display {display} for {target} ({action})"),
            Decision::Hidden {
                session: Some(s),
                cause,
            } => write!(f, "hidden {s}: {cause}"),
            Decision::Hidden {
                session: None,
                cause,
            } => write!(f, "hidden: {cause}"),
            Decision::Ignored(why) => write!(f, "ignored: {why}"),
            Decision::PlacementFailed { display } => {
                write!(f, "placement failed on display {display}")
            }
            Decision::SyncDropped { target } => write!(f, "sync to {target} dropped"),
            Decision::SubmitReplayed { action, ok } => write!(f, "submit {action} ok={ok}"),
            Decision::AutoClosed { session } => write!(f, "auto-closed {session}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TraceEntry {
    pub at: Instant,
    pub decision: Decision,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub events: u64,
    pub shown: u64,
    pub hidden: u64,
    pub ignored: u64,
    pub placement_failures: u64,
    pub sync_drops: u64,
    pub submits: u64,
    pub auto_closes: u64,
}

impl Metrics {
    fn count(&mut self, decision: &Decision) {
        let slot = match decision {
            Decision::Shown { .. } => &mut self.shown,
            Decision::Hidden { .. } => &mut self.hidden,
            Decision::Ignored(_) => &mut self.ignored,
            Decision::PlacementFailed { .. } => &mut self.placement_failures,
            Decision::SyncDropped { .. } => &mut self.sync_drops,
            Decision::SubmitReplayed { .. } => &mut self.submits,
            Decision::AutoClosed { .. } => &mut self.auto_closes,
        };
        *slot += 1;
    }
}

/// Bounded trace of router decisions plus running counters.
///
/// Counters are always kept; the trace is only appended to while
/// `enabled` is set. The oldest entry is dropped once `capacity` is hit.
pub struct Inspector {
    pub enabled: bool,
    capacity: usize,
    trace: VecDeque<TraceEntry>,
    metrics: Metrics,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CAPACITY)
    }
}

impl Inspector {
    pub fn new(capacity: usize) -> Self {
        Self {
            enabled: true,
            capacity,
            trace: VecDeque::with_capacity(capacity.min(DEFAULT_TRACE_CAPACITY)),
            metrics: Metrics::default(),
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn note_event(&mut self) {
        self.metrics.events += 1;
    }

    pub fn record(&mut self, at: Instant, decision: Decision) {
        self.metrics.count(&decision);
        if !self.enabled || self.capacity == 0 {
            return;
        }
        log::trace!("decision: {decision}");
        if self.trace.len() == self.capacity {
            self.trace.pop_front();
        }
        self.trace.push_back(TraceEntry { at, decision });
    }

    pub fn trace(&self) -> impl Iterator<Item = &TraceEntry> {
        self.trace.iter()
    }

    pub fn last(&self) -> Option<&Decision> {
        self.trace.back().map(|e| &e.decision)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// One-line report for logs and debug overlays.
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        let mut parts = vec![
            format!("events: {}", m.events),
            format!("shown: {}", m.shown),
            format!("hidden: {}", m.hidden),
            format!("ignored: {}", m.ignored),
        ];
        if m.placement_failures > 0 {
            parts.push(format!("placement failures: {}", m.placement_failures));
        }
        parts.push(format!("sync drops: {}", m.sync_drops));
        parts.push(format!("submits: {}", m.submits));
        parts.push(format!("auto-closes: {}", m.auto_closes));
        if let Some(last) = self.last() {
            parts.push(format!("last: {last}"));
        }
        parts.join("  |  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(n: u64) -> Decision {
        Decision::Shown {
            session: SessionId(n),
            display: DisplayId(2),
            target: NodeId(7),
            action: ImeAction::Search,
        }
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut ins = Inspector::new(2);
        let now = Instant::now();
        ins.record(now, shown(1));
        ins.record(now, Decision::Ignored("not primary"));
        ins.record(now, shown(2));

        let kept: Vec<_> = ins.trace().map(|e| e.decision.clone()).collect();
        assert_eq!(kept, vec![Decision::Ignored("not primary"), shown(2)]);
        assert_eq!(ins.metrics().shown, 2);
    }

    #[test]
    fn test_disabled_still_counts() {
        let mut ins = Inspector::default();
        ins.toggle();
        ins.record(Instant::now(), Decision::SyncDropped { target: NodeId(3) });
        assert_eq!(ins.trace().count(), 0);
        assert_eq!(ins.metrics().sync_drops, 1);
    }

    #[test]
    fn test_summary() {
        let mut ins = Inspector::default();
        let now = Instant::now();
        for _ in 0..4 {
            ins.note_event();
        }
        ins.record(now, shown(1));
        ins.record(
            now,
            Decision::SubmitReplayed {
                action: ImeAction::Search,
                ok: true,
            },
        );
        ins.record(now, Decision::AutoClosed { session: SessionId(1) });
        insta::assert_snapshot!(ins.summary(), @"events: 4  |  shown: 1  |  hidden: 0  |  ignored: 0  |  sync drops: 0  |  submits: 1  |  auto-closes: 1  |  last: auto-closed session-1");
    }
}
