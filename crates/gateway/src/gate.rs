use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use common::models::{Signal, TradeSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Stale,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject(RejectReason),
}

/// Stateful admission gate for inbound signals.
///
/// Holds the per-asset last-admitted state behind one mutex; the
/// check-then-update in `evaluate` runs under a single lock acquisition so
/// two concurrent same-asset signals cannot both pass the cooldown check.
/// The state is in-memory only; a restart resets cooldown windows.
pub struct SignalGate {
    max_signal_age: Duration,
    cooldown_period: Duration,
    state: Mutex<HashMap<String, (DateTime<Utc>, TradeSide)>>,
}

impl SignalGate {
    pub fn new(max_signal_age: Duration, cooldown_period: Duration) -> Self {
        Self {
            max_signal_age,
            cooldown_period,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Staleness is judged against the producer-declared timestamp, never a
    /// corrected clock. Rejections leave the gate state untouched.
    pub fn evaluate(&self, signal: &Signal, now: DateTime<Utc>) -> Decision {
        let age = now - signal.timestamp;
        if age > self.max_signal_age {
            return Decision::Reject(RejectReason::Stale);
        }

        let mut state = self.state.lock().expect("signal gate lock poisoned");
        if let Some((last_time, last_side)) = state.get(&signal.asset) {
            // Cooldown is type-specific: an opposite-side signal may reverse
            // a position immediately.
            if *last_side == signal.side && now - *last_time < self.cooldown_period {
                return Decision::Reject(RejectReason::Cooldown);
            }
        }
        state.insert(signal.asset.clone(), (now, signal.side));
        Decision::Admit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn signal(asset: &str, side: TradeSide, at: DateTime<Utc>) -> Signal {
        Signal {
            asset: asset.to_string(),
            side,
            timestamp: at,
        }
    }

    fn gate() -> SignalGate {
        SignalGate::new(Duration::seconds(60), Duration::seconds(300))
    }

    #[test]
    fn stale_signal_is_rejected_without_state_change() {
        let gate = gate();
        let now = Utc::now();

        let old = signal("BTC", TradeSide::Buy, now - Duration::seconds(120));
        assert_eq!(gate.evaluate(&old, now), Decision::Reject(RejectReason::Stale));

        // The stale rejection must not have armed the cooldown.
        let fresh = signal("BTC", TradeSide::Buy, now);
        assert_eq!(gate.evaluate(&fresh, now), Decision::Admit);
    }

    #[test]
    fn future_dated_signal_is_fresh() {
        let gate = gate();
        let now = Utc::now();
        let ahead = signal("BTC", TradeSide::Buy, now + Duration::seconds(30));
        assert_eq!(gate.evaluate(&ahead, now), Decision::Admit);
    }

    #[test]
    fn same_side_within_cooldown_is_rejected() {
        let gate = gate();
        let t0 = Utc::now();

        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, t0), t0), Decision::Admit);

        let later = t0 + Duration::seconds(60);
        assert_eq!(
            gate.evaluate(&signal("BTC", TradeSide::Buy, later), later),
            Decision::Reject(RejectReason::Cooldown)
        );
    }

    #[test]
    fn opposite_side_is_never_cooldown_blocked() {
        let gate = gate();
        let t0 = Utc::now();

        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, t0), t0), Decision::Admit);

        let later = t0 + Duration::seconds(60);
        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Sell, later), later), Decision::Admit);
    }

    #[test]
    fn cooldown_expires() {
        let gate = gate();
        let t0 = Utc::now();

        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, t0), t0), Decision::Admit);

        let later = t0 + Duration::seconds(301);
        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, later), later), Decision::Admit);
    }

    #[test]
    fn cooldown_is_per_asset() {
        let gate = gate();
        let t0 = Utc::now();

        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, t0), t0), Decision::Admit);
        assert_eq!(gate.evaluate(&signal("ETH", TradeSide::Buy, t0), t0), Decision::Admit);
    }

    #[test]
    fn rejected_cooldown_does_not_extend_the_window() {
        let gate = gate();
        let t0 = Utc::now();

        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, t0), t0), Decision::Admit);

        let mid = t0 + Duration::seconds(200);
        assert_eq!(
            gate.evaluate(&signal("BTC", TradeSide::Buy, mid), mid),
            Decision::Reject(RejectReason::Cooldown)
        );

        // Window is anchored at t0, not at the rejected attempt.
        let after = t0 + Duration::seconds(301);
        assert_eq!(gate.evaluate(&signal("BTC", TradeSide::Buy, after), after), Decision::Admit);
    }

    #[test]
    fn concurrent_same_asset_signals_admit_exactly_one() {
        let gate = Arc::new(gate());
        let now = Utc::now();
        let admitted = Arc::new(AtomicUsize::new(0));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let gate = gate.clone();
                let admitted = admitted.clone();
                scope.spawn(move || {
                    let s = signal("BTC", TradeSide::Buy, now);
                    if gate.evaluate(&s, now) == Decision::Admit {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(admitted.load(Ordering::SeqCst), 1);
    }
}
