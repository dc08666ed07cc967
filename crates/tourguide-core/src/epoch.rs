//! Monotonic epochs for discarding stale asynchronous results.
//!
//! Requests issued against an earlier position may complete after requests
//! issued against a later one. Each requester owns an [`EpochGate`]: every
//! request is tagged with a fresh epoch, and a result is admitted only if
//! its epoch is newer than the last one admitted.

use serde::Serialize;

/// A request tag. Strictly increasing per [`EpochGate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Epoch(u64);

impl Epoch {
    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues epochs and tracks the newest one whose result was applied.
#[derive(Debug, Clone, Default)]
pub struct EpochGate {
    issued: Epoch,
    applied: Epoch,
}

impl EpochGate {
    /// Creates a gate that has issued nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next epoch.
    pub fn issue(&mut self) -> Epoch {
        self.issued = Epoch(self.issued.0 + 1);
        self.issued
    }

    /// Admits a result tagged with `epoch`.
    ///
    /// Returns `false` (and changes nothing) if a result with the same or a
    /// newer epoch has already been admitted.
    pub fn admit(&mut self, epoch: Epoch) -> bool {
        if epoch > self.applied {
            self.applied = epoch;
            true
        } else {
            false
        }
    }

    /// The most recently issued epoch.
    #[must_use]
    pub fn latest_issued(&self) -> Epoch {
        self.issued
    }

    /// The newest epoch admitted so far.
    #[must_use]
    pub fn last_applied(&self) -> Epoch {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_strictly_increasing() {
        let mut gate = EpochGate::new();

        let first = gate.issue();
        let second = gate.issue();

        assert!(second > first);
        assert_eq!(gate.latest_issued(), second);
    }

    #[test]
    fn test_admit_rejects_result_older_than_last_applied() {
        // Arrange
        let mut gate = EpochGate::new();
        let older = gate.issue();
        let newer = gate.issue();

        // Act
        let newer_admitted = gate.admit(newer);
        let older_admitted = gate.admit(older);

        // Assert
        assert!(newer_admitted);
        assert!(!older_admitted);
        assert_eq!(gate.last_applied(), newer);
    }

    #[test]
    fn test_admit_accepts_in_order_results() {
        let mut gate = EpochGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(gate.admit(first));
        assert!(gate.admit(second));
    }

    #[test]
    fn test_admit_rejects_same_epoch_twice() {
        let mut gate = EpochGate::new();
        let epoch = gate.issue();

        assert!(gate.admit(epoch));
        assert!(!gate.admit(epoch));
    }
}
