//! Refresh gate counter state as kept in the counter store.
//!
//! Encoded as `"{window_start},{remaining}"` with `window_start` in unix
//! seconds.

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateState {
    /// Unix seconds of the most recent window reset
    pub window_start: i64,
    /// Credits left in the window
    pub remaining: i64,
}

impl GateState {
    pub fn new(window_start: i64, remaining: i64) -> Self {
        Self {
            window_start,
            remaining,
        }
    }

    /// Whether `now` still falls inside the window that started at `window_start`
    ///
    /// A `window_start` too far from `now` to subtract is reported as corrupt
    /// state.
    pub fn is_within_window(&self, now: i64, window_seconds: i64) -> Result<bool, DomainError> {
        let elapsed = now
            .checked_sub(self.window_start)
            .ok_or_else(|| DomainError::Internal {
                message: format!("corrupt refresh gate window start: {}", self.window_start),
            })?;
        Ok(elapsed < window_seconds)
    }

    /// The same window with one credit fewer
    pub fn consume(self) -> Self {
        Self {
            remaining: self.remaining - 1,
            ..self
        }
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.window_start, self.remaining)
    }
}

impl std::str::FromStr for GateState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let corrupt = || DomainError::Internal {
            message: format!("corrupt refresh gate value: {:?}", s),
        };

        let (window_start, remaining) = s.trim().split_once(',').ok_or_else(corrupt)?;
        let window_start = window_start.trim().parse::<i64>().map_err(|_| corrupt())?;
        let remaining = remaining.trim().parse::<i64>().map_err(|_| corrupt())?;

        Ok(Self {
            window_start,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_value() {
        let state: GateState = "1700000000,2".parse().unwrap();
        assert_eq!(state, GateState::new(1_700_000_000, 2));
        assert_eq!(state.to_string(), "1700000000,2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "1700000000", "abc,2", "1700000000,x", "1,2,3"] {
            let err = raw.parse::<GateState>().unwrap_err();
            assert!(matches!(err, DomainError::Internal { .. }), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_window_boundary() {
        let state = GateState::new(1000, 2);
        assert!(state.is_within_window(1000 + 3599, 3600).unwrap());
        assert!(!state.is_within_window(1000 + 3600, 3600).unwrap());
    }

    #[test]
    fn test_unrepresentable_elapsed_time_is_corrupt() {
        let state: GateState = "-9223372036854775808,2".parse().unwrap();
        let err = state.is_within_window(1_700_000_000, 3600).unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));

        let state = GateState::new(i64::MAX, 2);
        assert!(state.is_within_window(-10, 3600).is_err());
    }

    #[test]
    fn test_consume_keeps_window_start() {
        let state = GateState::new(1000, 2).consume();
        assert_eq!(state, GateState::new(1000, 1));
    }
}
