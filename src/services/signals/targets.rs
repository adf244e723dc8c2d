//! Entry, stop and take-profit levels.

use crate::types::{Action, Targets};

/// Stop distance as a fraction of the entry price.
pub const STOP_DISTANCE: f64 = 0.02;
/// Take-profit distance as a fraction of the entry price.
pub const TAKE_PROFIT_DISTANCE: f64 = 0.03;

/// Fixed-percentage levels around the last close. HOLD has no levels.
pub fn targets_for(action: Action, price: f64) -> Targets {
    let (stop, take_profit) = match action {
        Action::Buy => (
            price * (1.0 - STOP_DISTANCE),
            price * (1.0 + TAKE_PROFIT_DISTANCE),
        ),
        Action::Sell => (
            price * (1.0 + STOP_DISTANCE),
            price * (1.0 - TAKE_PROFIT_DISTANCE),
        ),
        Action::Hold => return Targets::default(),
    };

    Targets {
        entry: Some(price),
        stop: Some(stop),
        take_profit: Some(take_profit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_buy_levels() {
        let t = targets_for(Action::Buy, 100.0);
        assert_eq!(t.entry, Some(100.0));
        assert!(close(t.stop, 98.0));
        assert!(close(t.take_profit, 103.0));
    }

    #[test]
    fn test_sell_levels() {
        let t = targets_for(Action::Sell, 100.0);
        assert_eq!(t.entry, Some(100.0));
        assert!(close(t.stop, 102.0));
        assert!(close(t.take_profit, 97.0));
    }

    #[test]
    fn test_hold_has_no_levels() {
        let t = targets_for(Action::Hold, 100.0);
        assert!(t.is_empty());
        assert_eq!(serde_json::to_string(&t).unwrap(), "{}");
    }

    #[test]
    fn test_tp_field_name() {
        let json = serde_json::to_value(targets_for(Action::Buy, 50.0)).unwrap();
        assert!(json.get("tp").is_some());
        assert!(json.get("take_profit").is_none());
    }
}
