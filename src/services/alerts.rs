//! Budget alert tracking
//!
//! Turns successive budget evaluations into at-most-once alert events. The
//! tracker remembers which categories have already been announced so a user
//! is not re-notified on every evaluation, and re-arms a category once its
//! spending drops back below the warning threshold.

use std::collections::HashSet;

use crate::config::Settings;
use crate::models::{BudgetStatus, Category};

/// How urgently an alert should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Warning,
    Error,
}

/// A single alert event for display by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub severity: AlertSeverity,

    /// The category the alert concerns
    pub category: Category,

    pub title: String,

    pub message: String,

    /// False for over-budget alerts, which should stay visible until
    /// dismissed by the user
    pub auto_dismiss: bool,
}

/// Stateful diffing of budget evaluations into alerts
///
/// One tracker should watch one stream of evaluations (one owner and month);
/// use [`AlertTracker::reset`] when switching context.
pub struct AlertTracker {
    currency_symbol: String,
    notified_over: HashSet<Category>,
    notified_near: HashSet<Category>,
}

impl AlertTracker {
    /// Create a tracker using the default "$" currency symbol
    pub fn new() -> Self {
        Self::with_currency("$")
    }

    /// Create a tracker rendering amounts with the given currency symbol
    pub fn with_currency(symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: symbol.into(),
            notified_over: HashSet::new(),
            notified_near: HashSet::new(),
        }
    }

    /// Create a tracker using the currency symbol from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_currency(settings.currency_symbol.clone())
    }

    /// Diff an evaluation against what has already been announced
    ///
    /// Over-budget categories produce one sticky error alert until they
    /// recover; near-budget categories produce one auto-dismissing warning.
    /// A category back under the warning threshold, or no longer present in
    /// the evaluation at all, is re-armed for future alerts.
    pub fn process(&mut self, statuses: &[BudgetStatus]) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for status in statuses {
            if status.is_over_budget {
                if self.notified_over.insert(status.category) {
                    alerts.push(Alert {
                        severity: AlertSeverity::Error,
                        category: status.category,
                        title: format!("Over Budget: {}", status.category),
                        message: format!(
                            "You've exceeded your {} budget by {}",
                            status.category,
                            status.overspend().format_with_symbol(&self.currency_symbol)
                        ),
                        auto_dismiss: false,
                    });
                }
            } else if status.is_near_budget {
                if self.notified_near.insert(status.category) {
                    alerts.push(Alert {
                        severity: AlertSeverity::Warning,
                        category: status.category,
                        title: format!("Near Budget Limit: {}", status.category),
                        message: format!(
                            "You've used {:.0}% of your {} budget",
                            status.percentage_used, status.category
                        ),
                        auto_dismiss: true,
                    });
                }
            } else {
                self.notified_over.remove(&status.category);
                self.notified_near.remove(&status.category);
            }
        }

        // A category with no status anymore (budget removed) is re-armed too
        let present: HashSet<Category> = statuses.iter().map(|s| s.category).collect();
        self.notified_over.retain(|c| present.contains(c));
        self.notified_near.retain(|c| present.contains(c));

        alerts
    }

    /// Forget all announced categories
    pub fn reset(&mut self) {
        self.notified_over.clear();
        self.notified_near.clear();
    }
}

impl Default for AlertTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn status(category: Category, limit_cents: i64, spent_cents: i64) -> BudgetStatus {
        BudgetStatus::new(
            category,
            Money::from_cents(limit_cents),
            Money::from_cents(spent_cents),
        )
    }

    #[test]
    fn test_over_budget_alert_fires_once() {
        let mut tracker = AlertTracker::new();
        let statuses = vec![status(Category::Food, 100_000, 110_000)];

        let alerts = tracker.process(&statuses);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Error);
        assert_eq!(alerts[0].category, Category::Food);
        assert_eq!(alerts[0].title, "Over Budget: Food");
        assert_eq!(
            alerts[0].message,
            "You've exceeded your Food budget by $100.00"
        );
        assert!(!alerts[0].auto_dismiss);

        // Same evaluation again: already announced
        assert!(tracker.process(&statuses).is_empty());
    }

    #[test]
    fn test_near_budget_alert() {
        let mut tracker = AlertTracker::new();
        let statuses = vec![status(Category::Food, 100_000, 80_000)];

        let alerts = tracker.process(&statuses);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[0].title, "Near Budget Limit: Food");
        assert_eq!(alerts[0].message, "You've used 80% of your Food budget");
        assert!(alerts[0].auto_dismiss);

        assert!(tracker.process(&statuses).is_empty());
    }

    #[test]
    fn test_near_then_over_escalates() {
        let mut tracker = AlertTracker::new();

        let near = vec![status(Category::Food, 100_000, 85_000)];
        assert_eq!(tracker.process(&near).len(), 1);

        // Crossing the limit raises a separate error alert
        let over = vec![status(Category::Food, 100_000, 120_000)];
        let alerts = tracker.process(&over);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Error);

        // Dropping back into the warning band is not re-announced
        assert!(tracker.process(&near).is_empty());
    }

    #[test]
    fn test_recovery_rearms_alerts() {
        let mut tracker = AlertTracker::new();

        let over = vec![status(Category::Travel, 50_000, 60_000)];
        assert_eq!(tracker.process(&over).len(), 1);

        // Back under the warning threshold clears both flags
        let normal = vec![status(Category::Travel, 50_000, 10_000)];
        assert!(tracker.process(&normal).is_empty());

        assert_eq!(tracker.process(&over).len(), 1);
    }

    #[test]
    fn test_removed_budget_rearms_alerts() {
        let mut tracker = AlertTracker::new();

        let over = vec![status(Category::Bills, 20_000, 30_000)];
        assert_eq!(tracker.process(&over).len(), 1);

        // Budget deleted: no status for the category at all
        assert!(tracker.process(&[]).is_empty());

        assert_eq!(tracker.process(&over).len(), 1);
    }

    #[test]
    fn test_multiple_categories_tracked_independently() {
        let mut tracker = AlertTracker::new();
        let statuses = vec![
            status(Category::Food, 100_000, 110_000),
            status(Category::Travel, 50_000, 45_000),
            status(Category::Bills, 30_000, 5_000),
        ];

        let alerts = tracker.process(&statuses);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, Category::Food);
        assert_eq!(alerts[0].severity, AlertSeverity::Error);
        assert_eq!(alerts[1].category, Category::Travel);
        assert_eq!(alerts[1].severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_percentage_is_rounded_in_message() {
        let mut tracker = AlertTracker::new();
        let statuses = vec![status(Category::Health, 100_000, 99_999)];

        let alerts = tracker.process(&statuses);
        assert_eq!(alerts[0].message, "You've used 100% of your Health budget");
    }

    #[test]
    fn test_custom_currency_symbol() {
        let mut tracker = AlertTracker::with_currency("€");
        let statuses = vec![status(Category::Food, 100_000, 130_000)];

        let alerts = tracker.process(&statuses);
        assert_eq!(
            alerts[0].message,
            "You've exceeded your Food budget by €300.00"
        );
    }

    #[test]
    fn test_reset() {
        let mut tracker = AlertTracker::new();
        let over = vec![status(Category::Food, 100_000, 110_000)];

        assert_eq!(tracker.process(&over).len(), 1);
        tracker.reset();
        assert_eq!(tracker.process(&over).len(), 1);
    }
}
