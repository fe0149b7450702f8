//! Budget evaluation and management
//!
//! `evaluate_budgets` derives per-category spending status from already
//! loaded collections and never touches storage, so it can run over any
//! slice of data. `BudgetService` is the storage-backed layer that
//! validates and persists the budgets themselves.

use chrono::{Datelike, NaiveDate};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    BudgetStatus, Category, CategoryBudget, Money, Transaction, TransactionKind, UserId,
};
use crate::storage::Storage;

/// Compute budget statuses for the month containing `reference`
///
/// Only budgets of `owner` for that calendar month are evaluated. Spend is
/// the sum of the owner's expense transactions in the budget's category,
/// dated in the same month. Statuses come back in budget list order.
pub fn evaluate_budgets(
    owner: UserId,
    transactions: &[Transaction],
    budgets: &[CategoryBudget],
    reference: NaiveDate,
) -> Vec<BudgetStatus> {
    let (month, year) = (reference.month(), reference.year());

    budgets
        .iter()
        .filter(|b| b.owner == owner && b.month == month && b.year == year)
        .map(|budget| {
            let spent = spent_in_month(transactions, owner, budget.category, month, year);
            BudgetStatus::from_budget(budget, spent)
        })
        .collect()
}

/// Sum the owner's expense spend for one category in one calendar month
fn spent_in_month(
    transactions: &[Transaction],
    owner: UserId,
    category: Category,
    month: u32,
    year: i32,
) -> Money {
    transactions
        .iter()
        .filter(|t| {
            t.owner == owner
                && t.kind == TransactionKind::Expense
                && t.category == category
                && t.date.month() == month
                && t.date.year() == year
        })
        .map(|t| t.amount)
        .sum()
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the limit for a category in a month, replacing any existing budget
    pub fn set_budget(
        &self,
        owner: UserId,
        category: Category,
        limit: Money,
        month: u32,
        year: i32,
    ) -> TrackerResult<CategoryBudget> {
        let mut budget = CategoryBudget::new(owner, category, limit, month, year);

        // Replacing an existing budget keeps its creation time
        if let Some(existing) = self.storage.budgets.get(owner, category, month, year)? {
            budget.created_at = existing.created_at;
        }

        budget
            .validate()
            .map_err(|e| TrackerError::Budget(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Remove a budget; returns false when none existed
    pub fn remove_budget(
        &self,
        owner: UserId,
        category: Category,
        month: u32,
        year: i32,
    ) -> TrackerResult<bool> {
        let removed = self.storage.budgets.delete(owner, category, month, year)?;
        if removed {
            self.storage.budgets.save()?;
        }
        Ok(removed)
    }

    /// Budgets the owner has set for a month
    pub fn budgets_for_month(
        &self,
        owner: UserId,
        month: u32,
        year: i32,
    ) -> TrackerResult<Vec<CategoryBudget>> {
        self.storage.budgets.get_for_month(owner, month, year)
    }

    /// Evaluate the owner's budgets for the month containing `reference`
    pub fn evaluate(&self, owner: UserId, reference: NaiveDate) -> TrackerResult<Vec<BudgetStatus>> {
        let transactions = self.storage.transactions.get_by_owner(owner)?;
        let budgets =
            self.storage
                .budgets
                .get_for_month(owner, reference.month(), reference.year())?;
        Ok(evaluate_budgets(owner, &transactions, &budgets, reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerPaths;
    use tempfile::TempDir;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_test_storage() -> (Storage, TempDir) {
        let temp = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (storage, temp)
    }

    fn march_transactions(owner: UserId) -> Vec<Transaction> {
        vec![
            Transaction::income(owner, "Salary", Money::from_cents(200_000), date(2024, 3, 1)),
            Transaction::expense(
                owner,
                "Groceries",
                Money::from_cents(50_000),
                date(2024, 3, 5),
                Category::Food,
            ),
            Transaction::expense(
                owner,
                "Restaurant",
                Money::from_cents(30_000),
                date(2024, 3, 10),
                Category::Food,
            ),
        ]
    }

    #[test]
    fn test_evaluate_near_budget() {
        let owner = UserId::new();
        let txns = march_transactions(owner);
        let budgets = vec![CategoryBudget::new(
            owner,
            Category::Food,
            Money::from_cents(100_000),
            3,
            2024,
        )];

        let statuses = evaluate_budgets(owner, &txns, &budgets, date(2024, 3, 15));
        assert_eq!(statuses.len(), 1);

        let food = &statuses[0];
        assert_eq!(food.spent.cents(), 80_000);
        assert_eq!(food.remaining.cents(), 20_000);
        assert_eq!(food.percentage_used, 80.0);
        assert!(food.is_near_budget);
        assert!(!food.is_over_budget);
    }

    #[test]
    fn test_evaluate_over_budget() {
        let owner = UserId::new();
        let mut txns = march_transactions(owner);
        txns.push(Transaction::expense(
            owner,
            "Catering",
            Money::from_cents(30_000),
            date(2024, 3, 20),
            Category::Food,
        ));
        let budgets = vec![CategoryBudget::new(
            owner,
            Category::Food,
            Money::from_cents(100_000),
            3,
            2024,
        )];

        let statuses = evaluate_budgets(owner, &txns, &budgets, date(2024, 3, 15));
        let food = &statuses[0];
        assert_eq!(food.spent.cents(), 110_000);
        assert!(food.is_over_budget);
        assert!(!food.is_near_budget);
        assert_eq!(food.remaining, Money::zero());
    }

    #[test]
    fn test_evaluate_scopes_to_reference_month() {
        let owner = UserId::new();
        let mut txns = march_transactions(owner);
        // February spending must not count toward March budgets
        txns.push(Transaction::expense(
            owner,
            "Feb groceries",
            Money::from_cents(90_000),
            date(2024, 2, 15),
            Category::Food,
        ));
        let budgets = vec![
            CategoryBudget::new(owner, Category::Food, Money::from_cents(100_000), 3, 2024),
            CategoryBudget::new(owner, Category::Food, Money::from_cents(50_000), 2, 2024),
            CategoryBudget::new(owner, Category::Food, Money::from_cents(70_000), 3, 2023),
        ];

        let statuses = evaluate_budgets(owner, &txns, &budgets, date(2024, 3, 15));
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent.cents(), 80_000);
    }

    #[test]
    fn test_evaluate_scopes_to_owner() {
        let owner = UserId::new();
        let other = UserId::new();
        let mut txns = march_transactions(owner);
        txns.push(Transaction::expense(
            other,
            "Not ours",
            Money::from_cents(40_000),
            date(2024, 3, 12),
            Category::Food,
        ));
        let budgets = vec![
            CategoryBudget::new(owner, Category::Food, Money::from_cents(100_000), 3, 2024),
            CategoryBudget::new(other, Category::Food, Money::from_cents(10_000), 3, 2024),
        ];

        let statuses = evaluate_budgets(owner, &txns, &budgets, date(2024, 3, 15));
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent.cents(), 80_000);
    }

    #[test]
    fn test_evaluate_ignores_income() {
        let owner = UserId::new();
        // An income entry in the budgeted category must not count as spend
        let txns = vec![Transaction::new(
            owner,
            "Refund",
            Money::from_cents(5000),
            date(2024, 3, 8),
            TransactionKind::Income,
            Category::Food,
        )];
        let budgets = vec![CategoryBudget::new(
            owner,
            Category::Food,
            Money::from_cents(10_000),
            3,
            2024,
        )];

        let statuses = evaluate_budgets(owner, &txns, &budgets, date(2024, 3, 15));
        assert_eq!(statuses[0].spent, Money::zero());
    }

    #[test]
    fn test_evaluate_with_no_budgets() {
        let owner = UserId::new();
        let txns = march_transactions(owner);
        let statuses = evaluate_budgets(owner, &txns, &[], date(2024, 3, 15));
        assert!(statuses.is_empty());
    }

    #[test]
    fn test_set_budget_persists() {
        let (storage, _temp) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        service
            .set_budget(owner, Category::Food, Money::from_cents(100_000), 3, 2024)
            .unwrap();

        let budgets = service.budgets_for_month(owner, 3, 2024).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].limit.cents(), 100_000);
    }

    #[test]
    fn test_set_budget_rejects_nonpositive_limit() {
        let (storage, _temp) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        let err = service
            .set_budget(owner, Category::Food, Money::zero(), 3, 2024)
            .unwrap_err();
        assert!(matches!(err, TrackerError::Budget(_)));

        assert!(service.budgets_for_month(owner, 3, 2024).unwrap().is_empty());
    }

    #[test]
    fn test_set_budget_replaces_existing() {
        let (storage, _temp) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        let first = service
            .set_budget(owner, Category::Food, Money::from_cents(100_000), 3, 2024)
            .unwrap();
        let second = service
            .set_budget(owner, Category::Food, Money::from_cents(150_000), 3, 2024)
            .unwrap();

        let budgets = service.budgets_for_month(owner, 3, 2024).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].limit.cents(), 150_000);
        assert_eq!(second.created_at, first.created_at);
    }

    #[test]
    fn test_remove_budget() {
        let (storage, _temp) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        service
            .set_budget(owner, Category::Travel, Money::from_cents(20_000), 3, 2024)
            .unwrap();

        assert!(service.remove_budget(owner, Category::Travel, 3, 2024).unwrap());
        assert!(!service.remove_budget(owner, Category::Travel, 3, 2024).unwrap());
        assert!(service.budgets_for_month(owner, 3, 2024).unwrap().is_empty());
    }

    #[test]
    fn test_evaluate_from_storage() {
        let (storage, _temp) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        for txn in march_transactions(owner) {
            storage.transactions.upsert(txn).unwrap();
        }
        service
            .set_budget(owner, Category::Food, Money::from_cents(100_000), 3, 2024)
            .unwrap();

        let statuses = service.evaluate(owner, date(2024, 3, 15)).unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent.cents(), 80_000);
        assert!(statuses[0].is_near_budget);
    }
}
