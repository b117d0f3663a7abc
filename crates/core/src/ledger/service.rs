//! Booking engine: validated creation of double-entry postings.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::{
    AccountSide, BookingWithAccounts, CreateBookingInput, LedgerAccount, NewBooking,
    ValidatedBooking,
};
use kasboek_shared::types::{CompanyId, LedgerAccountId};

/// Booking engine.
///
/// Resolves both accounts against the booking's company before anything is
/// written. The two lookups are independent so the error says which side
/// failed.
pub struct BookingService<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> Clone for BookingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> BookingService<S> {
    /// Creates a new booking service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and persist a booking.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` naming the debit or credit side,
    /// `LedgerError::NonPositiveAmount`, or a store error.
    pub async fn create_booking(
        &self,
        input: CreateBookingInput,
    ) -> Result<BookingWithAccounts, LedgerError> {
        let validated = self.prepare(input).await?;
        let booking = self.store.insert_booking(validated.booking()).await?;
        debug!(
            booking_id = %booking.id,
            company_id = %booking.company_id,
            amount = %booking.amount,
            "Booking created"
        );
        Ok(validated.into_result(booking))
    }

    /// Validate a booking without persisting it.
    ///
    /// Processors use this to hand the result to a store operation that
    /// writes the booking together with its source entity.
    ///
    /// Debit and credit may be the same account; that is not rejected.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_booking`], minus store write failures.
    pub async fn prepare(&self, input: CreateBookingInput) -> Result<ValidatedBooking, LedgerError> {
        let (debit_account, credit_account) = self
            .resolve_accounts(
                input.company_id,
                input.debit_account_id,
                input.credit_account_id,
            )
            .await?;

        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(input.amount));
        }

        Ok(ValidatedBooking {
            booking: NewBooking {
                company_id: input.company_id,
                date: input.date,
                description: input.description,
                debit_account_id: debit_account.id,
                credit_account_id: credit_account.id,
                amount: input.amount,
                vat_code: input.vat_code,
                created_by: input.created_by,
            },
            debit_account,
            credit_account,
        })
    }

    /// Resolves a debit/credit pair owned by the company.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` for the first side that fails.
    pub async fn resolve_accounts(
        &self,
        company_id: CompanyId,
        debit_account_id: LedgerAccountId,
        credit_account_id: LedgerAccountId,
    ) -> Result<(LedgerAccount, LedgerAccount), LedgerError> {
        let debit = self
            .resolve_account(company_id, debit_account_id, AccountSide::Debit)
            .await?;
        let credit = self
            .resolve_account(company_id, credit_account_id, AccountSide::Credit)
            .await?;
        Ok((debit, credit))
    }

    async fn resolve_account(
        &self,
        company_id: CompanyId,
        account_id: LedgerAccountId,
        side: AccountSide,
    ) -> Result<LedgerAccount, LedgerError> {
        self.store
            .find_account(company_id, account_id)
            .await?
            // Store lookups are company-scoped; double-check ownership anyway.
            .filter(|account| account.company_id == company_id)
            .ok_or(LedgerError::AccountNotFound { side, account_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{AccountType, DateRange, NewLedgerAccount};
    use crate::testing::{MemoryStore, date};
    use kasboek_shared::types::UserId;
    use rust_decimal_macros::dec;

    async fn account(store: &MemoryStore, company_id: CompanyId, code: &str) -> LedgerAccount {
        store
            .create_account(NewLedgerAccount {
                company_id,
                code: code.to_string(),
                name: format!("Account {code}"),
                account_type: AccountType::Balance,
            })
            .await
            .unwrap()
    }

    fn input(
        company_id: CompanyId,
        debit: LedgerAccountId,
        credit: LedgerAccountId,
        amount: Decimal,
    ) -> CreateBookingInput {
        CreateBookingInput {
            company_id,
            date: date(2024, 3, 1),
            description: "Kantoorartikelen".to_string(),
            debit_account_id: debit,
            credit_account_id: credit,
            amount,
            vat_code: Some("21".to_string()),
            created_by: UserId::new(),
        }
    }

    #[tokio::test]
    async fn test_create_booking_returns_resolved_accounts() {
        let store = Arc::new(MemoryStore::default());
        let company = CompanyId::new();
        let costs = account(&store, company, "4000").await;
        let bank = account(&store, company, "1000").await;
        let service = BookingService::new(Arc::clone(&store));

        let result = service
            .create_booking(input(company, costs.id, bank.id, dec!(12.50)))
            .await
            .unwrap();

        assert_eq!(result.booking.amount, dec!(12.50));
        assert_eq!(result.booking.debit_account_id, costs.id);
        assert_eq!(result.booking.credit_account_id, bank.id);
        assert_eq!(result.booking.vat_code.as_deref(), Some("21"));
        assert_eq!(result.debit_account, costs);
        assert_eq!(result.credit_account, bank);

        let stored = store
            .list_bookings(company, DateRange::until(date(2024, 12, 31)))
            .await
            .unwrap();
        assert_eq!(stored, vec![result.booking]);
    }

    #[tokio::test]
    async fn test_missing_debit_account_is_reported_first() {
        let store = Arc::new(MemoryStore::default());
        let company = CompanyId::new();
        let service = BookingService::new(Arc::clone(&store));

        let missing_debit = LedgerAccountId::new();
        let missing_credit = LedgerAccountId::new();
        let err = service
            .create_booking(input(company, missing_debit, missing_credit, dec!(1)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::AccountNotFound { side: AccountSide::Debit, account_id } if account_id == missing_debit
        ));
        assert_eq!(store.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credit_account() {
        let store = Arc::new(MemoryStore::default());
        let company = CompanyId::new();
        let costs = account(&store, company, "4000").await;
        let service = BookingService::new(Arc::clone(&store));

        let err = service
            .create_booking(input(company, costs.id, LedgerAccountId::new(), dec!(1)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::AccountNotFound {
                side: AccountSide::Credit,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_account_of_other_company_is_not_found() {
        let store = Arc::new(MemoryStore::default());
        let company = CompanyId::new();
        let other = CompanyId::new();
        let costs = account(&store, company, "4000").await;
        let foreign_bank = account(&store, other, "1000").await;
        let service = BookingService::new(Arc::clone(&store));

        let err = service
            .create_booking(input(company, costs.id, foreign_bank.id, dec!(10)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::AccountNotFound {
                side: AccountSide::Credit,
                ..
            }
        ));
        assert_eq!(store.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected_after_lookups() {
        let store = Arc::new(MemoryStore::default());
        let company = CompanyId::new();
        let costs = account(&store, company, "4000").await;
        let bank = account(&store, company, "1000").await;
        let service = BookingService::new(Arc::clone(&store));

        let zero = service
            .create_booking(input(company, costs.id, bank.id, Decimal::ZERO))
            .await;
        let negative = service
            .create_booking(input(company, costs.id, bank.id, dec!(-5)))
            .await;

        assert!(matches!(zero, Err(LedgerError::NonPositiveAmount(_))));
        assert!(matches!(negative, Err(LedgerError::NonPositiveAmount(_))));

        // Unknown account wins over a bad amount.
        let missing = service
            .create_booking(input(company, LedgerAccountId::new(), bank.id, Decimal::ZERO))
            .await;
        assert!(matches!(missing, Err(LedgerError::AccountNotFound { .. })));
    }

    /// Debit and credit on the same account is currently accepted.
    /// Kept as documented behaviour until product decides otherwise.
    #[tokio::test]
    async fn test_same_debit_and_credit_account_is_accepted() {
        let store = Arc::new(MemoryStore::default());
        let company = CompanyId::new();
        let bank = account(&store, company, "1000").await;
        let service = BookingService::new(Arc::clone(&store));

        let result = service
            .create_booking(input(company, bank.id, bank.id, dec!(3)))
            .await
            .unwrap();

        assert_eq!(
            result.booking.debit_account_id,
            result.booking.credit_account_id
        );
        assert_eq!(result.booking.company_id, company);
    }
}
