use std::sync::{Mutex, PoisonError};

use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::CartStore;
use crate::domain::errors::DomainError;
use crate::domain::order::{CheckoutReceipt, OrderLine};
use crate::domain::ports::OrderRepository;
use crate::domain::readiness::Readiness;

/// Where the workflow stands. `Committed` and `Failed` describe the last
/// attempt and both accept a new checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    InProgress,
    Committed,
    Failed,
}

impl CheckoutState {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::InProgress => "in_progress",
            CheckoutState::Committed => "committed",
            CheckoutState::Failed => "failed",
        }
    }
}

/// Moves the cart into persisted order lines.
///
/// Lines are written one at a time in cart order. The first failed write
/// stops the checkout and leaves the cart as it was; lines already written
/// stay written. Only a fully written snapshot clears the cart.
pub struct CheckoutWorkflow<R> {
    repo: R,
    readiness: Readiness,
    state: Mutex<CheckoutState>,
}

impl<R: OrderRepository> CheckoutWorkflow<R> {
    pub fn new(repo: R, readiness: Readiness) -> Self {
        Self {
            repo,
            readiness,
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    pub fn state(&self) -> CheckoutState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn checkout(&self, cart: &Mutex<CartStore>) -> Result<CheckoutReceipt, DomainError> {
        if !self.readiness.is_ready() {
            log::warn!("checkout rejected: local store not ready");
            return Err(DomainError::NotReady);
        }

        let guard = InProgressGuard::enter(&self.state)?;

        let snapshot: Vec<OrderLine> = {
            let cart = cart.lock().unwrap_or_else(PoisonError::into_inner);
            cart.lines().iter().map(OrderLine::from).collect()
        };
        if snapshot.is_empty() {
            return Err(DomainError::InvalidInput("cart is empty".to_string()));
        }

        let checkout_id = Uuid::new_v4();
        log::info!("checkout {} started with {} line(s)", checkout_id, snapshot.len());

        for line in &snapshot {
            if let Err(e) = self.repo.insert_order_line(line) {
                log::error!("checkout {} failed on line {}: {}", checkout_id, line.id, e);
                return Err(e);
            }
        }

        cart.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear_cart();
        guard.commit();

        let total = snapshot
            .iter()
            .fold(BigDecimal::zero(), |total, l| total + l.subtotal());
        log::info!("checkout {} committed, total {}", checkout_id, total);

        Ok(CheckoutReceipt {
            id: checkout_id,
            placed_at: Utc::now(),
            lines: snapshot,
            total,
        })
    }
}

/// Holds the workflow in `InProgress`. Dropping it records `Failed` unless
/// [`InProgressGuard::commit`] ran first.
struct InProgressGuard<'a> {
    state: &'a Mutex<CheckoutState>,
    outcome: CheckoutState,
}

impl<'a> InProgressGuard<'a> {
    fn enter(state: &'a Mutex<CheckoutState>) -> Result<Self, DomainError> {
        let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == CheckoutState::InProgress {
            log::warn!("checkout rejected: another checkout is in progress");
            return Err(DomainError::InvalidState(
                "a checkout is already in progress".to_string(),
            ));
        }
        *current = CheckoutState::InProgress;
        Ok(Self {
            state,
            outcome: CheckoutState::Failed,
        })
    }

    fn commit(mut self) {
        self.outcome = CheckoutState::Committed;
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = self.outcome;
    }
}
