//! Moving items between the inventory and the bank or a shop.
//!
//! Every transfer moves `min(requested, held at source, room at destination)`
//! items, and purchases are further capped by what the pouch can pay for.
//! A rejected transfer changes nothing.

use std::fmt;

use crate::catalog::ItemKind;
use crate::error::{Outcome, Rejection};
use crate::storage::{Inventory, SlotStorage};

/// Which way a transfer went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Inventory to bank.
    Deposit,
    /// Bank to inventory.
    Withdraw,
    /// Inventory to shop.
    Sell,
    /// Shop to inventory.
    Buy,
}

/// A completed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Which way the items went.
    pub direction: TransferKind,
    /// What moved.
    pub kind: ItemKind,
    /// Items moved.
    pub count: usize,
    /// Gold received (sell) or paid (buy); zero otherwise.
    pub gold: u64,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.direction {
            TransferKind::Deposit => "Deposited",
            TransferKind::Withdraw => "Withdrew",
            TransferKind::Sell => "Sold",
            TransferKind::Buy => "Bought",
        };
        write!(f, "{verb} {} x {}", self.count, self.kind)?;
        if self.gold > 0 {
            write!(f, " for {}g", self.gold)?;
        }
        Ok(())
    }
}

fn price(count: usize, unit: u64) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX).saturating_mul(unit)
}

/// Move up to `amount` of `kind` from the inventory into the bank.
pub fn deposit(
    inventory: &mut Inventory,
    bank: &mut SlotStorage,
    kind: ItemKind,
    amount: usize,
) -> Outcome<Transfer> {
    if amount == 0 {
        return Err(Rejection::ZeroAmount);
    }
    if inventory.count_of(kind) == 0 {
        return Err(Rejection::NothingToTransfer(kind.title().to_string()));
    }
    if !bank.has_space_for(kind) {
        return Err(Rejection::BankFull);
    }
    let items = inventory.remove_kind(kind, amount);
    let count = items.len();
    bank.add(items);
    tracing::debug!(%kind, count, "deposit");
    Ok(Transfer {
        direction: TransferKind::Deposit,
        kind,
        count,
        gold: 0,
    })
}

/// Outcome of depositing the whole inventory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DepositAllReport {
    /// One entry per kind that went into the bank.
    pub deposited: Vec<Transfer>,
    /// Kinds left behind and why.
    pub skipped: Vec<(ItemKind, Rejection)>,
}

impl DepositAllReport {
    /// Status text for the player: the first failure, if any.
    pub fn status(&self) -> String {
        self.skipped
            .first()
            .map(|(_, reason)| reason.to_string())
            .unwrap_or_default()
    }
}

/// Deposit every kind in the inventory, one kind at a time in the order each
/// kind first appears. Room is re-checked per kind, so a kind that no longer
/// fits is skipped while later kinds are still tried.
pub fn deposit_all(inventory: &mut Inventory, bank: &mut SlotStorage) -> DepositAllReport {
    let mut report = DepositAllReport::default();
    for (kind, count) in inventory.kinds_in_order() {
        match deposit(inventory, bank, kind, count) {
            Ok(transfer) => report.deposited.push(transfer),
            Err(reason) => report.skipped.push((kind, reason)),
        }
    }
    report
}

/// Move up to `amount` of `kind` from the bank into the inventory.
pub fn withdraw(
    bank: &mut SlotStorage,
    inventory: &mut Inventory,
    kind: ItemKind,
    amount: usize,
) -> Outcome<Transfer> {
    if amount == 0 {
        return Err(Rejection::ZeroAmount);
    }
    if inventory.is_full() {
        return Err(Rejection::InventoryFull("withdraw any items"));
    }
    let index = bank
        .find_slot_for_kind(kind)
        .ok_or_else(|| Rejection::NothingToTransfer(kind.title().to_string()))?;
    let held = bank.slot(index).map_or(0, |s| s.count());
    let count = amount.min(held).min(inventory.space_remaining());
    inventory.add(bank.remove(index, count));
    tracing::debug!(%kind, count, "withdraw");
    Ok(Transfer {
        direction: TransferKind::Withdraw,
        kind,
        count,
        gold: 0,
    })
}

/// Sell up to `amount` of `kind` to a shop.
pub fn sell(
    inventory: &mut Inventory,
    shop: &mut SlotStorage,
    kind: ItemKind,
    amount: usize,
) -> Outcome<Transfer> {
    if amount == 0 {
        return Err(Rejection::ZeroAmount);
    }
    if inventory.count_of(kind) == 0 {
        return Err(Rejection::NothingToTransfer(kind.title().to_string()));
    }
    if !shop.has_space_for(kind) {
        return Err(Rejection::ShopFull);
    }
    let items = inventory.remove_kind(kind, amount);
    let count = items.len();
    let gold = price(count, kind.sell_price());
    shop.add(items);
    inventory.credit(gold);
    tracing::debug!(%kind, count, gold, "sell");
    Ok(Transfer {
        direction: TransferKind::Sell,
        kind,
        count,
        gold,
    })
}

/// Buy up to `amount` of `kind` from a shop.
pub fn buy(
    shop: &mut SlotStorage,
    inventory: &mut Inventory,
    kind: ItemKind,
    amount: usize,
) -> Outcome<Transfer> {
    if amount == 0 {
        return Err(Rejection::ZeroAmount);
    }
    if inventory.is_full() {
        return Err(Rejection::InventoryFull("buy any items"));
    }
    let index = shop
        .find_slot_for_kind(kind)
        .ok_or_else(|| Rejection::NothingToTransfer(kind.title().to_string()))?;
    let affordable = usize::try_from(inventory.gold() / kind.buy_price()).unwrap_or(usize::MAX);
    if affordable == 0 {
        return Err(Rejection::CannotAfford);
    }
    let stocked = shop.slot(index).map_or(0, |s| s.count());
    let count = amount
        .min(stocked)
        .min(inventory.space_remaining())
        .min(affordable);
    let gold = price(count, kind.buy_price());
    inventory.debit(gold);
    inventory.add(shop.remove(index, count));
    tracing::debug!(%kind, count, gold, "buy");
    Ok(Transfer {
        direction: TransferKind::Buy,
        kind,
        count,
        gold,
    })
}
