//! redb-based storage layer for the payment ledger
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` | Order headers + summary cache |
//! | `players` | `(order_id, player_id)` | `Player` | One row per seat |
//! | `payments` | `(order_id, payment_id)` | `Payment` | Ledger entries |
//! | `payment_index` | `payment_id` | `order_id` | Payment id lookup |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: a commit is
//! persistent as soon as `commit()` returns, via copy-on-write with an
//! atomic pointer swap. A dropped write transaction aborts cleanly, which
//! is exactly the all-or-nothing behavior the ledger relies on.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use shared::order::{Order, Payment, Player};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for order headers: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for players: key = (order_id, player_id), value = JSON-serialized Player
const PLAYERS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("players");

/// Table for payments: key = (order_id, payment_id), value = JSON-serialized Payment
const PAYMENTS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("payments");

/// Table for payment id lookup: key = payment_id, value = order_id
const PAYMENT_INDEX_TABLE: TableDefinition<&str, &str> = TableDefinition::new("payment_index");

/// Upper bound sentinel for composite-key range scans (ids are uuid strings)
const KEY_MAX: &str = "\u{10FFFF}";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Ledger storage backed by redb
#[derive(Clone)]
pub struct LedgerStorage {
    db: Arc<Database>,
}

impl LedgerStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(PLAYERS_TABLE)?;
            let _ = write_txn.open_table(PAYMENTS_TABLE)?;
            let _ = write_txn.open_table(PAYMENT_INDEX_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Order Operations ==========

    pub fn store_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let bytes = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_order_txn(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    pub fn remove_order(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        table.remove(order_id)?;
        Ok(())
    }

    // ========== Player Operations ==========

    pub fn store_player(&self, txn: &WriteTransaction, player: &Player) -> StorageResult<()> {
        let mut table = txn.open_table(PLAYERS_TABLE)?;
        let bytes = serde_json::to_vec(player)?;
        table.insert((player.order_id.as_str(), player.id.as_str()), bytes.as_slice())?;
        Ok(())
    }

    pub fn get_player_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        player_id: &str,
    ) -> StorageResult<Option<Player>> {
        let table = txn.open_table(PLAYERS_TABLE)?;
        match table.get((order_id, player_id))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_players_for_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Vec<Player>> {
        let table = txn.open_table(PLAYERS_TABLE)?;
        let mut players: Vec<Player> = Vec::new();
        for entry in table.range((order_id, "")..=(order_id, KEY_MAX))? {
            let (_, value) = entry?;
            players.push(serde_json::from_slice(value.value())?);
        }
        players.sort_by_key(|p| p.seq);
        Ok(players)
    }

    pub fn get_players_for_order(&self, order_id: &str) -> StorageResult<Vec<Player>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PLAYERS_TABLE)?;
        let mut players: Vec<Player> = Vec::new();
        for entry in table.range((order_id, "")..=(order_id, KEY_MAX))? {
            let (_, value) = entry?;
            players.push(serde_json::from_slice(value.value())?);
        }
        players.sort_by_key(|p| p.seq);
        Ok(players)
    }

    pub fn remove_players_for_order(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PLAYERS_TABLE)?;
        let keys: Vec<String> = {
            let mut keys = Vec::new();
            for entry in table.range((order_id, "")..=(order_id, KEY_MAX))? {
                let (key, _) = entry?;
                keys.push(key.value().1.to_string());
            }
            keys
        };
        for player_id in keys {
            table.remove((order_id, player_id.as_str()))?;
        }
        Ok(())
    }

    // ========== Payment Operations ==========

    pub fn store_payment(&self, txn: &WriteTransaction, payment: &Payment) -> StorageResult<()> {
        {
            let mut table = txn.open_table(PAYMENTS_TABLE)?;
            let bytes = serde_json::to_vec(payment)?;
            table.insert((payment.order_id.as_str(), payment.id.as_str()), bytes.as_slice())?;
        }
        let mut index = txn.open_table(PAYMENT_INDEX_TABLE)?;
        index.insert(payment.id.as_str(), payment.order_id.as_str())?;
        Ok(())
    }

    pub fn get_payment_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        payment_id: &str,
    ) -> StorageResult<Option<Payment>> {
        let table = txn.open_table(PAYMENTS_TABLE)?;
        match table.get((order_id, payment_id))? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_payments_for_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Vec<Payment>> {
        let table = txn.open_table(PAYMENTS_TABLE)?;
        let mut payments: Vec<Payment> = Vec::new();
        for entry in table.range((order_id, "")..=(order_id, KEY_MAX))? {
            let (_, value) = entry?;
            payments.push(serde_json::from_slice(value.value())?);
        }
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }

    pub fn get_payments_for_order(&self, order_id: &str) -> StorageResult<Vec<Payment>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PAYMENTS_TABLE)?;
        let mut payments: Vec<Payment> = Vec::new();
        for entry in table.range((order_id, "")..=(order_id, KEY_MAX))? {
            let (_, value) = entry?;
            payments.push(serde_json::from_slice(value.value())?);
        }
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }

    pub fn remove_payment(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        payment_id: &str,
    ) -> StorageResult<()> {
        {
            let mut table = txn.open_table(PAYMENTS_TABLE)?;
            table.remove((order_id, payment_id))?;
        }
        let mut index = txn.open_table(PAYMENT_INDEX_TABLE)?;
        index.remove(payment_id)?;
        Ok(())
    }

    pub fn remove_payments_for_order(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<()> {
        let payment_ids: Vec<String> = {
            let table = txn.open_table(PAYMENTS_TABLE)?;
            let mut ids = Vec::new();
            for entry in table.range((order_id, "")..=(order_id, KEY_MAX))? {
                let (key, _) = entry?;
                ids.push(key.value().1.to_string());
            }
            ids
        };
        for payment_id in payment_ids {
            self.remove_payment(txn, order_id, &payment_id)?;
        }
        Ok(())
    }

    /// Look up the order a payment belongs to (within a write transaction)
    pub fn find_order_for_payment_txn(
        &self,
        txn: &WriteTransaction,
        payment_id: &str,
    ) -> StorageResult<Option<String>> {
        let index = txn.open_table(PAYMENT_INDEX_TABLE)?;
        Ok(index.get(payment_id)?.map(|guard| guard.value().to_string()))
    }

    /// Look up the order a payment belongs to
    pub fn find_order_for_payment(&self, payment_id: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(PAYMENT_INDEX_TABLE)?;
        Ok(index.get(payment_id)?.map(|guard| guard.value().to_string()))
    }
}
