//! In-memory order repository

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::OrderRepository;
use crate::types::{TransportationOrder, TruckId};
use crate::Result;

/// Orders held in a concurrent map keyed by truck
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    orders: DashMap<TruckId, TransportationOrder>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: impl IntoIterator<Item = TransportationOrder>) -> Self {
        let repository = Self::new();
        for order in orders {
            repository.orders.insert(order.truck.clone(), order);
        }
        repository
    }

    /// Snapshot of all orders sorted by truck
    pub(crate) fn sorted(&self) -> Vec<TransportationOrder> {
        let mut orders: Vec<_> = self.orders.iter().map(|e| e.value().clone()).collect();
        orders.sort_by(|a, b| a.truck.cmp(&b.truck));
        orders
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<TransportationOrder>> {
        Ok(self.orders.iter().map(|e| e.value().clone()).collect())
    }

    async fn find_by_id(&self, truck: &str) -> Result<Option<TransportationOrder>> {
        Ok(self.orders.get(truck).map(|e| e.value().clone()))
    }

    async fn save(&self, order: TransportationOrder) -> Result<()> {
        self.orders.insert(order.truck.clone(), order);
        Ok(())
    }

    async fn insert_if_absent(&self, order: TransportationOrder) -> Result<bool> {
        match self.orders.entry(order.truck.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(order);
                Ok(true)
            }
        }
    }

    async fn delete_by_id(&self, truck: &str) -> Result<Option<TransportationOrder>> {
        Ok(self.orders.remove(truck).map(|(_, order)| order))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_order;

    #[tokio::test]
    async fn test_find_by_id_present_and_absent() {
        let repository = InMemoryRepository::with_orders(vec![
            sample_order("28", "8962ZKR"),
            sample_order("29", "1234ABC"),
        ]);

        let found = repository.find_by_id("8962ZKR").await.unwrap();
        assert_eq!(found.map(|o| o.toid), Some("28".to_string()));
        assert!(repository.find_by_id("NOEXISTE").await.unwrap().is_none());
        assert_eq!(repository.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_replaces_by_truck() {
        let repository = InMemoryRepository::new();
        repository.save(sample_order("1", "T1")).await.unwrap();
        repository.save(sample_order("2", "T1")).await.unwrap();

        assert_eq!(repository.count().await.unwrap(), 1);
        let order = repository.find_by_id("T1").await.unwrap().unwrap();
        assert_eq!(order.toid, "2");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_order() {
        let repository = InMemoryRepository::with_orders(vec![sample_order("1", "T1")]);

        let removed = repository.delete_by_id("T1").await.unwrap();
        assert_eq!(removed.map(|o| o.toid), Some("1".to_string()));
        assert!(repository.delete_by_id("T1").await.unwrap().is_none());
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first_order() {
        let repository = InMemoryRepository::new();

        assert!(repository.insert_if_absent(sample_order("1", "T1")).await.unwrap());
        assert!(!repository.insert_if_absent(sample_order("2", "T1")).await.unwrap());

        let order = repository.find_by_id("T1").await.unwrap().unwrap();
        assert_eq!(order.toid, "1");
    }

    #[tokio::test]
    async fn test_concurrent_inserts_admit_one_winner() {
        let repository = std::sync::Arc::new(InMemoryRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .insert_if_absent(sample_order(&i.to_string(), "T1"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[test]
    fn test_sorted_snapshot() {
        let repository = InMemoryRepository::with_orders(vec![
            sample_order("1", "ZZZ"),
            sample_order("2", "AAA"),
        ]);
        let trucks: Vec<_> = repository.sorted().into_iter().map(|o| o.truck).collect();
        assert_eq!(trucks, vec!["AAA", "ZZZ"]);
    }
}
