//! Newline-delimited JSON codec for bulk order loading
//!
//! One `TransportationOrder` object per line; blank lines are skipped.

use std::path::Path;

use crate::repository::OrderRepository;
use crate::types::TransportationOrder;
use crate::{Error, Result};

/// Parse NDJSON text into orders
pub fn parse_orders(text: &str) -> Result<Vec<TransportationOrder>> {
    let mut orders = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let order = serde_json::from_str(line).map_err(|source| Error::MalformedLine {
            line: idx + 1,
            source,
        })?;
        orders.push(order);
    }

    Ok(orders)
}

/// Encode orders as NDJSON, one compact object per line
pub fn encode_orders<'a, I>(orders: I) -> Result<String>
where
    I: IntoIterator<Item = &'a TransportationOrder>,
{
    let mut out = String::new();
    for order in orders {
        out.push_str(&serde_json::to_string(order)?);
        out.push('\n');
    }
    Ok(out)
}

/// Read and parse an NDJSON fixture file
pub async fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<TransportationOrder>> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_orders(&text)
}

/// Save every order into the repository, returning how many were stored
pub async fn seed_repository(
    repository: &dyn OrderRepository,
    orders: Vec<TransportationOrder>,
) -> Result<usize> {
    let mut count = 0;
    for order in orders {
        order.validate()?;
        repository.save(order).await?;
        count += 1;
    }

    tracing::debug!(count, "Seeded repository");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryRepository;
    use crate::types::sample_order;

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = concat!(
            r#"{"toid":"1","truck":"A","pickupTime":1,"pickupLat":0.0,"pickupLon":0.0,"deliveryTime":2,"deliveryLat":1.0,"deliveryLon":1.0}"#,
            "\n\n   \n",
            r#"{"toid":"2","truck":"B","pickupTime":3,"pickupLat":0.0,"pickupLon":0.0,"deliveryTime":4,"deliveryLat":1.0,"deliveryLon":1.0,"st":2}"#,
            "\n",
        );

        let orders = parse_orders(text).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].truck, "A");
        assert_eq!(orders[1].st, 2);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = concat!(
            r#"{"toid":"1","truck":"A","pickupTime":1,"pickupLat":0.0,"pickupLon":0.0,"deliveryTime":2,"deliveryLat":1.0,"deliveryLon":1.0}"#,
            "\n",
            "{not json}\n",
        );

        match parse_orders(text) {
            Err(Error::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_encode_is_line_per_order() {
        let orders = vec![sample_order("1", "A"), sample_order("2", "B")];
        let text = encode_orders(&orders).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
        assert_eq!(parse_orders(&text).unwrap(), orders);
    }

    #[tokio::test]
    async fn test_seed_repository_rejects_blank_truck() {
        let repository = InMemoryRepository::new();
        let orders = vec![sample_order("1", "A"), sample_order("2", "")];

        let result = seed_repository(&repository, orders).await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
        assert_eq!(repository.count().await.unwrap(), 1);
    }
}
