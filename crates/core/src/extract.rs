//! Receipt extraction seam
//!
//! The OCR service is an external collaborator: it takes raw image bytes and
//! returns a structured [`Receipt`], or fails. It is rate-limited and
//! non-deterministic, so callers invoke it at most once per room creation
//! and surface failures as room-creation failures.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::models::{Receipt, ReceiptItem};

/// Turns a receipt image into structured line items and charges
pub trait ReceiptExtractor {
    fn extract(&self, image: &[u8]) -> Result<Receipt>;
}

/// Deterministic extractor returning a canned receipt
///
/// Stands in for the real OCR service in demos and tests.
#[derive(Debug, Default)]
pub struct FixtureExtractor;

impl ReceiptExtractor for FixtureExtractor {
    fn extract(&self, _image: &[u8]) -> Result<Receipt> {
        let mut receipt = Receipt::empty();
        receipt.restaurant = "UD ROTIGHAR".into();
        receipt.date = "28/01/2023".into();
        receipt.time = "02:50:28 PM".into();
        receipt.items = vec![
            ReceiptItem::new("Baby Corn Chilly", "₹200.00"),
            ReceiptItem::new("Dal Tadka", "₹155.00"),
            ReceiptItem::new("Garlic Nan", "₹455.00"),
            ReceiptItem::new("Gobi Manchoorian", "₹160.00"),
            ReceiptItem::new("Kaju Paneer (A)", "₹220.00"),
            ReceiptItem::new("Minaral Water (A)", "₹19.00"),
            ReceiptItem::new("Paneer Tikka Manchoorian", "₹220.00"),
        ];
        receipt.charges.subtotal = "₹1,429.00".into();
        receipt.charges.service_charge = "₹400.00".into();
        receipt.charges.discount = "N/A".into();
        receipt.charges.cgst = "₹35.00".into();
        receipt.charges.sgst = "₹35.00".into();
        receipt.charges.total = "₹1,501.00".into();
        Ok(receipt)
    }
}

/// Extractor that always fails, for exercising error paths
#[derive(Debug, Default)]
pub struct FailingExtractor;

impl ReceiptExtractor for FailingExtractor {
    fn extract(&self, _image: &[u8]) -> Result<Receipt> {
        Err(Error::Extraction("service unavailable".into()))
    }
}

/// Rotating pool of API credentials for the extraction service
///
/// The upstream OCR provider rate-limits per key, so requests round-robin
/// over a fixed key list. The cursor is an atomic increment, independent of
/// any room state.
#[derive(Debug)]
pub struct ApiKeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl ApiKeyPool {
    /// Build a pool from an ordered key list; empty keys are dropped
    pub fn new(keys: Vec<String>) -> Self {
        let keys = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Build a pool from a comma-separated environment variable
    pub fn from_env(var: &str) -> Self {
        let keys = std::env::var(var)
            .map(|v| v.split(',').map(str::to_string).collect())
            .unwrap_or_default();
        Self::new(keys)
    }

    /// Next key in rotation, `None` if the pool is empty
    pub fn next_key(&self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Some(&self.keys[index])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_receipt_shape() {
        let receipt = FixtureExtractor.extract(&[]).unwrap();
        assert_eq!(receipt.items.len(), 7);
        assert_eq!(receipt.charges.service_charge, "₹400.00");
        assert_eq!(receipt.charges.discount, "N/A");
    }

    #[test]
    fn test_failing_extractor() {
        let err = FailingExtractor.extract(&[]).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_key_rotation_wraps() {
        let pool = ApiKeyPool::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(pool.next_key(), Some("a"));
        assert_eq!(pool.next_key(), Some("b"));
        assert_eq!(pool.next_key(), Some("c"));
        assert_eq!(pool.next_key(), Some("a"));
    }

    #[test]
    fn test_empty_and_blank_keys() {
        let pool = ApiKeyPool::new(vec!["  ".into(), String::new()]);
        assert!(pool.is_empty());
        assert_eq!(pool.next_key(), None);
    }
}
