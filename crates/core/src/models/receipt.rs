//! Receipt models - the structured output of the receipt extractor
//!
//! Prices and charge amounts stay raw strings exactly as the extractor
//! produced them (currency-prefixed, or the "N/A" sentinel). They are only
//! parsed to numbers at allocation time, so host edits never lose fidelity.

use serde::{Deserialize, Serialize};

/// A single line item on a receipt
///
/// `name` is the join key between items and participant selections and is
/// compared as an exact, case-sensitive string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReceiptItem {
    pub name: String,
    /// Raw price string, e.g. "₹199.00"
    pub price: String,
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

/// Aggregate charges printed at the bottom of a receipt
///
/// Field names follow the extractor wire format. Any field may be "N/A".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Charges {
    pub subtotal: String,
    #[serde(rename = "serviceCharge")]
    pub service_charge: String,
    pub discount: String,
    pub cgst: String,
    pub sgst: String,
    pub total: String,
}

impl Default for Charges {
    fn default() -> Self {
        Self {
            subtotal: "N/A".to_string(),
            service_charge: "N/A".to_string(),
            discount: "N/A".to_string(),
            cgst: "N/A".to_string(),
            sgst: "N/A".to_string(),
            total: "N/A".to_string(),
        }
    }
}

/// A structured receipt as returned by the extractor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub restaurant: String,
    pub date: String,
    pub time: String,
    pub items: Vec<ReceiptItem>,
    #[serde(flatten)]
    pub charges: Charges,
}

impl Receipt {
    /// An empty receipt with all charge fields unset
    pub fn empty() -> Self {
        Self {
            restaurant: "N/A".to_string(),
            date: "N/A".to_string(),
            time: "N/A".to_string(),
            items: Vec::new(),
            charges: Charges::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charges_wire_names() {
        let charges = Charges {
            subtotal: "₹1,429.00".into(),
            service_charge: "₹400.00".into(),
            discount: "N/A".into(),
            cgst: "₹35.00".into(),
            sgst: "₹35.00".into(),
            total: "₹1,501.00".into(),
        };

        let json = serde_json::to_value(&charges).unwrap();
        assert_eq!(json["serviceCharge"], "₹400.00");
        assert_eq!(json["subtotal"], "₹1,429.00");

        let back: Charges = serde_json::from_value(json).unwrap();
        assert_eq!(back, charges);
    }

    #[test]
    fn test_receipt_flattens_charges() {
        let mut receipt = Receipt::empty();
        receipt.restaurant = "UD ROTIGHAR".into();
        receipt.items.push(ReceiptItem::new("Dal Tadka", "₹155.00"));
        receipt.charges.total = "₹155.00".into();

        let json = serde_json::to_value(&receipt).unwrap();
        // Charge fields sit at the top level, matching the extractor output
        assert_eq!(json["total"], "₹155.00");
        assert_eq!(json["items"][0]["name"], "Dal Tadka");
    }
}
