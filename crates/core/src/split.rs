//! Bill-split allocation engine
//!
//! Pure computation from Room state to a per-participant breakdown. The
//! engine is total: it never errors, and best-effort zeros stand in for
//! missing or malformed charge fields. Selections referencing items the host
//! has since removed simply contribute nothing.
//!
//! Cost rules:
//! - an item's price is divided equally among the users who selected it;
//! - service charge, CGST and SGST are split per-capita across every user
//!   with a recorded selection (flat, not proportional);
//! - the discount is applied proportionally to each user's item share.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::amount::{parse_amount, round1, round2};
use crate::models::Room;

/// One participant's share of the bill
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserShare {
    /// The item names this user claimed, as submitted
    pub selected_items: Vec<String>,
    pub item_total: f64,
    /// Share of the full receipt subtotal, in percent (one decimal place)
    pub percentage: f64,
    pub service_charge: f64,
    pub discount: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub final_amount: f64,
}

/// Aggregate totals across all participants
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Totals {
    /// Sum of the per-user item totals (the collectively claimed portion)
    pub subtotal: f64,
    pub service_charge: f64,
    pub discount: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub grand_total: f64,
}

/// Complete allocation result for a room
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BillSplit {
    pub user_breakdown: BTreeMap<String, UserShare>,
    pub totals: Totals,
    /// How many users selected each item, for display
    pub item_sharing: BTreeMap<String, u32>,
}

/// Compute each participant's share of the bill.
///
/// Reads the room's *current* items and charges (host edits take precedence
/// over whatever the extractor originally produced) and every recorded
/// selection, whether or not the user has formally submitted.
pub fn split_bill(room: &Room) -> BillSplit {
    // Price index over current items; names are exact-match keys
    let mut prices: HashMap<&str, f64> = HashMap::new();
    for item in &room.items {
        prices.insert(item.name.as_str(), parse_amount(&item.price));
    }

    // Full receipt value, independent of what anyone selected
    let subtotal: f64 = prices.values().sum();

    let service_charge = parse_amount(&room.charges.service_charge);
    let discount = parse_amount(&room.charges.discount);
    let cgst = parse_amount(&room.charges.cgst);
    let sgst = parse_amount(&room.charges.sgst);

    // How many users claimed each known item
    let mut item_sharing: BTreeMap<String, u32> = BTreeMap::new();
    for name in prices.keys() {
        let count = room
            .selections
            .values()
            .filter(|sel| sel.iter().any(|s| s == name))
            .count() as u32;
        item_sharing.insert((*name).to_string(), count);
    }

    // Equal split per selector; dangling names contribute nothing
    let mut item_totals: BTreeMap<&str, f64> = BTreeMap::new();
    for (user, selected) in &room.selections {
        let mut total = 0.0;
        for name in selected {
            if let Some(price) = prices.get(name.as_str()) {
                let selectors = item_sharing.get(name.as_str()).copied().unwrap_or(0);
                if selectors > 0 {
                    total += price / f64::from(selectors);
                }
            }
        }
        item_totals.insert(user.as_str(), total);
    }

    // Taxes and service charge split flat across everyone with a selection
    // entry (force-completed users with empty selections included)
    let n = room.selections.len() as f64;
    let (service_per_user, cgst_per_user, sgst_per_user) = if n > 0.0 {
        (service_charge / n, cgst / n, sgst / n)
    } else {
        (0.0, 0.0, 0.0)
    };

    let discount_rate = if subtotal > 0.0 {
        discount / subtotal
    } else {
        0.0
    };

    let mut user_breakdown = BTreeMap::new();
    let mut grand_total = 0.0;

    for (user, item_total) in &item_totals {
        let user_discount = item_total * discount_rate;
        let final_amount =
            item_total + service_per_user + cgst_per_user + sgst_per_user - user_discount;
        grand_total += final_amount;

        let percentage = if subtotal > 0.0 {
            round1(item_total / subtotal * 100.0)
        } else {
            0.0
        };

        user_breakdown.insert(
            (*user).to_string(),
            UserShare {
                selected_items: room.selections.get(*user).cloned().unwrap_or_default(),
                item_total: round2(*item_total),
                percentage,
                service_charge: round2(service_per_user),
                discount: round2(user_discount),
                cgst: round2(cgst_per_user),
                sgst: round2(sgst_per_user),
                final_amount: round2(final_amount),
            },
        );
    }

    BillSplit {
        user_breakdown,
        totals: Totals {
            subtotal: round2(item_totals.values().sum()),
            service_charge: round2(service_charge),
            discount: round2(discount),
            cgst: round2(cgst),
            sgst: round2(sgst),
            grand_total: round2(grand_total),
        },
        item_sharing,
    }
}
