//! Pure derivation of an invoice's financial totals.

use serde::{Deserialize, Serialize};

use crate::model::InvoiceItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub item_discount_total: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Derives subtotal, tax and grand total from the line items, the overall
/// discount and the tax rate (a percentage, e.g. `9.0`).
///
/// Tax is charged on `subtotal - line discounts - overall discount` and is
/// clamped to zero when that base goes negative. The grand total is *not*
/// clamped: when discounts exceed the subtotal it comes out negative, exactly
/// as the base does. That mirrors the original application and is deliberate;
/// callers that want a floor must apply one themselves.
pub fn compute_totals(items: &[InvoiceItem], overall_discount: f64, tax_rate: f64) -> Totals {
    let subtotal: f64 = items.iter().map(|i| i.quantity as f64 * i.price).sum();
    let item_discount_total: f64 = items.iter().map(|i| i.discount).sum();
    let tax_base = subtotal - item_discount_total - overall_discount;
    // Multiply before dividing: `base * rate / 100` stays exact for whole
    // amounts, `base * (rate / 100)` does not.
    let tax_amount = if tax_base > 0.0 {
        tax_base * tax_rate / 100.0
    } else {
        0.0
    };
    Totals {
        subtotal,
        item_discount_total,
        tax_amount,
        total: tax_base + tax_amount,
    }
}
