//! Invoice lifecycle: drafts, finalization, proforma conversion, deletion,
//! listing order.
//!
//! Everything here is pure over collection values; persisting the result into
//! the store is the caller's job.

use chrono::{Local, Utc};
use uuid::Uuid;

use crate::calc::compute_totals;
use crate::error::{Error, Result};
use crate::model::{Invoice, InvoiceType, Party, DEFAULT_TAX_RATE};

/// Auto-seeded document number: type prefix plus creation epoch millis.
/// Freely editable text afterwards.
fn seed_number(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

/// A fresh draft: no id yet, an `INV-` seeded number, today's dates, the
/// default tax rate and the seller singleton copied in as a snapshot.
pub fn create_draft(seller: Party) -> Invoice {
    let today = Local::now().date_naive();
    Invoice {
        id: String::new(),
        kind: InvoiceType::Invoice,
        invoice_number: seed_number("INV"),
        proforma_id: None,
        date: today,
        due_date: today,
        seller,
        buyer: Party::default(),
        items: Vec::new(),
        subtotal: 0.0,
        tax_rate: DEFAULT_TAX_RATE,
        tax_amount: 0.0,
        discount: 0.0,
        total: 0.0,
        notes: String::new(),
        signature: String::new(),
        bank_account: None,
    }
}

/// Finalizes a draft for saving: assigns a fresh id unless the draft already
/// has one (the edit path keeps its id), stamps the chosen type and the
/// computed totals. Saving as a proforma regenerates the number with the
/// `PRF-` prefix; saving as an invoice keeps whatever number the draft holds.
pub fn finalize(mut draft: Invoice, kind: InvoiceType) -> Invoice {
    if draft.id.is_empty() {
        draft.id = Uuid::new_v4().to_string();
    }
    draft.kind = kind;
    if kind == InvoiceType::Proforma {
        draft.invoice_number = seed_number("PRF");
    }

    let totals = compute_totals(&draft.items, draft.discount, draft.tax_rate);
    draft.subtotal = totals.subtotal;
    draft.tax_amount = totals.tax_amount;
    draft.total = totals.total;
    draft
}

/// Insert-or-replace by id, the save path for both new and edited invoices.
pub fn upsert_invoice(invoice: Invoice, collection: &mut Vec<Invoice>) {
    match collection.iter_mut().find(|inv| inv.id == invoice.id) {
        Some(slot) => *slot = invoice,
        None => collection.push(invoice),
    }
}

/// Produces the invoice a proforma converts into: a new id, type `INVOICE`,
/// a fresh `INV-` number, the source id recorded as `proforma_id` and the
/// issue date reset to today. Every other field is copied verbatim. The
/// source proforma is not modified; the caller appends the result.
pub fn convert_to_invoice(proforma_id: &str, collection: &[Invoice]) -> Result<Invoice> {
    let proforma = collection
        .iter()
        .find(|inv| inv.id == proforma_id && inv.kind == InvoiceType::Proforma)
        .ok_or_else(|| Error::NotFound(proforma_id.to_string()))?;

    let mut invoice = proforma.clone();
    invoice.id = Uuid::new_v4().to_string();
    invoice.kind = InvoiceType::Invoice;
    invoice.invoice_number = seed_number("INV");
    invoice.proforma_id = Some(proforma.id.clone());
    invoice.date = Local::now().date_naive();
    Ok(invoice)
}

/// Removes the invoice with `id`; deleting an unknown id is a no-op.
pub fn delete_invoice(id: &str, collection: &mut Vec<Invoice>) {
    collection.retain(|inv| inv.id != id);
}

/// Display order is always issue date descending, derived at query time —
/// storage order carries no meaning.
pub fn sorted_for_listing(collection: &[Invoice]) -> Vec<Invoice> {
    let mut sorted = collection.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvoiceItem, PartyKind};
    use chrono::NaiveDate;

    fn seller() -> Party {
        Party {
            id: "seller".into(),
            kind: PartyKind::Natural {
                full_name: "Maryam Hosseini".into(),
                national_id: "0012345678".into(),
                mobile: "09120000000".into(),
            },
            ..Party::default()
        }
    }

    fn item(quantity: u32, price: f64) -> InvoiceItem {
        InvoiceItem {
            product_id: "p1".into(),
            name: "Service".into(),
            unit: "hour".into(),
            price,
            quantity,
            description: String::new(),
            discount: 0.0,
        }
    }

    #[test]
    fn draft_is_seeded_with_defaults() {
        let draft = create_draft(seller());
        assert!(draft.id.is_empty());
        assert!(draft.invoice_number.starts_with("INV-"));
        assert_eq!(draft.tax_rate, 9.0);
        assert!(draft.items.is_empty());
        assert_eq!(draft.seller.display_name(), "Maryam Hosseini");
        assert_eq!(draft.date, draft.due_date);
    }

    #[test]
    fn finalize_assigns_id_and_stamps_totals() {
        let mut draft = create_draft(seller());
        draft.items.push(item(2, 100_000.0));
        draft.discount = 10_000.0;

        let invoice = finalize(draft, InvoiceType::Invoice);
        assert!(!invoice.id.is_empty());
        assert_eq!(invoice.subtotal, 200_000.0);
        assert_eq!(invoice.tax_amount, 17_100.0);
        assert_eq!(invoice.total, 207_100.0);
        assert!(invoice.invoice_number.starts_with("INV-"));
    }

    #[test]
    fn finalize_keeps_id_on_edit() {
        let mut draft = create_draft(seller());
        draft.items.push(item(1, 1_000.0));
        let saved = finalize(draft, InvoiceType::Invoice);
        let id = saved.id.clone();

        let mut edited = saved;
        edited.items.push(item(1, 2_000.0));
        let resaved = finalize(edited, InvoiceType::Invoice);
        assert_eq!(resaved.id, id);
        assert_eq!(resaved.subtotal, 3_000.0);
    }

    #[test]
    fn proforma_finalize_regenerates_number() {
        let draft = create_draft(seller());
        let proforma = finalize(draft, InvoiceType::Proforma);
        assert_eq!(proforma.kind, InvoiceType::Proforma);
        assert!(proforma.invoice_number.starts_with("PRF-"));
    }

    #[test]
    fn upsert_replaces_matching_id_else_appends() {
        let mut invoices = Vec::new();
        let first = finalize(create_draft(seller()), InvoiceType::Invoice);
        let id = first.id.clone();
        upsert_invoice(first, &mut invoices);
        assert_eq!(invoices.len(), 1);

        let mut edited = invoices[0].clone();
        edited.notes = "updated".into();
        upsert_invoice(edited, &mut invoices);
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, id);
        assert_eq!(invoices[0].notes, "updated");

        let second = finalize(create_draft(seller()), InvoiceType::Invoice);
        upsert_invoice(second, &mut invoices);
        assert_eq!(invoices.len(), 2);
    }

    #[test]
    fn convert_appends_and_leaves_proforma_untouched() {
        let mut draft = create_draft(seller());
        draft.items.push(item(1, 500_000.0));
        let proforma = finalize(draft, InvoiceType::Proforma);
        let proforma_id = proforma.id.clone();

        let mut invoices = vec![proforma.clone()];
        let converted = convert_to_invoice(&proforma_id, &invoices).unwrap();
        upsert_invoice(converted.clone(), &mut invoices);

        assert_eq!(converted.kind, InvoiceType::Invoice);
        assert_eq!(converted.proforma_id.as_deref(), Some(proforma_id.as_str()));
        assert_ne!(converted.id, proforma_id);
        assert!(converted.invoice_number.starts_with("INV-"));
        // Financials travel verbatim.
        assert_eq!(converted.total, proforma.total);
        assert_eq!(converted.items, proforma.items);

        // The original proforma is still listed, unchanged.
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0], proforma);
    }

    #[test]
    fn convert_rejects_missing_or_non_proforma_ids() {
        let invoice = finalize(create_draft(seller()), InvoiceType::Invoice);
        let id = invoice.id.clone();
        let invoices = vec![invoice];

        assert!(matches!(
            convert_to_invoice("nope", &invoices),
            Err(Error::NotFound(_))
        ));
        // A plain invoice cannot be converted either.
        assert!(matches!(
            convert_to_invoice(&id, &invoices),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let invoice = finalize(create_draft(seller()), InvoiceType::Invoice);
        let id = invoice.id.clone();
        let mut invoices = vec![invoice];

        delete_invoice(&id, &mut invoices);
        assert!(invoices.is_empty());
        delete_invoice(&id, &mut invoices);
        assert!(invoices.is_empty());
    }

    #[test]
    fn listing_sorts_by_date_descending() {
        let mut older = finalize(create_draft(seller()), InvoiceType::Invoice);
        older.date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut newer = finalize(create_draft(seller()), InvoiceType::Invoice);
        newer.date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let invoices = vec![older.clone(), newer.clone()];
        let sorted = sorted_for_listing(&invoices);
        assert_eq!(sorted[0].id, newer.id);
        assert_eq!(sorted[1].id, older.id);
        // Source order is untouched.
        assert_eq!(invoices[0].id, older.id);
    }
}
