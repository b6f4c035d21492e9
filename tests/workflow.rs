//! End-to-end workflow over a real on-disk store: build catalogs, issue a
//! proforma, convert it, back everything up and restore into a fresh store.

use faktor::backup::{backup, restore};
use faktor::catalog::upsert;
use faktor::lifecycle::{convert_to_invoice, create_draft, finalize, upsert_invoice};
use faktor::model::{Invoice, InvoiceItem, InvoiceType, Party, PartyKind, Product};
use faktor::store::{keys, FileStore, Store};

fn seller() -> Party {
    Party {
        id: "seller".into(),
        kind: PartyKind::Legal {
            company_name: "Faktor Co".into(),
            registration_number: "98765".into(),
            company_id: "14000".into(),
            phone: "021-1234".into(),
        },
        ..Party::default()
    }
}

#[test]
fn proforma_to_invoice_survives_backup_and_restore() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("store.json")).unwrap();

    store.set_json(keys::SELLER, &seller()).unwrap();

    // Catalog.
    let mut products: Vec<Product> = Vec::new();
    upsert(
        Product {
            id: String::new(),
            name: "Support contract".into(),
            unit: "month".into(),
            price: 1_200_000.0,
        },
        &mut products,
    )
    .unwrap();
    store.set_json(keys::PRODUCTS, &products).unwrap();

    // Issue a proforma with one line.
    let mut draft = create_draft(store.get_or_default(keys::SELLER));
    let mut item = InvoiceItem::from_product(&products[0]);
    item.quantity = 3;
    draft.items.push(item);
    draft.discount = 100_000.0;
    let proforma = finalize(draft, InvoiceType::Proforma);

    let mut invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    upsert_invoice(proforma.clone(), &mut invoices);
    store.set_json(keys::INVOICES, &invoices).unwrap();

    // Convert it.
    let invoice = convert_to_invoice(&proforma.id, &invoices).unwrap();
    invoices.push(invoice.clone());
    store.set_json(keys::INVOICES, &invoices).unwrap();

    // subtotal 3_600_000, base 3_500_000, tax 315_000 at 9%
    assert_eq!(invoice.subtotal, 3_600_000.0);
    assert_eq!(invoice.tax_amount, 315_000.0);
    assert_eq!(invoice.total, 3_815_000.0);

    // Snapshot, then restore into a brand-new store file.
    let doc = backup(&store);
    let mut fresh = FileStore::open(dir.path().join("restored.json")).unwrap();
    restore(&doc.to_string(), &mut fresh).unwrap();

    let restored: Vec<Invoice> = fresh.get_or_default(keys::INVOICES);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored[0], proforma);
    assert_eq!(restored[1], invoice);

    let restored_seller: Party = fresh.get_or_default(keys::SELLER);
    assert_eq!(restored_seller.display_name(), "Faktor Co");

    // Reopen from disk: everything is durable.
    drop(fresh);
    let reopened = FileStore::open(dir.path().join("restored.json")).unwrap();
    let again: Vec<Invoice> = reopened.get_or_default(keys::INVOICES);
    assert_eq!(again, restored);
}
