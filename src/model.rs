//! Domain entities and their save-time validation rules.
//!
//! Field names and enum tags serialize exactly as the original browser app
//! stored them (camelCase, `NATURAL`/`LEGAL`, `PROFORMA`/`INVOICE`), so backup
//! documents are interchangeable in both directions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The variant-specific half of a [`Party`]. Exactly one variant is populated;
/// the tag decides which fields are meaningful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PartyKind {
    #[serde(rename = "NATURAL", rename_all = "camelCase")]
    Natural {
        #[serde(default)]
        full_name: String,
        #[serde(default)]
        national_id: String,
        #[serde(default)]
        mobile: String,
    },
    #[serde(rename = "LEGAL", rename_all = "camelCase")]
    Legal {
        #[serde(default)]
        company_name: String,
        #[serde(default)]
        registration_number: String,
        #[serde(default)]
        company_id: String,
        #[serde(default)]
        phone: String,
    },
}

impl Default for PartyKind {
    fn default() -> Self {
        PartyKind::Natural {
            full_name: String::new(),
            national_id: String::new(),
            mobile: String::new(),
        }
    }
}

/// A buyer or seller identity, natural person or legal entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub kind: PartyKind,
    #[serde(default)]
    pub economic_code: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: String,
}

impl Party {
    /// Name shown in listings: the full name for natural persons, the
    /// registered company name otherwise.
    pub fn display_name(&self) -> &str {
        match &self.kind {
            PartyKind::Natural { full_name, .. } => full_name,
            PartyKind::Legal { company_name, .. } => company_name,
        }
    }

    /// A natural person must carry a full name, a legal entity a company
    /// name. Everything else is free-text and unchecked.
    pub fn validate(&self) -> Result<()> {
        match &self.kind {
            PartyKind::Natural { full_name, .. } if full_name.trim().is_empty() => {
                Err(Error::Validation { field: "fullName" })
            }
            PartyKind::Legal { company_name, .. } if company_name.trim().is_empty() => {
                Err(Error::Validation { field: "companyName" })
            }
            _ => Ok(()),
        }
    }
}

/// Catalog entry for a product or service. Invoices copy a snapshot of these
/// fields into their line items, never a live reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub unit: String,
    pub price: f64,
}

impl Product {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation { field: "name" });
        }
        if self.unit.trim().is_empty() {
            return Err(Error::Validation { field: "unit" });
        }
        if self.price <= 0.0 {
            return Err(Error::Validation { field: "price" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(default)]
    pub id: String,
    pub bank_name: String,
    pub account_number: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub iban: String,
}

impl BankAccount {
    pub fn validate(&self) -> Result<()> {
        if self.bank_name.trim().is_empty() {
            return Err(Error::Validation { field: "bankName" });
        }
        if self.account_number.trim().is_empty() {
            return Err(Error::Validation { field: "accountNumber" });
        }
        Ok(())
    }
}

/// One line on an invoice. `product_id` only records where the snapshot came
/// from; later catalog edits never reach back into saved invoices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    #[serde(default)]
    pub product_id: String,
    pub name: String,
    pub unit: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    /// Flat amount subtracted from this line's subtotal.
    #[serde(default)]
    pub discount: f64,
}

impl InvoiceItem {
    pub fn from_product(product: &Product) -> Self {
        InvoiceItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit: product.unit.clone(),
            price: product.price,
            quantity: 1,
            description: String::new(),
            discount: 0.0,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price - self.discount
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceType {
    #[serde(rename = "PROFORMA")]
    Proforma,
    #[serde(rename = "INVOICE")]
    Invoice,
}

pub const DEFAULT_TAX_RATE: f64 = 9.0;

/// An invoice or proforma document. `subtotal`, `tax_amount` and `total` are
/// derived but stored: they are stamped once at finalize time, not recomputed
/// on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InvoiceType,
    pub invoice_number: String,
    /// Back-reference set only when this invoice was created by converting a
    /// proforma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proforma_id: Option<String>,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub seller: Party,
    pub buyer: Party,
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub subtotal: f64,
    pub tax_rate: f64,
    #[serde(default)]
    pub tax_amount: f64,
    /// Flat overall discount, distinct from the per-line discounts.
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub notes: String,
    /// Stamp/signature image as a base64 data URL, empty when none was set.
    #[serde(default)]
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
}
