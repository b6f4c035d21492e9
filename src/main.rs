use base64::{engine::general_purpose, Engine as _};
use chrono::Local;
use clap::{Parser, Subcommand};
use comfy_table::{Attribute, Cell, Color, Table};
use inquire::{Confirm, CustomType, DateSelect, Select, Text};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};

use faktor::backup::{backup, backup_file_name, restore};
use faktor::catalog::{remove, upsert, Upsert};
use faktor::error::Result;
use faktor::lifecycle::{
    convert_to_invoice, create_draft, delete_invoice, finalize, sorted_for_listing, upsert_invoice,
};
use faktor::model::{
    BankAccount, Invoice, InvoiceItem, InvoiceType, Party, PartyKind, Product,
};
use faktor::store::{keys, FileStore, Store};

// ==========================================
// Constants
// ==========================================
const FINISH_OPT: &str = "✔ Finish";
const MANUAL_BUYER_OPT: &str = "✏ Enter buyer manually";
const NO_ACCOUNT_OPT: &str = "— No bank account —";

// ==========================================
// Structs & Enums
// ==========================================

#[derive(Debug, Serialize, Deserialize)]
struct AppSettings {
    data_root: String,
}

#[derive(Parser)]
#[command(name = "faktor", about = "Offline invoice and proforma manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new invoice or proforma
    New,
    /// Edit an existing invoice
    Edit,
    /// List all invoices (newest first)
    List,
    /// Print one invoice
    Show,
    /// Convert a proforma into an invoice
    Convert,
    /// Delete an invoice
    Delete,
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the customer roster
    Customer {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage bank accounts
    Account {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Edit the seller identity
    Seller,
    /// Set the printed invoice header text
    Header,
    /// Set the printed invoice footer text
    Footer,
    /// Export all data to a JSON backup file
    Backup {
        /// Output file (defaults to faktor-backup-<date>.json)
        output: Option<PathBuf>,
    },
    /// Replace all data from a JSON backup file
    Restore { file: PathBuf },
    /// Configure data directory
    Config,
}

#[derive(Subcommand)]
enum CatalogAction {
    Add,
    List,
    Delete,
}

// ==========================================
// Main Function
// ==========================================

fn main() {
    let cli = Cli::parse();

    // 1. Initialize configuration
    let settings = load_settings().unwrap_or_else(setup_config_wizard);
    let expanded_path = expand_home_dir(&settings.data_root);
    let root = PathBuf::from(expanded_path);

    if let Err(e) = fs::create_dir_all(&root) {
        eprintln!("❌ Error: Failed to create data directory: {}", e);
        return;
    }

    let mut store = match FileStore::open(root.join("store.json")) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Error: Failed to open store: {}", e);
            return;
        }
    };

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help().unwrap();
        return;
    };

    let outcome = match command {
        Commands::New => new_invoice(&mut store),
        Commands::Edit => edit_invoice(&mut store),
        Commands::List => list_invoices(&store),
        Commands::Show => show_invoice(&store),
        Commands::Convert => convert_proforma(&mut store),
        Commands::Delete => delete_invoice_wizard(&mut store),
        Commands::Product { action } => product_command(&mut store, action),
        Commands::Customer { action } => customer_command(&mut store, action),
        Commands::Account { action } => account_command(&mut store, action),
        Commands::Seller => seller_wizard(&mut store),
        Commands::Header => set_text_key(&mut store, keys::INVOICE_HEADER, "Invoice header:"),
        Commands::Footer => set_text_key(&mut store, keys::INVOICE_FOOTER, "Invoice footer:"),
        Commands::Backup { output } => backup_command(&store, output),
        Commands::Restore { file } => restore_command(&mut store, file),
        Commands::Config => {
            setup_config_wizard();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("❌ Error: {}", e);
    }
}

// ==========================================
// 1. Invoice Wizards
// ==========================================

fn new_invoice(store: &mut FileStore) -> Result<()> {
    let seller: Party = store.get_or_default(keys::SELLER);
    if seller.validate().is_err() {
        println!("⚠️  Seller details are incomplete. Run `faktor seller` first.");
    }

    let mut draft = create_draft(seller);

    draft.buyer = select_buyer(store);
    draft.items = enter_invoice_items(store);
    if draft.items.is_empty() {
        println!("❌ No items entered. Aborting.");
        return Ok(());
    }

    draft.date = DateSelect::new("Issue date:")
        .with_default(Local::now().date_naive())
        .prompt()
        .unwrap();
    draft.due_date = DateSelect::new("Due date:")
        .with_default(draft.date)
        .prompt()
        .unwrap();

    draft.discount = ask_amount("Overall discount:", 0.0);
    draft.tax_rate = CustomType::<f64>::new("Tax rate %:")
        .with_default(draft.tax_rate)
        .prompt()
        .unwrap();
    draft.bank_account = select_bank_account(store);
    draft.notes = Text::new("Notes (optional):").prompt().unwrap();
    draft.signature = ask_signature();

    let kind = ask_document_kind();
    let invoice = finalize(draft, kind);
    let number = invoice.invoice_number.clone();

    let mut invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    upsert_invoice(invoice, &mut invoices);
    store.set_json(keys::INVOICES, &invoices)?;

    println!("✅ Saved: {}", number);
    Ok(())
}

fn edit_invoice(store: &mut FileStore) -> Result<()> {
    let mut invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    let Some(selected) = select_invoice(&invoices, "Select invoice to edit:") else {
        return Ok(());
    };
    let mut draft = selected;

    draft.invoice_number = Text::new("Invoice number:")
        .with_default(&draft.invoice_number)
        .prompt()
        .unwrap();
    draft.date = DateSelect::new("Issue date:")
        .with_default(draft.date)
        .prompt()
        .unwrap();
    draft.due_date = DateSelect::new("Due date:")
        .with_default(draft.due_date)
        .prompt()
        .unwrap();
    draft.discount = ask_amount("Overall discount:", draft.discount);
    draft.tax_rate = CustomType::<f64>::new("Tax rate %:")
        .with_default(draft.tax_rate)
        .prompt()
        .unwrap();
    draft.notes = Text::new("Notes:").with_default(&draft.notes).prompt().unwrap();

    if Confirm::new("Re-enter line items?")
        .with_default(false)
        .prompt()
        .unwrap()
    {
        draft.items = enter_invoice_items(store);
    }

    // Totals are re-stamped; the id survives the edit.
    let kind = draft.kind;
    let invoice = finalize(draft, kind);
    let number = invoice.invoice_number.clone();

    upsert_invoice(invoice, &mut invoices);
    store.set_json(keys::INVOICES, &invoices)?;
    println!("✅ Updated: {}", number);
    Ok(())
}

fn convert_proforma(store: &mut FileStore) -> Result<()> {
    let mut invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    let proformas: Vec<Invoice> = invoices
        .iter()
        .filter(|inv| inv.kind == InvoiceType::Proforma)
        .cloned()
        .collect();
    if proformas.is_empty() {
        println!("❌ No proformas found.");
        return Ok(());
    }

    let Some(selected) = select_invoice(&proformas, "Select proforma to convert:") else {
        return Ok(());
    };

    let invoice = convert_to_invoice(&selected.id, &invoices)?;
    let number = invoice.invoice_number.clone();
    invoices.push(invoice);
    store.set_json(keys::INVOICES, &invoices)?;
    println!("✅ Proforma converted to invoice {}", number);
    Ok(())
}

fn delete_invoice_wizard(store: &mut FileStore) -> Result<()> {
    let mut invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    let Some(selected) = select_invoice(&invoices, "Select invoice to delete:") else {
        return Ok(());
    };

    let sure = Confirm::new(&format!("Delete {}?", selected.invoice_number))
        .with_default(false)
        .prompt()
        .unwrap();
    if !sure {
        println!("Cancelled");
        return Ok(());
    }

    delete_invoice(&selected.id, &mut invoices);
    store.set_json(keys::INVOICES, &invoices)?;
    println!("✅ Deleted.");
    Ok(())
}

// ==========================================
// 2. Data Entry Helpers
// ==========================================

fn select_buyer(store: &FileStore) -> Party {
    let customers: Vec<Party> = store.get_or_default(keys::CUSTOMERS);

    let mut options = vec![MANUAL_BUYER_OPT.to_string()];
    for c in &customers {
        options.push(format!("{} ({})", c.display_name(), c.city));
    }

    let ans = Select::new("Buyer:", options).raw_prompt();
    match ans {
        Ok(choice) if choice.index > 0 => customers[choice.index - 1].clone(),
        Ok(_) => wizard_party(Party::default(), "Buyer details"),
        Err(_) => std::process::exit(0),
    }
}

fn enter_invoice_items(store: &FileStore) -> Vec<InvoiceItem> {
    let products: Vec<Product> = store.get_or_default(keys::PRODUCTS);
    if products.is_empty() {
        println!("⚠️  Product catalog is empty. Run `faktor product add` first.");
        return Vec::new();
    }

    let mut items: Vec<InvoiceItem> = Vec::new();
    println!("\n--- Enter Invoice Items ---");

    loop {
        let mut options = vec![FINISH_OPT.to_string()];
        for p in &products {
            options.push(format!("{} — {} / {}", p.name, fmt_money(p.price), p.unit));
        }

        let ans = Select::new("Add product:", options).raw_prompt();
        let index = match ans {
            Ok(choice) if choice.index > 0 => choice.index - 1,
            _ => break,
        };

        let mut item = InvoiceItem::from_product(&products[index]);
        item.quantity = CustomType::<u32>::new("Quantity:")
            .with_default(1)
            .prompt()
            .unwrap()
            .max(1);
        item.discount = ask_amount("Line discount:", 0.0);
        item.description = Text::new("Line description (optional):").prompt().unwrap();

        println!("  ➕ {} = {}", item.name, fmt_money(item.line_total()));
        items.push(item);
    }
    items
}

fn ask_amount(prompt: &str, default: f64) -> f64 {
    CustomType::<f64>::new(prompt)
        .with_default(default)
        .prompt()
        .unwrap()
        .max(0.0)
}

fn ask_document_kind() -> InvoiceType {
    let options = vec!["Invoice", "Proforma"];
    match Select::new("Save as:", options).prompt().unwrap() {
        "Proforma" => InvoiceType::Proforma,
        _ => InvoiceType::Invoice,
    }
}

fn select_bank_account(store: &FileStore) -> Option<BankAccount> {
    let accounts: Vec<BankAccount> = store.get_or_default(keys::BANK_ACCOUNTS);
    if accounts.is_empty() {
        return None;
    }

    let mut options = vec![NO_ACCOUNT_OPT.to_string()];
    for acc in &accounts {
        options.push(format!("{} — {}", acc.bank_name, acc.account_number));
    }

    match Select::new("Bank account:", options).raw_prompt() {
        Ok(choice) if choice.index > 0 => Some(accounts[choice.index - 1].clone()),
        _ => None,
    }
}

fn ask_signature() -> String {
    let path = Text::new("Signature PNG path (leave empty to skip):")
        .prompt()
        .unwrap();
    if path.trim().is_empty() {
        return String::new();
    }
    match fs::read(path.trim()) {
        Ok(bytes) => format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        ),
        Err(e) => {
            println!("⚠️  Could not read signature image: {}. Skipping.", e);
            String::new()
        }
    }
}

fn wizard_party(existing: Party, title: &str) -> Party {
    println!("\n--- {} ---", title);

    let options = vec!["Natural person", "Legal entity"];
    let default_index = match existing.kind {
        PartyKind::Natural { .. } => 0,
        PartyKind::Legal { .. } => 1,
    };
    let choice = Select::new("Party type:", options)
        .with_starting_cursor(default_index)
        .prompt()
        .unwrap();

    let kind = if choice == "Natural person" {
        let (full_name, national_id, mobile) = match &existing.kind {
            PartyKind::Natural {
                full_name,
                national_id,
                mobile,
            } => (full_name.clone(), national_id.clone(), mobile.clone()),
            _ => Default::default(),
        };
        PartyKind::Natural {
            full_name: Text::new("Full name:").with_default(&full_name).prompt().unwrap(),
            national_id: Text::new("National id:")
                .with_default(&national_id)
                .prompt()
                .unwrap(),
            mobile: Text::new("Mobile:").with_default(&mobile).prompt().unwrap(),
        }
    } else {
        let (company_name, registration_number, company_id, phone) = match &existing.kind {
            PartyKind::Legal {
                company_name,
                registration_number,
                company_id,
                phone,
            } => (
                company_name.clone(),
                registration_number.clone(),
                company_id.clone(),
                phone.clone(),
            ),
            _ => Default::default(),
        };
        PartyKind::Legal {
            company_name: Text::new("Company name:")
                .with_default(&company_name)
                .prompt()
                .unwrap(),
            registration_number: Text::new("Registration number:")
                .with_default(&registration_number)
                .prompt()
                .unwrap(),
            company_id: Text::new("Company id:")
                .with_default(&company_id)
                .prompt()
                .unwrap(),
            phone: Text::new("Phone:").with_default(&phone).prompt().unwrap(),
        }
    };

    Party {
        id: existing.id,
        kind,
        economic_code: Text::new("Economic code:")
            .with_default(&existing.economic_code)
            .prompt()
            .unwrap(),
        postal_code: Text::new("Postal code:")
            .with_default(&existing.postal_code)
            .prompt()
            .unwrap(),
        province: Text::new("Province:")
            .with_default(&existing.province)
            .prompt()
            .unwrap(),
        city: Text::new("City:").with_default(&existing.city).prompt().unwrap(),
        address: Text::new("Address:")
            .with_default(&existing.address)
            .prompt()
            .unwrap(),
    }
}

// ==========================================
// 3. Listing & Print View
// ==========================================

fn list_invoices(store: &FileStore) -> Result<()> {
    let invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    let sorted = sorted_for_listing(&invoices);

    if sorted.is_empty() {
        println!("(No invoices yet)");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Number"),
        Cell::new("Type"),
        Cell::new("Buyer"),
        Cell::new("Date"),
        Cell::new("Total"),
    ]);

    for inv in &sorted {
        let type_cell = match inv.kind {
            InvoiceType::Invoice => Cell::new("Invoice").fg(Color::Green),
            InvoiceType::Proforma => Cell::new("Proforma").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&inv.invoice_number),
            type_cell,
            Cell::new(inv.buyer.display_name()),
            Cell::new(inv.date.format("%Y-%m-%d")),
            Cell::new(fmt_money(inv.total)).add_attribute(Attribute::Bold),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn show_invoice(store: &FileStore) -> Result<()> {
    let invoices: Vec<Invoice> = store.get_or_default(keys::INVOICES);
    let Some(inv) = select_invoice(&invoices, "Select invoice:") else {
        return Ok(());
    };

    let header: String = store.get_or_default(keys::INVOICE_HEADER);
    let footer: String = store.get_or_default(keys::INVOICE_FOOTER);

    if !header.is_empty() {
        println!("\n{header}");
    }
    let kind_label = match inv.kind {
        InvoiceType::Invoice => "INVOICE",
        InvoiceType::Proforma => "PROFORMA",
    };
    println!("\n=== {} {} ===", kind_label, inv.invoice_number);
    println!("Date: {}   Due: {}", inv.date, inv.due_date);
    if let Some(src) = &inv.proforma_id {
        println!("Converted from proforma {}", src);
    }
    println!("Seller: {}", inv.seller.display_name());
    println!("Buyer:  {}, {} {}", inv.buyer.display_name(), inv.buyer.city, inv.buyer.address);

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Item"),
        Cell::new("Qty"),
        Cell::new("Unit"),
        Cell::new("Price"),
        Cell::new("Discount"),
        Cell::new("Line total"),
    ]);
    for (i, item) in inv.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.name),
            Cell::new(item.quantity),
            Cell::new(&item.unit),
            Cell::new(fmt_money(item.price)),
            Cell::new(fmt_money(item.discount)),
            Cell::new(fmt_money(item.line_total())),
        ]);
        if !item.description.is_empty() {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(&item.description).fg(Color::DarkGrey),
            ]);
        }
    }
    println!("{table}");

    println!("Subtotal:         {}", fmt_money(inv.subtotal));
    println!("Overall discount: {}", fmt_money(inv.discount));
    println!("Tax ({}%):        {}", inv.tax_rate, fmt_money(inv.tax_amount));
    println!("TOTAL:            {}", fmt_money(inv.total));

    if let Some(acc) = &inv.bank_account {
        println!("\nPay to: {} — {}", acc.bank_name, acc.account_number);
        if !acc.iban.is_empty() {
            println!("IBAN: {}", acc.iban);
        }
    }
    if !inv.notes.is_empty() {
        println!("\nNotes: {}", inv.notes);
    }
    if !inv.signature.is_empty() {
        println!("\n[signed]");
    }
    if !footer.is_empty() {
        println!("\n{footer}");
    }
    Ok(())
}

fn select_invoice(invoices: &[Invoice], prompt: &str) -> Option<Invoice> {
    if invoices.is_empty() {
        println!("❌ No matching invoices found.");
        return None;
    }

    let sorted = sorted_for_listing(invoices);
    let options: Vec<String> = sorted
        .iter()
        .map(|inv| {
            format!(
                "{} | {} | {} | {}",
                inv.invoice_number,
                inv.date,
                inv.buyer.display_name(),
                fmt_money(inv.total)
            )
        })
        .collect();

    match Select::new(prompt, options).with_page_size(10).raw_prompt() {
        Ok(choice) => Some(sorted[choice.index].clone()),
        Err(_) => {
            println!("Cancelled");
            None
        }
    }
}

// ==========================================
// 4. Catalog Commands
// ==========================================

fn product_command(store: &mut FileStore, action: CatalogAction) -> Result<()> {
    let mut products: Vec<Product> = store.get_or_default(keys::PRODUCTS);
    match action {
        CatalogAction::Add => {
            let product = Product {
                id: String::new(),
                name: Text::new("Product/service name:").prompt().unwrap(),
                unit: Text::new("Unit (e.g. piece):").prompt().unwrap(),
                price: ask_amount("Unit price:", 0.0),
            };
            match upsert(product, &mut products)? {
                Upsert::Created => println!("✅ Product added."),
                Upsert::Replaced => println!("✅ Product updated."),
            }
            store.set_json(keys::PRODUCTS, &products)?;
        }
        CatalogAction::List => {
            let mut table = Table::new();
            table.set_header(vec![Cell::new("Name"), Cell::new("Unit"), Cell::new("Price")]);
            for p in &products {
                table.add_row(vec![
                    Cell::new(&p.name),
                    Cell::new(&p.unit),
                    Cell::new(fmt_money(p.price)),
                ]);
            }
            println!("{table}");
        }
        CatalogAction::Delete => {
            if products.is_empty() {
                println!("(No products)");
                return Ok(());
            }
            let options: Vec<String> = products.iter().map(|p| p.name.clone()).collect();
            if let Ok(choice) = Select::new("Delete product:", options).raw_prompt() {
                let id = products[choice.index].id.clone();
                remove(&id, &mut products);
                store.set_json(keys::PRODUCTS, &products)?;
                println!("✅ Deleted.");
            }
        }
    }
    Ok(())
}

fn customer_command(store: &mut FileStore, action: CatalogAction) -> Result<()> {
    let mut customers: Vec<Party> = store.get_or_default(keys::CUSTOMERS);
    match action {
        CatalogAction::Add => {
            let customer = wizard_party(Party::default(), "New Customer");
            upsert(customer, &mut customers)?;
            store.set_json(keys::CUSTOMERS, &customers)?;
            println!("✅ Customer saved.");
        }
        CatalogAction::List => {
            let mut table = Table::new();
            table.set_header(vec![Cell::new("Name"), Cell::new("City"), Cell::new("Address")]);
            for c in &customers {
                table.add_row(vec![
                    Cell::new(c.display_name()),
                    Cell::new(&c.city),
                    Cell::new(&c.address),
                ]);
            }
            println!("{table}");
        }
        CatalogAction::Delete => {
            if customers.is_empty() {
                println!("(No customers)");
                return Ok(());
            }
            let options: Vec<String> = customers.iter().map(|c| c.display_name().to_string()).collect();
            if let Ok(choice) = Select::new("Delete customer:", options).raw_prompt() {
                let id = customers[choice.index].id.clone();
                remove(&id, &mut customers);
                store.set_json(keys::CUSTOMERS, &customers)?;
                println!("✅ Deleted.");
            }
        }
    }
    Ok(())
}

fn account_command(store: &mut FileStore, action: CatalogAction) -> Result<()> {
    let mut accounts: Vec<BankAccount> = store.get_or_default(keys::BANK_ACCOUNTS);
    match action {
        CatalogAction::Add => {
            let account = BankAccount {
                id: String::new(),
                bank_name: Text::new("Bank name:").prompt().unwrap(),
                account_number: Text::new("Account number:").prompt().unwrap(),
                card_number: Text::new("Card number (optional):").prompt().unwrap(),
                iban: Text::new("IBAN (optional):").prompt().unwrap(),
            };
            upsert(account, &mut accounts)?;
            store.set_json(keys::BANK_ACCOUNTS, &accounts)?;
            println!("✅ Bank account saved.");
        }
        CatalogAction::List => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Bank"),
                Cell::new("Account"),
                Cell::new("Card"),
                Cell::new("IBAN"),
            ]);
            for acc in &accounts {
                table.add_row(vec![
                    Cell::new(&acc.bank_name),
                    Cell::new(&acc.account_number),
                    Cell::new(&acc.card_number),
                    Cell::new(&acc.iban),
                ]);
            }
            println!("{table}");
        }
        CatalogAction::Delete => {
            if accounts.is_empty() {
                println!("(No bank accounts)");
                return Ok(());
            }
            let options: Vec<String> = accounts
                .iter()
                .map(|a| format!("{} — {}", a.bank_name, a.account_number))
                .collect();
            if let Ok(choice) = Select::new("Delete bank account:", options).raw_prompt() {
                let id = accounts[choice.index].id.clone();
                remove(&id, &mut accounts);
                store.set_json(keys::BANK_ACCOUNTS, &accounts)?;
                println!("✅ Deleted.");
            }
        }
    }
    Ok(())
}

fn seller_wizard(store: &mut FileStore) -> Result<()> {
    let existing: Party = store.get_or_default(keys::SELLER);
    let mut seller = wizard_party(existing, "Seller Details (me)");
    seller.id = "seller".to_string();
    seller.validate()?;
    store.set_json(keys::SELLER, &seller)?;
    println!("✅ Seller details saved.");
    Ok(())
}

fn set_text_key(store: &mut FileStore, key: &str, prompt: &str) -> Result<()> {
    let current: String = store.get_or_default(key);
    let text = Text::new(prompt).with_default(&current).prompt().unwrap();
    store.set_json(key, &text)?;
    println!("✅ Saved.");
    Ok(())
}

// ==========================================
// 5. Backup & Restore
// ==========================================

fn backup_command(store: &FileStore, output: Option<PathBuf>) -> Result<()> {
    let path = output
        .unwrap_or_else(|| PathBuf::from(backup_file_name(Local::now().date_naive())));
    let doc = backup(store);
    fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
    println!("✅ Backup written: {}", path.display());
    Ok(())
}

fn restore_command(store: &mut FileStore, file: PathBuf) -> Result<()> {
    let text = fs::read_to_string(&file)?;

    // Restore replaces everything; make that unmistakable before touching the
    // store.
    let sure = Confirm::new("Restoring replaces ALL current data. Continue?")
        .with_default(false)
        .prompt()
        .unwrap();
    if !sure {
        println!("Cancelled");
        return Ok(());
    }

    restore(&text, store)?;
    println!("✅ Restore complete.");
    Ok(())
}

// ==========================================
// 6. Config & Utilities
// ==========================================

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "faktor", "app") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).ok();
        }
        return config_dir.join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

fn load_settings() -> Option<AppSettings> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

fn setup_config_wizard() -> AppSettings {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings();
    let default_val = current
        .map(|s| s.data_root)
        .unwrap_or_else(|| "~/Documents/Faktor".to_string());

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Data Directory")
        .pick_folder();

    let new_root = if let Some(path) = picked_path {
        path.to_string_lossy().to_string()
    } else {
        println!("❌ No folder selected. Falling back to manual input.");
        Text::new("Enter data directory:")
            .with_default(&default_val)
            .prompt()
            .unwrap()
    };

    let settings = AppSettings { data_root: new_root };

    let path = get_config_path();
    let toml_str = toml::to_string_pretty(&settings).unwrap();
    fs::write(&path, toml_str).expect("Failed to save settings");
    println!("✅ Settings saved.");
    settings
}

fn expand_home_dir(path: &str) -> String {
    if path.starts_with("~") {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen("~", &home, 1);
        }
    }
    path.to_string()
}

/// Grouped-digit money formatting. Amounts are whole rials in practice but
/// fractional inputs still render.
fn fmt_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
