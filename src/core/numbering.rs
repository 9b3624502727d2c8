//! Default invoice numbers for new invoices
//!
//! `INV` + 2-digit year + 2-digit month + 2-digit random suffix, e.g.
//! `INV250107`. The value is a convenience default offered by the add form:
//! it goes through the same validator as a typed number, and nothing checks
//! it against numbers already in use.

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;

/// Build a number for `date` with a random two-digit suffix
pub fn generate_invoice_number<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u32 = rng.gen_range(0..100);
    format!(
        "INV{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        suffix
    )
}

/// Build a number for today using the thread-local generator
pub fn next_invoice_number() -> String {
    generate_invoice_number(Local::now().date_naive(), &mut rand::thread_rng())
}
