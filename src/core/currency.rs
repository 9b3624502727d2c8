//! Rupiah amount formatting

use num_format::{CustomFormat, Grouping, ToFormattedString};
use std::sync::LazyLock;

/// Indonesian grouping: thousands separated by `.`
static RUPIAH_FORMAT: LazyLock<CustomFormat> = LazyLock::new(|| {
    CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(".")
        .minus_sign("-")
        .build()
        .expect("rupiah number format is valid")
});

/// Render a whole-Rupiah amount, e.g. `582901` → `Rp 582.901`
///
/// Rupiah amounts carry no decimal places.
pub fn format_rupiah(amount: u128) -> String {
    format!("Rp {}", amount.to_formatted_string(&*RUPIAH_FORMAT))
}
