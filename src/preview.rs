//! Console preview of the transformed table.

use tabled::builder::Builder;

use crate::data::model::{CellValue, LaptopTable};

/// Render the first `n` rows of `table` as an ASCII table, visible columns
/// only, in their current order.
pub fn head(table: &LaptopTable, n: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().map(ToString::to_string));

    for row in table.rows.iter().take(n) {
        builder.push_record(table.columns.iter().map(|c| match c.value(row) {
            CellValue::Null => "None".to_string(),
            value => value.to_string(),
        }));
    }

    builder.build().to_string()
}
