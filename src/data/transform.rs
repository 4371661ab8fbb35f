//! Pure table stages. Each takes a table and returns a new one.

use super::model::{Column, LaptopRow, LaptopTable, PriceCategory, RawLaptop};
use super::storage::normalize_storage;

/// Column order after reshaping: storage type before storage size.
pub const COLUMN_ORDER: [Column; 12] = [
    Column::Brand,
    Column::Processor,
    Column::Ram,
    Column::StorageType,
    Column::StorageSize,
    Column::Gpu,
    Column::ScreenSize,
    Column::Resolution,
    Column::BatteryLife,
    Column::Weight,
    Column::OperatingSystem,
    Column::Price,
];

/// Upper (inclusive) price bounds of every category except `Luxury`.
pub const PRICE_THRESHOLDS: [(f64, PriceCategory); 3] = [
    (800.0, PriceCategory::LowEnd),
    (1500.0, PriceCategory::MidEnd),
    (3000.0, PriceCategory::HighEnd),
];

/// Split every storage descriptor into type and size (GB).
///
/// Columns come out in input order with the storage size placed before the
/// storage type, as produced by splitting the descriptor.
pub fn normalize(raw: &[RawLaptop]) -> LaptopTable {
    let rows: Vec<LaptopRow> = raw
        .iter()
        .map(|r| {
            let storage = normalize_storage(&r.storage);
            LaptopRow {
                brand: r.brand.clone(),
                processor: r.processor.clone(),
                ram_gb: r.ram_gb,
                storage_type: storage.kind,
                storage_size_gb: storage.size_gb,
                gpu: r.gpu.clone(),
                screen_size_inch: r.screen_size_inch,
                resolution: r.resolution.clone(),
                battery_life_hours: r.battery_life_hours,
                weight_kg: r.weight_kg,
                operating_system: r.operating_system.clone(),
                price: r.price,
                price_category: None,
            }
        })
        .collect();

    let unparsed = rows.iter().filter(|r| r.storage_size_gb.is_none()).count();
    if unparsed > 0 {
        log::warn!("{unparsed} storage descriptor(s) had no GB/TB size");
    }

    LaptopTable {
        columns: vec![
            Column::Brand,
            Column::Processor,
            Column::Ram,
            Column::Gpu,
            Column::ScreenSize,
            Column::Resolution,
            Column::BatteryLife,
            Column::Weight,
            Column::OperatingSystem,
            Column::Price,
            Column::StorageSize,
            Column::StorageType,
        ],
        rows,
    }
}

/// Return the table with only `order`'s columns, in that order.
pub fn reorder(table: &LaptopTable, order: &[Column]) -> LaptopTable {
    LaptopTable {
        columns: order.to_vec(),
        rows: table.rows.clone(),
    }
}

/// Bucket a price into its category.
///
/// Bins are closed on the right: `(0, 800]`, `(800, 1500]`, `(1500, 3000]`,
/// `(3000, ∞)`. Non-positive and NaN prices have no category.
pub fn price_category(price: f64) -> Option<PriceCategory> {
    if price.is_nan() || price <= 0.0 {
        return None;
    }
    PRICE_THRESHOLDS
        .iter()
        .find(|(upper, _)| price <= *upper)
        .map(|(_, cat)| *cat)
        .or(Some(PriceCategory::Luxury))
}

/// Return the table with a `Price Category` column appended.
pub fn categorize_prices(table: &LaptopTable) -> LaptopTable {
    let rows = table
        .rows
        .iter()
        .map(|r| LaptopRow {
            price_category: price_category(r.price),
            ..r.clone()
        })
        .collect();

    let mut columns = table.columns.clone();
    if !columns.contains(&Column::PriceCategory) {
        columns.push(Column::PriceCategory);
    }

    LaptopTable { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(brand: &str, storage: &str, price: f64) -> RawLaptop {
        RawLaptop {
            brand: brand.to_string(),
            processor: "Intel i5".to_string(),
            ram_gb: 8,
            storage: storage.to_string(),
            gpu: "Integrated".to_string(),
            screen_size_inch: 14.0,
            resolution: "1920x1080".to_string(),
            battery_life_hours: 8.0,
            weight_kg: 1.5,
            operating_system: "Windows".to_string(),
            price,
        }
    }

    #[test]
    fn normalize_splits_storage() {
        let table = normalize(&[raw("HP", "1TB HDD", 900.0), raw("HP", "eMMC", 300.0)]);

        assert_eq!(table.rows[0].storage_size_gb, Some(1024.0));
        assert_eq!(table.rows[0].storage_type.as_deref(), Some("HDD"));
        assert_eq!(table.rows[1].storage_size_gb, None);
        assert_eq!(table.columns.last(), Some(&Column::StorageType));
    }

    #[test]
    fn reorder_does_not_touch_input() {
        let table = normalize(&[raw("Asus", "512GB SSD", 1000.0)]);
        let reordered = reorder(&table, &COLUMN_ORDER);

        assert_eq!(reordered.columns, COLUMN_ORDER.to_vec());
        assert_eq!(reordered.rows, table.rows);
        assert_ne!(table.columns, reordered.columns);
    }

    #[test]
    fn representative_prices() {
        assert_eq!(price_category(750.0), Some(PriceCategory::LowEnd));
        assert_eq!(price_category(1200.0), Some(PriceCategory::MidEnd));
        assert_eq!(price_category(2000.0), Some(PriceCategory::HighEnd));
        assert_eq!(price_category(5000.0), Some(PriceCategory::Luxury));
    }

    #[test]
    fn thresholds_are_right_inclusive() {
        assert_eq!(price_category(800.0), Some(PriceCategory::LowEnd));
        assert_eq!(price_category(800.01), Some(PriceCategory::MidEnd));
        assert_eq!(price_category(1500.0), Some(PriceCategory::MidEnd));
        assert_eq!(price_category(1500.01), Some(PriceCategory::HighEnd));
        assert_eq!(price_category(3000.0), Some(PriceCategory::HighEnd));
        assert_eq!(price_category(3000.01), Some(PriceCategory::Luxury));
    }

    #[test]
    fn non_positive_prices_have_no_category() {
        assert_eq!(price_category(0.0), None);
        assert_eq!(price_category(-10.0), None);
        assert_eq!(price_category(f64::NAN), None);
    }

    #[test]
    fn categorize_appends_column_once() {
        let table = reorder(
            &normalize(&[raw("Acer", "256GB SSD", 450.0), raw("MSI", "2TB SSD", 3500.0)]),
            &COLUMN_ORDER,
        );
        let once = categorize_prices(&table);
        let twice = categorize_prices(&once);

        assert_eq!(once.rows[0].price_category, Some(PriceCategory::LowEnd));
        assert_eq!(once.rows[1].price_category, Some(PriceCategory::Luxury));
        assert_eq!(twice.columns, once.columns);
        assert_eq!(once.columns.last(), Some(&Column::PriceCategory));
        assert!(table.rows.iter().all(|r| r.price_category.is_none()));
    }
}
