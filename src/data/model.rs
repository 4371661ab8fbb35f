use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the laptop table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, used as a group-by key.
/// Stored in `BTreeMap` keys downstream, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so CellValue can key a BTreeMap --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Whole floats print without a fraction ("512"), others keep it ("512.5").
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

impl From<Option<f64>> for CellValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(CellValue::Null, CellValue::Float)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(v: Option<&str>) -> Self {
        v.map_or(CellValue::Null, |s| CellValue::Text(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PriceCategory
// ---------------------------------------------------------------------------

/// Price segment, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceCategory {
    LowEnd,
    MidEnd,
    HighEnd,
    Luxury,
}

impl PriceCategory {
    pub const ALL: [PriceCategory; 4] = [
        PriceCategory::LowEnd,
        PriceCategory::MidEnd,
        PriceCategory::HighEnd,
        PriceCategory::Luxury,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceCategory::LowEnd => "Low-End",
            PriceCategory::MidEnd => "Mid-End",
            PriceCategory::HighEnd => "High-End",
            PriceCategory::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawLaptop – one row of the input CSV
// ---------------------------------------------------------------------------

/// A laptop listing exactly as it appears in the input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLaptop {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Processor")]
    pub processor: String,
    #[serde(rename = "RAM (GB)")]
    pub ram_gb: i64,
    /// Combined storage descriptor, e.g. `"512GB SSD"`.
    #[serde(rename = "Storage")]
    pub storage: String,
    #[serde(rename = "GPU")]
    pub gpu: String,
    #[serde(rename = "Screen Size (inch)")]
    pub screen_size_inch: f64,
    #[serde(rename = "Resolution")]
    pub resolution: String,
    #[serde(rename = "Battery Life (hours)")]
    pub battery_life_hours: f64,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: f64,
    #[serde(rename = "Operating System")]
    pub operating_system: String,
    #[serde(rename = "Price ($)")]
    pub price: f64,
}

// ---------------------------------------------------------------------------
// LaptopRow – a transformed listing
// ---------------------------------------------------------------------------

/// A listing after the storage descriptor has been split and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct LaptopRow {
    pub brand: String,
    pub processor: String,
    pub ram_gb: i64,
    pub storage_type: Option<String>,
    /// Storage capacity in GB; `None` when the descriptor had no known unit.
    pub storage_size_gb: Option<f64>,
    pub gpu: String,
    pub screen_size_inch: f64,
    pub resolution: String,
    pub battery_life_hours: f64,
    pub weight_kg: f64,
    pub operating_system: String,
    pub price: f64,
    /// Filled in by the price bucketing stage.
    pub price_category: Option<PriceCategory>,
}

// ---------------------------------------------------------------------------
// Column – addressable columns of a LaptopTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Brand,
    Processor,
    Ram,
    StorageType,
    StorageSize,
    Gpu,
    ScreenSize,
    Resolution,
    BatteryLife,
    Weight,
    OperatingSystem,
    Price,
    PriceCategory,
}

impl Column {
    /// Header name as shown in the preview and in the input file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Brand => "Brand",
            Column::Processor => "Processor",
            Column::Ram => "RAM (GB)",
            Column::StorageType => "Storage Type",
            Column::StorageSize => "Storage Size",
            Column::Gpu => "GPU",
            Column::ScreenSize => "Screen Size (inch)",
            Column::Resolution => "Resolution",
            Column::BatteryLife => "Battery Life (hours)",
            Column::Weight => "Weight (kg)",
            Column::OperatingSystem => "Operating System",
            Column::Price => "Price ($)",
            Column::PriceCategory => "Price Category",
        }
    }

    pub fn value(self, row: &LaptopRow) -> CellValue {
        match self {
            Column::Brand => CellValue::Text(row.brand.clone()),
            Column::Processor => CellValue::Text(row.processor.clone()),
            Column::Ram => CellValue::Integer(row.ram_gb),
            Column::StorageType => row.storage_type.as_deref().into(),
            Column::StorageSize => row.storage_size_gb.into(),
            Column::Gpu => CellValue::Text(row.gpu.clone()),
            Column::ScreenSize => CellValue::Float(row.screen_size_inch),
            Column::Resolution => CellValue::Text(row.resolution.clone()),
            Column::BatteryLife => CellValue::Float(row.battery_life_hours),
            Column::Weight => CellValue::Float(row.weight_kg),
            Column::OperatingSystem => CellValue::Text(row.operating_system.clone()),
            Column::Price => CellValue::Float(row.price),
            Column::PriceCategory => row.price_category.map(PriceCategory::label).into(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// LaptopTable – the dataset flowing through the pipeline
// ---------------------------------------------------------------------------

/// Rows plus the ordered list of visible columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LaptopTable {
    pub columns: Vec<Column>,
    pub rows: Vec<LaptopRow>,
}

impl LaptopTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.price).collect()
    }
}
