/// Data layer: core types, loading, and the pure reshaping stages.
///
/// Architecture:
/// ```text
///  laptop_prices.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawLaptop>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  normalize (storage) → reorder → categorize prices
///   └───────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaptopTable  │  Vec<LaptopRow>, visible columns
///   └─────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod storage;
pub mod transform;
