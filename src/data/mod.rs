/// Data layer: core types, loading, and text annotation.
///
/// Architecture:
/// ```text
///    .csv
///      │
///      ▼
///  ┌──────────┐
///  │  loader   │  parse file → Table (all cells text, empty → null)
///  └──────────┘
///      │
///      ▼
///  ┌──────────┐
///  │  Table    │  ordered columns, rows of cells; trim via drop_null
///  └──────────┘
///      │
///      ├──────────────┬───────────────┐
///      ▼              ▼               ▼
///  ┌──────────┐  ┌──────────┐  ┌──────────┐
///  │  filter   │  │  split    │  │  stats    │
///  │ mask/sel  │  │ list/exp  │  │ num/hist  │
///  └──────────┘  └──────────┘  └──────────┘
/// ```
///
/// Every operation takes its inputs by reference and returns a new mask or
/// table; nothing here mutates a table another view may hold.
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod split;
pub mod stats;
