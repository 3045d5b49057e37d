//! # woa-merge
//!
//! Merge per-period climatology files (months or seasons) into one file with
//! an unlimited record dimension.
//!
//! Monthly and seasonal fields are analysed on fewer depth levels than the
//! annual field. A merge can splice the annual field's deeper levels under
//! each period so every record has the full output depth.
//!
//! # Architecture
//!
//! ```text
//! merge_series()                    (merge.rs)
//!   ├─ SeriesSchema::derive()       (schema.rs)   template + annual -> layout
//!   ├─ SeriesBuilder::create()      (builder.rs)  dims, attributes, axes
//!   ├─ SeriesBuilder::write_period()              own | annual | fill levels
//!   │    └─ splice_ranges()         (splice.rs)
//!   └─ SeriesBuilder::finish()      -> Series
//! ```

mod builder;
mod config;
mod error;
mod merge;
mod schema;
mod splice;

pub use builder::{Series, SeriesBuilder, SpliceRecord};
pub use config::{MergeConfig, RecordAxis};
pub use error::MergeError;
pub use merge::merge_series;
pub use schema::{AxisSource, AxisVariable, DataVariable, OutputDimension, SeriesSchema};
pub use splice::{SpliceRanges, splice_ranges};
