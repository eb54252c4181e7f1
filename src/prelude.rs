//! Prelude module for convenient imports
//!
//! This module re-exports the types needed to describe a record, assemble its form
//! and bind a submission.
//!
//! # Example
//!
//! ```rust,no_run
//! use katagami::prelude::*;
//! use katagami::memory::Fixture;
//!
//! # fn run_example() -> Result<()> {
//! let fixture = Fixture::from_file("path/to/fixture.json")?;
//! let form = FormAssembler::builder(&fixture.config)
//!     .with_relations(&fixture.tables)
//!     .build()
//!     .assemble(&fixture.record, fixture.hints.clone());
//!
//! println!("{}", format_form(&form));
//! # Ok(())
//! # }
//! ```

// Assembly and binding
pub use crate::binding::{Clock, FixedClock, SubmissionBinder, SubmissionOutcome, SystemClock};
pub use crate::config::{DateStorage, FormConfig, InvalidDatePolicy};
pub use crate::form::{FormAssembler, FormItem, FormSpec, SubmitButton, WidgetGroup, format_form};

// Records and their schema
pub use crate::schema::{
    FieldType, FormHints, FormHooks, NoRelations, Record, Relation, RelationSource,
    RelationTable, Row,
};

// Values
pub use crate::value::{DateParts, DateTimeParts, FormValue, PostedValues, TimeParts, Value};

// Widgets
pub use crate::widget::{RuleKind, SelectOption, ValidationRule, WidgetKind, WidgetSpec};

// Error types
pub use crate::error::{BindError, ConfigError, FormWarning, RecordError, ValidationErrors};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
