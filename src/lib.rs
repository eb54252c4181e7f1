//! # Katagami - Schema-Driven Forms for Database Records
//!
//! **Katagami** builds input forms from the schema of a database record and writes
//! submitted values back onto it. A record describes its fields, keys and foreign-key
//! relations; Katagami decides which widget fits each field, fills relation fields
//! with options loaded from the target table, and on submission rebuilds dates from
//! their parts, assigns every known field and inserts or updates the record.
//!
//! ## Core Workflow
//!
//! 1.  **Describe Your Record**: Implement `Record` (and optionally the `FormHooks`
//!     callbacks) for your row type, or use `memory::MemoryRecord`.
//! 2.  **Assemble**: Use `FormAssembler::builder` with a `FormConfig` and a
//!     `RelationSource` to turn a record into a `FormSpec`.
//! 3.  **Render**: Hand the `FormSpec` to your toolkit. It is plain data: widgets,
//!     groups, rules and the current values as defaults.
//! 4.  **Bind**: Pass the submitted values to `SubmissionBinder::process`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use katagami::prelude::*;
//! use katagami::memory::{MemoryRecord, MemoryStore, MemoryTable};
//!
//! fn main() -> Result<()> {
//!     let categories = MemoryTable::new("category")
//!         .key("id")
//!         .row([("id", Value::from(1)), ("name", Value::from("Books"))])
//!         .row([("id", Value::from(2)), ("name", Value::from("Music"))]);
//!     let store = MemoryStore::new().with_table(categories);
//!
//!     let mut product = MemoryRecord::new("product")
//!         .column("id", FieldType::Integer)
//!         .column("title", FieldType::ShortText)
//!         .column("category_id", FieldType::Integer)
//!         .column("released", FieldType::Date)
//!         .key("id")
//!         .link("category_id", Relation::new("category", "id"));
//!
//!     let config = FormConfig::default().with_display_field("name");
//!     let assembler = FormAssembler::builder(&config).with_relations(&store).build();
//!     let form = assembler.assemble(&product, FormHints::default());
//!     println!("{}", format_form(&form));
//!
//!     let posted = PostedValues::new()
//!         .with("title", "Dune")
//!         .with("category_id", 1)
//!         .with("released", DateParts::new(1965, 8, 1));
//!     let outcome = SubmissionBinder::new(&config).process(&mut product, &posted)?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod form;
pub mod memory;
pub mod prelude;
pub mod schema;
pub mod value;
pub mod widget;
