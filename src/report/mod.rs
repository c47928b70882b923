//! Report-building core: the aggregation engine joining catalogue records
//! and the table builder turning the join into styled rows.

pub mod aggregate;
pub mod table;

pub use aggregate::{Category, CatalogueAggregate, DefinitionRecord, RoleGrantInfo};
pub use table::ReportOptions;
