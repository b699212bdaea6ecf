//! Module conformance engine for declaration modules
//!
//! Decides, export by export, whether one module's public surface can stand in
//! for another's, using an external [`TypeOracle`] for assignability, and
//! aggregates the result into soundness, completeness and equivalence.

pub mod engine;
pub mod error;
pub mod module;
pub mod oracle;
pub mod report;

pub use engine::{relate, DirectionalRelation, MatchPolicy, Witness};
pub use error::{CoreError, OracleError};
pub use module::{DeclarationKind, Export, Module, ModuleBuilder, TypeRepr};
pub use oracle::{AssignabilityTable, CachedOracle, IdentityOracle, TableOracle, TypeOracle};
pub use report::{compare, ComparisonReport, RoleLabels};
