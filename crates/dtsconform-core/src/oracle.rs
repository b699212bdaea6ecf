//! Assignability oracles
//!
//! The conformance engine never decides structural subtyping on its own. It
//! asks a [`TypeOracle`] whether a value of one type can be used where another
//! is expected, and treats the answer as ground truth.

use crate::error::OracleError;
use crate::module::TypeRepr;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::trace;

/// Answers "is `source` assignable to `target`".
pub trait TypeOracle: Sync {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError>;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &T {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        (**self).assignable(source, target)
    }
}

impl<T: TypeOracle + ?Sized> TypeOracle for Box<T> {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        (**self).assignable(source, target)
    }
}

/// Matches only identical signatures.
///
/// Two representations are assignable when their type parameters and type
/// text are equal. The declaration kind is ignored, so a `const f: () => void`
/// matches a `function f(): void`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityOracle;

impl TypeOracle for IdentityOracle {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        if target.text.trim().is_empty() {
            return Err(OracleError::Malformed("empty type text".to_string()));
        }
        Ok(source.type_parameters == target.type_parameters && source.text == target.text)
    }
}

/// Serialized form of a [`TableOracle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignabilityTable {
    /// Treat every type as assignable to itself
    #[serde(default)]
    pub reflexive: bool,

    /// Fail on type texts that appear nowhere in `pairs`
    #[serde(default)]
    pub strict: bool,

    /// `(source, target)` type texts that are assignable
    #[serde(default)]
    pub pairs: Vec<(String, String)>,
}

/// Oracle backed by a fixed assignability table keyed by type text.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    pairs: HashSet<(String, String)>,
    known: HashSet<String>,
    reflexive: bool,
    strict: bool,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reflexive(mut self) -> Self {
        self.reflexive = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn allow(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(source.into(), target.into());
        self
    }

    fn insert(&mut self, source: String, target: String) {
        self.known.insert(source.clone());
        self.known.insert(target.clone());
        self.pairs.insert((source, target));
    }

    fn check_known(&self, ty: &TypeRepr) -> Result<(), OracleError> {
        if self.strict && !self.known.contains(&ty.text) {
            return Err(OracleError::Unsupported(ty.text.clone()));
        }
        Ok(())
    }
}

impl From<AssignabilityTable> for TableOracle {
    fn from(table: AssignabilityTable) -> Self {
        let mut oracle = Self {
            reflexive: table.reflexive,
            strict: table.strict,
            ..Self::default()
        };
        for (source, target) in table.pairs {
            oracle.insert(source, target);
        }
        oracle
    }
}

impl TypeOracle for TableOracle {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        self.check_known(source)?;
        self.check_known(target)?;

        if self.reflexive && source.text == target.text {
            return Ok(true);
        }
        Ok(self
            .pairs
            .contains(&(source.text.clone(), target.text.clone())))
    }
}

/// Memoizes the answers of an inner oracle.
///
/// Only successful answers are cached; a failing query is retried by the next
/// caller and fails again on its own terms.
pub struct CachedOracle<O> {
    inner: O,
    cache: Mutex<HashMap<(TypeRepr, TypeRepr), bool>>,
}

impl<O: TypeOracle> CachedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct pairs answered so far.
    pub fn cached_queries(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: TypeOracle> TypeOracle for CachedOracle<O> {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        let key = (source.clone(), target.clone());
        if let Some(answer) = self
            .cache
            .lock()
            .map_err(|e| OracleError::Process(format!("oracle cache poisoned: {e}")))?
            .get(&key)
        {
            trace!("Cached answer for {} <: {}", source, target);
            return Ok(*answer);
        }

        let answer = self.inner.assignable(source, target)?;
        self.cache
            .lock()
            .map_err(|e| OracleError::Process(format!("oracle cache poisoned: {e}")))?
            .insert(key, answer);
        Ok(answer)
    }
}
