//! # Domain Store
//!
//! Poll-based access to named domains. A lookup never blocks: a domain that
//! has not been supplied yet answers [`Readiness::Pending`] and is recorded
//! as requested, so the host knows what to load next.
//!
//! Combined domains are declared by name and built lazily the first time a
//! lookup finds every part ready.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use hexlex_core::Readiness;
use parking_lot::RwLock;

use crate::domain::Domain;
use crate::error::{LexiconError, LexiconResult};

/// Anything that can answer domain lookups.
pub trait DomainSource {
    /// Returns the named domain, or pending if it is not available yet.
    fn lookup_domain(&self, name: &str) -> Readiness<Arc<Domain>>;
}

impl<T: DomainSource + ?Sized> DomainSource for Arc<T> {
    fn lookup_domain(&self, name: &str) -> Readiness<Arc<Domain>> {
        (**self).lookup_domain(name)
    }
}

#[derive(Debug)]
enum Slot {
    Ready(Arc<Domain>),
    Combined(Vec<String>),
    Requested,
    /// A combination that could not be built. Cleared by the next insert
    /// or declaration under the same name.
    Failed(LexiconError),
}

/// The shared domain store.
///
/// # Thread Safety
///
/// Lookups take a read lock; inserts and lazy combination take a short
/// write lock. Domains are never mutated after insertion.
#[derive(Debug, Default)]
pub struct Lexicon {
    slots: RwLock<HashMap<String, Slot>>,
}

impl Lexicon {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a built domain under its own name, replacing any previous
    /// value or request.
    pub fn insert(&self, domain: Domain) -> Arc<Domain> {
        let domain = Arc::new(domain);
        self.slots
            .write()
            .insert(domain.name().to_owned(), Slot::Ready(Arc::clone(&domain)));
        domain
    }

    /// Parses a frequency list and supplies it.
    ///
    /// # Errors
    ///
    /// Propagates [`Domain::parse`] errors.
    pub fn insert_text(&self, name: &str, text: &str) -> LexiconResult<Arc<Domain>> {
        Ok(self.insert(Domain::parse(name, text)?))
    }

    /// Declares `name` as the union of `parts`.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::CombineCycle`] if a part is, or transitively
    /// combines, `name` itself, and [`LexiconError::EmptyDomain`] if `parts`
    /// is empty.
    pub fn declare_combined(&self, name: &str, parts: &[String]) -> LexiconResult<()> {
        if parts.is_empty() {
            return Err(LexiconError::EmptyDomain(name.to_owned()));
        }
        let mut slots = self.slots.write();
        let mut stack: Vec<&str> = parts.iter().map(String::as_str).collect();
        let mut visited = BTreeSet::new();
        while let Some(part) = stack.pop() {
            if part == name {
                return Err(LexiconError::CombineCycle(name.to_owned()));
            }
            if !visited.insert(part) {
                continue;
            }
            if let Some(Slot::Combined(inner)) = slots.get(part) {
                stack.extend(inner.iter().map(String::as_str));
            }
        }
        slots.insert(name.to_owned(), Slot::Combined(parts.to_vec()));
        Ok(())
    }

    /// Marks a domain as wanted without looking it up.
    pub fn request(&self, name: &str) {
        let mut slots = self.slots.write();
        if !slots.contains_key(name) {
            slots.insert(name.to_owned(), Slot::Requested);
        }
    }

    /// Names requested but not yet supplied, sorted.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .slots
            .read()
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Requested))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns true if the domain is built and available.
    #[must_use]
    pub fn is_ready(&self, name: &str) -> bool {
        matches!(self.slots.read().get(name), Some(Slot::Ready(_)))
    }

    /// Why a combined domain could not be built, if it failed.
    #[must_use]
    pub fn failure(&self, name: &str) -> Option<LexiconError> {
        match self.slots.read().get(name) {
            Some(Slot::Failed(err)) => Some(err.clone()),
            _ => None,
        }
    }

    /// Drops a domain. It will be requested again on next lookup.
    pub fn remove(&self, name: &str) -> bool {
        self.slots.write().remove(name).is_some()
    }

    fn combine(&self, name: &str, parts: &[String]) -> Readiness<Arc<Domain>> {
        let mut ready = Vec::with_capacity(parts.len());
        for part in parts {
            match self.lookup_domain(part) {
                Readiness::Ready(domain) => ready.push(domain),
                Readiness::Pending => return Readiness::Pending,
            }
        }
        let refs: Vec<&Domain> = ready.iter().map(AsRef::as_ref).collect();
        self.settle(name, Domain::combine(name, &refs))
    }

    /// Stores the outcome of building a combined domain. A failure is kept
    /// so later lookups answer pending without rebuilding.
    fn settle(&self, name: &str, built: LexiconResult<Domain>) -> Readiness<Arc<Domain>> {
        match built {
            Ok(domain) => {
                tracing::debug!(target: "hexlex::lexicon", domain = name, "combined domain built");
                Readiness::Ready(self.insert(domain))
            }
            Err(err) => {
                tracing::warn!(target: "hexlex::diagnostics", domain = name, %err, "combined domain failed");
                self.slots.write().insert(name.to_owned(), Slot::Failed(err));
                Readiness::Pending
            }
        }
    }
}

impl DomainSource for Lexicon {
    fn lookup_domain(&self, name: &str) -> Readiness<Arc<Domain>> {
        let parts = match self.slots.read().get(name) {
            Some(Slot::Ready(domain)) => return Readiness::Ready(Arc::clone(domain)),
            Some(Slot::Combined(parts)) => Some(parts.clone()),
            Some(Slot::Requested | Slot::Failed(_)) => return Readiness::Pending,
            None => None,
        };
        match parts {
            Some(parts) => self.combine(name, &parts),
            None => {
                self.request(name);
                tracing::debug!(target: "hexlex::lexicon", domain = name, "domain requested");
                Readiness::Pending
            }
        }
    }
}
