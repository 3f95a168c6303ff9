//! Dependency-closure resolution
//!
//! Computes every module reachable from a list of reference tokens. Each
//! matching pass works on its own pool of catalog entries: an entry consumed
//! by one token is unavailable to the remaining tokens of the same pass, so a
//! single ambiguous name never matches two same-named modules. Expansion of a
//! matched module restarts from the full catalog, which lets sibling branches
//! share a dependency. Each catalog entry is expanded at most once, so cyclic
//! reference graphs terminate; same-named entries are expanded separately.

use crate::catalog::ModuleCatalog;
use crate::types::{Module, ReferenceToken};
use asmpack_core::ModuleId;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Matched modules of one pass together with the next one to expand
struct Frame<'a> {
    matched: Vec<&'a Module>,
    next: usize,
}

/// Resolver over a catalog snapshot
pub struct ClosureResolver<'a> {
    catalog: &'a ModuleCatalog,
}

impl<'a> ClosureResolver<'a> {
    /// Create a resolver borrowing the session's catalog
    pub fn new(catalog: &'a ModuleCatalog) -> Self {
        Self { catalog }
    }

    /// Run a single matching pass of `references` against the full catalog.
    ///
    /// Tokens are processed last to first. An identifier token takes the
    /// first pooled module with that identifier. A name token takes the first
    /// pooled module, in catalog order, whose name is any of this pass's
    /// still-pending name tokens; that name is then no longer pending.
    /// Tokens that match nothing are dropped.
    pub fn match_references(&self, references: &[ReferenceToken]) -> Vec<&'a Module> {
        self.assign(references)
            .into_iter()
            .filter_map(|(_, module)| module)
            .collect()
    }

    /// The same pass as [`match_references`](Self::match_references), keeping
    /// each token next to the module it consumed, in processing order.
    ///
    /// A name token may consume a module named by another pending token of
    /// the same list, so the pairing can differ from a plain name lookup.
    pub fn assign<'r>(
        &self,
        references: &'r [ReferenceToken],
    ) -> Vec<(&'r ReferenceToken, Option<&'a Module>)> {
        let modules = self.catalog.modules();
        let mut pooled = vec![true; modules.len()];
        let mut pending: Vec<&str> = references.iter().filter_map(|r| r.as_name()).collect();
        let mut assigned = Vec::with_capacity(references.len());

        for token in references.iter().rev() {
            let hit = match token {
                ReferenceToken::ById(id) => {
                    (0..modules.len()).find(|&i| pooled[i] && &modules[i].id == id)
                }
                ReferenceToken::ByName(_) => {
                    let hit = (0..modules.len()).find_map(|i| {
                        if !pooled[i] {
                            return None;
                        }
                        pending
                            .iter()
                            .position(|name| *name == modules[i].name)
                            .map(|slot| (i, slot))
                    });
                    hit.map(|(i, slot)| {
                        pending.remove(slot);
                        i
                    })
                }
            };

            match hit {
                Some(i) => {
                    let module = &modules[i];
                    if token.as_name().is_some() && self.catalog.is_ambiguous(&module.name) {
                        debug!(
                            token = %token,
                            name = %module.name,
                            id = %module.id,
                            "name reference matched one of several same-named modules"
                        );
                    }
                    pooled[i] = false;
                    assigned.push((token, Some(module)));
                }
                None => {
                    trace!(token = %token, "reference matched nothing");
                    assigned.push((token, None));
                }
            }
        }

        assigned
    }

    /// Every module reachable from `references`, in discovery order, with
    /// repeats.
    ///
    /// The sequence is the direct matches of `references`, followed for each
    /// of them by the expansion of its own references, depth first. A module
    /// is expanded only the first time it is reached; another module with the
    /// same display name is still expanded.
    pub fn discover(&self, references: &[ReferenceToken]) -> Vec<&'a Module> {
        let root = self.match_references(references);
        let mut discovered = root.clone();
        let mut expanded: HashSet<&'a ModuleId> = HashSet::new();
        let mut stack = vec![Frame {
            matched: root,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.matched.len() {
                stack.pop();
                continue;
            }
            let module = frame.matched[frame.next];
            frame.next += 1;

            if !expanded.insert(&module.id) {
                continue;
            }

            let found = self.match_references(&module.references);
            trace!(module = %module.name, found = found.len(), "expanded module");
            discovered.extend(found.iter().copied());
            stack.push(Frame {
                matched: found,
                next: 0,
            });
        }

        discovered
    }

    /// The closure of `references`: every reachable module once, keyed by
    /// display name, in order of first discovery
    pub fn resolve_closure(&self, references: &[ReferenceToken]) -> Vec<&'a Module> {
        dedup_by_name(self.discover(references))
    }
}

/// Keep the first module for each display name, preserving order
pub fn dedup_by_name<'a>(modules: Vec<&'a Module>) -> Vec<&'a Module> {
    let mut seen = HashSet::new();
    modules
        .into_iter()
        .filter(|m| seen.insert(m.name.as_str()))
        .collect()
}

/// Convenience wrapper for a one-off resolution
pub fn resolve_closure<'a>(
    references: &[ReferenceToken],
    catalog: &'a ModuleCatalog,
) -> Vec<&'a Module> {
    ClosureResolver::new(catalog).resolve_closure(references)
}
