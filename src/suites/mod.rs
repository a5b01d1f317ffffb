//! Scenario suites.
//!
//! Each suite module owns a catalog of independent scenarios and registers
//! itself through `inventory`, so the runner discovers everything that is
//! statically linked without a central list.

pub mod authors;
pub mod books;
pub mod integration;
pub mod security;

use verso_client::{check, Author, Book};
use verso_kernel::{Scenario, ScenarioError};

use crate::ctx::ScenarioCtx;

/// One registered suite: a label and its scenario constructor.
pub struct Suite {
    pub name: &'static str,
    pub scenarios: fn() -> Vec<Scenario<ScenarioCtx>>,
}

inventory::collect!(Suite);

/// Every registered scenario, in stable name order.
pub fn all() -> Vec<Scenario<ScenarioCtx>> {
    let mut scenarios: Vec<_> = inventory::iter::<Suite>
        .into_iter()
        .flat_map(|suite| (suite.scenarios)())
        .collect();
    scenarios.sort_by_key(|s| s.name());
    scenarios
}

/// Wraps an async scenario function into a [`Scenario`] descriptor.
macro_rules! scenario {
    ($name:literal, [$($group:ident),+ $(,)?], $body:path) => {{
        fn entry(ctx: &$crate::ctx::ScenarioCtx) -> verso_kernel::scenario::ScenarioFuture<'_> {
            Box::pin($body(ctx))
        }
        verso_kernel::Scenario::new(
            $name,
            &[$(verso_kernel::scenario::Group::$group),+],
            entry,
        )
    }};
}
pub(crate) use scenario;

/// Create a book, expecting success, and hand back the assigned id.
pub(crate) async fn create_book(ctx: &ScenarioCtx, book: &Book) -> Result<i32, ScenarioError> {
    let cap = ctx.books.create(book).await?;
    check::status(&cap, 200)?;
    let created: Book = cap.decode()?;
    check::that(created.id > 0, "created book should have a positive id")?;
    Ok(created.id)
}

/// Create an author, expecting success, and hand back the assigned id.
pub(crate) async fn create_author(
    ctx: &ScenarioCtx,
    author: &Author,
) -> Result<i32, ScenarioError> {
    let cap = ctx.authors.create(author).await?;
    check::status(&cap, 200)?;
    let created: Author = cap.decode()?;
    check::that(created.id > 0, "created author should have a positive id")?;
    Ok(created.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use verso_kernel::scenario::Group;

    #[test]
    fn every_registered_scenario_has_a_unique_name() {
        let scenarios = all();
        assert!(!scenarios.is_empty());
        let names: HashSet<_> = scenarios.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn all_four_suites_are_registered() {
        let names: HashSet<_> = inventory::iter::<Suite>
            .into_iter()
            .map(|s| s.name)
            .collect();
        for expected in ["books", "authors", "integration", "security"] {
            assert!(names.contains(expected), "missing suite {expected}");
        }
    }

    #[test]
    fn every_group_selects_at_least_one_scenario() {
        let scenarios = all();
        for group in Group::ALL {
            assert!(
                scenarios.iter().any(|s| s.in_group(*group)),
                "no scenario carries group {group}"
            );
        }
    }

    #[test]
    fn smoke_scenarios_are_a_strict_subset() {
        let scenarios = all();
        let smoke = scenarios.iter().filter(|s| s.in_group(Group::Smoke)).count();
        assert!(smoke > 0);
        assert!(smoke < scenarios.len());
    }
}
