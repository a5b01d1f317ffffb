//! Scenario descriptors and group filtering.
//!
//! A scenario is a named, independently runnable async step function. The
//! descriptor is generic over the context type the application provides, so
//! this crate stays free of HTTP and fixture concerns.

use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ScenarioError;

/// Selection label for subsets of scenarios. Purely a filter — carries no
/// ordering or dependency semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Smoke,
    Regression,
    Security,
    Integration,
}

impl Group {
    pub const ALL: &'static [Group] = &[
        Group::Smoke,
        Group::Regression,
        Group::Security,
        Group::Integration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Smoke => "smoke",
            Group::Regression => "regression",
            Group::Security => "security",
            Group::Integration => "integration",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smoke" => Ok(Group::Smoke),
            "regression" => Ok(Group::Regression),
            "security" => Ok(Group::Security),
            "integration" => Ok(Group::Integration),
            other => Err(format!(
                "unknown group '{other}'; expected smoke/regression/security/integration"
            )),
        }
    }
}

/// A scenario body either completes or reports one [`ScenarioError`].
pub type ScenarioResult = Result<(), ScenarioError>;

/// Boxed future returned by a scenario body.
pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = ScenarioResult> + Send + 'a>>;

/// Entry point of one scenario, borrowing the shared run context.
pub type ScenarioFn<C> = for<'a> fn(&'a C) -> ScenarioFuture<'a>;

/// Descriptor for one scenario: a stable name, its group labels, and the
/// async body.
pub struct Scenario<C: 'static> {
    name: &'static str,
    groups: &'static [Group],
    run: ScenarioFn<C>,
}

impl<C> Scenario<C> {
    pub const fn new(name: &'static str, groups: &'static [Group], run: ScenarioFn<C>) -> Self {
        Self { name, groups, run }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn groups(&self) -> &'static [Group] {
        self.groups
    }

    pub fn in_group(&self, group: Group) -> bool {
        self.groups.contains(&group)
    }

    /// Execute the scenario body against the provided context.
    pub fn run<'a>(&self, ctx: &'a C) -> ScenarioFuture<'a> {
        (self.run)(ctx)
    }
}

impl<C> std::fmt::Debug for Scenario<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("groups", &self.groups)
            .finish()
    }
}

/// Keep only the scenarios matching `group`; `None` selects everything.
pub fn filter_by_group<C>(scenarios: Vec<Scenario<C>>, group: Option<Group>) -> Vec<Scenario<C>> {
    match group {
        None => scenarios,
        Some(group) => scenarios.into_iter().filter(|s| s.in_group(group)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullCtx;

    fn passing(_ctx: &NullCtx) -> ScenarioFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn sample() -> Vec<Scenario<NullCtx>> {
        vec![
            Scenario::new("a", &[Group::Smoke, Group::Regression], passing),
            Scenario::new("b", &[Group::Regression], passing),
            Scenario::new("c", &[Group::Security, Group::Regression], passing),
        ]
    }

    #[test]
    fn group_round_trips_through_str() {
        for group in Group::ALL {
            assert_eq!(group.as_str().parse::<Group>().unwrap(), *group);
        }
        assert!("nightly".parse::<Group>().is_err());
    }

    #[test]
    fn filter_none_keeps_everything() {
        assert_eq!(filter_by_group(sample(), None).len(), 3);
    }

    #[test]
    fn filter_selects_matching_groups_only() {
        let smoke = filter_by_group(sample(), Some(Group::Smoke));
        assert_eq!(smoke.len(), 1);
        assert_eq!(smoke[0].name(), "a");

        let security = filter_by_group(sample(), Some(Group::Security));
        assert_eq!(security.len(), 1);
        assert_eq!(security[0].name(), "c");
    }
}
