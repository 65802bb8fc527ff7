// Scenario catalog
//
// One module per page area. Every scenario starts from a fresh page at the
// entry URL, so cases can run in any order.

// Wraps an async scenario body into a `ScenarioCase`.
macro_rules! case {
    ($suite:expr, $name:expr => $body:ident) => {
        $crate::scenario::ScenarioCase::new($name, $suite, None, |ctx| Box::pin($body(ctx)))
    };
    ($suite:expr, $name:expr, $viewport:expr => $body:ident) => {
        $crate::scenario::ScenarioCase::new($name, $suite, $viewport, |ctx| {
            Box::pin($body(ctx))
        })
    };
}

mod carousel;
mod contact;
mod responsive;
mod sections;
mod smoke;
mod theme;

use crate::scenario::ScenarioCase;

/// Every scenario, suite by suite.
pub(crate) fn all() -> Vec<ScenarioCase> {
    let mut cases = smoke::cases();
    cases.extend(sections::cases());
    cases.extend(carousel::cases());
    cases.extend(theme::cases());
    cases.extend(contact::cases());
    cases.extend(responsive::cases());
    cases
}
