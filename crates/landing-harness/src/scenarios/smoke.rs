// Smoke checks
//
// The page loads, shows a title, some text and a navbar.

use crate::assertions::expect_title_matches;
use crate::error::Result;
use crate::landing;
use crate::scenario::{ScenarioCase, ScenarioContext, Suite, ensure};

pub(super) fn cases() -> Vec<ScenarioCase> {
    vec![
        case!(Suite::Smoke, "loads the home page" => loads_home_page),
        case!(Suite::Smoke, "has visible content" => has_visible_content),
        case!(Suite::Smoke, "has navigation" => has_navigation),
    ]
}

async fn loads_home_page(ctx: &ScenarioContext<'_>) -> Result<()> {
    expect_title_matches(ctx.surface(), ctx.config(), "Shadcn").await
}

async fn has_visible_content(ctx: &ScenarioContext<'_>) -> Result<()> {
    let text = ctx.text(&landing::body()).await?;
    let length = text.chars().count();
    ensure(
        length > 100,
        "body has content",
        "more than 100 characters",
        length,
    )
}

async fn has_navigation(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::navbar()).to_be_visible().await
}
