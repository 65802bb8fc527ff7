// Theme toggle
//
// The active theme is read from the class list of the root element.

use crate::error::Result;
use crate::landing;
use crate::scenario::{ScenarioCase, ScenarioContext, Suite, ensure};
use crate::snapshot::{Probe, Snapshot, expect_changed, expect_unchanged};
use crate::surface::ElementRef;
use tracing::debug;

pub(super) fn cases() -> Vec<ScenarioCase> {
    vec![
        case!(Suite::Theme, "shows the theme toggle" => toggle_visible),
        case!(Suite::Theme, "switches between dark and light" => switches_theme),
        case!(Suite::Theme, "applies a background after toggling" => styles_after_toggle),
        case!(Suite::Theme, "toggling is idempotent in pairs" => toggles_repeatedly),
        case!(Suite::Theme, "shows an icon for the current theme" => icon_for_theme),
        case!(Suite::Theme, "keeps the theme across sections" => persists_across_sections),
        case!(Suite::Theme, "applies the theme to components" => applies_to_components),
    ]
}

// Flips the theme and returns the root class before and after
async fn toggle(ctx: &ScenarioContext<'_>, root: &ElementRef) -> Result<(Snapshot, Snapshot)> {
    let (before, after) = ctx
        .click_and_wait(&landing::theme_toggle(), root, &Probe::Class)
        .await?;
    debug!(before = %before, after = %after, "Toggled theme");
    Ok((before, after))
}

async fn toggle_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::theme_toggle()).to_be_visible().await
}

async fn switches_theme(ctx: &ScenarioContext<'_>) -> Result<()> {
    let root = ctx.resolve(&landing::html_root()).await?;
    let (before, after) = toggle(ctx, &root).await?;
    expect_changed(&before, &after)
}

async fn styles_after_toggle(ctx: &ScenarioContext<'_>) -> Result<()> {
    let root = ctx.resolve(&landing::html_root()).await?;
    toggle(ctx, &root).await?;

    let body = ctx.resolve(&landing::body()).await?;
    let background = ctx
        .capture(&body, &Probe::computed_style("background-color"))
        .await?;
    ensure(
        background.value().is_some_and(|v| !v.is_empty()),
        "body has a background color",
        "a computed background-color",
        &background,
    )
}

async fn toggles_repeatedly(ctx: &ScenarioContext<'_>) -> Result<()> {
    let root = ctx.resolve(&landing::html_root()).await?;

    let (initial, first) = toggle(ctx, &root).await?;
    expect_changed(&initial, &first)?;

    let (_, second) = toggle(ctx, &root).await?;
    expect_unchanged(&initial, &second)?;

    let (_, third) = toggle(ctx, &root).await?;
    expect_unchanged(&first, &third)
}

async fn icon_for_theme(ctx: &ScenarioContext<'_>) -> Result<()> {
    let icon = landing::theme_icon();
    ctx.expect(&icon).to_be_visible().await?;

    let root = ctx.resolve(&landing::html_root()).await?;
    toggle(ctx, &root).await?;

    ctx.expect(&icon).to_be_visible().await
}

async fn persists_across_sections(ctx: &ScenarioContext<'_>) -> Result<()> {
    let root = ctx.resolve(&landing::html_root()).await?;
    let (_, toggled) = toggle(ctx, &root).await?;

    for section in [landing::features(), landing::pricing(), landing::contact()] {
        ctx.scroll_to(&section).await?;
        let current = ctx.capture(&root, &Probe::Class).await?;
        expect_unchanged(&toggled, &current)?;
    }
    Ok(())
}

async fn applies_to_components(ctx: &ScenarioContext<'_>) -> Result<()> {
    let root = ctx.resolve(&landing::html_root()).await?;
    let cards = landing::cards();
    let buttons = landing::buttons();

    toggle(ctx, &root).await?;
    ctx.scroll_to_bottom().await?;
    ctx.expect(&cards).to_be_attached().await?;
    ctx.expect(&buttons).to_be_attached().await?;

    ctx.scroll_to_top().await?;
    toggle(ctx, &root).await?;
    ctx.expect(&cards).to_be_visible().await?;
    ctx.expect(&buttons).to_be_visible().await
}
