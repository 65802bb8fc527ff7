// Layout checks per viewport profile
//
// Sizes come from rendered bounding boxes in CSS pixels.

use crate::error::{Error, Result};
use crate::landing;
use crate::scenario::{ScenarioCase, ScenarioContext, Suite, ensure};
use crate::surface::BoundingBox;
use crate::target::TargetDescriptor;
use crate::viewport::ViewportProfile;
use tracing::debug;

const MOBILE: Option<ViewportProfile> = Some(ViewportProfile::Mobile);
const TABLET: Option<ViewportProfile> = Some(ViewportProfile::Tablet);
const DESKTOP: Option<ViewportProfile> = Some(ViewportProfile::Desktop);
const LARGE_DESKTOP: Option<ViewportProfile> = Some(ViewportProfile::LargeDesktop);

// Horizontal overflow tolerated before it counts as a scrollbar
const SCROLL_TOLERANCE: f64 = 20.0;

pub(super) fn cases() -> Vec<ScenarioCase> {
    let mut cases = vec![
        case!(Suite::Responsive, "mobile: shows navigation", MOBILE => navigation_visible),
        case!(Suite::Responsive, "mobile: stacks the hero", MOBILE => hero_with_heading),
        case!(Suite::Responsive, "mobile: cards span the screen", MOBILE => wide_feature_cards),
        case!(Suite::Responsive, "mobile: shows a testimonial", MOBILE => testimonial_visible),
        case!(Suite::Responsive, "mobile: contact form fits", MOBILE => contact_form_fits),
        case!(Suite::Responsive, "mobile: collapses navigation", MOBILE => collapsed_navigation),
        case!(Suite::Responsive, "mobile: footer fits", MOBILE => footer_fits),
        case!(Suite::Responsive, "mobile: stacks pricing cards", MOBILE => wide_pricing_cards),
        case!(Suite::Responsive, "tablet: shows navigation", TABLET => navigation_has_items),
        case!(Suite::Responsive, "tablet: lays out cards", TABLET => feature_cards_visible),
        case!(Suite::Responsive, "tablet: shows several testimonials", TABLET => several_testimonials),
        case!(Suite::Responsive, "tablet: shows the contact form", TABLET => contact_fields_visible),
        case!(Suite::Responsive, "tablet: hero fits", TABLET => hero_fits),
        case!(Suite::Responsive, "desktop: shows full navigation", DESKTOP => full_navigation),
        case!(Suite::Responsive, "desktop: lays out features in a grid", DESKTOP => feature_grid),
        case!(Suite::Responsive, "desktop: shows three testimonials", DESKTOP => three_testimonials),
        case!(Suite::Responsive, "desktop: shows the hero", DESKTOP => hero_with_heading),
        case!(Suite::Responsive, "desktop: shows pricing cards", DESKTOP => pricing_cards_visible),
        case!(Suite::Responsive, "desktop: contact form beside contact info", DESKTOP => contact_side_by_side),
        case!(Suite::Responsive, "desktop: no horizontal scrolling", DESKTOP => no_horizontal_scroll),
        case!(Suite::Responsive, "large desktop: constrains content width", LARGE_DESKTOP => constrained_container),
        case!(Suite::Responsive, "large desktop: shows every section", LARGE_DESKTOP => sections_reachable),
        case!(Suite::Responsive, "large desktop: spaces the hero", LARGE_DESKTOP => tall_hero),
    ];

    for profile in ViewportProfile::CROSS_VIEWPORT {
        let viewport = Some(profile);
        cases.push(case!(
            Suite::Responsive,
            format!("{}: shows the theme toggle", profile),
            viewport => theme_toggle_visible
        ));
        cases.push(case!(
            Suite::Responsive,
            format!("{}: renders the main sections", profile),
            viewport => main_sections_attached
        ));
        cases.push(case!(
            Suite::Responsive,
            format!("{}: buttons are large enough to tap", profile),
            viewport => tappable_buttons
        ));
    }
    cases
}

// Box of the target's first visible match, which must be rendered
async fn rendered_box(ctx: &ScenarioContext<'_>, target: &TargetDescriptor) -> Result<BoundingBox> {
    ctx.bounding_box(target).await?.ok_or_else(|| {
        Error::assertion(
            format!("{} is rendered", target.name()),
            "a bounding box",
            None,
        )
    })
}

async fn width_at_most(ctx: &ScenarioContext<'_>, target: &TargetDescriptor, max: f64) -> Result<()> {
    let bbox = rendered_box(ctx, target).await?;
    ensure(
        bbox.width <= max,
        format!("{} fits the viewport", target.name()),
        format!("width <= {}", max),
        bbox.width,
    )
}

// Cards may still be animating in; an unrendered card is not a layout failure
async fn width_above_if_rendered(
    ctx: &ScenarioContext<'_>,
    target: &TargetDescriptor,
    min: f64,
) -> Result<()> {
    match ctx.bounding_box(target).await? {
        Some(bbox) => ensure(
            bbox.width > min,
            format!("{} spans the screen", target.name()),
            format!("width > {}", min),
            bbox.width,
        ),
        None => Ok(()),
    }
}

async fn number(ctx: &ScenarioContext<'_>, expression: &str) -> Result<f64> {
    let value = ctx.surface().evaluate(expression).await?;
    value.as_f64().ok_or_else(|| {
        Error::InvalidArgument(format!("{} evaluated to {}, not a number", expression, value))
    })
}

async fn navigation_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::navbar()).to_be_visible().await
}

async fn hero_with_heading(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::hero()).to_be_visible().await?;
    ctx.expect(&landing::hero_heading()).to_be_visible().await
}

async fn wide_feature_cards(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::features()).await?;
    let cards = landing::cards();
    ctx.expect(&cards).to_be_visible().await?;
    width_above_if_rendered(ctx, &cards, 300.0).await
}

async fn testimonial_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::testimonials()).await?;
    ctx.expect(&landing::testimonial_items()).to_be_visible().await
}

async fn contact_form_fits(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::contact()).await?;
    ctx.expect(&landing::first_name_input()).to_be_visible().await?;
    ctx.expect(&landing::last_name_input()).to_be_visible().await?;
    width_at_most(ctx, &landing::contact_form(), 375.0).await
}

async fn collapsed_navigation(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::navbar()).to_be_visible().await?;
    let triggers = ctx.count(&landing::mobile_menu_trigger()).await?;
    debug!(triggers, "Mobile menu triggers");
    Ok(())
}

async fn footer_fits(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_bottom().await?;
    let footer = landing::footer();
    ctx.expect(&footer).to_be_visible().await?;
    width_at_most(ctx, &footer, 375.0).await
}

async fn wide_pricing_cards(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::pricing()).await?;
    let cards = landing::pricing_cards();
    ctx.expect(&cards).to_be_visible().await?;
    width_above_if_rendered(ctx, &cards, 300.0).await
}

async fn navigation_has_items(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::navbar()).to_be_visible().await?;
    ctx.expect(&landing::nav_items())
        .to_have_count_at_least(1)
        .await
}

async fn feature_cards_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::features()).await?;
    let cards = landing::cards();
    ctx.expect(&cards).to_have_count_at_least(1).await?;
    ctx.expect(&cards).to_be_visible().await
}

async fn several_testimonials(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::testimonials()).await?;
    ctx.expect(&landing::testimonial_items())
        .to_have_count_at_least(2)
        .await
}

async fn contact_fields_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::contact()).await?;
    for field in [
        landing::first_name_input(),
        landing::last_name_input(),
        landing::email_input(),
        landing::message_input(),
    ] {
        ctx.expect(&field).to_be_visible().await?;
    }
    Ok(())
}

async fn hero_fits(ctx: &ScenarioContext<'_>) -> Result<()> {
    let hero = landing::hero();
    ctx.expect(&hero).to_be_visible().await?;
    width_at_most(ctx, &hero, 768.0).await
}

async fn full_navigation(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::navbar()).to_be_visible().await?;
    ctx.expect(&landing::nav_items())
        .to_have_count_at_least(4)
        .await
}

async fn feature_grid(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::features()).await?;
    ctx.expect(&landing::features()).to_be_visible().await?;
    ctx.expect(&landing::feature_items())
        .to_have_count_at_least(1)
        .await
}

async fn three_testimonials(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::testimonials()).await?;
    let items = ctx.resolve_all(&landing::testimonial_items()).await?;
    ensure(
        items.len() >= 3,
        "desktop carousel holds three testimonials",
        "at least 3 items",
        items.len(),
    )
}

async fn pricing_cards_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::pricing()).await?;
    let cards = landing::pricing_cards();
    ctx.expect(&cards).to_have_count_at_least(1).await?;
    ctx.expect(&cards).to_be_visible().await
}

async fn contact_side_by_side(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::contact()).await?;
    ctx.expect(&landing::contact_grid()).to_be_visible().await?;
    ctx.expect(&landing::find_us()).to_be_visible().await?;
    ctx.expect(&landing::contact_form()).to_be_visible().await
}

async fn no_horizontal_scroll(ctx: &ScenarioContext<'_>) -> Result<()> {
    let scroll_width = number(ctx, "document.body.scrollWidth").await?;
    let viewport_width = number(ctx, "window.innerWidth").await?;
    ensure(
        scroll_width <= viewport_width + SCROLL_TOLERANCE,
        "page does not scroll horizontally",
        format!("scroll width <= {}", viewport_width + SCROLL_TOLERANCE),
        scroll_width,
    )
}

async fn constrained_container(ctx: &ScenarioContext<'_>) -> Result<()> {
    let container = landing::container();
    ctx.expect(&container).to_be_visible().await?;
    let bbox = rendered_box(ctx, &container).await?;
    ensure(
        bbox.width < 1920.0,
        "container is narrower than the screen",
        "width < 1920",
        bbox.width,
    )
}

async fn sections_reachable(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_bottom().await?;
    for section in [
        landing::features(),
        landing::testimonials(),
        landing::pricing(),
        landing::contact(),
    ] {
        ctx.scroll_to(&section).await?;
        ctx.expect(&section).to_be_visible().await?;
    }
    Ok(())
}

async fn tall_hero(ctx: &ScenarioContext<'_>) -> Result<()> {
    let hero = landing::hero();
    ctx.expect(&hero).to_be_visible().await?;
    let bbox = rendered_box(ctx, &hero).await?;
    ensure(
        bbox.height > 300.0,
        "hero has room to breathe",
        "height > 300",
        bbox.height,
    )
}

async fn theme_toggle_visible(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::theme_toggle()).to_be_visible().await
}

async fn main_sections_attached(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_bottom().await?;
    for section in [
        landing::features(),
        landing::testimonials(),
        landing::pricing(),
        landing::contact(),
    ] {
        ctx.expect(&section).to_be_attached().await?;
    }
    Ok(())
}

async fn tappable_buttons(ctx: &ScenarioContext<'_>) -> Result<()> {
    let buttons = landing::buttons();
    ctx.expect(&buttons).to_be_visible().await?;
    if let Some(bbox) = ctx.bounding_box(&buttons).await? {
        ensure(
            bbox.height > 20.0,
            "button is tall enough to tap",
            "height > 20",
            bbox.height,
        )?;
        ensure(
            bbox.width > 40.0,
            "button is wide enough to tap",
            "width > 40",
            bbox.width,
        )?;
    }
    Ok(())
}
