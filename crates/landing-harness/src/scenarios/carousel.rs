// Testimonials carousel
//
// Slide changes are observed on the `style` attribute of the carousel track,
// which carries the translate transform. Values are compared verbatim.

use crate::error::Result;
use crate::landing;
use crate::scenario::{ScenarioCase, ScenarioContext, Suite, ensure};
use crate::snapshot::{Probe, expect_changed};
use crate::viewport::ViewportProfile;
use tracing::debug;

pub(super) fn cases() -> Vec<ScenarioCase> {
    vec![
        case!(Suite::Carousel, "displays the testimonials carousel" => displays_carousel),
        case!(Suite::Carousel, "has multiple testimonial items" => multiple_items),
        case!(Suite::Carousel, "has previous or next controls" => has_controls),
        case!(Suite::Carousel, "next control moves the track" => next_moves_track),
        case!(Suite::Carousel, "previous control moves the track back" => previous_moves_track),
        case!(Suite::Carousel, "displays testimonial content" => testimonial_content),
        case!(Suite::Carousel, "navigates through slides sequentially" => sequential_navigation),
        case!(
            Suite::Carousel,
            "shows several testimonials on desktop",
            Some(ViewportProfile::Desktop) => several_on_desktop
        ),
        case!(Suite::Carousel, "keeps content rendered while moving" => smooth_navigation),
        case!(Suite::Carousel, "has accessible controls" => accessible_controls),
        case!(Suite::Carousel, "displays avatars" => avatars),
    ]
}

async fn open_testimonials(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::testimonials()).await?;
    Ok(())
}

async fn displays_carousel(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    ctx.expect(&landing::carousel()).to_be_visible().await?;
    ctx.expect(&landing::carousel_content()).to_be_visible().await
}

async fn multiple_items(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    let items = ctx.resolve_all(&landing::testimonial_items()).await?;
    debug!(count = items.len(), "Testimonial items");
    ensure(
        items.len() > 1,
        "carousel has several testimonials",
        "more than 1 item",
        items.len(),
    )
}

async fn has_controls(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    ctx.expect(&landing::carousel_controls()).to_be_visible().await
}

async fn next_moves_track(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    let track = ctx.resolve(&landing::carousel_content()).await?;
    let (before, after) = ctx
        .click_and_wait(&landing::next_slide(), &track, &Probe::Style)
        .await?;
    debug!(before = %before, after = %after, "Track moved forward");
    ensure(
        !after.is_absent(),
        "carousel track has a transform after moving",
        "a style attribute",
        &after,
    )
}

async fn previous_moves_track(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    let track = ctx.resolve(&landing::carousel_content()).await?;

    // Move away from the first slide so there is somewhere to go back to
    ctx.click_and_wait(&landing::next_slide(), &track, &Probe::Style)
        .await?;

    let (before, after) = ctx
        .click_and_wait(&landing::previous_slide(), &track, &Probe::Style)
        .await?;
    expect_changed(&before, &after)
}

async fn testimonial_content(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    ctx.expect(&landing::testimonial_cards()).to_be_visible().await?;
    ctx.expect(&landing::testimonial_stars()).to_be_visible().await?;

    let text = ctx.text(&landing::testimonial_text()).await?;
    ensure(
        text.trim().len() > 10,
        "testimonial has a comment",
        "more than 10 characters",
        format!("{:?}", text),
    )?;

    ctx.expect(&landing::testimonial_author()).to_be_visible().await?;
    ctx.expect(&landing::testimonial_role()).to_be_visible().await
}

async fn sequential_navigation(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    let track = ctx.resolve(&landing::carousel_content()).await?;
    let next = landing::next_slide();

    for _ in 0..3 {
        ctx.click_and_wait(&next, &track, &Probe::Style).await?;
        ctx.expect(&landing::carousel_content()).to_be_visible().await?;
    }
    ctx.expect(&landing::testimonial_cards()).to_be_visible().await
}

async fn several_on_desktop(ctx: &ScenarioContext<'_>) -> Result<()> {
    // Load again so the desktop layout applies from the start
    ctx.reload().await?;
    open_testimonials(ctx).await?;
    let items = ctx.resolve_all(&landing::testimonial_items()).await?;
    ensure(
        items.len() > 1,
        "desktop carousel holds several testimonials",
        "more than 1 item",
        items.len(),
    )
}

async fn smooth_navigation(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    let content = landing::carousel_content();
    ctx.expect(&content).to_be_visible().await?;

    let track = ctx.resolve(&content).await?;
    ctx.click_and_wait(&landing::next_slide(), &track, &Probe::Style)
        .await?;

    ctx.expect(&content).to_be_visible().await?;
    ctx.expect(&landing::testimonial_cards()).to_be_visible().await
}

async fn accessible_controls(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    ctx.expect(&landing::carousel()).to_be_visible().await?;
    ctx.expect(&landing::carousel_buttons()).to_be_attached().await?;

    // Controls are real buttons; record how they declare their type
    let control = ctx.resolve(&landing::carousel_controls()).await?;
    let kind = ctx.capture(&control, &Probe::attribute("type")).await?;
    debug!(control = %control, button_type = %kind, "Carousel control");
    Ok(())
}

async fn avatars(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_testimonials(ctx).await?;
    ctx.expect(&landing::avatars()).to_be_visible().await?;
    ctx.expect(&landing::avatar_images()).to_be_visible().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::fake::{FakeNode, FakePage, FakeState};
    use crate::scenario::run_case;
    use std::time::Duration;

    const TRACK: &str = r#"[class*="carousel-content"]"#;
    const NEXT: &str = r#"#testimonials button[class*="carousel-next"]"#;
    const PREVIOUS_BY_LABEL: &str = r#"#testimonials button[aria-label*="Previous"]"#;

    fn config() -> HarnessConfig {
        HarnessConfig::builder()
            .default_timeout(Duration::from_millis(300))
            .poll_interval(Duration::from_millis(50))
            .build()
            .unwrap()
    }

    fn find(name: &str) -> ScenarioCase {
        cases()
            .into_iter()
            .find(|c| c.name() == name)
            .unwrap()
    }

    fn slide_to(offset: &'static str) -> impl Fn(&mut FakeState) + Send + Sync + 'static {
        move |state| {
            if let Some(track) = state.node_mut(TRACK, 0) {
                track.attributes.insert(
                    "style".to_string(),
                    format!("transform: translate3d({}, 0px, 0px);", offset),
                );
            }
        }
    }

    fn carousel() -> FakePage {
        let page = FakePage::new();
        page.insert("#testimonials", FakeNode::visible()).insert(
            TRACK,
            FakeNode::visible().attr("style", "transform: translate3d(0px, 0px, 0px);"),
        );
        page
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_moves_track() {
        let page = carousel();
        page.insert(NEXT, FakeNode::visible())
            .on_click(NEXT, 0, slide_to("-342px"));

        let report = run_case(&find("next control moves the track"), &page, &config()).await;
        assert!(report.passed(), "{}", report);
        page.with_state(|state| {
            assert_eq!(state.clicks, 1);
            assert_eq!(
                state.node(TRACK, 0).unwrap().attributes["style"],
                "transform: translate3d(-342px, 0px, 0px);"
            );
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_desktop_layout_reloads_before_counting() {
        let page = carousel();
        let items = r#"#testimonials [class*="carousel-item"]"#;
        page.insert(items, FakeNode::visible())
            .insert(items, FakeNode::visible())
            .insert(items, FakeNode::visible());

        let report = run_case(
            &find("shows several testimonials on desktop"),
            &page,
            &config(),
        )
        .await;
        assert!(report.passed(), "{}", report);
        page.with_state(|state| {
            assert_eq!(state.viewport, Some(ViewportProfile::Desktop.size()));
            assert_eq!(state.navigations, 2);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_without_movement_fails() {
        let page = carousel();
        page.insert(NEXT, FakeNode::visible());

        let report = run_case(&find("next control moves the track"), &page, &config()).await;
        assert!(!report.passed());
        assert!(report.to_string().contains("translate3d(0px, 0px, 0px)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_moves_track_back_through_label_fallback() {
        let page = carousel();
        page.insert(NEXT, FakeNode::visible())
            .insert(PREVIOUS_BY_LABEL, FakeNode::visible().attr("aria-label", "Previous slide"))
            .on_click(NEXT, 0, slide_to("-342px"))
            .on_click(PREVIOUS_BY_LABEL, 0, slide_to("0px"));

        let report = run_case(
            &find("previous control moves the track back"),
            &page,
            &config(),
        )
        .await;
        assert!(report.passed(), "{}", report);
        page.with_state(|state| {
            assert_eq!(state.clicks, 2);
            assert_eq!(
                state.node(TRACK, 0).unwrap().attributes["style"],
                "transform: translate3d(0px, 0px, 0px);"
            );
        });
    }
}
