// Landing page sections render and can be reached by scrolling.

use crate::error::Result;
use crate::landing;
use crate::scenario::{ScenarioCase, ScenarioContext, Suite, ensure};

pub(super) fn cases() -> Vec<ScenarioCase> {
    vec![
        case!(Suite::Sections, "renders the navbar" => navbar),
        case!(Suite::Sections, "renders the hero" => hero),
        case!(Suite::Sections, "renders the sponsors section" => sponsors),
        case!(Suite::Sections, "renders the benefits section" => benefits),
        case!(Suite::Sections, "renders the features section" => features),
        case!(Suite::Sections, "renders the services section" => services),
        case!(Suite::Sections, "renders the how it works section" => how_it_works),
        case!(Suite::Sections, "renders the testimonials section" => testimonials),
        case!(Suite::Sections, "renders the team section" => team),
        case!(Suite::Sections, "renders the community section" => community),
        case!(Suite::Sections, "renders the pricing section" => pricing),
        case!(Suite::Sections, "renders the contact section" => contact),
        case!(Suite::Sections, "renders the faq section" => faq),
        case!(Suite::Sections, "renders the footer" => footer),
        case!(Suite::Sections, "has every major section" => major_sections),
    ]
}

async fn navbar(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::navbar()).to_be_visible().await?;
    ctx.expect(&landing::nav_items()).to_be_visible().await
}

async fn hero(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::hero()).to_be_visible().await?;
    ctx.expect(&landing::headings()).to_be_visible().await?;
    ctx.expect(&landing::calls_to_action()).to_be_visible().await
}

async fn sponsors(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::sections())
        .to_have_count_at_least(3)
        .await
}

async fn benefits(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::hero()).await?;
    ctx.expect(&landing::benefit_cards()).to_be_visible().await
}

async fn features(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::features()).await?;
    ctx.expect(&landing::features()).to_be_visible().await
}

async fn services(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.expect(&landing::sections())
        .to_have_count_at_least(6)
        .await
}

async fn how_it_works(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_fraction(0.5).await?;
    let text = ctx.text(&landing::body()).await?;
    ensure(
        text.len() > 1000,
        "page has substantial content",
        "more than 1000 characters",
        text.len(),
    )
}

async fn testimonials(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::testimonials()).await?;
    ctx.expect(&landing::testimonials()).to_be_visible().await?;
    ctx.expect(&landing::testimonial_cards()).to_be_visible().await
}

async fn team(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_fraction(0.6).await?;
    ctx.expect(&landing::sections())
        .to_have_count_at_least(9)
        .await
}

async fn community(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_fraction(0.7).await?;
    ctx.expect(&landing::sections())
        .to_have_count_at_least(11)
        .await
}

async fn pricing(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_fraction(0.75).await?;
    ctx.expect(&landing::body()).to_contain_text("$").await
}

async fn contact(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::contact()).await?;
    ctx.expect(&landing::contact()).to_be_visible().await?;
    ctx.expect(&landing::contact_fields()).to_be_visible().await
}

async fn faq(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::faq()).await?;
    ctx.expect(&landing::faq()).to_be_visible().await?;
    ctx.expect(&landing::faq_triggers()).to_be_visible().await
}

async fn footer(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_bottom().await?;
    let footer = landing::footer();
    ctx.expect(&footer).to_be_visible().await?;
    ctx.expect(&footer).to_contain_text_regex(r"\S").await
}

async fn major_sections(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to_bottom().await?;
    ctx.expect(&landing::features()).to_be_attached().await?;
    ctx.expect(&landing::testimonials()).to_be_attached().await?;
    ctx.expect(&landing::contact()).to_be_attached().await?;
    ctx.expect(&landing::faq()).to_be_attached().await?;
    ctx.expect(&landing::sections())
        .to_have_count_at_least(11)
        .await
}
