// Contact section and form
//
// Field values are read back exactly as typed. The form is never submitted.

use crate::error::{Error, Result};
use crate::landing;
use crate::scenario::{ScenarioCase, ScenarioContext, Suite, ensure};
use crate::snapshot::{Probe, expect_contains};
use crate::target::TargetDescriptor;
use tracing::debug;

const MESSAGE: &str = "This is a test message for the contact form.";

pub(super) fn cases() -> Vec<ScenarioCase> {
    vec![
        case!(Suite::Contact, "displays every form field" => displays_fields),
        case!(Suite::Contact, "displays contact information" => contact_information),
        case!(Suite::Contact, "accepts a first name" => fills_first_name),
        case!(Suite::Contact, "accepts a last name" => fills_last_name),
        case!(Suite::Contact, "accepts an email" => fills_email),
        case!(Suite::Contact, "offers several subjects" => subject_dropdown),
        case!(Suite::Contact, "selects a subject" => selects_subject),
        case!(Suite::Contact, "accepts a message" => fills_message),
        case!(Suite::Contact, "labels every field" => field_labels),
        case!(Suite::Contact, "shows placeholders" => placeholders),
        case!(Suite::Contact, "fills the complete form" => complete_form),
        case!(Suite::Contact, "enables submit once filled" => submit_enabled),
        case!(Suite::Contact, "wraps the form in a card" => card_layout),
        case!(Suite::Contact, "lays out the form in rows" => form_rows),
        case!(Suite::Contact, "shows an icon per contact item" => contact_icons),
        case!(Suite::Contact, "offers a send button" => send_button),
        case!(Suite::Contact, "uses an email input" => email_input_type),
        case!(Suite::Contact, "uses a multi-line message field" => message_rows),
        case!(Suite::Contact, "has a section heading" => section_heading),
    ]
}

async fn open_contact(ctx: &ScenarioContext<'_>) -> Result<()> {
    ctx.scroll_to(&landing::contact()).await?;
    Ok(())
}

// Fills the field and checks the value reads back unchanged
async fn round_trip(ctx: &ScenarioContext<'_>, field: &TargetDescriptor, text: &str) -> Result<()> {
    let element = ctx.fill(field, text).await?;
    let value = ctx.capture(&element, &Probe::InputValue).await?;
    ensure(
        value.value() == Some(text),
        format!("{} keeps what was typed", field.name()),
        format!("{:?}", text),
        &value,
    )
}

async fn fill_form(ctx: &ScenarioContext<'_>, values: [&str; 4]) -> Result<()> {
    let [first, last, email, message] = values;
    ctx.fill(&landing::first_name_input(), first).await?;
    ctx.fill(&landing::last_name_input(), last).await?;
    ctx.fill(&landing::email_input(), email).await?;
    ctx.fill(&landing::message_input(), message).await?;
    Ok(())
}

async fn displays_fields(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.expect(&landing::contact()).to_be_visible().await?;
    for field in [
        landing::first_name_input(),
        landing::last_name_input(),
        landing::email_input(),
        landing::message_input(),
    ] {
        ctx.expect(&field).to_be_visible().await?;
    }
    ctx.expect(&landing::submit_button()).to_be_visible().await
}

async fn contact_information(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    let contact = landing::contact();
    for pattern in [
        r"(?i)find us",
        r"(?i)terrace|street|avenue|road",
        r"(?i)call us",
        r"\+\d|\(\d{3}\)",
        r"(?i)mail us",
        "@",
        r"(?i)visit us",
    ] {
        ctx.expect(&contact).to_contain_text_regex(pattern).await?;
    }
    Ok(())
}

async fn fills_first_name(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    round_trip(ctx, &landing::first_name_input(), "John").await
}

async fn fills_last_name(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    round_trip(ctx, &landing::last_name_input(), "Doe").await
}

async fn fills_email(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    round_trip(ctx, &landing::email_input(), "john.doe@example.com").await
}

async fn fills_message(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    round_trip(ctx, &landing::message_input(), MESSAGE).await
}

async fn subject_dropdown(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.click(&landing::subject_select()).await?;

    let options = ctx.resolve_all(&landing::subject_options()).await?;
    debug!(count = options.len(), "Subject options");
    ensure(
        options.len() > 1,
        "subject dropdown offers several options",
        "more than 1 option",
        options.len(),
    )
}

async fn selects_subject(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    let trigger = ctx.click(&landing::subject_select()).await?;
    let before = ctx.capture(&trigger, &Probe::TextContent).await?;

    ctx.click(&landing::subject_option("Mobile Development"))
        .await?;

    let selected = ctx.wait_for_change(&trigger, &before).await?;
    expect_contains(&selected, "Mobile")
}

async fn field_labels(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    for (field, pattern) in [
        ("first-name", r"(?i)first name"),
        ("last-name", r"(?i)last name"),
        ("email", r"(?i)email"),
        ("message", r"(?i)message"),
    ] {
        ctx.expect(&landing::field_label(field))
            .to_contain_text_regex(pattern)
            .await?;
    }
    Ok(())
}

async fn placeholders(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    let placeholder = Probe::attribute("placeholder");
    for field in [
        landing::first_name_input(),
        landing::last_name_input(),
        landing::email_input(),
        landing::message_input(),
    ] {
        let element = ctx.resolve(&field).await?;
        let snapshot = ctx.capture(&element, &placeholder).await?;
        ensure(
            snapshot.value().is_some_and(|v| !v.is_empty()),
            format!("{} has a placeholder", field.name()),
            "a non-empty placeholder",
            &snapshot,
        )?;
    }
    Ok(())
}

async fn complete_form(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.fill(&landing::first_name_input(), "Jane").await?;
    ctx.fill(&landing::last_name_input(), "Smith").await?;
    ctx.fill(&landing::email_input(), "jane.smith@example.com")
        .await?;

    ctx.click(&landing::subject_select()).await?;
    ctx.click(&landing::subject_options()).await?;

    let message = "I would like to inquire about your services.";
    ctx.fill(&landing::message_input(), message).await?;

    for (field, expected) in [
        (landing::first_name_input(), "Jane"),
        (landing::last_name_input(), "Smith"),
        (landing::email_input(), "jane.smith@example.com"),
        (landing::message_input(), message),
    ] {
        ctx.expect(&field).to_have_value(expected).await?;
    }
    Ok(())
}

async fn submit_enabled(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    fill_form(ctx, ["Test", "User", "test@example.com", "Test message"]).await?;
    ctx.expect(&landing::submit_button()).to_be_enabled().await
}

async fn card_layout(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.expect(&landing::contact_card()).to_be_visible().await?;
    ctx.expect(&landing::contact_form()).to_be_visible().await
}

async fn form_rows(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.expect(&landing::contact_form_rows()).to_be_visible().await?;
    ctx.expect(&landing::first_name_input()).to_be_visible().await?;
    ctx.expect(&landing::last_name_input()).to_be_visible().await
}

async fn contact_icons(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.expect(&landing::contact_icons())
        .to_have_count_at_least(4)
        .await
}

async fn send_button(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    fill_form(ctx, ["Test", "User", "test@example.com", "Test message"]).await?;

    let submit = landing::submit_button();
    ctx.expect(&submit).to_be_visible().await?;
    ctx.expect(&submit).to_be_enabled().await?;

    let label = ctx.text(&submit).await?;
    ensure(
        label.to_lowercase().contains("send"),
        "submit button reads send",
        "text containing \"send\"",
        format!("{:?}", label),
    )
}

async fn email_input_type(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    let email = ctx.resolve(&landing::email_input()).await?;
    let kind = ctx.capture(&email, &Probe::attribute("type")).await?;
    ensure(
        kind.value() == Some("email"),
        "email field uses the email input type",
        "\"email\"",
        &kind,
    )
}

async fn message_rows(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    let message = ctx.resolve(&landing::message_input()).await?;
    let rows = ctx.capture(&message, &Probe::attribute("rows")).await?;

    let count = match rows.value().map(str::parse::<u32>) {
        Some(Ok(count)) => count,
        _ => {
            return Err(Error::assertion(
                "message field declares its rows",
                "a numeric rows attribute",
                rows.value(),
            ));
        }
    };
    ensure(
        count >= 3,
        "message field has several rows",
        "at least 3 rows",
        count,
    )
}

async fn section_heading(ctx: &ScenarioContext<'_>) -> Result<()> {
    open_contact(ctx).await?;
    ctx.expect(&landing::contact())
        .to_contain_text_regex(r"(?i)contact")
        .await?;
    ctx.expect(&landing::contact_heading()).to_be_visible().await
}
