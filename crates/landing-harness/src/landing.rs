// Landing page target catalog
//
// Semantic elements of the landing page under test, each with its fallback
// chain. Class fragments match the component library's generated class
// names (`carousel-item`, `card-title`, ...), icon fragments match the icon
// set's `lucide-*` classes.

use crate::strategy::Strategy;
use crate::target::TargetDescriptor;
use std::time::Duration;

/// Budget for elements that only appear after an interaction.
pub const SECONDARY_TIMEOUT: Duration = Duration::from_secs(5);

const TESTIMONIALS: &str = "#testimonials";
const CONTACT: &str = "#contact";

fn css(name: &str, selector: &str) -> TargetDescriptor {
    TargetDescriptor::single(name, Strategy::css(selector))
}

// Page structure

pub fn html_root() -> TargetDescriptor {
    css("html-root", "html")
}

pub fn body() -> TargetDescriptor {
    css("body", "body")
}

pub fn navbar() -> TargetDescriptor {
    css("navbar", "nav")
}

/// Links and buttons inside the navbar.
pub fn nav_items() -> TargetDescriptor {
    css("nav-items", "nav a, nav button")
}

/// Sheet trigger shown instead of the desktop links on small screens.
pub fn mobile_menu_trigger() -> TargetDescriptor {
    TargetDescriptor::single("mobile-menu-trigger", Strategy::class_fragment("sheet-trigger"))
        .or(Strategy::css("nav button:has(svg)"))
}

/// The first section on the page.
pub fn hero() -> TargetDescriptor {
    css("hero", "section")
}

pub fn headings() -> TargetDescriptor {
    css("headings", "h1, h2, h3")
}

pub fn hero_heading() -> TargetDescriptor {
    css("hero-heading", "h1, h2")
}

pub fn calls_to_action() -> TargetDescriptor {
    css("calls-to-action", "button, a")
}

pub fn sections() -> TargetDescriptor {
    css("sections", "section")
}

pub fn container() -> TargetDescriptor {
    TargetDescriptor::single("container", Strategy::class_fragment("container"))
}

/// Every card on the page.
pub fn cards() -> TargetDescriptor {
    TargetDescriptor::single("cards", Strategy::class_fragment("card"))
}

/// Buttons, native or by role.
pub fn buttons() -> TargetDescriptor {
    css("buttons", "button, [role=\"button\"]")
}

pub fn benefit_cards() -> TargetDescriptor {
    TargetDescriptor::single("benefit-cards", Strategy::class_fragment("card"))
        .or(Strategy::css("[class*=\"grid\"] > div"))
}

pub fn features() -> TargetDescriptor {
    TargetDescriptor::single("features", Strategy::id("features"))
}

pub fn feature_items() -> TargetDescriptor {
    TargetDescriptor::single(
        "feature-items",
        Strategy::class_fragment("card").within("#features"),
    )
    .or(Strategy::css("#features [class*=\"grid\"] > div"))
}

pub fn pricing() -> TargetDescriptor {
    TargetDescriptor::single("pricing", Strategy::id("pricing"))
}

pub fn pricing_cards() -> TargetDescriptor {
    TargetDescriptor::single(
        "pricing-cards",
        Strategy::class_fragment("card").within("#pricing"),
    )
}

pub fn faq() -> TargetDescriptor {
    TargetDescriptor::single("faq", Strategy::id("faq"))
}

/// Accordion triggers; the panels they open start hidden.
pub fn faq_triggers() -> TargetDescriptor {
    TargetDescriptor::single(
        "faq-triggers",
        Strategy::tagged_class_fragment("button", "accordion").within("#faq"),
    )
}

pub fn footer() -> TargetDescriptor {
    css("footer", "footer")
}

// Testimonials carousel

pub fn testimonials() -> TargetDescriptor {
    TargetDescriptor::single("testimonials", Strategy::id("testimonials"))
}

pub fn carousel() -> TargetDescriptor {
    TargetDescriptor::single("carousel", Strategy::class_fragment("carousel"))
}

/// The sliding track; its inline `style` carries the current transform.
pub fn carousel_content() -> TargetDescriptor {
    TargetDescriptor::single("carousel-content", Strategy::class_fragment("carousel-content"))
}

pub fn testimonial_items() -> TargetDescriptor {
    TargetDescriptor::single(
        "testimonial-items",
        Strategy::class_fragment("carousel-item").within(TESTIMONIALS),
    )
}

pub fn testimonial_cards() -> TargetDescriptor {
    TargetDescriptor::single(
        "testimonial-cards",
        Strategy::class_fragment("card").within(TESTIMONIALS),
    )
}

pub fn testimonial_stars() -> TargetDescriptor {
    TargetDescriptor::single(
        "testimonial-stars",
        Strategy::tagged_class_fragment("svg", "star").within(TESTIMONIALS),
    )
}

pub fn testimonial_text() -> TargetDescriptor {
    TargetDescriptor::single(
        "testimonial-text",
        Strategy::css("#testimonials [class*=\"card\"] p"),
    )
    .or(Strategy::class_fragment("card-content").within(TESTIMONIALS))
}

pub fn testimonial_author() -> TargetDescriptor {
    TargetDescriptor::single(
        "testimonial-author",
        Strategy::class_fragment("card-title").within(TESTIMONIALS),
    )
}

pub fn testimonial_role() -> TargetDescriptor {
    TargetDescriptor::single(
        "testimonial-role",
        Strategy::class_fragment("card-description").within(TESTIMONIALS),
    )
}

pub fn avatars() -> TargetDescriptor {
    TargetDescriptor::single(
        "avatars",
        Strategy::class_fragment("avatar").within(TESTIMONIALS),
    )
}

pub fn avatar_images() -> TargetDescriptor {
    css(
        "avatar-images",
        "#testimonials [class*=\"avatar\"] img, #testimonials [class*=\"avatar\"] svg",
    )
}

/// Carousel buttons identified by their class names.
pub fn carousel_buttons() -> TargetDescriptor {
    TargetDescriptor::single(
        "carousel-buttons",
        Strategy::tagged_class_fragment("button", "carousel").within(TESTIMONIALS),
    )
}

/// Next control: class name, then chevron or arrow icon, then label, then text.
pub fn next_slide() -> TargetDescriptor {
    TargetDescriptor::single(
        "next-slide",
        Strategy::tagged_class_fragment("button", "carousel-next").within(TESTIMONIALS),
    )
    .or(Strategy::has_icon("button", "chevron-right").within(TESTIMONIALS))
    .or(Strategy::has_icon("button", "arrow-right").within(TESTIMONIALS))
    .or(Strategy::aria_label("button", "Next").within(TESTIMONIALS))
    .or(Strategy::text("button", "Next").within(TESTIMONIALS))
}

/// Previous control, mirroring [`next_slide`].
pub fn previous_slide() -> TargetDescriptor {
    TargetDescriptor::single(
        "previous-slide",
        Strategy::tagged_class_fragment("button", "carousel-previous").within(TESTIMONIALS),
    )
    .or(Strategy::has_icon("button", "chevron-left").within(TESTIMONIALS))
    .or(Strategy::has_icon("button", "arrow-left").within(TESTIMONIALS))
    .or(Strategy::aria_label("button", "Previous").within(TESTIMONIALS))
    .or(Strategy::text("button", "Previous").within(TESTIMONIALS))
    .with_timeout(SECONDARY_TIMEOUT)
}

/// Either carousel control.
pub fn carousel_controls() -> TargetDescriptor {
    TargetDescriptor::either("carousel-controls", &previous_slide(), &next_slide())
}

// Theme

/// Theme toggle: moon icon (light theme), sun icon (dark theme), then any
/// ghost button with an icon, then any button with an icon.
pub fn theme_toggle() -> TargetDescriptor {
    TargetDescriptor::single("theme-toggle", Strategy::has_icon("button", "lucide-moon"))
        .or(Strategy::has_icon("button", "lucide-sun"))
        .or(Strategy::css("button[class*=\"ghost\"]:has(svg)"))
        .or(Strategy::css("button:has(svg)"))
}

/// The icon inside the theme toggle.
pub fn theme_icon() -> TargetDescriptor {
    TargetDescriptor::single("theme-icon", Strategy::css("button svg[class*=\"lucide-moon\"]"))
        .or(Strategy::css("button svg[class*=\"lucide-sun\"]"))
        .or(Strategy::css("button svg"))
}

// Contact

pub fn contact() -> TargetDescriptor {
    TargetDescriptor::single("contact", Strategy::id("contact"))
}

pub fn contact_grid() -> TargetDescriptor {
    css("contact-grid", "#contact > section")
}

pub fn contact_card() -> TargetDescriptor {
    TargetDescriptor::single(
        "contact-card",
        Strategy::class_fragment("card").within(CONTACT),
    )
}

pub fn contact_form() -> TargetDescriptor {
    css("contact-form", "#contact form")
}

pub fn contact_form_rows() -> TargetDescriptor {
    css("contact-form-rows", "#contact form > div")
}

pub fn contact_fields() -> TargetDescriptor {
    css("contact-fields", "#contact input, #contact textarea")
}

pub fn contact_heading() -> TargetDescriptor {
    css("contact-heading", "#contact h2")
}

pub fn contact_icons() -> TargetDescriptor {
    TargetDescriptor::single(
        "contact-icons",
        Strategy::tagged_class_fragment("svg", "lucide").within(CONTACT),
    )
}

pub fn find_us() -> TargetDescriptor {
    TargetDescriptor::single("find-us", Strategy::text("*", "Find us").within(CONTACT))
}

pub fn first_name_input() -> TargetDescriptor {
    TargetDescriptor::single("first-name", Strategy::id("first-name"))
}

pub fn last_name_input() -> TargetDescriptor {
    TargetDescriptor::single("last-name", Strategy::id("last-name"))
}

pub fn email_input() -> TargetDescriptor {
    TargetDescriptor::single("email", Strategy::id("email"))
}

pub fn message_input() -> TargetDescriptor {
    TargetDescriptor::single("message", Strategy::id("message"))
}

/// Label bound to the field with the given id.
pub fn field_label(field: &str) -> TargetDescriptor {
    css(
        &format!("{}-label", field),
        &format!("label[for=\"{}\"]", field),
    )
}

pub fn submit_button() -> TargetDescriptor {
    css("submit", "#contact button[type=\"submit\"]")
        .or(Strategy::text("button", "Send").within(CONTACT))
}

/// Subject dropdown trigger: by role, then by its placeholder text.
pub fn subject_select() -> TargetDescriptor {
    TargetDescriptor::single("subject-select", Strategy::role("combobox").within(CONTACT))
        .or(Strategy::text("button", "Select").within(CONTACT))
}

/// Options of the open subject dropdown. Hidden until the trigger is clicked.
pub fn subject_options() -> TargetDescriptor {
    TargetDescriptor::single("subject-options", Strategy::role("option"))
        .or(Strategy::class_fragment("select-item"))
        .with_timeout(SECONDARY_TIMEOUT)
}

/// One option of the open subject dropdown, by its visible label.
pub fn subject_option(label: &str) -> TargetDescriptor {
    TargetDescriptor::single(
        format!("subject-option '{}'", label),
        Strategy::text("[role=\"option\"]", label),
    )
    .or(Strategy::text("[class*=\"select-item\"]", label))
    .with_timeout(SECONDARY_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_slide_fallback_order() {
        let kinds: Vec<_> = next_slide().candidates().iter().map(Strategy::kind).collect();
        assert_eq!(kinds, vec!["class-fragment", "icon", "icon", "aria-label", "text"]);
        assert_eq!(
            next_slide().selectors()[0],
            r#"#testimonials button[class*="carousel-next"]"#
        );
    }

    #[test]
    fn test_secondary_targets_have_shorter_budget() {
        assert_eq!(previous_slide().timeout(), Some(SECONDARY_TIMEOUT));
        assert_eq!(subject_options().timeout(), Some(SECONDARY_TIMEOUT));
        assert_eq!(next_slide().timeout(), None);
    }

    #[test]
    fn test_carousel_controls_tries_previous_first() {
        let controls = carousel_controls();
        assert_eq!(controls.candidates().len(), 10);
        assert_eq!(controls.candidates()[0], previous_slide().candidates()[0]);
        assert_eq!(controls.timeout(), None);
    }

    #[test]
    fn test_subject_option_matches_by_text() {
        let option = subject_option("Mobile Development");
        assert_eq!(
            option.selectors(),
            vec![
                r#"[role="option"]:has-text("Mobile Development")"#.to_string(),
                r#"[class*="select-item"]:has-text("Mobile Development")"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_theme_toggle_prefers_icons() {
        let toggle = theme_toggle();
        assert_eq!(
            toggle.selectors()[0],
            r#"button:has(svg[class*="lucide-moon"])"#
        );
        assert_eq!(toggle.selectors()[3], "button:has(svg)");
    }
}
