//! Page construction.
//!
//! Builds one page's markup purely from the layout plan and the loaded
//! records. The rules the capture layout depends on all live here: intro
//! header and side panel on the first page only, section heading and
//! timeline dot only on a section's first page, one shared timeline line
//! per page, and the `page` marker class with a 1-based page number on
//! every page element.

use tracing::warn;

use crate::cv::models::{Profile, SectionRecords};
use crate::layout::paginator::PlannedPage;
use crate::render::card::{card_html, escape_html, CardFlags};
use crate::render::scaffold;

pub fn render_page(
    page: &PlannedPage,
    sections: &SectionRecords,
    profile: Option<&Profile>,
) -> String {
    let (intro, side) = if page.number == 1 {
        (intro_html(profile), side_panel_html(profile))
    } else {
        (String::new(), String::new())
    };

    let mut body = String::new();
    for slice in &page.slices {
        let spec = slice.kind.spec();
        if slice.with_heading {
            let class = if spec.first {
                "section-heading first"
            } else {
                "section-heading"
            };
            body.push_str(&scaffold::fill(
                scaffold::SECTION_HEADING,
                &[("class", class), ("slug", spec.slug), ("title", spec.title)],
            ));
        }
        let records = sections.get(slice.kind);
        for slot in &slice.cards {
            let Some(record) = records.get(slot.record_index) else {
                warn!(
                    "page {}: {} slot {} ({:.0}px) has no matching record, skipping",
                    page.number, slice.kind, slot.record_index, slot.height_px
                );
                continue;
            };
            let flags = CardFlags {
                page_first: slot.page_first,
                top_rounded: slot.top_rounded,
                bottom_rounded: slot.bottom_rounded,
            };
            body.push_str(&card_html(record, &flags));
        }
    }

    let number = page.number.to_string();
    scaffold::fill(
        scaffold::PAGE_SHELL,
        &[
            ("number", number.as_str()),
            ("intro", intro.as_str()),
            ("side", side.as_str()),
            ("body", body.as_str()),
        ],
    )
}

fn intro_html(profile: Option<&Profile>) -> String {
    let name = profile.map(|p| escape_html(&p.name)).unwrap_or_default();
    let headline = profile
        .and_then(|p| p.headline.as_deref())
        .map(escape_html)
        .unwrap_or_default();
    scaffold::fill(
        scaffold::INTRO,
        &[("name", name.as_str()), ("headline", headline.as_str())],
    )
}

fn side_panel_html(profile: Option<&Profile>) -> String {
    let Some(profile) = profile else {
        return scaffold::fill(scaffold::SIDE_PANEL, &[("photo", ""), ("contacts", "")]);
    };

    let photo = profile
        .photo
        .as_deref()
        .map(|p| scaffold::fill(scaffold::SIDE_PHOTO, &[("src", escape_html(p).as_str())]))
        .unwrap_or_default();

    let mut contacts = String::new();
    for contact in &profile.contacts {
        let value = match contact.link.as_deref() {
            Some(link) => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape_html(link),
                escape_html(&contact.value)
            ),
            None => escape_html(&contact.value),
        };
        contacts.push_str(&scaffold::fill(
            scaffold::CONTACT_ROW,
            &[
                ("label", escape_html(&contact.label).as_str()),
                ("value", value.as_str()),
            ],
        ));
    }

    scaffold::fill(
        scaffold::SIDE_PANEL,
        &[("photo", photo.as_str()), ("contacts", contacts.as_str())],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::models::{Contact, ExperienceRecord, SectionKind};
    use crate::layout::paginator::{CardSlot, SectionSlice};

    fn make_record(organization: &str) -> ExperienceRecord {
        ExperienceRecord {
            organization: organization.into(),
            role: "Professor".into(),
            period: "2015".into(),
            topic: None,
            discipline: None,
            place: None,
            link: None,
            logo: "logo.svg".into(),
            current: false,
        }
    }

    fn make_slot(record_index: usize) -> CardSlot {
        CardSlot {
            record_index,
            height_px: 100.0,
            page_first: record_index == 0,
            top_rounded: record_index == 0,
            bottom_rounded: false,
        }
    }

    fn make_page(number: usize, with_heading: bool) -> PlannedPage {
        PlannedPage {
            number,
            slices: vec![SectionSlice {
                kind: SectionKind::Academic,
                with_heading,
                cards: vec![make_slot(0), make_slot(1)],
            }],
            content_bottom_px: 500.0,
        }
    }

    fn make_sections() -> SectionRecords {
        let mut sections = SectionRecords::default();
        sections.set(
            SectionKind::Academic,
            vec![make_record("Alpha University"), make_record("Beta Institute")],
        );
        sections
    }

    fn make_profile() -> Profile {
        Profile {
            name: "Prof. Ana Ionescu".into(),
            headline: Some("Control systems researcher".into()),
            photo: Some("ana.jpg".into()),
            contacts: vec![Contact {
                label: "Email".into(),
                value: "ana@example.edu".into(),
                link: Some("mailto:ana@example.edu".into()),
            }],
        }
    }

    #[test]
    fn test_first_page_carries_intro_and_side_panel() {
        let html = render_page(&make_page(1, true), &make_sections(), Some(&make_profile()));
        assert!(html.contains("intro-name"));
        assert!(html.contains("Prof. Ana Ionescu"));
        assert!(html.contains("side-panel"));
        assert!(html.contains("/assets/ana.jpg"));
        assert!(html.contains("mailto:ana@example.edu"));
    }

    #[test]
    fn test_continuation_page_has_no_intro_or_side_panel() {
        let html = render_page(&make_page(2, false), &make_sections(), Some(&make_profile()));
        assert!(!html.contains("intro"));
        assert!(!html.contains("side-panel"));
    }

    #[test]
    fn test_missing_profile_leaves_intro_slots_empty() {
        let html = render_page(&make_page(1, true), &make_sections(), None);
        assert!(html.contains("intro-name"), "intro chrome still renders");
        assert!(html.contains("<h1 class=\"intro-name\"></h1>"));
        assert!(html.contains("side-panel"));
        assert!(!html.contains("side-photo"));
    }

    #[test]
    fn test_heading_and_dot_only_on_section_first_page() {
        let with = render_page(&make_page(1, true), &make_sections(), None);
        assert!(with.contains("section-heading"));
        assert!(with.contains("timeline-dot"));
        assert!(with.contains("Academic Activity"));

        let without = render_page(&make_page(2, false), &make_sections(), None);
        assert!(!without.contains("section-heading"));
        assert!(!without.contains("timeline-dot"));
    }

    #[test]
    fn test_anchor_section_heading_gets_first_class() {
        let html = render_page(&make_page(1, true), &make_sections(), None);
        assert!(html.contains("class=\"section-heading first\""));
    }

    #[test]
    fn test_exactly_one_timeline_line_per_page() {
        let html = render_page(&make_page(1, true), &make_sections(), None);
        assert_eq!(html.matches("class=\"timeline\"").count(), 1);
    }

    #[test]
    fn test_page_marker_class_and_number() {
        let html = render_page(&make_page(3, false), &make_sections(), None);
        assert!(html.contains("<section class=\"page\" data-page=\"3\">"));
        assert!(html.contains("<footer class=\"page-number\">3</footer>"));
    }

    #[test]
    fn test_cards_render_in_slot_order() {
        let html = render_page(&make_page(1, true), &make_sections(), None);
        let alpha = html.find("Alpha University").expect("first card present");
        let beta = html.find("Beta Institute").expect("second card present");
        assert!(alpha < beta, "cards must keep record order");
    }

    #[test]
    fn test_slot_beyond_records_is_skipped() {
        let mut page = make_page(1, true);
        page.slices[0].cards.push(make_slot(9));
        let html = render_page(&page, &make_sections(), None);
        assert_eq!(html.matches("<article").count(), 2, "stale slot is dropped");
    }

    #[test]
    fn test_record_text_with_token_braces_renders_verbatim() {
        let mut sections = SectionRecords::default();
        sections.set(
            SectionKind::Academic,
            vec![
                make_record("Grant {number} Programme"),
                make_record("Beta Institute"),
            ],
        );
        let html = render_page(&make_page(3, false), &sections, None);
        assert!(
            html.contains("Grant {number} Programme"),
            "record text must render verbatim, not pick up the page number"
        );
        assert!(html.contains("<footer class=\"page-number\">3</footer>"));
    }

    #[test]
    fn test_profile_text_with_token_braces_renders_verbatim() {
        let mut profile = make_profile();
        profile.name = "Ana {body} Ionescu".into();
        profile.contacts[0].label = "{value}".into();
        let html = render_page(&make_page(1, true), &make_sections(), Some(&profile));
        assert!(
            html.contains("Ana {body} Ionescu"),
            "intro name must not splice in page content"
        );
        assert!(html.contains("<span class=\"contact-label\">{value}</span>"));
        assert!(
            html.contains("ana@example.edu"),
            "the real contact value still fills its own slot"
        );
    }
}
