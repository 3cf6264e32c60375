//! Card fragment builder.
//!
//! Pure string construction: one record in, one self-contained markup
//! fragment out. The builder knows nothing about pages; position-dependent
//! classes arrive through `CardFlags`, set by the caller after pagination.
//! Every interpolated value is HTML-escaped, the logo path and link href
//! included.

use crate::cv::models::ExperienceRecord;

/// Position-dependent classes for one card, taken from its `CardSlot`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardFlags {
    pub page_first: bool,
    pub top_rounded: bool,
    pub bottom_rounded: bool,
}

/// Renders one experience card. Optional fields omit their markup entirely:
/// no link chip without a link, no place or topic row without a value.
pub fn card_html(record: &ExperienceRecord, flags: &CardFlags) -> String {
    let mut classes = String::from("card");
    if flags.page_first {
        classes.push_str(" page-first");
    }
    if flags.top_rounded {
        classes.push_str(" top-rounded");
    }
    if flags.bottom_rounded {
        classes.push_str(" bottom-rounded");
    }

    let mut html = String::with_capacity(512);
    html.push_str(&format!("<article class=\"{classes}\">"));
    html.push_str(&format!(
        "<div class=\"card-logo\"><img src=\"/assets/logos/{}\" alt=\"{} logo\"></div>",
        escape_html(&record.logo),
        escape_html(&record.organization)
    ));
    html.push_str("<div class=\"card-body\">");
    html.push_str(&format!(
        "<h3 class=\"card-role\">{}</h3>",
        escape_html(&record.role)
    ));
    html.push_str(&format!(
        "<div class=\"card-org\">{}</div>",
        escape_html(&record.organization)
    ));
    if let Some(topic) = &record.topic {
        html.push_str(&format!(
            "<div class=\"card-topic\">{}</div>",
            escape_html(topic)
        ));
    }

    html.push_str("<div class=\"card-meta\">");
    let period_class = if record.current {
        "badge period current"
    } else {
        "badge period"
    };
    html.push_str(&format!(
        "<span class=\"{period_class}\">{}</span>",
        escape_html(&record.period)
    ));
    if let Some(discipline) = &record.discipline {
        html.push_str(&format!(
            "<span class=\"badge discipline\">{}</span>",
            escape_html(discipline)
        ));
    }
    if let Some(place) = &record.place {
        html.push_str(&format!(
            "<span class=\"meta-place\">{}</span>",
            escape_html(place)
        ));
    }
    if let Some(href) = record.link_href() {
        html.push_str(&format!(
            "<a class=\"chip-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(&href),
            escape_html(&link_label(&href))
        ));
    }
    html.push_str("</div></div></article>\n");
    html
}

/// Escapes text for interpolation into HTML body or attribute positions.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Short display label for a link chip: "DOI", "ORCID", or the host name.
fn link_label(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.contains("doi.org/") {
        return "DOI".to_string();
    }
    if lower.contains("orcid.org/") {
        return "ORCID".to_string();
    }
    let stripped = url.split("://").nth(1).unwrap_or(url);
    let host = stripped.split('/').next().unwrap_or(stripped);
    host.trim_start_matches("www.").to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
