//! Static markup scaffolding for the document chrome.
//!
//! Placeholders use `{name}` tokens resolved by [`fill`]; the callers in
//! `page.rs` escape every dynamic value before substitution. The capture
//! tool counts elements carrying the `page` class, so that class appears
//! here and nowhere else.

/// One page element. `{intro}` and `{side}` are empty on every page but the
/// first; `{body}` is the timeline content.
pub const PAGE_SHELL: &str = "\
<section class=\"page\" data-page=\"{number}\">\n\
{intro}{side}  <div class=\"timeline\">\n\
{body}  </div>\n\
  <footer class=\"page-number\">{number}</footer>\n\
</section>\n";

pub const INTRO: &str = "\
  <header class=\"intro\">\n\
    <h1 class=\"intro-name\">{name}</h1>\n\
    <p class=\"intro-headline\">{headline}</p>\n\
  </header>\n";

pub const SIDE_PANEL: &str = "\
  <aside class=\"side-panel\">\n\
{photo}    <div class=\"side-contacts\">\n\
{contacts}    </div>\n\
  </aside>\n";

pub const SIDE_PHOTO: &str =
    "    <img class=\"side-photo\" src=\"/assets/{src}\" alt=\"Portrait\">\n";

pub const CONTACT_ROW: &str = "      <div class=\"contact-row\"><span class=\"contact-label\">{label}</span><span class=\"contact-value\">{value}</span></div>\n";

/// Section heading with the timeline marker dot. Rendered only on the
/// section's first page.
pub const SECTION_HEADING: &str = "\
    <div class=\"{class}\" id=\"{slug}\">\n\
      <span class=\"timeline-dot\"></span>\n\
      <h2>{title}</h2>\n\
    </div>\n";

// ────────────────────────────────────────────────────────────────────────────
// Token filling
// ────────────────────────────────────────────────────────────────────────────

/// Fills `{name}` tokens in a single pass over the template. Values are
/// emitted verbatim and never rescanned, so a token-shaped substring inside
/// a value stays literal text. Unknown tokens pass through unchanged.
pub(crate) fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];
        let hit = slots.iter().find_map(|&(name, value)| {
            rest.strip_prefix('{')
                .and_then(|r| r.strip_prefix(name))
                .and_then(|r| r.strip_prefix('}'))
                .map(|after| (value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_token_occurrence() {
        let out = fill(
            "<p data-n=\"{n}\">{text}</p><i>{n}</i>",
            &[("n", "4"), ("text", "hi")],
        );
        assert_eq!(out, "<p data-n=\"4\">hi</p><i>4</i>");
    }

    #[test]
    fn test_fill_never_rescans_inserted_values() {
        let out = fill("{a}|{b}", &[("a", "literal {b} stays"), ("b", "two")]);
        assert_eq!(out, "literal {b} stays|two");
    }

    #[test]
    fn test_fill_leaves_unknown_tokens_and_stray_braces() {
        let out = fill("{who} {mystery} {{x}", &[("who", "me")]);
        assert_eq!(out, "me {mystery} {{x}");
    }
}
