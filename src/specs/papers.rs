// src/specs/papers.rs
//
// Paper table rows + the "Show more" pagination signal.

use std::sync::LazyLock;

use scraper::Selector;

use crate::core::html::{Page, first_text, selector, text_of};
use crate::core::sanitize::parse_count;
use crate::data::Paper;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_a_t"));
static ROWS: LazyLock<Selector> = LazyLock::new(|| selector("tr.gsc_a_tr"));
static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.gsc_a_at"));
static CITED_BY: LazyLock<Selector> = LazyLock::new(|| selector("a.gsc_a_ac"));
static YEAR: LazyLock<Selector> = LazyLock::new(|| selector("td.gsc_a_y"));
static GRAY: LazyLock<Selector> = LazyLock::new(|| selector("div.gs_gray"));
static MORE: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_bpf_more"));

pub fn has_paper_table(page: &Page<'_>) -> bool {
    page.has(&TABLE)
}

/// Rows in page order. Rows without a title are skipped; an empty or `*`
/// cited-by cell counts as zero.
pub fn parse_papers(page: &Page<'_>, origin: &str) -> Vec<Paper> {
    let mut out = Vec::new();
    for row in page.dom.select(&ROWS) {
        let Some(link_el) = row.select(&TITLE_LINK).next() else { continue };
        let title = text_of(link_el);
        if title.is_empty() { continue; }

        let link = link_el
            .value()
            .attr("href")
            .or_else(|| link_el.value().attr("data-href"))
            .map(|h| absolutize(origin, h));

        let citations = first_text(row, &CITED_BY)
            .and_then(|t| parse_count(&t))
            .unwrap_or(0);

        let year = first_text(row, &YEAR)
            .and_then(|t| parse_count(&t))
            .and_then(|y| u16::try_from(y).ok());

        let mut gray = row.select(&GRAY).map(text_of);
        let authors = gray.next().unwrap_or_default();
        let venue = gray.next().unwrap_or_default();

        out.push(Paper { title, year, citations, link, authors, venue });
    }
    out
}

/// A short page ends the list; so does a disabled "Show more" button.
pub fn has_more_pages(page: &Page<'_>, rows_on_page: usize, page_size: u32) -> bool {
    if rows_on_page < page_size as usize {
        return false;
    }
    match page.first(&MORE) {
        Some(btn) => btn.value().attr("disabled").is_none(),
        None => true,
    }
}

fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        s!(href)
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/profile.html");
    const ORIGIN: &str = "https://scholar.google.com";

    #[test]
    fn fixture_rows() {
        let page = Page::parse(FIXTURE);
        let papers = parse_papers(&page, ORIGIN);
        assert_eq!(papers.len(), 3);

        let first = &papers[0];
        assert_eq!(first.title, "Notes on the Analytical Engine");
        assert_eq!(first.citations, 1000);
        assert_eq!(first.year, Some(1843));
        assert_eq!(first.authors, "A Lovelace, C Babbage");
        assert!(first.venue.starts_with("Scientific Memoirs 3"));
        assert_eq!(
            first.link.as_deref(),
            Some("https://scholar.google.com/citations?view_op=view_citation&hl=en&user=abcDEF123&citation_for_view=abcDEF123:u5HHmVD_uO8C")
        );

        let last = &papers[2];
        assert_eq!(last.citations, 0);
        assert_eq!(last.year, None);
        assert_eq!(last.venue, "");
    }

    #[test]
    fn short_page_or_disabled_button_ends_pagination() {
        let page = Page::parse(FIXTURE);
        assert!(!has_more_pages(&page, 3, 100));
        assert!(!has_more_pages(&page, 100, 100));
    }

    #[test]
    fn full_page_with_live_button_continues() {
        let page = Page::parse(r#"<button id="gsc_bpf_more" class="gs_btnPD"><span>Show more</span></button>"#);
        assert!(has_more_pages(&page, 100, 100));
    }

    #[test]
    fn rows_without_title_skipped() {
        let html = r#"<table id="gsc_a_t"><tbody>
            <tr class="gsc_a_tr"><td class="gsc_a_t"><a class="gsc_a_at"> </a></td></tr>
            <tr class="gsc_a_tr"><td class="gsc_a_t"><a class="gsc_a_at" href="x?y=1">Kept</a></td>
                <td class="gsc_a_c"><a class="gsc_a_ac">*</a></td><td class="gsc_a_y"><span class="gsc_a_h">2020</span></td></tr>
            </tbody></table>"#;
        let page = Page::parse(html);
        assert!(has_paper_table(&page));
        let papers = parse_papers(&page, ORIGIN);
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].citations, 0);
        assert_eq!(papers[0].year, Some(2020));
        assert_eq!(papers[0].link.as_deref(), Some("https://scholar.google.com/x?y=1"));
    }
}
