use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{Article, ExtractError};
use crate::cleaner;

static LANGUAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.hd-lg").unwrap());
static PUBLISHED_DATE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.hd-date").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.hd-ti").unwrap());
static ARTICLE_DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div[id]").unwrap());
static ARTICLE_NUMBER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.ti-art").unwrap());
static ARTICLE_NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.sti-art").unwrap());
static NORMAL_PARA: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.normal").unwrap());
static ANNEX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[id="L_2019152EN.01006001"]"#).unwrap());
static DOC_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".doc-ti").unwrap());
static NOTE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.note").unwrap());
static SIGNATURE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".final").unwrap());
static TREATY_STOP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[id="001"]"#).unwrap());

pub fn language(html: &Html) -> Result<String, ExtractError> {
    first_text(html, &LANGUAGE, "p.hd-lg")
}

pub fn published_date(html: &Html) -> Result<String, ExtractError> {
    first_text(html, &PUBLISHED_DATE, "p.hd-date").map(|t| cleaner::clean_one(&t))
}

pub fn title(html: &Html) -> Result<String, ExtractError> {
    first_text(html, &TITLE, "p.hd-ti")
}

/// One article per container div: any `div[id]` whose id has no `.` (those are
/// subsection anchors) and which holds a `p.ti-art` number heading.
pub fn articles(html: &Html) -> Vec<Article> {
    html.select(&ARTICLE_DIV)
        .filter(|div| div.value().attr("id").is_some_and(|id| !id.contains('.')))
        .filter_map(|div| {
            let number = div.select(&ARTICLE_NUMBER).next()?;
            let name = div
                .select(&ARTICLE_NAME)
                .next()
                .map(text_of)
                .unwrap_or_default();
            let paragraphs: Vec<String> = div.select(&NORMAL_PARA).map(text_of).collect();
            Some(Article {
                article_number: text_of(number).trim().to_string(),
                article_name: cleaner::clean_one(&name),
                data: vec![cleaner::clean_one(&paragraphs.join(" "))],
            })
        })
        .collect()
}

pub fn annexes(html: &Html) -> Vec<String> {
    let texts: Vec<String> = html.select(&ANNEX).map(text_of).collect();
    cleaner::clean(&texts)
}

pub fn titles(html: &Html) -> Vec<String> {
    let texts: Vec<String> = html.select(&DOC_TITLE).map(text_of).collect();
    cleaner::clean(&texts)
}

pub fn notes(html: &Html) -> Vec<String> {
    let texts: Vec<String> = html.select(&NOTE).map(text_of).collect();
    cleaner::clean(&texts)
}

pub fn signature(html: &Html) -> Result<String, ExtractError> {
    first_text(html, &SIGNATURE, ".final").map(|t| cleaner::clean_one(&t))
}

/// All `p.normal` paragraphs preceding the stop anchor in document order:
/// the treaty citations and recitals that open the regulation.
pub fn treaty_rules(html: &Html) -> Result<Vec<String>, ExtractError> {
    let stop = html
        .select(&TREATY_STOP)
        .next()
        .ok_or(ExtractError::Missing { selector: r#"div[id="001"]"# })?;
    let stop_id = stop.id();

    let mut paragraphs = Vec::new();
    for node in html.root_element().descendants() {
        if node.id() == stop_id {
            break;
        }
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == "p" && el.value().classes().any(|c| c == "normal") {
                paragraphs.push(text_of(el));
            }
        }
    }

    Ok(vec![cleaner::clean_one(&paragraphs.join(" "))])
}

fn first_text(
    html: &Html,
    selector: &Selector,
    name: &'static str,
) -> Result<String, ExtractError> {
    html.select(selector)
        .next()
        .map(text_of)
        .ok_or(ExtractError::Missing { selector: name })
}

fn text_of(el: ElementRef) -> String {
    el.text().collect()
}
