//! HTML rendering of a [`ReportDocument`]

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::assembler::{ReportDocument, StockSection};
use super::charts::ChartSet;
use super::layout::{ArticleSlot, NewsLayout};

const STYLESHEET: &str = include_str!("template.css");

/// Full report page as a string, ready to store or mail
pub fn render(document: &ReportDocument) -> String {
    page(document).into_string()
}

pub fn page(document: &ReportDocument) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                div {
                    div class="Header" {
                        p class="Name" { "Report for " (document.client) }
                    }
                    @for section in &document.sections {
                        (intro(section))
                        (news(&section.news))
                        @if let Some(charts) = &section.charts {
                            (chart_block(charts))
                        }
                        div class="Line-break" {}
                    }
                }
            }
        }
    }
}

fn intro(section: &StockSection) -> Markup {
    let quote = &section.quote;
    html! {
        div class="Intro-container" {
            h2 class="Stock-name" { (section.symbol.as_str()) "(" (section.profile.name) ")" }
            div class="Quote-info-container" {
                p class="Quote-info" { "Open: " (quote.open.to_string()) }
                p class="Quote-info" { "Close: " (quote.close.to_string()) }
                p class="Quote-info" { "High: " (quote.high.to_string()) }
                p class="Quote-info" { "Low: " (quote.low.to_string()) }
            }
            p class="Sentiment" {
                "Sentiment: "
                span class=(section.sentiment_class.css_class()) { (section.sentiment.to_string()) }
            }
        }
    }
}

fn news(layout: &NewsLayout) -> Markup {
    html! {
        div class="News-container" {
            h2 class="Company-news-header" { "Company News" }
            @if let Some(hero) = &layout.hero {
                div class="News-article-1" {
                    (article(hero, "Headline", "Source", "Publish-time"))
                }
                div class="Sub-news-articles" {
                    @for group in &layout.sidebar {
                        div class="Sub-article-group" {
                            @for slot in std::iter::once(&group.first).chain(group.second.as_ref()) {
                                div class="Sub-article" {
                                    (article(slot, "Sub-Headline", "Sub-Source", "Sub-publish-time"))
                                }
                            }
                        }
                    }
                }
            } @else {
                p class="No-news" { "No company news for this period." }
            }
        }
    }
}

fn article(slot: &ArticleSlot, headline_class: &str, source_class: &str, time_class: &str) -> Markup {
    html! {
        a href=(slot.url) target="_blank" rel="noopener noreferrer" {
            img src=(slot.image) class="Article-img";
            div class="Article-description" {
                p class=(headline_class) { (slot.headline) }
                p class=(source_class) { (slot.source) }
                p class=(time_class) { (slot.published) }
            }
        }
    }
}

fn chart_block(charts: &ChartSet) -> Markup {
    html! {
        div class="Graph-container" {
            img src=(charts.three_month) class="Primary-line-graph";
            div class="Sub-graph-container" {
                img src=(charts.one_month) class="Line-graph";
                img src=(charts.one_week) class="Line-graph";
            }
        }
    }
}
