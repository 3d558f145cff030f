//! News layout: arranges a company's news into one hero article and a
//! sidebar of paired sub-articles.
//!
//! Only the first [`MAX_ARTICLES`] items are laid out. The first becomes the
//! hero; the rest are grouped into rows of two in arrival order. A trailing
//! group with no partner is closed with `second: None`. Order is never
//! changed: provider order is relevance order.

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::data::NewsItem;

pub const MAX_ARTICLES: usize = 5;

/// One article slot, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSlot {
    pub headline: String,
    pub source: String,
    pub url: String,
    pub image: String,
    /// `MM-DD-YYYY` in the layout's time zone
    pub published: String,
}

/// A row of the sidebar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarGroup {
    pub first: ArticleSlot,
    pub second: Option<ArticleSlot>,
}

impl SidebarGroup {
    pub fn is_paired(&self) -> bool {
        self.second.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsLayout {
    pub hero: Option<ArticleSlot>,
    pub sidebar: Vec<SidebarGroup>,
}

impl NewsLayout {
    /// No news at all; renderers show a "no news" notice instead
    pub fn is_empty(&self) -> bool {
        self.hero.is_none() && self.sidebar.is_empty()
    }

    pub fn article_count(&self) -> usize {
        usize::from(self.hero.is_some())
            + self
                .sidebar
                .iter()
                .map(|g| 1 + usize::from(g.is_paired()))
                .sum::<usize>()
    }
}

/// Grouping state for sidebar items
enum GroupState {
    NeedGroup,
    Open(ArticleSlot),
}

/// Lay out news with publish dates in the local time zone
pub fn layout(items: &[NewsItem]) -> NewsLayout {
    layout_in(items, &Local)
}

pub fn layout_in<Tz>(items: &[NewsItem], tz: &Tz) -> NewsLayout
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut slots = items.iter().take(MAX_ARTICLES).map(|item| slot(item, tz));

    let Some(hero) = slots.next() else {
        return NewsLayout::default();
    };

    let mut sidebar = Vec::new();
    let mut state = GroupState::NeedGroup;
    for article in slots {
        state = match state {
            GroupState::NeedGroup => GroupState::Open(article),
            GroupState::Open(first) => {
                sidebar.push(SidebarGroup {
                    first,
                    second: Some(article),
                });
                GroupState::NeedGroup
            }
        };
    }
    if let GroupState::Open(first) = state {
        sidebar.push(SidebarGroup {
            first,
            second: None,
        });
    }

    NewsLayout {
        hero: Some(hero),
        sidebar,
    }
}

fn slot<Tz>(item: &NewsItem, tz: &Tz) -> ArticleSlot
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ArticleSlot {
        headline: item.headline.clone(),
        source: item.source.clone(),
        url: item.url.clone(),
        image: item.image.clone(),
        published: item
            .published_at
            .with_timezone(tz)
            .format("%m-%d-%Y")
            .to_string(),
    }
}
