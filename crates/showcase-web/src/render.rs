//! HTML components.
//!
//! Components are plain functions from data to [`Markup`]. The only
//! interactive state is the product disclosure, which lives in the browser's
//! native `<details>` element. Whether a category is expanded is decided by
//! the caller from the carousel window position.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use showcase_core::{Carousel, Category, Position, Product};

/// Query parameter carrying the active carousel index.
pub const CATEGORY_PARAM: &str = "category";

const STYLE: &str = r#"
body { margin: 0; font-family: "Open Sans", sans-serif; }
.skip-link { position: absolute; left: -9999px; }
.skip-link:focus { left: 1rem; top: 1rem; }
.site-header { display: flex; justify-content: center; padding: 1rem 0; }
.carousel-controls { display: flex; justify-content: space-between; align-items: center; max-width: 56rem; margin: 0 auto 1.5rem; }
.carousel-indicators { display: flex; justify-content: center; gap: 0.5rem; margin-bottom: 1rem; }
.indicator-dot { display: block; width: 1rem; height: 1rem; border-radius: 50%; background: #d1d5db; }
.indicator-dot.active { background: #1f2937; }
.carousel-wide { display: none; gap: 1rem; justify-content: center; align-items: flex-start; }
.carousel-narrow { display: flex; justify-content: center; }
.w-full { width: 100%; } .w-1\/2 { width: 50%; } .w-1\/4 { width: 25%; }
.cursor-pointer { cursor: pointer; color: inherit; text-decoration: none; }
@media (min-width: 1280px) { .carousel-wide { display: flex; } .carousel-narrow { display: none; } }
"#;

const CHEVRON_LEFT: &str = r#"<svg width="20" height="20" fill="none" stroke="currentColor" viewBox="0 0 24 24" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15 19l-7-7 7-7"/></svg>"#;

const CHEVRON_RIGHT: &str = r#"<svg width="20" height="20" fill="none" stroke="currentColor" viewBox="0 0 24 24" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5l7 7-7 7"/></svg>"#;

// ============================================================================
// Site settings
// ============================================================================

/// Page metadata shown in the document shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Document title and header fallback text.
    pub title: String,

    /// Meta description.
    pub description: String,

    /// Logo image URL. Empty renders the title instead.
    pub logo: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Product Showcase".to_string(),
            description: "A simple web app showcasing a list of products and their details."
                .to_string(),
            logo: String::new(),
        }
    }
}

// ============================================================================
// Components
// ============================================================================

/// A product as a disclosure: the name toggles the description and icon.
///
/// The description is trusted HTML from the CMS and is not escaped.
pub fn product(product: &Product) -> Markup {
    html! {
        details class="product" data-product=(product.id) {
            summary class="product-name" { (product.name) }
            div class="product-body" {
                @if product.has_icon() {
                    div class="product-icon" {
                        img src=(product.icon) alt=(product.name) width="50" height="50";
                    }
                }
                div class="prose" { (PreEscaped(&product.description)) }
            }
        }
    }
}

/// A category card. Products are listed only when `is_open`.
pub fn category(category: &Category, is_open: bool) -> Markup {
    html! {
        div class="category" data-category=(category.id) data-open=(if is_open { "true" } else { "false" }) {
            h2 class="category-name" { (category.name) }
            @if is_open {
                div class="category-products" {
                    @for p in &category.products {
                        (product(p))
                    }
                }
            }
        }
    }
}

/// Link target focusing the carousel on `index`.
pub fn category_href(index: usize) -> String {
    format!("/?{CATEGORY_PARAM}={index}")
}

/// Width and cursor classes for an entry in the wide layout.
pub fn wide_item_classes(position: Position, count: usize) -> String {
    let mut classes = Vec::new();
    if position != Position::Center {
        classes.push("cursor-pointer");
    }
    match count {
        0 => {}
        1 => classes.push("w-full"),
        2 => classes.push("w-1/2"),
        _ => classes.push(if position.is_center() { "w-1/2" } else { "w-1/4" }),
    }
    classes.join(" ")
}

/// The category carousel: controls, indicators and both layouts.
///
/// An empty carousel renders a "No categories available" message instead.
pub fn carousel(carousel: &Carousel<'_, Category>) -> Markup {
    if carousel.is_empty() {
        return html! {
            div class="carousel-empty" { "No categories available" }
        };
    }

    let count = carousel.len();
    let active = carousel.active_index();

    html! {
        nav class="carousel-controls" {
            a class="carousel-button" href=(category_href(carousel.previous_index())) aria-label="Previous category" {
                (PreEscaped(CHEVRON_LEFT))
            }
            h1 class="carousel-title" { "Explore Accounts" }
            a class="carousel-button" href=(category_href(carousel.next_index())) aria-label="Next category" {
                (PreEscaped(CHEVRON_RIGHT))
            }
        }

        div class="carousel-indicators" {
            @for idx in 0..count {
                a class="indicator"
                    href=(category_href(idx))
                    aria-label=(format!("Go to category {}", idx + 1))
                    aria-current=[(idx == active).then_some("true")] {
                    span.indicator-dot.active[idx == active] {}
                }
            }
        }

        div class="carousel" {
            div class="carousel-narrow" {
                @for entry in carousel.narrow_window() {
                    div class="w-full" data-index=(entry.index) data-position=(entry.position.as_str()) {
                        (category(entry.item, entry.position.is_center()))
                    }
                }
            }

            div class="carousel-wide" {
                @for entry in carousel.visible_window() {
                    @if entry.position.is_center() {
                        div class=(wide_item_classes(entry.position, count)) data-index=(entry.index) data-position=(entry.position.as_str()) {
                            (category(entry.item, true))
                        }
                    } @else {
                        a class=(wide_item_classes(entry.position, count)) href=(category_href(entry.index)) data-index=(entry.index) data-position=(entry.position.as_str()) {
                            (category(entry.item, false))
                        }
                    }
                }
            }
        }
    }
}

/// Site header with the logo, or the title when no logo is set.
pub fn header(site: &SiteSettings) -> Markup {
    html! {
        header class="site-header" {
            @if site.logo.is_empty() {
                span class="site-title" { (site.title) }
            } @else {
                img src=(site.logo) alt=(format!("{} logo", site.title)) width="240" height="40";
            }
        }
    }
}

/// Full HTML document around `body`.
pub fn page(site: &SiteSettings, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (site.title) }
                meta name="description" content=(site.description);
                style { (PreEscaped(STYLE)) }
            }
            body {
                a class="skip-link" href="#content" { "Jump to content" }
                div class="layout" {
                    (header(site))
                    main id="content" {
                        (body)
                    }
                }
            }
        }
    }
}

/// Page shown when the catalog could not be loaded.
pub fn error_page(site: &SiteSettings, message: &str) -> Markup {
    page(
        site,
        html! {
            div class="error" role="alert" {
                h1 { "Something went wrong" }
                p { (message) }
            }
        },
    )
}
