//! Selector probe
//!
//! Resolves one selector against a page in Chrome and prints every match with
//! its DOM path as JSON. Useful for checking what a jQuery or Sizzle pattern
//! actually hits before using it in code.

use anyhow::{Context, Result};
use browser_selectors::{BrowserSession, By, ElementFinder, LaunchOptions, LoadOptions, LocatedElement, Selector};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dialect {
    /// Native CSS query selector
    Css,
    /// Class name
    Class,
    /// Element id
    Id,
    /// `name` attribute
    Name,
    /// Tag name
    Tag,
    /// Exact link text
    LinkText,
    /// Partial link text
    PartialLinkText,
    /// XPath expression
    Xpath,
    /// jQuery selector (jQuery is injected if missing)
    Jquery,
    /// Sizzle selector (Sizzle is injected if missing)
    Sizzle,
}

#[derive(Parser)]
#[command(name = "selector-probe")]
#[command(version)]
#[command(about = "Resolve a selector in Chrome and print its matches", long_about = None)]
struct Cli {
    /// Page to load
    #[arg(long, short = 'u', value_name = "URL")]
    url: String,

    /// Selector dialect of PATTERN
    #[arg(long, short = 'd', value_enum, default_value = "css")]
    dialect: Dialect,

    /// Selector pattern
    pattern: String,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// How long to wait for jQuery or Sizzle to load, in milliseconds
    #[arg(long, default_value = "3000")]
    timeout_ms: u64,

    /// Also print the XPath of each match
    #[arg(long)]
    xpath: bool,
}

#[derive(Debug, Serialize)]
struct Match {
    index: usize,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    xpath: Option<String>,
}

fn selector_for(dialect: Dialect, pattern: &str) -> browser_selectors::Result<Selector> {
    match dialect {
        Dialect::Css => By::query_selector(pattern),
        Dialect::Class => By::class_name(pattern),
        Dialect::Id => By::id(pattern),
        Dialect::Name => By::name(pattern),
        Dialect::Tag => By::tag_name(pattern),
        Dialect::LinkText => By::link_text(pattern),
        Dialect::PartialLinkText => By::partial_link_text(pattern),
        Dialect::Xpath => By::xpath(pattern),
        Dialect::Jquery => By::jquery(pattern),
        Dialect::Sizzle => By::sizzle(pattern),
    }
}

fn describe(element: &LocatedElement<'_>, with_xpath: bool) -> Result<Match> {
    let xpath = if with_xpath {
        Some(element.xpath()?.to_string())
    } else {
        None
    };

    Ok(Match {
        index: element.match_index(),
        path: element.path()?.to_string(),
        xpath,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let selector = selector_for(cli.dialect, &cli.pattern).context("Invalid selector")?;

    let session = BrowserSession::launch(LaunchOptions::new().headless(!cli.headed)).context("Failed to launch browser")?;
    session.navigate(&cli.url)?;
    session.wait_for_navigation()?;
    log::info!("Loaded {}", cli.url);

    let finder = ElementFinder::new(LoadOptions::new().timeout(Duration::from_millis(cli.timeout_ms)));
    let elements = finder
        .find_elements(&session, selector)
        .with_context(|| format!("Failed to resolve '{}'", cli.pattern))?;
    log::info!("{} match(es)", elements.len());

    let matches = elements
        .iter()
        .map(|element| describe(element, cli.xpath))
        .collect::<Result<Vec<_>>>()?;

    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}
