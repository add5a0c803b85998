use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gakumark::config::CONFIG_FILE;
use gakumark::{
    audit_anchor_ids, slugify, title_slug, Article, MarkdownRenderer, PageKind, PanelPlacement,
    SiteConfig,
};

#[derive(Parser)]
#[command(name = "gakumark", version, about = "Render Gaku-Log article Markdown")]
struct Cli {
    /// Site configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown file to HTML
    Render {
        file: PathBuf,

        /// Prepend the table-of-contents panel
        #[arg(long)]
        toc: bool,
    },

    /// List the headings of a Markdown file
    Toc {
        file: PathBuf,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the anchor id for a heading text
    Slug {
        text: String,

        /// Use the article title slug rules instead
        #[arg(long)]
        title: bool,
    },

    /// Check heading ids in an HTML file
    Audit { file: PathBuf },

    /// Show whether ads are displayed on a page
    Ads {
        /// home, article, article_list or about
        page: PageKind,

        #[arg(long)]
        admin: bool,

        /// Paragraph count, to list in-article ad positions
        #[arg(long)]
        paragraphs: Option<usize>,
    },

    /// Print SEO metadata for an exported article
    Meta { file: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Render { file, toc } => {
            let source = read_file(&file)?;
            let renderer = MarkdownRenderer::with_options(config.render);
            let article = renderer.render_article(&source);
            if toc {
                let active = article.toc.entries().first().map(|e| e.anchor_id.as_str());
                if let Some(panel) = article.toc.to_html(active, PanelPlacement::Inline, renderer.options()) {
                    println!("{panel}");
                }
            }
            print!("{}", article.html);
        }

        Command::Toc { file, json } => {
            let source = read_file(&file)?;
            let headings = gakumark::extract_headings(&source);
            if json {
                println!("{}", serde_json::to_string_pretty(&headings)?);
            } else {
                for entry in &headings {
                    let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
                    println!("{indent}{} (#{})", entry.text, entry.anchor_id);
                }
            }
        }

        Command::Slug { text, title } => {
            let slug = if title { title_slug(&text) } else { slugify(&text) };
            println!("{slug}");
        }

        Command::Audit { file } => {
            let html = read_file(&file)?;
            let mismatches = audit_anchor_ids(&html);
            for m in &mismatches {
                println!(
                    "h{} \"{}\": expected id \"{}\", found {}",
                    m.level,
                    m.text,
                    m.expected,
                    m.found.as_deref().map_or("none".to_string(), |id| format!("\"{id}\""))
                );
            }
            if !mismatches.is_empty() {
                process::exit(1);
            }
        }

        Command::Ads {
            page,
            admin,
            paragraphs,
        } => {
            let ads = &config.ads;
            println!("{page}: {}", ads.should_display_ad(page, admin));
            if let Some(total) = paragraphs {
                let shown = ads.should_display_ad(PageKind::Article, admin);
                let positions: Vec<usize> = (0..total)
                    .filter(|&i| shown && ads.should_show_in_article_ad(i, total))
                    .collect();
                println!("in-article: {positions:?}");
            }
        }

        Command::Meta { file } => {
            let json = read_file(&file)?;
            let article = Article::from_json(&json)
                .with_context(|| format!("Failed to parse article: {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&article.seo())?);
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading input");
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_config(path: &Path) -> Result<SiteConfig> {
    SiteConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))
}
