use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use postfeed_core::config::PostfeedConfig;
use postfeed_core::telemetry;
use postfeed_core::{CollectionController, DetailController, DetailView};

#[derive(Parser)]
#[command(author, version, about = "Browse the post feed from the terminal")]
struct Args {
    /// Overrides POSTFEED_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Overrides POSTFEED_PAGE_SIZE
    #[arg(long, global = true)]
    page_size: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List posts, optionally filtered, paging through the feed
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        /// Number of pages to materialize
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Show one post with its comments
    Show {
        id: u64,
        #[arg(short, long)]
        translate: bool,
    },
}

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let mut config = PostfeedConfig::from_env();
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(size) = args.page_size {
        config.page_size = size;
    }
    let source = config.api_client()?;

    match args.command {
        Command::List { search, pages } => {
            let mut feed = CollectionController::new(config.page_size);
            feed.initialize(&source);
            if let Some(err) = feed.error() {
                bail!("{err}");
            }
            feed.set_search_query(search);
            for _ in 1..pages.max(1) {
                if !feed.load_more() {
                    break;
                }
            }
            for post in feed.items() {
                println!("{:>4}  {}", post.id, post.title);
            }
            if feed.items().is_empty() {
                println!("Nothing found.");
            }
            println!(
                "-- {} shown / {} matching / {} total{}",
                feed.items().len(),
                feed.filtered_len(),
                feed.total_len(),
                if feed.has_more() { ", more available" } else { "" }
            );
        }
        Command::Show { id, translate } => {
            let translator = config.translator()?;
            let mut detail = DetailController::new();
            detail.load(&source, id, &translator);
            if translate {
                detail.toggle_translation();
            }
            match detail.view() {
                DetailView::Ready { post, comments, .. } => {
                    println!("{}\n\n{}\n", post.title, post.body);
                    println!("Comments ({})", comments.len());
                    for comment in comments {
                        println!(
                            "\n  {} <{}>\n  {}",
                            comment.name,
                            comment.email,
                            comment.body.replace('\n', "\n  ")
                        );
                    }
                }
                DetailView::NotFound => println!("Post not found."),
                DetailView::Failed(message) => bail!("{message}"),
                DetailView::Idle | DetailView::Loading => {}
            }
        }
    }
    Ok(())
}
