use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use pdfsplit::{
    bookmark_rows, compute_ranges, marker_rows, page_label, toggle, BookmarkDb, BookmarkStore,
    Config, CutSet, Library, PageSource, PageWindow, PdfFile, PdfSplitter, Session, TreeNode,
    XlsxWriter,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "pdfsplit")]
#[command(about = "Split PDFs into sections by bookmarks or section markers")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Library directory (overrides config)
    #[arg(long, global = true)]
    pdf_dir: Option<PathBuf>,

    /// Bookmark database (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Section marker (overrides config)
    #[arg(long, global = true)]
    marker: Option<String>,

    /// Write spreadsheet text as extracted, without cleaning
    #[arg(long, global = true)]
    no_clean: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the page count of a PDF
    Pages {
        pdf: PathBuf,
    },
    /// Print the extracted text of one page (1-based)
    Text {
        pdf: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Manage bookmarks (pages are 1-based)
    #[command(subcommand)]
    Bookmark(BookmarkCommand),
    /// Show the sections a split would produce
    Ranges {
        pdf: PathBuf,
        /// Cut pages to use instead of stored bookmarks (1-based)
        #[arg(long, value_delimiter = ',')]
        cuts: Option<Vec<usize>>,
    },
    /// Write one PDF per bookmarked section
    Split {
        pdf: PathBuf,
        /// Output directory (defaults to the library directory)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Copy a PDF into the library under a numbered name
    Import {
        pdf: PathBuf,
    },
    /// List the library with split outputs under their parents
    Tree,
    /// Delete a file from the library and forget its bookmarks
    Delete {
        /// Path relative to the library directory
        name: String,
    },
    /// Export bookmarked sections of a PDF to a spreadsheet
    ExportBookmarks {
        pdf: PathBuf,
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Export marker-delimited sections of PDFs to a spreadsheet
    ExportText {
        pdfs: Vec<PathBuf>,
        #[arg(long, short)]
        out: PathBuf,
        /// Take (edited) page text from a saved session
        #[arg(long)]
        session: Option<PathBuf>,
    },
    /// Edit page text kept in a session file
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Debug, Subcommand)]
enum BookmarkCommand {
    Add { pdf: PathBuf, pages: Vec<usize> },
    Remove { pdf: PathBuf, pages: Vec<usize> },
    Toggle { pdf: PathBuf, page: usize },
    List { pdf: PathBuf },
    Clear { pdf: PathBuf },
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    /// Load PDFs into a session file, creating it if needed
    Open { session: PathBuf, pdfs: Vec<PathBuf> },
    /// Show one page of a document in the session (1-based)
    Show {
        session: PathBuf,
        pdf: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Insert a section break into a page at a character offset
    Break {
        session: PathBuf,
        pdf: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        offset: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(dir) = &global.pdf_dir {
        config.pdf_dir = dir.clone();
    }
    if let Some(db) = &global.database {
        config.database = db.clone();
    }
    if let Some(marker) = &global.marker {
        config.marker = marker.clone();
    }
    if global.no_clean {
        config.clean_text = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Pages { pdf } => {
            let file = open_pdf(&pdf)?;
            let window = PageWindow::new(config.window_size, file.page_count());
            println!("{} pages ({})", file.page_count(), window.label());
        }
        Command::Text { pdf, page } => {
            let file = open_pdf(&pdf)?;
            let text = file
                .page_text(to_index(page)?)
                .with_context(|| format!("Failed to extract page {}", page))?;
            println!("{}", text);
        }
        Command::Bookmark(cmd) => run_bookmark(cmd, config)?,
        Command::Ranges { pdf, cuts } => {
            let file = open_pdf(&pdf)?;
            let cuts = match cuts {
                Some(pages) => to_cut_set(&pages)?,
                None => open_db(config)?.load(&file.file_name())?,
            };
            let ranges = compute_ranges(file.page_count(), &cuts)?;
            for (i, range) in ranges.iter().enumerate() {
                println!("Section {}: pages {} ({} pages)", i + 1, range, range.len());
            }
        }
        Command::Split { pdf, out } => {
            let file = open_pdf(&pdf)?;
            let cuts = require_bookmarks(
                open_db(config)?.load(&file.file_name())?,
                &file.file_name(),
            )?;

            let out_dir = out.unwrap_or_else(|| config.pdf_dir.clone());
            let outputs = PdfSplitter::new(&file, &out_dir)
                .split(&cuts)
                .context("Failed to split PDF")?;
            for output in &outputs {
                println!("  {}  (pages {})", output.path.display(), output.range);
            }
            println!("✓ Wrote {} files to {}", outputs.len(), out_dir.display());
        }
        Command::Import { pdf } => {
            let library = open_library(config)?;
            let path = library
                .import(&pdf)
                .with_context(|| format!("Failed to import {}", pdf.display()))?;
            println!("{}", path.display());
        }
        Command::Tree => {
            let library = open_library(config)?;
            print_tree(&library.tree()?);
        }
        Command::Delete { name } => {
            let library = open_library(config)?;
            let path = library.resolve(&name)?;
            library
                .delete(&path)
                .with_context(|| format!("Failed to delete {}", name))?;

            if let Some(file_name) = path.file_name() {
                let cleared = open_db(config)?.clear(&file_name.to_string_lossy())?;
                if cleared > 0 {
                    info!("Removed {} bookmarks of {}", cleared, name);
                }
            }
            println!("✓ Deleted {}", path.display());
        }
        Command::ExportBookmarks { pdf, out } => {
            let file = open_pdf(&pdf)?;
            let cuts = open_db(config)?.load(&file.file_name())?;
            let rows = bookmark_rows(&file.file_name(), &file, &cuts, config.clean_text)?;
            XlsxWriter::new()
                .write_to_file(&rows, &out)
                .with_context(|| format!("Failed to export to {}", out.display()))?;
            println!("✓ Exported {} sections to {}", rows.len(), out.display());
        }
        Command::ExportText { pdfs, out, session } => {
            let mut session = match session {
                Some(path) => Session::load(&path)
                    .with_context(|| format!("Failed to load session {}", path.display()))?,
                None => Session::new(config.pdf_dir.to_string_lossy()),
            };

            select_for_export(&mut session, &pdfs)?;

            let rows = marker_rows(&session, &config.marker, config.clean_text);
            if rows.is_empty() {
                bail!("No content found for the selected PDFs");
            }
            XlsxWriter::new()
                .write_to_file(&rows, &out)
                .with_context(|| format!("Failed to export to {}", out.display()))?;
            println!("✓ Exported {} sections to {}", rows.len(), out.display());
        }
        Command::Session(cmd) => run_session(cmd)?,
    }

    Ok(())
}

fn run_bookmark(command: BookmarkCommand, config: &Config) -> Result<()> {
    let db = open_db(config)?;

    match command {
        BookmarkCommand::Add { pdf, pages } => {
            let file = open_pdf(&pdf)?;
            for page in pages {
                let index = checked_page(page, file.page_count())?;
                if !db.add(&file.file_name(), index)? {
                    warn!("{} already bookmarked", page_label(index));
                }
            }
            print_bookmarks(&db.load(&file.file_name())?);
        }
        BookmarkCommand::Remove { pdf, pages } => {
            let name = document_id(&pdf)?;
            for page in pages {
                let index = to_index(page)?;
                if !db.remove(&name, index)? {
                    warn!("{} was not bookmarked", page_label(index));
                }
            }
            print_bookmarks(&db.load(&name)?);
        }
        BookmarkCommand::Toggle { pdf, page } => {
            let file = open_pdf(&pdf)?;
            let index = checked_page(page, file.page_count())?;
            let set = toggle(&db, &file.file_name(), index)?;
            println!(
                "{} {}",
                page_label(index),
                if set { "bookmarked" } else { "unbookmarked" }
            );
        }
        BookmarkCommand::List { pdf } => {
            print_bookmarks(&db.load(&document_id(&pdf)?)?);
        }
        BookmarkCommand::Clear { pdf } => {
            let cleared = db.clear(&document_id(&pdf)?)?;
            println!("Removed {} bookmarks", cleared);
        }
    }

    Ok(())
}

fn run_session(command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Open { session: path, pdfs } => {
            let mut session = if path.is_file() {
                Session::load(&path)?
            } else {
                Session::default()
            };

            for pdf in &pdfs {
                let file = open_pdf(pdf)?;
                if session.pdf_dir.is_empty() {
                    if let Some(dir) = pdf.parent() {
                        session.pdf_dir = dir.to_string_lossy().into_owned();
                    }
                }
                session.open_source(&pdf.to_string_lossy(), &file)?;
            }
            session.select(pdfs.iter().map(|p| p.to_string_lossy().into_owned()).collect());
            session.save(&path)?;
            println!(
                "{} documents in {}",
                session.pdf_content.len(),
                path.display()
            );
        }
        SessionCommand::Show { session: path, pdf, page } => {
            let mut session = Session::load(&path)?;
            focus(&mut session, &pdf, page)?;
            println!("{}", session.current_text().unwrap_or_default());
        }
        SessionCommand::Break {
            session: path,
            pdf,
            page,
            offset,
        } => {
            let mut session = Session::load(&path)?;
            focus(&mut session, &pdf, page)?;
            session.insert_break(offset);
            session.save(&path)?;
            println!("{}", session.current_text().unwrap_or_default());
        }
    }

    Ok(())
}

/// Make `pdf` current in the session at the 1-based `page`
///
/// The saved selection is left alone.
fn focus(session: &mut Session, pdf: &Path, page: usize) -> Result<()> {
    let key = pdf.to_string_lossy();
    let Some(pages) = session.pdf_content.get(&*key).map(Vec::len) else {
        bail!("{} is not part of this session", pdf.display());
    };

    let index = to_index(page)?;
    if !session.focus(&key, index) {
        bail!("Page {} outside document of {} pages", page, pages);
    }
    Ok(())
}

/// Load any of `pdfs` the session lacks and select them
///
/// With no `pdfs` the session's own selection is exported.
fn select_for_export(session: &mut Session, pdfs: &[PathBuf]) -> Result<()> {
    if pdfs.is_empty() {
        return Ok(());
    }

    let mut selected = Vec::with_capacity(pdfs.len());
    for pdf in pdfs {
        let key = pdf.to_string_lossy().into_owned();
        if !session.pdf_content.contains_key(&key) {
            let file = open_pdf(pdf)?;
            session.open_source(&key, &file)?;
        }
        selected.push(key);
    }
    session.select(selected);
    Ok(())
}

fn require_bookmarks(cuts: CutSet, document: &str) -> Result<CutSet> {
    if cuts.is_empty() {
        bail!(
            "No bookmarks for {}; add some with `pdfsplit bookmark add` before splitting",
            document
        );
    }
    Ok(cuts)
}

fn open_pdf(path: &Path) -> Result<PdfFile> {
    PdfFile::open(path).with_context(|| format!("Failed to open PDF {}", path.display()))
}

fn open_db(config: &Config) -> Result<BookmarkDb> {
    BookmarkDb::open(&config.database).with_context(|| {
        format!(
            "Failed to open bookmark database {}",
            config.database.display()
        )
    })
}

fn open_library(config: &Config) -> Result<Library> {
    Library::open(&config.pdf_dir).with_context(|| {
        format!("Failed to open library {}", config.pdf_dir.display())
    })
}

/// Bookmarks are keyed by file name, so a missing file can still be managed
fn document_id(pdf: &Path) -> Result<String> {
    match pdf.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => bail!("{} has no file name", pdf.display()),
    }
}

fn to_index(page: usize) -> Result<usize> {
    match page.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Pages are numbered from 1"),
    }
}

fn checked_page(page: usize, page_count: usize) -> Result<usize> {
    let index = to_index(page)?;
    if index >= page_count {
        bail!("Page {} outside document of {} pages", page, page_count);
    }
    Ok(index)
}

fn to_cut_set(pages: &[usize]) -> Result<CutSet> {
    pages.iter().map(|&page| to_index(page)).collect()
}

fn print_bookmarks(cuts: &CutSet) {
    if cuts.is_empty() {
        println!("No bookmarks");
        return;
    }
    for page in cuts.iter() {
        println!("{}", page_label(page));
    }
}

fn print_tree(nodes: &[TreeNode]) {
    for node in nodes {
        println!("{}", node.id);
        for child in &node.children {
            println!("  {}", child.id);
        }
    }
}
