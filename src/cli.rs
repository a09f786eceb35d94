// src/cli.rs
use std::{
    fmt::Write as _,
    path::PathBuf,
    sync::atomic::AtomicBool,
};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    config::{self, AppOptions, ExportFormat, consts::DEFAULT_AUTHORS_FILE},
    data::Author,
    diff::ChangeKind,
    error::Result,
    export,
    file::{resolve_out_path, sanitize_filename},
    notify::StdoutNotifier,
    progress::Progress,
    schedule,
    tracker::{RefreshReport, Summary, Tracker},
};

/// Track Google Scholar citation counts from the command line.
#[derive(Parser, Debug)]
#[command(name = "scholar_watch", version, about, long_about = None)]
pub struct Cli {
    /// Store directory (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Config file (default: ./scholar_watch.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Track a new author (or refresh one already tracked) from a profile URL
    Add { url: String },
    /// One line per tracked author
    List,
    /// Metrics and papers of one author
    Show {
        user_id: String,
        /// Only papers that changed on the last refresh
        #[arg(long)]
        changed: bool,
    },
    /// Refresh every tracked author
    Refresh,
    /// Refresh a single author
    RefreshOne { user_id: String },
    /// Stop tracking an author
    Remove { user_id: String },
    /// Clear the NEW marker of one author, or all with --all
    MarkRead {
        #[arg(required_unless_present = "all")]
        user_id: Option<String>,
        #[arg(long, conflicts_with = "user_id")]
        all: bool,
    },
    /// Refresh periodically until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(long)]
        interval: Option<u64>,
        /// Seconds before the first refresh
        #[arg(long)]
        initial_delay: Option<u64>,
    },
    /// Author count, summed citations, recent changes
    Summary,
    /// Write the author table or one author's papers as CSV/TSV
    Export {
        #[arg(value_enum)]
        table: ExportTable,
        /// Required for `papers`
        #[arg(required_if_eq("table", "papers"))]
        user_id: Option<String>,
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Output file or directory
        #[arg(short = 'o', long)]
        out: Option<String>,
        /// Force a header row
        #[arg(long, conflicts_with = "no_headers")]
        headers: bool,
        /// Omit the header row
        #[arg(long)]
        no_headers: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Authors,
    Papers,
}

/// Progress on stderr, one line per author.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        eprintln!("Refreshing {}…", plural!(total, "author"));
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, name: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {name}", self.done, self.total);
    }
    fn item_failed(&mut self, name: &str, error: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {name} FAILED: {error}", self.done, self.total);
    }
}

/// Config file, then flags.
pub fn resolve_options(cli: &Cli) -> Result<AppOptions> {
    let mut opts = config::file::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.store {
        opts.store_dir = dir.clone();
    }
    Ok(opts)
}

pub fn run(cli: Cli) -> Result<()> {
    let opts = resolve_options(&cli)?;
    let _log = crate::log::init(&opts.store_dir, cli.debug);
    logd!("Store at {}", opts.store_dir.display());
    let tracker = Tracker::from_options(&opts)?;
    execute(&tracker, &opts, cli.command)
}

pub fn execute(tracker: &Tracker, opts: &AppOptions, command: Command) -> Result<()> {
    let now = tracker.now();
    match command {
        Command::Add { url } => {
            let added = tracker.add_author(&url)?;
            let verb = if added.existed { "Updated" } else { "Added" };
            println!("{verb}: {}", author_line(&added.author, now));
        }
        Command::List => {
            print!("{}", render_list(&tracker.authors()?, now));
        }
        Command::Show { user_id, changed } => {
            print!("{}", render_author(&tracker.author(&user_id)?, now, changed));
        }
        Command::Refresh => {
            let mut progress = CliProgress::default();
            let report = tracker.refresh_all(Some(&mut progress), &StdoutNotifier)?;
            print!("{}", render_report(&report));
        }
        Command::RefreshOne { user_id } => {
            let delta = tracker.refresh_one(&user_id, &StdoutNotifier)?;
            if delta.citation.is_none() && delta.papers.is_empty() {
                println!("No change.");
            }
        }
        Command::Remove { user_id } => {
            let gone = tracker.remove_author(&user_id)?;
            println!("Removed {} ({})", gone.name, gone.user_id);
        }
        Command::MarkRead { user_id, all } => {
            if all {
                let n = tracker.mark_all_read()?;
                println!("Cleared {}.", plural!(n, "marker"));
            } else if let Some(id) = user_id {
                tracker.mark_read(&id)?;
                println!("Marked {id} as read.");
            }
        }
        Command::Watch { interval, initial_delay } => {
            let mut sched = opts.schedule.clone();
            if let Some(s) = interval { sched.interval_secs = s; }
            if let Some(s) = initial_delay { sched.initial_delay_secs = s; }
            println!("Watching {} (every {}s). Ctrl-C to stop.", plural!(tracker.authors()?.len(), "author"), sched.interval_secs);
            let stop = AtomicBool::new(false);
            schedule::watch(tracker, &sched, &StdoutNotifier, &stop, |r| {
                if let Ok(report) = r {
                    print!("{}", render_report(report));
                }
            });
        }
        Command::Summary => {
            let s = tracker.summary()?;
            println!("{}", render_summary(&s, tracker.last_update_time()?));
        }
        Command::Export { table, user_id, format, out, headers, no_headers } => {
            let mut eo = opts.export.clone();
            if let Some(f) = format { eo.format = f; }
            if headers { eo.include_headers = true; }
            if no_headers { eo.include_headers = false; }

            let (data, stem) = match table {
                ExportTable::Authors => (export::authors_table(&tracker.authors()?, now), s!(DEFAULT_AUTHORS_FILE)),
                ExportTable::Papers => {
                    let id = user_id.unwrap_or_default();
                    let a = tracker.author(&id)?;
                    (export::papers_table(&a), format!("papers_{}", sanitize_filename(&a.user_id)))
                }
            };
            let path = match out {
                Some(o) => {
                    let default_name = format!("{stem}.{}", eo.format.ext());
                    resolve_out_path(&o, &default_name)
                        .map_err(|source| crate::error::Error::Export { path: PathBuf::from(&o), source })?
                }
                None => eo.default_path(&stem),
            };
            let written = data.write(&path, &eo)?;
            println!("Wrote {}", written.display());
        }
    }
    Ok(())
}

/* ---------------- Rendering ---------------- */

fn when(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| s!("never"))
}

pub fn author_line(a: &Author, now: DateTime<Utc>) -> String {
    let m = &a.metrics;
    let mut line = format!(
        "{:<4}{} ({}) | {} citations",
        if a.is_new(now) { "NEW" } else { "" },
        a.name,
        a.user_id,
        m.total_citations
    );
    if a.is_new(now) {
        let d = a.citation_delta();
        let _ = write!(line, " ({}{d})", if d > 0 { "+" } else { "" });
    }
    let _ = write!(
        line,
        " | h {} | i10 {} | {} | {}",
        m.h_index,
        m.i10_index,
        a.working_domain.as_deref().unwrap_or("-"),
        when(a.last_updated)
    );
    if let Some(e) = &a.last_error {
        let _ = write!(line, " | last error: {e}");
    }
    line
}

pub fn render_list(authors: &[Author], now: DateTime<Utc>) -> String {
    if authors.is_empty() {
        return s!("No authors tracked.\n");
    }
    authors.iter().map(|a| author_line(a, now) + "\n").collect()
}

pub fn render_author(a: &Author, now: DateTime<Utc>, changed_only: bool) -> String {
    let m = &a.metrics;
    let mut out = String::new();
    let _ = writeln!(out, "{}", a.name);
    let _ = writeln!(out, "{}", a.affiliation);
    if !a.interests.is_empty() {
        let _ = writeln!(out, "Interests: {}", a.interests.join(", "));
    }
    let _ = writeln!(out, "{}", a.url);
    let _ = writeln!(out);
    let _ = writeln!(out, "             All   Recent");
    let _ = writeln!(out, "Citations {:>6}   {:>6}", m.total_citations, m.recent_citations);
    let _ = writeln!(out, "h-index   {:>6}   {:>6}", m.h_index, m.recent_h_index);
    let _ = writeln!(out, "i10-index {:>6}   {:>6}", m.i10_index, m.recent_i10_index);
    if a.is_new(now) {
        let _ = writeln!(out, "NEW since {}: {:+}", when(a.change.change_timestamp), a.citation_delta());
    }
    let _ = writeln!(out);

    if changed_only {
        if a.paper_changes.is_empty() {
            let _ = writeln!(out, "No paper changes recorded.");
        }
        for c in &a.paper_changes {
            let tag = match c.kind() {
                ChangeKind::Added => "new",
                ChangeKind::Increased | ChangeKind::Decreased => "",
            };
            let _ = writeln!(out, "{:>6} {:>+5} {tag:<3} {}", c.new, c.delta(), c.title);
        }
    } else {
        let _ = writeln!(out, "{}:", plural!(a.papers.len(), "paper"));
        for p in &a.papers {
            let year = p.year.map(|y| y.to_string()).unwrap_or_default();
            let _ = writeln!(out, "{:>6} {:>4}  {}", p.citations, year, p.title);
        }
    }
    out
}

pub fn render_summary(s: &Summary, last: Option<DateTime<Utc>>) -> String {
    format!(
        "{}, {} citations total, {} with new citations. Last update: {}",
        plural!(s.authors, "author"),
        s.total_citations,
        s.with_changes,
        when(last)
    )
}

pub fn render_report(r: &RefreshReport) -> String {
    let mut out = format!("Refreshed {}/{}", r.refreshed, r.total());
    if !r.failed.is_empty() {
        let _ = write!(out, ", {} failed", r.failed.len());
    }
    out.push('\n');
    for c in &r.citation_changes {
        let _ = writeln!(out, "  {}: {} → {} ({:+})", c.name, c.old, c.new, c.delta());
    }
    for (name, err) in &r.failed {
        let _ = writeln!(out, "  {name}: {err}");
    }
    out
}
