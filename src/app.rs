use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::fetch::client::DEFAULT_API_BASE;
use crate::normalize::Row;
use crate::query::{RowFilters, SortKey, SortOrder, TriState};
use crate::runner::{Options, Runner};
use crate::schema::{columns, Schema};

fn print_banner(no_color: bool) {
    let _ = no_color;
    const BANNER: &str = r#"
             __                           __                                 __
    ____    / /  ____ _  _____   ___     / /_   ____    ____ _   _____  ____/ /
   / __ \  / /  / __ `/ / ___/  / _ \   / __ \ / __ \  / __ `/  / ___/ / __  /
  / /_/ / / /  / /_/ / / /__   /  __/  / /_/ // /_/ / / /_/ /  / /    / /_/ /
 / .___/ /_/   \__,_/  \___/   \___/  /_.___/ \____/  \__,_/  /_/     \__,_/
/_/
       v0.3.2 - personal places dashboard
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    if let Some(version) = cmd.get_version() {
        out.push_str(cmd.get_name());
        out.push(' ');
        out.push_str(version);
        out.push('\n');
    } else {
        out.push_str(cmd.get_name());
        out.push('\n');
    }

    if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Usage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS]\n\n");

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }

        let heading = arg.get_help_heading().unwrap_or("Options").to_string();

        let idx = match section_idx.get(&heading).copied() {
            Some(i) => i,
            None => {
                sections.push((heading.clone(), Vec::new()));
                let i = sections.len() - 1;
                section_idx.insert(heading, i);
                i
            }
        };

        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");

        for arg in args {
            let mut parts: Vec<String> = Vec::new();

            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }

            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }

            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    let rendered = format!("--{alias}");
                    if !parts.iter().any(|p| p == &rendered) {
                        parts.push(rendered);
                    }
                }
            }

            let mut flags = parts.join(", ");

            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                let placeholder = format!("<{value_name}>");
                let min_values = arg.get_num_args().map(|r| r.min_values()).unwrap_or(1);

                if min_values == 0 {
                    flags.push(' ');
                    flags.push('[');
                    flags.push_str(&placeholder);
                    flags.push(']');
                } else {
                    flags.push(' ');
                    flags.push_str(&placeholder);
                }
            }

            out.push_str("  ");
            out.push_str(&flags);
            out.push('\n');

            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str("          ");
                    out.push_str(help.trim());
                    out.push('\n');
                }
            }

            out.push('\n');
        }
    }

    out
}

fn format_opt_value<'a>(v: &'a str, default: &'a str) -> &'a str {
    if v.trim().is_empty() {
        default
    } else {
        v
    }
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn summarize_filters(filters: &RowFilters) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if !filters.cities.is_empty() {
        parts.push(format!("city={}", filters.cities.join(",")));
    }
    if let Some(category) = filters.category.as_deref() {
        parts.push(format!("category={category}"));
    }
    if !filters.sub_categories.is_empty() {
        parts.push(format!("tags={}", filters.sub_categories.join(",")));
    }
    if !filters.cuisines.is_empty() {
        parts.push(format!("cuisine={}", filters.cuisines.join(",")));
    }
    if filters.visited != TriState::All {
        parts.push(format!("visited={}", filters.visited.as_str()));
    }
    if filters.reservation != TriState::All {
        parts.push(format!("reservation={}", filters.reservation.as_str()));
    }
    if !filters.price_ranges.is_empty() {
        parts.push(format!("price={}", filters.price_ranges.join(",")));
    }
    if let Some(min) = filters.min_rating {
        parts.push(format!("min-rating={min}"));
    }
    if filters.search.is_some() {
        parts.push("search=...".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    token: String,
    collection: String,
    api_base: String,
    page_size: u32,
    max_pages: u32,
    rate: u32,
    timeout: usize,
    cache_ttl: u64,
    schema: Schema,
    filters: RowFilters,
    sort_by: SortKey,
    sort_order: SortOrder,
    page: usize,
    per_page: usize,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    // flag beats environment beats config file
    let token = args
        .token
        .or_else(|| env::var("PLACEBOARD_TOKEN").ok())
        .or(cfg.token)
        .unwrap_or_default();
    let collection = args.collection.or(cfg.collection).unwrap_or_default();
    let api_base = args
        .api_base
        .or(cfg.api_base)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(100);
    let max_pages = args.max_pages.or(cfg.max_pages).unwrap_or(200);
    let rate = args.rate.or(cfg.rate).unwrap_or(3);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let cache_ttl = args.cache_ttl.or(cfg.cache_ttl).unwrap_or(3600);

    let schema = match cfg.schema.as_deref() {
        Some(entries) => Schema::from_entries(entries),
        None => Schema::places(),
    };
    if schema.is_empty() {
        return Err("config schema has no columns".to_string());
    }

    let mut filters = RowFilters {
        cities: args.city,
        category: args.category,
        sub_categories: args.sub_category,
        cuisines: args.cuisine,
        ..RowFilters::default()
    };
    if let Some(raw) = args.visited.as_deref() {
        filters.visited =
            TriState::parse(raw).ok_or_else(|| format!("invalid --visited '{raw}'"))?;
    }
    if let Some(raw) = args.reservation.as_deref() {
        filters.reservation =
            TriState::parse(raw).ok_or_else(|| format!("invalid --reservation '{raw}'"))?;
    }
    if let Some(raw) = args.price.as_deref() {
        filters.price_ranges = crate::utils::parse_name_set_csv(raw)
            .map_err(|e| format!("invalid --price '{raw}': {e}"))?;
    }
    filters.min_rating = args.min_rating;
    if let Some(raw) = args.search.as_deref() {
        let re = crate::utils::build_search_regex(raw)
            .map_err(|e| format!("invalid --search '{raw}': {e}"))?;
        filters.search = Some(Arc::new(re));
    }

    let sort_by = match args.sort_by.as_deref().or(cfg.sort_by.as_deref()) {
        Some(raw) => SortKey::parse(raw).ok_or_else(|| format!("invalid --sort-by '{raw}'"))?,
        None => SortKey::Name,
    };
    let sort_order = match args.sort_order.as_deref().or(cfg.sort_order.as_deref()) {
        Some(raw) => {
            SortOrder::parse(raw).ok_or_else(|| format!("invalid --sort-order '{raw}'"))?
        }
        None => SortOrder::Ascending,
    };

    let page = args.page.unwrap_or(1) as usize;
    let per_page = args.per_page.or(cfg.per_page).unwrap_or(20) as usize;

    let output = args.output.or(cfg.output);
    let output_format = args.output_format.or(cfg.output_format);

    Ok(RunConfig {
        token,
        collection,
        api_base,
        page_size,
        max_pages,
        rate,
        timeout,
        cache_ttl,
        schema,
        filters,
        sort_by,
        sort_order,
        page,
        per_page,
        output,
        output_format,
        no_color,
        verbose: args.verbose,
    })
}

fn print_place_line(row: &Row) {
    let place = row.text(columns::PLACE).unwrap_or("");
    let city = row.text(columns::CITY).unwrap_or("-");
    let rating = match row.number(columns::RATING) {
        Some(value) => format!("{value}/5"),
        None => "unrated".to_string(),
    };
    let status = if row.boolean(columns::VISITED) {
        "visited".bold().green()
    } else {
        "to visit".yellow()
    };
    let mut line = format!(
        "{}{}{} {}{}{} {}{}{} {}{}{}",
        "[".bold().white(),
        place.bold().cyan(),
        "]".bold().white(),
        "[".bold().white(),
        city.bold().blue(),
        "]".bold().white(),
        "[".bold().white(),
        rating.yellow(),
        "]".bold().white(),
        "[".bold().white(),
        status,
        "]".bold().white(),
    );
    let tags = row.tags(columns::SUB_CATEGORY);
    if !tags.is_empty() {
        line.push(' ');
        line.push_str(&tags.join(",").bold().purple().to_string());
    }
    println!("{}", line);
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);

    format_kv_line(
        "Source",
        &format!(
            "collection={} api={} columns={}",
            format_opt_value(&run.collection, "unset"),
            run.api_base,
            run.schema.len()
        ),
    );
    format_kv_line(
        "Fetch",
        &format!(
            "page_size={} max_pages={} rate={}/s timeout={}s cache_ttl={}s",
            run.page_size, run.max_pages, run.rate, run.timeout, run.cache_ttl
        ),
    );
    format_kv_line(
        "Filters",
        summarize_filters(&run.filters).as_deref().unwrap_or("none"),
    );
    format_kv_line(
        "Display",
        &format!(
            "sort={}:{} page={} per_page={}",
            run.sort_by.as_str(),
            run.sort_order.as_str(),
            run.page,
            run.per_page
        ),
    );
    format_kv_line(
        "Output",
        &format!(
            "file={} format={}",
            format_opt_value(run.output.as_deref().unwrap_or(""), "stdout"),
            format_opt_value(run.output_format.as_deref().unwrap_or(""), "auto"),
        ),
    );
    println!();

    let pb = ProgressBar::new(run.max_pages as u64);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(
            ":: Progress: [{pos}/{len}] :: {per_sec} :: Duration: [{elapsed_precise}] :: {msg}",
        )
        .map_err(|e| format!("failed to build progress bar style: {e}"))?
        .progress_chars(r#"#>-"#),
    );

    let runner = Runner::new(Options {
        token: run.token.clone(),
        collection: run.collection.clone(),
        api_base: run.api_base.clone(),
        page_size: run.page_size,
        max_pages: run.max_pages,
        rate: run.rate,
        timeout_seconds: run.timeout,
        cache_ttl_seconds: run.cache_ttl,
        schema: run.schema.clone(),
    })
    .map_err(|e| e.to_string())?;

    let report = runner
        .run_with_progress(&pb)
        .await
        .map_err(|e| e.to_string())?;
    pb.finish_and_clear();

    let total_fetched = report.rows.len();
    let mut rows = crate::query::filter_rows(report.rows, &run.filters);
    crate::query::sort_rows(&mut rows, run.sort_by, run.sort_order);

    if let Some(outfile_path) = run.output.as_ref() {
        let output_format = run
            .output_format
            .as_deref()
            .and_then(crate::output::OutputFormat::parse)
            .or_else(|| crate::output::infer_format_from_path(outfile_path))
            .unwrap_or(crate::output::OutputFormat::Text);

        let records = crate::output::build_records(&rows);
        let rendered = match output_format {
            crate::output::OutputFormat::Text => crate::output::render_text(&records),
            crate::output::OutputFormat::Json => crate::output::render_json(&records),
            crate::output::OutputFormat::Csv => crate::output::render_csv(&records),
            crate::output::OutputFormat::Html => crate::output::render_html(&records),
        };

        let mut outfile = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(outfile_path)
            .await
            .map_err(|e| format!("failed to open output file: {e}"))?;
        outfile
            .write_all(&rendered)
            .await
            .map_err(|_| "failed to write output file".to_string())?;
        format_kv_line(
            "Written",
            &format!("{} records to {}", rows.len(), outfile_path),
        );
    } else {
        let page_rows = crate::query::paginate(&rows, run.page, run.per_page);
        for row in page_rows {
            print_place_line(row);
        }
        let pages = crate::query::page_count(rows.len(), run.per_page);
        println!();
        format_kv_line(
            "Shown",
            &format!(
                "{} of {} (page {}/{})",
                page_rows.len(),
                rows.len(),
                run.page.clamp(1, pages),
                pages
            ),
        );
    }

    format_kv_line(
        "Fetched",
        &format!(
            "rows={} pages={} cached={}",
            total_fetched,
            report.pages_fetched,
            format_bool(report.from_cache)
        ),
    );
    if run.verbose > 0 {
        let cities = crate::query::distinct_text(&rows, columns::CITY);
        let categories = crate::query::distinct_text(&rows, columns::CATEGORY);
        let tags = crate::query::distinct_tags(&rows, columns::SUB_CATEGORY);
        let cuisines = crate::query::distinct_tags(&rows, columns::CUISINE);
        format_kv_line("Cities", &cities.join(", "));
        format_kv_line("Categories", &categories.join(", "));
        format_kv_line("Tags", &tags.join(", "));
        format_kv_line("Cuisines", &cuisines.join(", "));
    }

    println!();
    println!(
        ":: Completed :: fetch took {}s ::",
        report.elapsed.as_secs()
    );

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => {
                config::ensure_default_config_file(&path)?;
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
