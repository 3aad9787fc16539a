use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "placeboard",
    version,
    disable_version_flag = true,
    about = "personal places dashboard for a Notion collection",
    long_about = "Placeboard fetches a places collection from the Notion API and turns it into a filterable, sortable dashboard on the terminal or as a self-contained HTML page.\n\nExamples:\n  placeboard -u d9824bdc84454327be8b5b47500af6ce -k secret_xxx\n  placeboard -u <database-id> --city \"San Sebastian\" --min-rating 4\n  placeboard -u <database-id> -o places.html\n\nTip: Use --config to persist the token and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'u',
        long = "db",
        visible_alias = "collection",
        value_name = "ID",
        help_heading = "Source",
        help = "Collection (database) id to query."
    )]
    pub collection: Option<String>,

    #[arg(
        short = 'k',
        long = "tk",
        visible_alias = "token",
        value_name = "TOKEN",
        help_heading = "Source",
        help = "Integration token (falls back to PLACEBOARD_TOKEN, then config)."
    )]
    pub token: Option<String>,

    #[arg(
        long = "api",
        visible_alias = "api-base",
        value_name = "URL",
        help_heading = "Source",
        help = "API base URL."
    )]
    pub api_base: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Source",
        help = "Path to config file (defaults to ~/.placeboard/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 's',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Fetch",
        help = "Records per request page (1-100)."
    )]
    pub page_size: Option<u32>,

    #[arg(
        long = "mp",
        visible_alias = "max-pages",
        value_name = "N",
        help_heading = "Fetch",
        help = "Abort pagination after this many pages."
    )]
    pub max_pages: Option<u32>,

    #[arg(
        short = 'r',
        long = "rt",
        visible_alias = "rate",
        value_name = "RPS",
        help_heading = "Fetch",
        help = "Request rate limit (requests per second)."
    )]
    pub rate: Option<u32>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "Fetch",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        long = "ttl",
        visible_alias = "cache-ttl",
        value_name = "SECONDS",
        help_heading = "Fetch",
        help = "Whole-result cache lifetime (0 disables caching)."
    )]
    pub cache_ttl: Option<u64>,

    #[arg(
        short = 'c',
        long = "ct",
        visible_alias = "city",
        value_name = "NAME",
        action = ArgAction::Append,
        help_heading = "Filters",
        help = "Only keep places in this city (repeatable)."
    )]
    pub city: Vec<String>,

    #[arg(
        short = 'g',
        long = "cat",
        visible_alias = "category",
        value_name = "NAME",
        help_heading = "Filters",
        help = "Only keep places with this exact category."
    )]
    pub category: Option<String>,

    #[arg(
        short = 'b',
        long = "tag",
        visible_alias = "sub-category",
        value_name = "NAME",
        action = ArgAction::Append,
        help_heading = "Filters",
        help = "Only keep places carrying this tag (repeatable, any match)."
    )]
    pub sub_category: Vec<String>,

    #[arg(
        long = "cu",
        visible_alias = "cuisine",
        value_name = "NAME",
        action = ArgAction::Append,
        help_heading = "Filters",
        help = "Only keep places with this cuisine (repeatable, any match)."
    )]
    pub cuisine: Vec<String>,

    #[arg(
        short = 'V',
        long = "vis",
        visible_alias = "visited",
        value_name = "STATE",
        help_heading = "Filters",
        help = "Filter by visited state (yes, no, all)."
    )]
    pub visited: Option<String>,

    #[arg(
        long = "res",
        visible_alias = "reservation",
        value_name = "STATE",
        help_heading = "Filters",
        help = "Filter by reservation-required state (yes, no, all)."
    )]
    pub reservation: Option<String>,

    #[arg(
        short = 'p',
        long = "pr",
        visible_alias = "price",
        value_name = "SET",
        help_heading = "Filters",
        help = "Price ranges to keep (comma-separated, e.g. $,$$)."
    )]
    pub price: Option<String>,

    #[arg(
        short = 'm',
        long = "mr",
        visible_alias = "min-rating",
        value_name = "N",
        help_heading = "Filters",
        help = "Minimum rating; unrated places rank as zero."
    )]
    pub min_rating: Option<f64>,

    #[arg(
        short = 'q',
        long = "se",
        visible_alias = "search",
        value_name = "REGEX",
        help_heading = "Filters",
        help = "Case-insensitive search across names, notes, and tags."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'S',
        long = "sb",
        visible_alias = "sort-by",
        value_name = "KEY",
        help_heading = "Display",
        help = "Sort key (name, city, rating, visit-date)."
    )]
    pub sort_by: Option<String>,

    #[arg(
        short = 'O',
        long = "so",
        visible_alias = "sort-order",
        value_name = "ORDER",
        help_heading = "Display",
        help = "Sort order (asc, desc)."
    )]
    pub sort_order: Option<String>,

    #[arg(
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Display",
        help = "Page of results to print (1-based)."
    )]
    pub page: Option<u32>,

    #[arg(
        long = "pp",
        visible_alias = "per-page",
        value_name = "N",
        help_heading = "Display",
        help = "Places per page (0 prints everything)."
    )]
    pub per_page: Option<u32>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write results to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, csv, html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "version",
        action = ArgAction::Version,
        help = "Print version"
    )]
    pub version: Option<bool>,
}
