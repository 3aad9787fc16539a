use crate::cli::args::CliArgs;
use crate::query::{SortKey, SortOrder, TriState};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page_size) = args.page_size {
        if page_size == 0 || page_size > 100 {
            return Err("invalid page-size, expected 1-100".to_string());
        }
    }
    if let Some(max_pages) = args.max_pages {
        if max_pages == 0 {
            return Err("invalid max-pages, expected positive integer".to_string());
        }
    }
    if let Some(rate) = args.rate {
        if rate == 0 {
            return Err("invalid rate, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.visited.as_deref() {
        TriState::parse(raw)
            .ok_or_else(|| format!("invalid --visited '{raw}', expected yes, no, or all"))?;
    }
    if let Some(raw) = args.reservation.as_deref() {
        TriState::parse(raw)
            .ok_or_else(|| format!("invalid --reservation '{raw}', expected yes, no, or all"))?;
    }
    if let Some(raw) = args.price.as_deref() {
        crate::utils::parse_name_set_csv(raw)
            .map_err(|e| format!("invalid --price '{raw}': {e}"))?;
    }
    if let Some(value) = args.min_rating {
        if !(0.0..=5.0).contains(&value) {
            return Err(format!("invalid --min-rating '{value}', expected 0-5"));
        }
    }
    if let Some(raw) = args.search.as_deref() {
        crate::utils::build_search_regex(raw)
            .map_err(|e| format!("invalid --search '{raw}': {e}"))?;
    }
    if let Some(raw) = args.sort_by.as_deref() {
        SortKey::parse(raw).ok_or_else(|| {
            format!("invalid --sort-by '{raw}', expected name, city, rating, or visit-date")
        })?;
    }
    if let Some(raw) = args.sort_order.as_deref() {
        SortOrder::parse(raw)
            .ok_or_else(|| format!("invalid --sort-order '{raw}', expected asc or desc"))?;
    }
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, expected positive integer".to_string());
        }
    }
    Ok(())
}
