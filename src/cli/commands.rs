//! CLI command implementations.

use std::path::Path;

use crate::engine::{CatalogConfig, CatalogEngine};
use crate::format::{RecordReader, RecordWriter};
use crate::types::{CatalogError, CatalogResult, Record, RecordOrder};

/// Load a record file and build every index over it.
fn load(path: &Path, config: &CatalogConfig) -> CatalogResult<CatalogEngine> {
    let records = RecordReader::read_from_file(path)?;
    let engine = CatalogEngine::from_records(config.clone(), records)?;
    log::debug!("loaded {} records from {}", engine.len(), path.display());
    Ok(engine)
}

/// Write the catalog's records back in insertion order, so the next load
/// rebuilds the same indexes.
fn save(engine: &CatalogEngine, path: &Path) -> CatalogResult<()> {
    let records: Vec<Record> = engine
        .records_in_insertion_order()
        .into_iter()
        .cloned()
        .collect();
    RecordWriter::pretty().write_to_file(&records, path)
}

fn print_json(value: &impl serde::Serialize) -> CatalogResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_record_line(record: &Record) {
    println!(
        "[{}] {:?} by {:?} ({}, {} plays)",
        record.id,
        record.title,
        record.creator,
        record.year,
        record.play_count
    );
}

fn print_record_detail(record: &Record) {
    println!("Record {}", record.id);
    println!("  Title: {}", record.title);
    println!("  Creator: {}", record.creator);
    println!("  Collection: {}", record.collection);
    println!("  Year: {}", record.year);
    println!("  Duration: {}", format_duration(record.duration_secs));
    println!("  Tags: {}", record.tags.join(", "));
    println!("  Plays: {}", record.play_count);
    if !record.file_path.is_empty() {
        println!("  Path: {}", record.file_path);
    }
}

fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Create a new empty record file.
pub fn cmd_create(path: &Path) -> CatalogResult<()> {
    RecordWriter::pretty().write_to_file(&[], path)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Add (or replace) a record.
pub fn cmd_add(
    path: &Path,
    config: &CatalogConfig,
    record: Record,
    json: bool,
) -> CatalogResult<()> {
    let mut engine = load(path, config)?;
    let id = record.id;
    let replaced = engine.find_by_id(id).is_some();
    engine.try_add_record(record)?;
    save(&engine, path)?;

    if json {
        print_json(&serde_json::json!({"id": id, "replaced": replaced}))
    } else {
        let verb = if replaced { "Replaced" } else { "Added" };
        println!("{} record {} in {}", verb, id, path.display());
        Ok(())
    }
}

/// Remove a record.
pub fn cmd_remove(path: &Path, config: &CatalogConfig, id: u64, json: bool) -> CatalogResult<()> {
    let mut engine = load(path, config)?;
    let removed = engine.try_remove_record(id)?;
    save(&engine, path)?;

    if json {
        print_json(&removed)
    } else {
        println!("Removed record {} ({:?})", id, removed.title);
        Ok(())
    }
}

/// Show one record by ID.
pub fn cmd_get(path: &Path, config: &CatalogConfig, id: u64, json: bool) -> CatalogResult<()> {
    let engine = load(path, config)?;
    let record = engine
        .find_by_id(id)
        .ok_or(CatalogError::RecordNotFound(id))?;

    if json {
        print_json(record)
    } else {
        print_record_detail(record);
        Ok(())
    }
}

/// Show one record by exact title.
pub fn cmd_find(path: &Path, config: &CatalogConfig, title: &str, json: bool) -> CatalogResult<()> {
    let engine = load(path, config)?;
    match engine.find_by_title(title) {
        Some(record) if json => print_json(record),
        Some(record) => {
            print_record_detail(record);
            Ok(())
        }
        None => Err(CatalogError::TitleNotFound(title.to_string())),
    }
}

/// Substring search over title, creator and collection.
pub fn cmd_search(
    path: &Path,
    config: &CatalogConfig,
    query: &str,
    json: bool,
) -> CatalogResult<()> {
    let engine = load(path, config)?;
    let results = engine.search(query);

    if json {
        print_json(&results)
    } else {
        for record in &results {
            print_record_line(record);
        }
        println!("\n{} results", results.len());
        Ok(())
    }
}

/// Complete a title prefix.
pub fn cmd_complete(
    path: &Path,
    config: &CatalogConfig,
    prefix: &str,
    json: bool,
) -> CatalogResult<()> {
    let engine = load(path, config)?;
    let suggestions = engine.autocomplete(prefix);

    if json {
        print_json(&suggestions)
    } else {
        for s in &suggestions {
            println!("{}", s);
        }
        Ok(())
    }
}

/// Recommend records related to one record.
pub fn cmd_recommend(
    path: &Path,
    config: &CatalogConfig,
    id: u64,
    limit: Option<usize>,
    json: bool,
) -> CatalogResult<()> {
    let engine = load(path, config)?;
    if engine.find_by_id(id).is_none() {
        return Err(CatalogError::RecordNotFound(id));
    }
    let limit = limit.unwrap_or(config.default_recommendation_limit);
    let recs = engine.recommend_scored(id, limit);

    if json {
        let items: Vec<serde_json::Value> = recs
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.record.id,
                    "title": r.record.title,
                    "weight": r.weight,
                })
            })
            .collect();
        print_json(&items)
    } else {
        println!("Recommendations for record {}:", id);
        for r in &recs {
            println!("  {:.3}  [{}] {:?}", r.weight, r.record.id, r.record.title);
        }
        Ok(())
    }
}

/// Rank records under an ordering and show the first `k`.
pub fn cmd_top(
    path: &Path,
    config: &CatalogConfig,
    order: RecordOrder,
    k: usize,
    json: bool,
) -> CatalogResult<()> {
    let engine = load(path, config)?;
    let top = engine.top_by(order, k);

    if json {
        print_json(&top)
    } else {
        for (rank, record) in top.iter().enumerate() {
            print!("{:>3}. ", rank + 1);
            print_record_line(record);
        }
        Ok(())
    }
}

/// Count one play of a record.
pub fn cmd_play(path: &Path, config: &CatalogConfig, id: u64, json: bool) -> CatalogResult<()> {
    let mut engine = load(path, config)?;
    let plays = engine.record_play(id)?;
    save(&engine, path)?;

    if json {
        print_json(&serde_json::json!({"id": id, "play_count": plays}))
    } else {
        println!("Record {} played {} times", id, plays);
        Ok(())
    }
}

/// List every record, by ID or under an ordering.
pub fn cmd_list(
    path: &Path,
    config: &CatalogConfig,
    order: Option<RecordOrder>,
    json: bool,
) -> CatalogResult<()> {
    let engine = load(path, config)?;
    let records = match order {
        Some(order) => engine.records_sorted_by(order),
        None => engine.records(),
    };

    if json {
        print_json(&records)
    } else {
        for record in &records {
            print_record_line(record);
        }
        println!("\n{} records", records.len());
        Ok(())
    }
}

/// Index and graph statistics.
pub fn cmd_stats(path: &Path, config: &CatalogConfig, json: bool) -> CatalogResult<()> {
    let engine = load(path, config)?;
    engine.check_consistency()?;
    let stats = engine.stats();

    if json {
        print_json(&stats)
    } else {
        println!("File: {}", path.display());
        println!("Records: {}", stats.records);
        println!("Ordered index height: {}", stats.ordered_height);
        println!("Balanced index height: {}", stats.balanced_height);
        println!(
            "Prefix index: {} titles, {} nodes",
            stats.prefix_titles, stats.prefix_nodes
        );
        println!(
            "Hash index: {} keys in {} buckets (longest chain {})",
            stats.hash_keys, stats.hash_buckets, stats.longest_chain
        );
        println!(
            "Affinity graph: {} vertices, {} edges",
            stats.graph_vertices, stats.graph_edges
        );
        Ok(())
    }
}
