//! Criterion benchmarks for the record catalog.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use tempfile::NamedTempFile;

use record_catalog::{
    BalancedIndex, CatalogConfig, CatalogEngine, OrderedIndex, Record, RecordBuilder, RecordOrder,
    RecordReader, RecordWriter,
};

const WORDS: [&str; 12] = [
    "blue", "rock", "night", "river", "echo", "gold", "storm", "city", "dream", "fire", "moon",
    "road",
];

/// Random records with titles from a small vocabulary and tags from a wide pool,
/// so the affinity graph stays sparse.
fn make_records(count: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let title = format!(
                "{} {} {}",
                WORDS[rng.gen_range(0..WORDS.len())],
                WORDS[rng.gen_range(0..WORDS.len())],
                i
            );
            let creator = if rng.gen_bool(0.5) {
                format!("artist_{}", rng.gen_range(0..500))
            } else {
                String::new()
            };
            RecordBuilder::new(i as u64, title)
                .creator(creator)
                .tag(format!("tag_{}", rng.gen_range(0..200)))
                .tag(format!("tag_{}", rng.gen_range(0..200)))
                .year(rng.gen_range(1950..2025))
                .play_count(rng.gen_range(0..1000))
                .build()
        })
        .collect()
}

fn make_catalog(count: usize) -> CatalogEngine {
    CatalogEngine::from_records(CatalogConfig::default(), make_records(count)).unwrap()
}

fn bench_add_record(c: &mut Criterion) {
    let mut engine = make_catalog(2_000);
    let mut next_id = 1_000_000u64;

    c.bench_function("add_record_to_2k", |b| {
        b.iter(|| {
            let record = RecordBuilder::new(next_id, "bench record")
                .tag("tag_7")
                .build();
            next_id += 1;
            engine.add_record(record);
        })
    });
}

fn bench_find_by_id(c: &mut Criterion) {
    let engine = make_catalog(2_000);

    c.bench_function("find_by_id_2k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let id = rng.gen_range(0..2_000u64);
            let _ = engine.find_by_id(id);
        })
    });
}

fn bench_find_by_title(c: &mut Criterion) {
    let records = make_records(2_000);
    let titles: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
    let engine = CatalogEngine::from_records(CatalogConfig::default(), records).unwrap();

    c.bench_function("find_by_title_2k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let title = &titles[rng.gen_range(0..titles.len())];
            let _ = engine.find_by_title(title);
        })
    });
}

fn bench_autocomplete(c: &mut Criterion) {
    let engine = make_catalog(2_000);

    c.bench_function("autocomplete_2k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let prefix = &WORDS[rng.gen_range(0..WORDS.len())][..2];
            let _ = engine.autocomplete(prefix);
        })
    });
}

fn bench_recommend(c: &mut Criterion) {
    let engine = make_catalog(2_000);

    c.bench_function("recommend_2k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let id = rng.gen_range(0..2_000u64);
            let _ = engine.recommend(id, 5);
        })
    });
}

fn bench_top_played(c: &mut Criterion) {
    let engine = make_catalog(2_000);

    c.bench_function("top_10_most_played_2k", |b| {
        b.iter(|| {
            let _ = engine.top_by(RecordOrder::most_played(), 10);
        })
    });
}

fn bench_sorted_insert(c: &mut Criterion) {
    c.bench_function("ordered_index_sorted_insert_1k", |b| {
        b.iter(|| {
            let mut index = OrderedIndex::new();
            for key in 0..1_000u64 {
                index.insert(key, ());
            }
            index
        })
    });

    c.bench_function("balanced_index_sorted_insert_1k", |b| {
        b.iter(|| {
            let mut index = BalancedIndex::new();
            for key in 0..1_000u64 {
                index.insert(key, ());
            }
            index
        })
    });
}

fn bench_rebuild(c: &mut Criterion) {
    let records = make_records(1_000);
    let mut engine = CatalogEngine::new();

    c.bench_function("rebuild_1k", |b| {
        b.iter(|| {
            engine.rebuild(records.clone()).unwrap();
        })
    });
}

fn bench_write_file(c: &mut Criterion) {
    let records = make_records(10_000);
    let writer = RecordWriter::new();

    c.bench_function("write_file_10k", |b| {
        b.iter(|| {
            let tmp = NamedTempFile::new().unwrap();
            writer.write_to_file(&records, tmp.path()).unwrap();
        })
    });
}

fn bench_read_file(c: &mut Criterion) {
    let records = make_records(10_000);
    let tmp = NamedTempFile::new().unwrap();
    RecordWriter::new()
        .write_to_file(&records, tmp.path())
        .unwrap();

    c.bench_function("read_file_10k", |b| {
        b.iter(|| {
            let _ = RecordReader::read_from_file(tmp.path()).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_add_record,
    bench_find_by_id,
    bench_find_by_title,
    bench_autocomplete,
    bench_recommend,
    bench_top_played,
    bench_sorted_insert,
    bench_rebuild,
    bench_write_file,
    bench_read_file,
);
criterion_main!(benches);
