//! Order-resolution benchmarks.
//!
//! Measures resolve throughput over synthetic fragment/entry grids and the
//! full pipeline stage (resolve + render + fingerprint).
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench order_resolution
//! # With a custom filter:
//! cargo bench --bench order_resolution -- resolve
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use weft::config::ExtractConfig;
use weft::model::fragment::Fragment;
use weft::model::ordering::{EntryOrdering, OrderingInput};
use weft::model::types::{EntryId, FragmentId, TargetId};
use weft::pipeline::{TargetInput, run_extract_phase};
use weft::resolve::resolve;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_fragments(n: usize) -> Vec<Fragment> {
    (0..n)
        .map(|i| {
            Fragment::new(
                FragmentId::new(&format!("./fragments/f{i:04}.css"), 0).expect("valid id"),
                format!(".f{i:04} {{ color: #000; }}"),
                (i % 7 == 0).then(|| "screen".to_owned()),
                None,
            )
        })
        .collect()
}

/// Build `m` entries over `n` fragments. Each entry references a strided
/// subset, and every third entry walks its subset backward so resolution
/// exercises both the success path and the conflict fallback.
fn make_entries(fragments: &[Fragment], m: usize) -> Vec<EntryOrdering> {
    (0..m)
        .map(|e| {
            let mut members: Vec<&Fragment> =
                fragments.iter().skip(e % 3).step_by((e % 4) + 1).collect();
            if e % 3 == 2 {
                members.reverse();
            }
            EntryOrdering::new(
                EntryId::new(&format!("entry-{e:02}")).expect("valid entry"),
                members
                    .iter()
                    .enumerate()
                    .map(|(pos, f)| (f.id().clone(), u32::try_from(pos).expect("small"))),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &(n, m) in &[(50usize, 4usize), (200, 8), (1000, 16)] {
        let fragments = make_fragments(n);
        let input = OrderingInput::PerEntry(make_entries(&fragments, m));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n}x{m}")),
            &(&fragments, &input),
            |b, (fragments, input)| {
                b.iter(|| resolve(fragments, input));
            },
        );
    }
    group.finish();
}

fn bench_extract_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_phase");
    let config = ExtractConfig::default();
    for &(n, m) in &[(200usize, 8usize), (1000, 16)] {
        let fragments = make_fragments(n);
        let entries = make_entries(&fragments, m);
        let input = TargetInput {
            target: TargetId::new("bench").expect("valid target"),
            fragments,
            orderings: OrderingInput::PerEntry(entries),
        };
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n}x{m}")),
            &input,
            |b, input| {
                b.iter(|| run_extract_phase(input, &config).expect("extraction succeeds"));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_extract_phase);
criterion_main!(benches);
