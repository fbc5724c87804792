//! # Provenance Benchmarks
//!
//! | Subsystem | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | shared-crypto | fingerprint | linear in input size |
//! | pv-02 Consensus | tally | linear in votes |
//! | pv-03 Ledger | add, grant, revoke | constant per mutation |
//! | pv-03 Ledger | get_accessible | linear in owned + granted |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pv_01_detector::Vote;
use pv_02_consensus::tally;
use pv_03_ledger::{GrantPolicy, InMemoryKVStore, Ledger, LedgerApi};
use shared_crypto::HashEngine;
use shared_types::{ContentId, FixedTimeSource, Identity};

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto-fingerprint");
    for size in [1024usize, 64 * 1024, 1024 * 1024] {
        let data = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| HashEngine::compute(black_box(data)))
        });
    }
    group.finish();
}

fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("pv-02-tally");
    for nodes in [3usize, 15, 101] {
        let votes: Vec<Vote> = (0..nodes)
            .filter_map(|i| {
                if i % 3 == 0 {
                    Vote::fake(0.6).ok()
                } else {
                    Vote::real(0.9).ok()
                }
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &votes, |b, votes| {
            b.iter(|| tally(black_box(votes), 0.5))
        });
    }
    group.finish();
}

fn ledger_with(records: usize) -> (Ledger<InMemoryKVStore, FixedTimeSource>, Identity) {
    let mut ledger = Ledger::new(
        InMemoryKVStore::new(),
        FixedTimeSource(1_700_000_000),
        GrantPolicy::OwnerOnly,
    );
    let owner = Identity::new("0xowner");
    for i in 0..records {
        let bytes = format!("record {}", i);
        if let Ok(fingerprint) = HashEngine::compute(bytes.as_bytes()) {
            let _ = ledger.add(&owner, &ContentId::new(format!("b3{:08x}", i)), &fingerprint);
        }
    }
    (ledger, owner)
}

fn bench_ledger(c: &mut Criterion) {
    let mut group = c.benchmark_group("pv-03-ledger");

    group.bench_function("grant_revoke_cycle", |b| {
        let (mut ledger, owner) = ledger_with(1);
        let id = ContentId::new(format!("b3{:08x}", 0));
        let viewer = Identity::new("0xviewer");
        b.iter(|| {
            let _ = ledger.grant_access(&owner, &id, &viewer);
            let _ = ledger.revoke_access(&owner, &id, &viewer);
        })
    });

    for records in [10usize, 100, 1000] {
        let (ledger, owner) = ledger_with(records);
        group.bench_with_input(
            BenchmarkId::new("get_accessible", records),
            &owner,
            |b, owner| b.iter(|| ledger.get_accessible(black_box(owner))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fingerprint, bench_tally, bench_ledger);
criterion_main!(benches);
