use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use record::Employee;
use store::{RecordStore, StoreOptions};
use tempfile::tempdir;

const N: u32 = 1_000;

fn employee(id: u32) -> Employee {
    Employee::new(
        id,
        "Bench",
        format!("Last{}", id),
        format!("{:03}-{:02}-{:04}", id % 1000, id % 100, id % 10_000),
        1000.0 + id as f32,
        20 + (id % 40) as i32,
    )
}

fn filled_store(n: u32) -> (tempfile::TempDir, RecordStore) {
    let dir = tempdir().unwrap();
    let mut store = RecordStore::open(dir.path().join("emp.dat")).unwrap();
    for _ in 0..n {
        let id = store.next_identifier().unwrap();
        store.insert(&employee(id)).unwrap();
    }
    (dir, store)
}

fn store_insert_nosync(c: &mut Criterion) {
    c.bench_function("store_insert_nosync_1k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let store = RecordStore::open(dir.path().join("emp.dat")).unwrap();
                (dir, store)
            },
            |(_dir, mut store)| {
                for _ in 0..N {
                    let id = store.next_identifier().unwrap();
                    store.insert(&employee(id)).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn store_insert_sync(c: &mut Criterion) {
    c.bench_function("store_insert_sync_100", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let store =
                    RecordStore::open_with(dir.path().join("emp.dat"), StoreOptions { sync: true })
                        .unwrap();
                (dir, store)
            },
            |(_dir, mut store)| {
                for _ in 0..100 {
                    let id = store.next_identifier().unwrap();
                    store.insert(&employee(id)).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn store_scan_live(c: &mut Criterion) {
    let (_dir, store) = filled_store(10 * N);
    c.bench_function("store_scan_live_10k", |b| {
        b.iter(|| {
            let count = store.scan_live().unwrap().count();
            assert_eq!(count, (10 * N) as usize);
        });
    });
}

fn store_read_by_slot(c: &mut Criterion) {
    let (_dir, store) = filled_store(10 * N);
    c.bench_function("store_read_by_slot_1k", |b| {
        b.iter(|| {
            for id in (1..=10 * N).step_by(10) {
                store.read_by_slot(id).unwrap();
            }
        });
    });
}

criterion_group!(
    benches,
    store_insert_nosync,
    store_insert_sync,
    store_scan_live,
    store_read_by_slot,
);

criterion_main!(benches);
