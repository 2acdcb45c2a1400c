use criterion::{Criterion, criterion_group, criterion_main};

fn insert(c: &mut Criterion) {
    let mut map = remerge::Map::<usize, ()>::new();
    c.bench_function("remerge_insert", |b| {
        b.iter(|| {
            for k in 0..100 {
                map.insert(k, ());
            }
        })
    });
    let mut tree = rbtree::RBTree::<usize, ()>::new();
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            for k in 0..100 {
                tree.insert(k, ());
            }
        })
    });
}

fn insert_remove(c: &mut Criterion) {
    c.bench_function("remerge_insert_remove", |b| {
        b.iter(|| {
            let mut map = remerge::Map::<usize, ()>::new();
            for k in 0..100 {
                map.insert((k * 37) % 100, ());
            }
            for k in 0..100 {
                map.remove(&k);
            }
        })
    });
    c.bench_function("rbtree_insert_remove", |b| {
        b.iter(|| {
            let mut tree = rbtree::RBTree::<usize, ()>::new();
            for k in 0..100 {
                tree.insert((k * 37) % 100, ());
            }
            for k in 0..100 {
                tree.remove(&k);
            }
        })
    });
}

fn multiset(c: &mut Criterion) {
    c.bench_function("remerge_multiset_duplicates", |b| {
        b.iter(|| {
            let mut set = remerge::MultiSet::<usize>::new();
            for k in 0..100 {
                set.insert(k % 10);
            }
            set.count(&5)
        })
    });
}

criterion_group!(benches, insert, insert_remove, multiset);
criterion_main!(benches);
