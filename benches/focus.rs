use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use refract::{compose, prop, Lens, Store, Value};

const DEPTH: usize = 8;
const LISTENERS: u64 = 64;

fn make_nested_state(depth: usize) -> Value {
    let mut state = Value::Int(0);
    for level in (0..depth).rev() {
        state = Value::record([
            (format!("level{level}"), state),
            (format!("sibling{level}"), Value::from("untouched")),
        ]);
    }
    state
}

fn make_chain(depth: usize) -> Lens<Value, Value> {
    compose((0..depth).map(|level| prop(format!("level{level}"))).collect())
}

fn bench_deep_view(c: &mut Criterion) {
    let state = make_nested_state(DEPTH);
    let chain = make_chain(DEPTH);

    c.bench_function("focus/deep_view", |b| {
        b.iter(|| black_box(chain.get(black_box(&state))));
    });
}

fn bench_deep_write(c: &mut Criterion) {
    let state = make_nested_state(DEPTH);
    let chain = make_chain(DEPTH);

    c.bench_function("focus/deep_write", |b| {
        b.iter(|| black_box(chain.set(Value::Int(1), black_box(&state))));
    });
}

fn bench_update_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus");
    group.throughput(Throughput::Elements(LISTENERS));
    group.bench_function("update_with_listener_fanout", |b| {
        // Fresh store per sample so listener lists do not accumulate.
        let store = Store::new(make_nested_state(DEPTH));
        let chain = make_chain(DEPTH);
        let mut subs = Vec::new();
        for _ in 0..LISTENERS {
            subs.push(store.subscribe(|state: &Value| {
                black_box(state);
            }));
        }

        b.iter(|| {
            store.update(&chain, |v| Value::Int(v.as_int().unwrap_or(0) + 1));
        });

        for sub in &subs {
            sub.unsubscribe();
        }
    });
    group.finish();
}

criterion_group!(benches, bench_deep_view, bench_deep_write, bench_update_fanout);
criterion_main!(benches);
