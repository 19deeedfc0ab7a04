use bytering::{Exact, PowerOfTwo, RingBuffer, Sizing};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const CHUNK: usize = 64;

fn bulk_roundtrip<S: Sizing>(c: &mut Criterion, name: &str, requested: usize) {
    let mut rb = RingBuffer::<S>::new(requested).unwrap();
    let src = [0x11u8; CHUNK];
    let mut dst = [0u8; CHUNK];

    c.bench_function(name, |b| {
        b.iter(|| {
            let n = rb.add(black_box(&src));
            rb.get(&mut dst[..n]);
            black_box(&dst);
        })
    });
}

fn direct_roundtrip<S: Sizing>(c: &mut Criterion, name: &str, requested: usize) {
    let mut rb = RingBuffer::<S>::new(requested).unwrap();

    c.bench_function(name, |b| {
        b.iter(|| {
            rb.add_direct(CHUNK).fill(0x11);
            black_box(rb.get_direct(CHUNK));
        })
    });
}

fn bench_throughput(c: &mut Criterion) {
    bulk_roundtrip::<Exact>(c, "bulk_roundtrip_64b_exact", (1 << 16) + 3);
    bulk_roundtrip::<PowerOfTwo>(c, "bulk_roundtrip_64b_pow2", (1 << 16) + 3);
    direct_roundtrip::<Exact>(c, "direct_roundtrip_64b_exact", (1 << 16) + 3);
    direct_roundtrip::<PowerOfTwo>(c, "direct_roundtrip_64b_pow2", (1 << 16) + 3);
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
