use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use segy_rs::ibm::{f64_to_ibm, ibm_to_f64};
use segy_rs::{
    BinaryHeader, FormatCode, HeaderBlock, TextualHeader, TraceHeader, TraceReader, decode, encode,
};

/// Generate seismic-like samples: a decaying wavelet over slow drift.
fn seismic_samples(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.004;
            let drift = (t * 2.0).sin() * 0.1;
            let wavelet = (t * 60.0).sin() * (-t * 3.0).exp();
            (drift + wavelet) as f32
        })
        .collect()
}

/// Build a file of `traces` IBM-float traces of `n` samples each.
fn ibm_stream(traces: usize, n: usize) -> Vec<u8> {
    let mut binary = BinaryHeader::new();
    binary.set_sample_interval(4000);
    binary.set_samples_per_trace(n as u16);
    binary.set_format_code(FormatCode::IbmFloat32);

    let mut data = TextualHeader::from_text("C01 BENCH").as_bytes().to_vec();
    data.extend_from_slice(binary.as_bytes());
    let samples = seismic_samples(n);
    for _ in 0..traces {
        data.extend_from_slice(TraceHeader::new().as_bytes());
        for &s in &samples {
            data.extend_from_slice(&f64_to_ibm(f64::from(s)));
        }
    }
    data
}

fn bench_decode(c: &mut Criterion) {
    let ieee_1000 = encode(&seismic_samples(1000), 4000).unwrap();
    let ibm_1000 = ibm_stream(1, 1000);

    let mut group = c.benchmark_group("decode");

    group.throughput(Throughput::Elements(1000));

    group.bench_function("ieee/1000samp", |b| {
        b.iter(|| decode(black_box(&ieee_1000)).unwrap())
    });
    group.bench_function("ibm/1000samp", |b| {
        b.iter(|| decode(black_box(&ibm_1000)).unwrap())
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let samples = seismic_samples(1000);

    let mut group = c.benchmark_group("encode");

    group.throughput(Throughput::Elements(1000));

    group.bench_function("ieee/1000samp", |b| {
        b.iter(|| encode(black_box(&samples), 4000).unwrap())
    });

    group.finish();
}

fn bench_ibm(c: &mut Criterion) {
    let words: Vec<[u8; 4]> = seismic_samples(1000)
        .into_iter()
        .map(|s| f64_to_ibm(f64::from(s)))
        .collect();

    let mut group = c.benchmark_group("ibm");

    group.throughput(Throughput::Elements(1000));

    group.bench_function("to_f64/1000", |b| {
        b.iter(|| {
            black_box(&words)
                .iter()
                .map(|&w| ibm_to_f64(w))
                .sum::<f64>()
        })
    });

    group.finish();
}

fn bench_reader(c: &mut Criterion) {
    let stream = ibm_stream(50, 500);

    c.bench_function("reader/ibm_50traces", |b| {
        b.iter(|| {
            let traces: Vec<_> = TraceReader::new(black_box(&stream[..]))
                .unwrap()
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            assert_eq!(traces.len(), 50);
        })
    });
}

criterion_group!(benches, bench_decode, bench_encode, bench_ibm, bench_reader);
criterion_main!(benches);
