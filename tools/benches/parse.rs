use criterion::{black_box, criterion_group, criterion_main, Criterion};
use freqmeter_tools::inductance::Tank;
use freqmeter_tools::parse;
use freqmeter_tools::serial::Lines;

fn benchmark(c: &mut Criterion) {
    let capture = include_bytes!("./parse.txt");

    c.bench_function("split lines", |b| {
        b.iter(|| {
            for line in Lines::new(&capture[..]) {
                black_box(line.unwrap());
            }
        })
    });

    c.bench_function("parse and convert", |b| {
        let lines: Vec<_> = Lines::new(&capture[..]).map(Result::unwrap).collect();
        let tank = Tank::new(22e-9, 0.0, true);

        b.iter(|| {
            for line in &lines {
                let reading = parse::line(line).unwrap();
                black_box(tank.inductance(reading.hz));
            }
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
