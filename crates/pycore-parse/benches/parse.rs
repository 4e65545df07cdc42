use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use pycore_parse::{Mode, parse};

fn benchmark_parser(c: &mut Criterion) {
    let inputs = [
        ("Simple", "def foo():\n    return 42\n"),
        (
            "Medium",
            r#"
from dataclasses import dataclass


@dataclass
class Point:
    x: float
    y: float = 0.0

    def scale(self, factor, /, *, round_to=None):
        if round_to is not None and factor > 1:
            return Point(round(self.x * factor, round_to), self.y)
        elif factor == 1:
            return self
        else:
            return Point(self.x * factor, self.y * factor)


def describe(shape):
    match shape:
        case Point(x=0, y=0):
            return "origin"
        case [Point() as first, *rest] if rest:
            return f"{first} and {len(rest)} more"
        case {"kind": kind, **extra}:
            return kind
        case _:
            return None


totals = {name: sum(v for v in values if v) for name, values in data.items()}
"#,
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, code) in inputs {
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), code, |b, code| {
            b.iter(|| black_box(parse(code, Mode::Module)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
