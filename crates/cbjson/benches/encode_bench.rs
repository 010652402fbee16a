use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::Value;

fn json_small() -> Value {
    serde_json::json!({"a": 1, "b": [true, "x"], "c": null})
}

fn json_records(rows: usize, keys: usize) -> Value {
    let mut arr = Vec::with_capacity(rows);
    for i in 0..rows {
        let mut obj = serde_json::Map::with_capacity(keys);
        for k in 0..keys {
            obj.insert(format!("k{}", k), Value::from((i + k) as i64));
        }
        obj.insert("name".into(), Value::from(format!("row {i}\twith \"quotes\"")));
        obj.insert("ratio".into(), Value::from(i as f64 / 7.0));
        arr.push(Value::Object(obj));
    }
    Value::Object(serde_json::Map::from_iter([(String::from("rows"), Value::Array(arr))]))
}

fn json_nested(depth: usize, breadth: usize) -> Value {
    fn rec(d: usize, b: usize) -> Value {
        if d == 0 {
            return Value::from(1);
        }
        let mut m = serde_json::Map::new();
        for i in 0..b {
            m.insert(format!("k{}", i), rec(d - 1, b));
        }
        Value::Object(m)
    }
    rec(depth, breadth)
}

fn long_text(len: usize) -> Value {
    let chunk = "plain ascii run, ünïcödé run, then a newline\n";
    Value::String(chunk.repeat(len / chunk.len() + 1))
}

pub fn encode_benchmarks(c: &mut Criterion) {
    let cases = [
        ("small_obj", json_small()),
        ("records_1k", json_records(1000, 4)),
        ("nested", json_nested(4, 4)),
        ("long_text_64k", long_text(64 * 1024)),
    ];
    let mut group = c.benchmark_group("encode_value");
    for (name, v) in cases {
        let s = serde_json::to_string(&v).unwrap();
        group.throughput(Throughput::Bytes(s.len() as u64));
        group.bench_function(format!("cbjson::{name}"), |b| {
            b.iter(|| black_box(cbjson::encode(black_box(&v)).unwrap()))
        });
        group.bench_function(format!("encoder_reuse::{name}"), |b| {
            b.iter_batched(
                cbjson::Encoder::new,
                |mut enc| {
                    let len = enc.encode(&v).unwrap().len();
                    black_box(len)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("serde_json::{name}"), |b| {
            b.iter(|| black_box(serde_json::to_vec(black_box(&v)).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, encode_benchmarks);
criterion_main!(benches);
