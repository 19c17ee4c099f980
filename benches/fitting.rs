use criterion::{criterion_group, criterion_main, Criterion};
use fitview::{
    config::SessionConfig,
    fit::{fit_linear, fit_quadratic},
    mapper::ScreenPoint,
    proximity::find_nearest,
    value::{Point, SteppedValues},
    PointSet, Session,
};
use std::hint::black_box;

fn gen_sample_data(n: f64) -> Vec<Point> {
    SteppedValues::new_unit(1.0..=n)
        .map(|x| Point::new(x, 5.3 * x * x + 3.0 * x + 1.0))
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let sizes = [1e2, 1e3, 1e4, 1e5];
    let samples: Vec<_> = sizes
        .iter()
        .map(|&n| CriterionTestEntry::new(&format!("n={n}"), gen_sample_data(n)))
        .collect();

    //
    // How each solver scales with data size
    println!("Benchmarking fit vs n (Linear)...");
    criterion_group_for(c, "linear_vs_n", &samples, |b, data| {
        b.iter(|| fit_linear(black_box(data)));
    });

    println!("Benchmarking fit vs n (Quadratic)...");
    criterion_group_for(c, "quadratic_vs_n", &samples, |b, data| {
        b.iter(|| fit_quadratic(black_box(data)));
    });

    //
    // A click runs the lookup, then the whole recompute cascade
    println!("Benchmarking point removal vs n...");
    criterion_group_for(c, "remove_vs_n", &samples, |b, data| {
        let points = PointSet::from_points(data.clone());
        let session: Session = Session::new(points, SessionConfig::default());
        let click = ScreenPoint::new(400.0, 300.0);
        b.iter(|| {
            find_nearest(
                black_box(click),
                session.points().as_slice(),
                session.mapper(),
                f64::INFINITY,
            )
        });
    });

    println!("Benchmarking add point vs n...");
    criterion_group_for(c, "add_vs_n", &samples, |b, data| {
        b.iter_batched(
            || Session::<f64>::new(PointSet::from_points(data.clone()), SessionConfig::default()),
            |mut session| session.add_point(Point::new(0.5, 0.5)),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

struct CriterionTestEntry<V> {
    id: String,
    values: V,
}
impl<V> CriterionTestEntry<V> {
    pub fn new(id: &str, values: V) -> Self {
        Self {
            id: id.to_string(),
            values,
        }
    }
}

fn criterion_group_for<F, V>(
    c: &mut Criterion,
    id: &str,
    samples: &[CriterionTestEntry<V>],
    runner: F,
) where
    for<'a, 'b, 'c> F: Fn(&'a mut criterion::Bencher<'b>, &'c V),
{
    let mut group = c.benchmark_group(id);
    for sample in samples {
        group.bench_with_input(&sample.id, &sample.values, &runner);
    }
    group.finish();
}
