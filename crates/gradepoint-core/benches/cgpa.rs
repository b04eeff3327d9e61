use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradepoint_core::engine::{cgpa, total_grade_points, CgpaSummary};
use gradepoint_core::grade::Grade;
use gradepoint_core::model::{Course, CourseDraft, CourseId};

fn make_courses(n: usize) -> Vec<Course> {
    (0..n)
        .map(|i| {
            let grade = Grade::ALL[i % Grade::ALL.len()];
            let draft = CourseDraft {
                name: format!("Course {i}"),
                credit_hours: (i % 6) as u8 + 1,
                grade,
            };
            Course::from_draft(CourseId::from(i as u64), &draft, None)
        })
        .collect()
}

fn bench_cgpa(c: &mut Criterion) {
    let mut group = c.benchmark_group("cgpa");

    for n in [10usize, 100, 1000] {
        let courses = make_courses(n);
        group.bench_function(format!("n={n}"), |b| b.iter(|| cgpa(black_box(&courses))));
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");
    let courses = make_courses(200);

    group.bench_function("total_grade_points", |b| {
        b.iter(|| total_grade_points(black_box(&courses)))
    });

    group.bench_function("compute", |b| {
        b.iter(|| CgpaSummary::compute(black_box(&courses)))
    });

    group.finish();
}

criterion_group!(benches, bench_cgpa, bench_summary);
criterion_main!(benches);
