// Criterion benchmarks for Job Match

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use job_match::core::{normalize_skills, score_candidate_for_job, score_job_for_seeker, MatchEngine};
use job_match::models::{CandidateMatchWeights, JobMatchWeights, JobPosting, JobStatus, SeekerProfile};
use job_match::services::InMemoryStore;
use std::sync::Arc;

const SKILL_POOL: [&str; 12] = [
    "rust", "python", "sql", "aws", "docker", "kubernetes", "react", "typescript", "go", "java",
    "terraform", "postgresql",
];

fn skills_for(id: usize, count: usize) -> String {
    (0..count)
        .map(|i| SKILL_POOL[(id * 7 + i * 3) % SKILL_POOL.len()])
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_job(id: usize) -> JobPosting {
    JobPosting {
        id: id as i64,
        company_id: (id % 50) as i64,
        title: format!("Job {}", id),
        company_name: None,
        industry: Some(["Software", "Finance", "Health"][id % 3].to_string()),
        experience_level: Some(["Junior", "Mid-Level", "Senior"][id % 3].to_string()),
        skills: Some(skills_for(id, 2 + id % 5)),
        status: if id % 10 == 0 { JobStatus::Closed } else { JobStatus::Open },
        location: None,
        job_type: None,
        created_at: Utc::now(),
    }
}

fn benchmark_scoring(c: &mut Criterion) {
    let seeker_skills = normalize_skills(Some("Rust, SQL, AWS, Docker"));
    let jobs: Vec<JobPosting> = (0..1000).map(create_job).collect();
    let weights = JobMatchWeights::default();

    c.bench_function("score_1000_jobs_for_seeker", |b| {
        b.iter(|| {
            for job in &jobs {
                black_box(score_job_for_seeker(
                    black_box(&seeker_skills),
                    Some("Mid-Level"),
                    job,
                    &weights,
                ));
            }
        })
    });

    let job_skills = normalize_skills(Some("python, sql, aws"));
    let candidates: Vec<SeekerProfile> = (0..1000)
        .map(|id| SeekerProfile::new(id as i64, Some("Senior"), Some(skills_for(id, 4).as_str())))
        .collect();
    let weights = CandidateMatchWeights::default();

    c.bench_function("score_1000_candidates_for_job", |b| {
        b.iter(|| {
            for candidate in &candidates {
                black_box(score_candidate_for_job(
                    black_box(&job_skills),
                    Some("Senior"),
                    candidate,
                    &weights,
                ));
            }
        })
    });
}

fn benchmark_engine(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("recommend_jobs_for_seeker");

    for size in [100, 1000, 10000].iter() {
        let mut store = InMemoryStore::new()
            .with_profile(SeekerProfile::new(-1, Some("Mid-Level"), Some("rust, sql, aws")));
        for id in 0..*size {
            store = store.with_job(create_job(id));
        }
        let store = Arc::new(store);
        let engine = MatchEngine::new(store.clone(), store);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| runtime.block_on(engine.recommend_jobs_for_seeker(black_box(-1))))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_scoring, benchmark_engine);
criterion_main!(benches);
