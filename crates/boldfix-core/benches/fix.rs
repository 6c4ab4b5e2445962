//! Benchmarks for the fixer and scanner hot paths.
//!
//! Run with: cargo bench --package boldfix-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

use boldfix_core::{
    fix_chinese_bold, fix_project, repair_split_strong_markers, scan, scan_project,
    BoldFixConfig, ScanOptions,
};

/// A post of `paragraphs` paragraphs mixing clean text, flush bold spans,
/// literal spans and one torn marker every few paragraphs.
fn sample_post(paragraphs: usize) -> String {
    let mut post = String::from("---\ntitle: 基准测试\n---\n\n# 标题\n\n");
    for i in 0..paragraphs {
        match i % 4 {
            0 => post.push_str("这是一段普通的中文文本，没有任何粗体标记。\n\n"),
            1 => post.push_str("前缀**中文粗体**后缀，还有 **已经正确** 的写法。\n\n"),
            2 => post.push_str("这是**“引用”**内容，以及 `代码**不处理**` 片段。\n\n"),
            _ => post.push_str("这是**粗体内容*\n*结束，下一句话继续。\n\n"),
        }
    }
    post
}

fn bench_fix(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_chinese_bold");
    for paragraphs in [4, 64, 512] {
        let post = sample_post(paragraphs);
        group.throughput(Throughput::Bytes(post.len() as u64));
        group.bench_with_input(BenchmarkId::new("paragraphs", paragraphs), &post, |b, p| {
            b.iter(|| fix_chinese_bold(black_box(p)))
        });
    }

    let clean = "这是一段普通的中文文本，没有任何粗体标记。\n\n".repeat(512);
    group.throughput(Throughput::Bytes(clean.len() as u64));
    group.bench_function("no_markers", |b| b.iter(|| fix_chinese_bold(black_box(&clean))));
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let options = ScanOptions::default();
    let mut group = c.benchmark_group("scan");
    for paragraphs in [4, 64, 512] {
        let post = sample_post(paragraphs);
        group.throughput(Throughput::Bytes(post.len() as u64));
        group.bench_with_input(BenchmarkId::new("paragraphs", paragraphs), &post, |b, p| {
            b.iter(|| scan(black_box(p), black_box(&options)))
        });
    }
    group.finish();
}

fn bench_line_repair(c: &mut Criterion) {
    let post = sample_post(512);
    c.bench_function("repair_split_strong_markers", |b| {
        b.iter(|| repair_split_strong_markers(black_box(&post)))
    });
}

fn bench_project(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let posts = temp.path().join("posts");
    std::fs::create_dir_all(&posts).unwrap();
    for i in 0..50 {
        std::fs::write(
            posts.join(format!("24-01-01-10-{:02}.md", i)),
            sample_post(16),
        )
        .unwrap();
    }
    let config = BoldFixConfig::default();

    let mut group = c.benchmark_group("project");
    group.throughput(Throughput::Elements(50));
    group.bench_function("scan_project", |b| {
        b.iter(|| scan_project(black_box(temp.path()), black_box(&config)))
    });
    group.bench_function("fix_project_dry_run", |b| {
        b.iter(|| fix_project(black_box(temp.path()), black_box(&config), true))
    });
    group.finish();
}

criterion_group!(benches, bench_fix, bench_scan, bench_line_repair, bench_project);
criterion_main!(benches);
