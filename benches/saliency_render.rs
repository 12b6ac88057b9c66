use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pack_attention::analysis_pipeline::{
    ContrastSaliencyEngine, FallbackHeatmapGenerator, HeatmapRenderer, PixelBuffer, SaliencyEngine,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn generate_mock_pack(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            // A bright label band across the top third over a gradient.
            if y < height / 3 && x > width / 4 && x < 3 * width / 4 {
                data.extend_from_slice(&[250, 220, 40, 255]);
            } else {
                let v = ((x + y) % 256) as u8;
                data.extend_from_slice(&[v, v / 2, 255 - v, 255]);
            }
        }
    }
    PixelBuffer::new(width, height, data).expect("mock pack dimensions")
}

fn benchmark_saliency_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("saliency_by_size");
    let engine = ContrastSaliencyEngine::default();

    for (width, height, label) in [(100, 100, "100x100"), (500, 500, "500x500"), (1000, 1000, "1000x1000")] {
        let image = generate_mock_pack(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            b.iter(|| engine.compute(black_box(image)));
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let image = generate_mock_pack(500, 500);
    let field = ContrastSaliencyEngine::default()
        .compute(&image)
        .expect("saliency on mock pack");

    for quality in [70u8, 92] {
        group.bench_with_input(BenchmarkId::new("jpeg_quality", quality), &quality, |b, &quality| {
            let renderer = HeatmapRenderer::saliency().with_jpeg_quality(quality);
            b.iter(|| renderer.render(black_box(&field), Some(&image)));
        });
    }

    group.bench_function("heatmap_only", |b| {
        let renderer = HeatmapRenderer::saliency();
        b.iter(|| renderer.render(black_box(&field), None));
    });

    group.finish();
}

fn benchmark_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback");
    let image = generate_mock_pack(500, 500);
    let generator = FallbackHeatmapGenerator::default();

    group.bench_function("center_top_500x500", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| generator.generate(black_box(&image), &mut rng));
    });

    group.finish();
}

criterion_group!(benches, benchmark_saliency_sizes, benchmark_render, benchmark_fallback);
criterion_main!(benches);
