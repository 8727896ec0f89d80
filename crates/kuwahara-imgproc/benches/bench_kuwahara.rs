use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kuwahara_image::Image;
use kuwahara_imgproc::{
    filter::{kuwahara_with_strategy, NeighborhoodSize},
    integral::IntegralImage,
    parallel::ExecutionStrategy,
};

fn bench_kuwahara(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kuwahara");

    for (width, height) in [(256usize, 224usize), (512, 448), (1024, 896)].iter() {
        // deterministic gradient with some texture
        let image_data = (0..width * height)
            .map(|i| ((i % width) * 7 + (i / width) * 3) as u8)
            .collect::<Vec<_>>();
        let image_size = [*width, *height].into();
        let image = Image::<u8, 1>::new(image_size, image_data).unwrap();
        let output = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("integral_image", format!("{}x{}", width, height)),
            &image,
            |b, i| b.iter(|| black_box(IntegralImage::new(i))),
        );

        for kernel_size in [3, 7, 15].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);
            let neighborhood = NeighborhoodSize::new(*kernel_size).unwrap();

            for (name, strategy) in [
                ("kuwahara_serial", ExecutionStrategy::Serial),
                ("kuwahara_parallel_rows", ExecutionStrategy::ParallelRows),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &(&image, &output),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        b.iter(|| {
                            black_box(kuwahara_with_strategy(
                                src,
                                &mut dst,
                                neighborhood,
                                strategy,
                            ))
                        })
                    },
                );
            }
        }
    }

    group.finish();
}

criterion_group!(benches, bench_kuwahara);
criterion_main!(benches);
