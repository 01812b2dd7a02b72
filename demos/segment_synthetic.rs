use ndarray::{Array2, Array3};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use segclust::cluster::{Clustering, HierarchicalClustering, Kmeans, KmeansFast};
use segclust::{
    color_features, color_position_features, evaluate_segmentation, image_as_float,
    labels_to_segments,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=segclust=debug shows per-run summaries; =trace shows every round.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A noisy 24 × 32 RGB image: a bright disc on a dark background.
    let (h, w) = (24usize, 32usize);
    let noise = Normal::new(0.0, 12.0)?;
    let mut rng = StdRng::seed_from_u64(7);

    let truth = Array2::from_shape_fn((h, w), |(y, x)| {
        let (dy, dx) = (y as f64 - 12.0, x as f64 - 16.0);
        dy * dy + dx * dx < 64.0
    });
    let img = Array3::from_shape_fn((h, w, 3), |(y, x, c)| {
        let base = (if truth[[y, x]] { 200.0 } else { 40.0 }) + c as f64 * 10.0;
        (base + noise.sample(&mut rng)).clamp(0.0, 255.0) as u8
    });
    let img = image_as_float(img.view());

    let color = color_features(img.view());
    let color_pos = color_position_features(img.view());

    let runs: [(&str, Box<dyn Clustering>, &Array2<f64>); 4] = [
        ("kmeans/color", Box::new(Kmeans::new(2).with_seed(1)), &color),
        ("kmeans_fast/color", Box::new(KmeansFast::new(2).with_seed(1)), &color),
        ("kmeans_fast/color+pos", Box::new(KmeansFast::new(3).with_seed(1)), &color_pos),
        ("hierarchical/color", Box::new(HierarchicalClustering::new(2)), &color),
    ];

    for (name, model, features) in runs {
        let labels = model.fit_predict(features.view())?;
        let segments = labels_to_segments(&labels, h, w)?;
        let accuracy = evaluate_segmentation(truth.view(), segments.view())?;
        println!("{name:<24} k={} best-segment accuracy={accuracy:.3}", model.n_clusters());
    }

    Ok(())
}
