extern crate curve_clustering;

use rand::Rng;
use tracing::{error, info};

use curve_clustering::{arya, gonzalez, one_median_approx_with_options, one_median_exhaustive};
use curve_clustering::{ClusteringError, CurveSpace, Frechet, OptionalParameters, Polyline};

/// Random walks in the plane around a few shifted origins, so that the clusters are visible.
fn random_curves(n: usize, groups: usize, length: usize) -> Vec<Polyline> {
    let mut rng = rand::thread_rng();
    let origins: Vec<(f64, f64)> = (0..groups)
        .map(|_| (rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
        .collect();
    (0..n)
        .filter_map(|i| {
            let (mut x, mut y) = origins[i % groups];
            let points = (0..length)
                .map(|_| {
                    x += rng.gen_range(0.0..2.0);
                    y += rng.gen_range(-1.0..1.0);
                    (x, y)
                })
                .collect();
            Polyline::by_points(points).ok()
        })
        .collect()
}

fn run() -> Result<(), ClusteringError> {
    let curves = random_curves(60, 4, 12);
    let optional = OptionalParameters {
        seed: Some(42),
        tolerance: Some(0.01),
    };
    let space = CurveSpace::with_options(&curves, Frechet, &optional);
    info!("generated {} curves", curves.len());

    let k_center = gonzalez(4, &space, false, true)?;
    println!(
        "gonzalez: centers {} radius {:.3} ({:.3}s)",
        k_center.centers, k_center.value, k_center.running_time
    );
    if let Some(assignment) = &k_center.assignment {
        println!("{}", assignment);
    }

    let refined = arya(4, &space)?;
    println!(
        "arya: centers {} radius {:.3} summed cost {:.3} ({:.3}s)",
        refined.centers,
        refined.value,
        refined.total_cost.unwrap_or_default(),
        refined.running_time
    );

    let approx = one_median_approx_with_options(0.5, &space, &optional)?;
    println!(
        "one_median_approx: center {} cost {:.3} ({:.3}s)",
        approx.get(0),
        approx.value,
        approx.running_time
    );

    let exact = one_median_exhaustive(&space)?;
    println!(
        "one_median_exhaustive: center {} cost {:.3} ({:.3}s)",
        exact.get(0),
        exact.value,
        exact.running_time
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Err(e) = run() {
        error!("clustering failed: {}", e);
        std::process::exit(1);
    }
}
