use std::fs;
use std::path::PathBuf;

use wos2d::{
    Constant, FieldFn, PlyRecorder, PoissonParams, Rng, SegmentDomain, Solver, StatsObserver,
    Vec2,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Domain: unit square
    let domain = SegmentDomain::rectangle(1.0, 1.0);

    // Attach observers to capture walk statistics and dump the paths as PLY.
    let stats = StatsObserver::new();
    let ply = PlyRecorder::new();
    let solver = Solver::builder(&domain)
        .with_params(PoissonParams::new(8))
        .with_observer(stats.clone())
        .with_observer(ply.clone())
        .build();

    // Δu = −1 with linear Dirichlet data.
    let f = Constant(1.0);
    let g = FieldFn::new(|p: Vec2| p.x + p.y);
    let mut rng = Rng::seed_from(42);

    let query = Vec2::new(0.3, 0.6);
    let estimate = solver.poisson_dirichlet(&f, &g, &mut rng, query)?;

    let snapshot = stats.snapshot();
    println!(
        "Estimated u({query:?}) = {} ± {}",
        estimate.value, estimate.std_error
    );
    println!(
        "Walks: {}, boundary hits: {}, truncated: {} ({:.1}%), mean steps: {:.2}",
        snapshot.walks,
        snapshot.boundary_hits,
        snapshot.truncated,
        100.0 * snapshot.truncation_rate(),
        snapshot.mean_steps()
    );

    let out_path = PathBuf::from("walk.ply");
    fs::write(&out_path, ply.to_ascii())?;
    println!("Saved walk trace to {}", out_path.display());

    Ok(())
}
