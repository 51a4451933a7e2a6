use gmm_init::*;
use rand::prelude::*;
use std::time::Instant;

fn main() -> Result<(), InitError> {
    env_logger::init();
    let (n_samples, n_components, seed) = (4000, 4, 1234);

    // Generate four blobs in the box [-10, 10)
    let mut rnd = StdRng::seed_from_u64(0);
    let centers = datasets::random_centers(n_components, 2, (-10.0f64, 10.0), &mut rnd);
    let (dataset, _) = datasets::make_blobs(n_samples / n_components, &centers, 0.6, &mut rnd)?;
    println!("Centers: {:?}", centers);

    let mut reference_time = None;
    for strategy in Strategy::all().iter() {
        let conf = InitConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();

        let start = Instant::now();
        let means = dataset.initial_means(n_components, strategy, &conf)?;
        let elapsed = start.elapsed().as_secs_f64();
        let reference = *reference_time.get_or_insert(elapsed);

        let predicted = means.predict(&dataset)?;
        let mut sizes = vec![0usize; n_components];
        predicted.iter().for_each(|&p| sizes[p] += 1);

        println!("{:<10} | Init Time {:.2}x | Means: {:?} | Nearest-mean cluster sizes: {:?}",
            strategy.alias(), elapsed / reference, means.rows().collect::<Vec<_>>(), sizes);
    }
    Ok(())
}
