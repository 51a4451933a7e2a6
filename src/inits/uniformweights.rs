use crate::responsibility::Responsibilities;
use crate::{memory::*, Dataset, InitConfig};
use rand::prelude::*;

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, config: &InitConfig<'_, T>) -> Responsibilities<T> {
    let mut res = Responsibilities::zeros(dataset.sample_cnt, k);
    let mut rnd = config.rnd.borrow_mut();
    res.values.chunks_exact_mut(k).for_each(|row| {
        row.iter_mut().for_each(|r| *r = rnd.gen_range(T::zero()..T::one()));
        let rowsum: T = row.iter().cloned().sum();
        if rowsum > T::zero() {
            row.iter_mut().for_each(|r| *r /= rowsum);
        } else {
            let uniform = T::one() / T::from_usize(k);
            row.iter_mut().for_each(|r| *r = uniform);
        }
    });
    res
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test] fn rows_sum_to_one_f32() { rows_sum_to_one::<f32>(1e-5); }
    #[test] fn rows_sum_to_one_f64() { rows_sum_to_one::<f64>(1e-12); }

    fn rows_sum_to_one<T: Primitive>(tol: T) {
        let (dataset, _) = four_corners::<T>(5);
        let conf = InitConfig::build().random_generator(StdRng::seed_from_u64(1)).build();
        let res = calculate(&dataset, 4, &conf);

        assert_eq!(res.sample_cnt(), dataset.sample_cnt());
        assert_eq!(res.k(), 4);
        for row in res.rows() {
            assert!(row.iter().all(|&r| r >= T::zero() && r <= T::one()));
            assert_approx_eq!(row.iter().cloned().sum::<T>(), T::one(), tol);
        }
    }

    #[test]
    fn means_lie_inside_the_data() {
        // soft memberships pull all means towards the overall center
        let (dataset, _) = four_corners::<f64>(5);
        let conf = InitConfig::build().random_generator(StdRng::seed_from_u64(2)).build();
        let means = calculate(&dataset, 4, &conf).weighted_means(&dataset).unwrap();
        for mean in means.rows() {
            assert!(mean.iter().all(|&v| v > 2.0 && v < 8.0), "{:?}", mean);
        }
    }
}
