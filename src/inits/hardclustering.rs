use crate::responsibility::Responsibilities;
use crate::{memory::*, Dataset, InitConfig, InitError};

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, max_iter: usize, config: &InitConfig<'_, T>) -> Result<Responsibilities<T>, InitError> {
    let labels = config.hard_clusterer.assign(dataset, k, max_iter, config)?;
    if labels.len() != dataset.sample_cnt {
        return Err(InitError::InvalidAssignmentCount { expected: dataset.sample_cnt, actual: labels.len() });
    }
    Responsibilities::from_labels(&labels, k)
}
