use crate::responsibility::Responsibilities;
use crate::{memory::*, Dataset, InitConfig, InitError};
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, local_trials: Option<usize>, config: &InitConfig<'_, T>) -> Result<Responsibilities<T>, InitError> {
    let squared_norms = dataset.squared_norms();
    let selection = config.seed_selector.select(dataset, k, &squared_norms, local_trials, config.rnd.borrow_mut().deref_mut())?;
    Responsibilities::from_selection(&selection, dataset.sample_cnt, k)
}
