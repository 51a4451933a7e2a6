use crate::responsibility::Responsibilities;
use crate::{memory::*, Dataset, InitConfig, InitError};
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, config: &InitConfig<'_, T>) -> Result<Responsibilities<T>, InitError> {
    // index::sample returns the indices in the order they were drawn
    let selection = rand::seq::index::sample(config.rnd.borrow_mut().deref_mut(), dataset.sample_cnt, k).into_vec();
    Responsibilities::from_selection(&selection, dataset.sample_cnt, k)
}
