use crate::memory::*;

/// Convergence criteria for the built-in hard clusterer ([`crate::Lloyd`]).
///
/// After every iteration, the clusterer hands its new inertia (the sum of squared distances of all samples to
/// their assigned centroid) to the strategy, which then decides whether another iteration is worth it.
#[derive(Clone, Debug)]
pub enum AbortStrategy<T: Primitive> {
	/// Stop as soon as one iteration did not improve the inertia by more than **threshold**.
	NoImprovement { threshold: T },
	/// Stop after **x** consecutive iterations, none of which improved the inertia by more than **threshold**.
	/// With **abort_on_negative** set, an iteration that made the inertia worse stops the calculation at once,
	/// otherwise it merely counts as one more iteration without improvement.
	NoImprovementForXIterations { x: usize, threshold: T, abort_on_negative: bool }
}
impl<T: Primitive> Default for AbortStrategy<T> {
	fn default() -> Self {
		AbortStrategy::NoImprovement { threshold: T::from_f64(0.0005) }
	}
}
impl<T: Primitive> AbortStrategy<T> {
	pub(crate) fn create_logic(&self) -> AbortLogic<T> {
		AbortLogic {
			strategy: self.clone(),
			prev_inertia: T::infinity(),
			stale_iterations: 0
		}
	}
}

/// Running state of an [`AbortStrategy`] during one clustering run.
pub(crate) struct AbortLogic<T: Primitive> {
	strategy: AbortStrategy<T>,
	prev_inertia: T,
	stale_iterations: usize
}
impl<T: Primitive> AbortLogic<T> {
	/// Feed the inertia of a finished iteration.
	/// Returns **true** while the calculation should continue.
	pub fn next(&mut self, inertia: T) -> bool {
		let improvement = self.prev_inertia - inertia;
		self.prev_inertia = inertia;
		match self.strategy {
			AbortStrategy::NoImprovement { threshold } => improvement > threshold,
			AbortStrategy::NoImprovementForXIterations { x, threshold, abort_on_negative } => {
				if abort_on_negative && improvement < T::zero() {
					return false;
				}
				if improvement > threshold {
					self.stale_iterations = 0;
				} else {
					self.stale_iterations += 1;
				}
				self.stale_iterations < x
			}
		}
	}
}
